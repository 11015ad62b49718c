use crate::entities::{Action, State};
use crate::mdp::reward::Reward;

/// 1 for every transition that added an object to the bin, 0 otherwise
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantReward;

impl Reward for ConstantReward {
    fn get_reward(&mut self, state: &State, _action: &Action, next_state: &State) -> f64 {
        match next_state.n_placed() > state.n_placed() {
            true => 1.0,
            false => 0.0,
        }
    }
}
