use crate::entities::{Action, State};
use crate::mdp::reward::Reward;

/// Gain in covered area, as a fraction of the bin's area
#[derive(Clone, Copy, Debug, Default)]
pub struct AreaCoverageReward;

impl Reward for AreaCoverageReward {
    fn get_reward(&mut self, state: &State, _action: &Action, next_state: &State) -> f64 {
        (next_state.placed_area() - state.placed_area()) / state.bin.area
    }
}
