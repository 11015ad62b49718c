use crate::entities::{Action, State};

mod area_coverage;
mod constant;
mod rows_distance;

#[doc(inline)]
pub use area_coverage::AreaCoverageReward;

#[doc(inline)]
pub use constant::ConstantReward;

#[doc(inline)]
pub use rows_distance::RowsDistanceReward;

/// Scores a transition `state --action--> next_state`
pub trait Reward {
    fn get_reward(&mut self, state: &State, action: &Action, next_state: &State) -> f64;
}

/// All available reward functions
#[derive(Clone, Debug)]
pub enum RewardKind {
    Constant(ConstantReward),
    AreaCoverage(AreaCoverageReward),
    RowsDistance(RowsDistanceReward),
}

impl Reward for RewardKind {
    fn get_reward(&mut self, state: &State, action: &Action, next_state: &State) -> f64 {
        match self {
            RewardKind::Constant(r) => r.get_reward(state, action, next_state),
            RewardKind::AreaCoverage(r) => r.get_reward(state, action, next_state),
            RewardKind::RowsDistance(r) => r.get_reward(state, action, next_state),
        }
    }
}
