use serde::{Deserialize, Serialize};

use binsim::mdp::{StepRecord, Violation};

use crate::config::RolloutConfig;

/// Report of a finished rollout
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RolloutOutput {
    pub config: RolloutConfig,
    pub steps: Vec<StepRecord>,
    pub total_reward: f64,
    pub n_placed: usize,
    pub final_coverage: f64,
    /// Why the rollout ended, `None` if it ran into `max_steps`
    pub violation: Option<Violation>,
    pub elapsed_secs: f64,
}
