use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use binsim::generation::{ObjectDistribution, ShapeSpec};

use crate::io::svg_util::SvgDrawOptions;

/// Configuration of a single rollout
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RolloutConfig {
    /// Extent of the bin along the x-axis
    pub bin_length: f64,
    /// Extent of the bin along the y-axis
    pub bin_width: f64,
    /// Seed for the PRNG. If undefined, the rollout will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    pub policy: PolicyType,
    pub reward: RewardType,
    /// Object pending in the initial state. If undefined, it is drawn from `object_distribution`
    #[serde(default)]
    pub first_object: Option<ShapeSpec>,
    #[serde(default)]
    pub object_distribution: ObjectDistribution,
    /// Number of rejected draws after which the generation of a new object is given up
    pub max_generation_attempts: usize,
    /// Hard limit on the length of the rollout
    pub max_steps: usize,
    /// Reward landscapes of the pending object. If undefined, none are computed
    #[serde(default)]
    pub heatmap: Option<HeatmapConfig>,
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl RolloutConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.bin_length > 0.0 && self.bin_width > 0.0,
            "bin dimensions must be positive, length: {}, width: {}",
            self.bin_length,
            self.bin_width
        );
        ensure!(self.max_generation_attempts > 0, "max_generation_attempts must be positive");
        self.object_distribution.validate()?;
        if let Some(heatmap) = &self.heatmap {
            ensure!(heatmap.n_rotations > 0, "heatmap needs at least one rotation");
            ensure!(heatmap.every_step > 0, "heatmap interval must be positive");
        }
        Ok(())
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            bin_length: 20.0,
            bin_width: 20.0,
            prng_seed: Some(0),
            policy: PolicyType::Rows,
            reward: RewardType::RowsDistance,
            first_object: None,
            object_distribution: ObjectDistribution::default(),
            max_generation_attempts: 10_000,
            max_steps: 1000,
            heatmap: None,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PolicyType {
    #[serde(rename = "identity")]
    Identity,
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "rows")]
    Rows,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RewardType {
    #[serde(rename = "constant")]
    Constant,
    #[serde(rename = "area_coverage")]
    AreaCoverage,
    #[serde(rename = "rows_distance")]
    RowsDistance,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapConfig {
    /// Number of equally spaced rotations of the pending object
    pub n_rotations: usize,
    /// A landscape is computed for every state whose index is a multiple of this
    pub every_step: usize,
}
