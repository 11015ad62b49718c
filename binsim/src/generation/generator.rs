use anyhow::Result;
use log::trace;
use rand::Rng;

use crate::SimError;
use crate::entities::PlacementObject;
use crate::generation::ObjectDistribution;

/// Draws valid objects from an [`ObjectDistribution`] by rejection sampling
#[derive(Clone, Debug)]
pub struct ObjectGenerator {
    pub distribution: ObjectDistribution,
    /// Number of draws after which sampling gives up
    pub max_attempts: usize,
}

impl ObjectGenerator {
    pub fn new(distribution: ObjectDistribution, max_attempts: usize) -> Result<Self> {
        distribution.validate()?;
        anyhow::ensure!(max_attempts > 0, "max_attempts must be at least 1");
        Ok(Self {
            distribution,
            max_attempts,
        })
    }

    /// Resamples until the drawn object has a valid polygon.
    /// Fails with [`SimError::GenerationExhausted`] once `max_attempts` draws were rejected.
    pub fn sample_valid(&self, rng: &mut impl Rng) -> Result<PlacementObject> {
        for attempt in 1..=self.max_attempts {
            let object = self.distribution.sample(rng);
            if object.shape().is_valid() {
                return Ok(object);
            }
            trace!(
                "[GEN] rejected invalid object (attempt {attempt}): {:?}",
                object.shape().vertices
            );
        }
        Err(SimError::GenerationExhausted {
            attempts: self.max_attempts,
        }
        .into())
    }
}
