use std::f64::consts::TAU;

use rand::Rng;
use rand::prelude::SmallRng;

use crate::entities::{Action, State};
use crate::geometry::DTransformation;
use crate::geometry::primitives::AARectangle;
use crate::mdp::policy::Policy;

/// Samples a `DTransformation` with a rotation uniform in [0, 2π) and a translation uniform over an `AARectangle`
#[derive(Clone, Debug)]
pub struct UniformPoseSampler {
    pub bbox: AARectangle,
}

impl UniformPoseSampler {
    pub fn new(bbox: AARectangle) -> Self {
        Self { bbox }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> DTransformation {
        let r_sample = rng.random_range(0.0..TAU);
        let x_sample = rng.random_range(self.bbox.x_min..self.bbox.x_max);
        let y_sample = rng.random_range(self.bbox.y_min..self.bbox.y_max);

        DTransformation::new(r_sample, (x_sample, y_sample))
    }
}

/// Places the pending object anywhere in the bin, at any rotation
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn get_action(&mut self, state: &State) -> Action {
        let pose = UniformPoseSampler::new(state.bin.bbox()).sample(&mut self.rng);
        Action::new(pose.compose(), state.next_object.clone())
    }
}
