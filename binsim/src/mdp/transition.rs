use std::sync::Arc;

use anyhow::Result;
use log::debug;
use rand::prelude::SmallRng;

use crate::entities::{Action, PlacementObject, State};
use crate::generation::ObjectGenerator;
use crate::util::assertions;
use crate::viz::{NoVisualizer, Visualizer};

/// Produces the next [`State`] from a state and an [`Action`], drawing a new pending object.
///
/// No feasibility checks are done here: overlapping or protruding placements are accepted
/// and left for [`Termination`](crate::mdp::Termination) and the rewards to judge.
pub struct Transition {
    generator: ObjectGenerator,
    rng: SmallRng,
    visualizer: Box<dyn Visualizer>,
}

impl Transition {
    pub fn new(generator: ObjectGenerator, rng: SmallRng) -> Self {
        Self::with_visualizer(generator, rng, Box::new(NoVisualizer))
    }

    pub fn with_visualizer(
        generator: ObjectGenerator,
        rng: SmallRng,
        visualizer: Box<dyn Visualizer>,
    ) -> Self {
        Self {
            generator,
            rng,
            visualizer,
        }
    }

    /// Commits `action`: the placed object is reported to the visualizer
    /// and the random generator advances.
    pub fn execute(&mut self, state: &State, action: &Action) -> Result<State> {
        let (next_state, placed) = advance(state, action, &self.generator, &mut self.rng)?;
        self.visualizer.add_object(&placed);
        debug!(
            "[TRANS] placed object #{} at {}",
            next_state.n_placed(),
            placed.transform().decompose()
        );
        Ok(next_state)
    }

    /// Same outcome as [`Transition::execute`], without any observable side effect.
    /// Calling it repeatedly with the same arguments yields identical states.
    pub fn speculate(&self, state: &State, action: &Action) -> Result<State> {
        let mut rng = self.rng.clone();
        let (next_state, _) = advance(state, action, &self.generator, &mut rng)?;
        Ok(next_state)
    }

    /// Draws a valid object from the generator, advancing the random generator
    pub fn sample_object(&mut self) -> Result<PlacementObject> {
        self.generator.sample_valid(&mut self.rng)
    }

    pub fn generator(&self) -> &ObjectGenerator {
        &self.generator
    }

    pub fn visualizer_mut(&mut self) -> &mut dyn Visualizer {
        self.visualizer.as_mut()
    }
}

fn advance(
    state: &State,
    action: &Action,
    generator: &ObjectGenerator,
    rng: &mut SmallRng,
) -> Result<(State, Arc<PlacementObject>)> {
    let mut next_state = state.clone();
    let placed = Arc::new(action.placed_object());
    next_state.objects.push(placed.clone());
    next_state.next_object = generator.sample_valid(rng)?;

    debug_assert!(assertions::state_extends(state, &next_state));

    Ok((next_state, placed))
}
