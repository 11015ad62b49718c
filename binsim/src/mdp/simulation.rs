use std::sync::Arc;

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};

use crate::entities::{Action, Bin, PlacementObject, State};
use crate::geometry::DTransformation;
use crate::mdp::policy::Policy;
use crate::mdp::reward::{Reward, RewardKind};
use crate::mdp::{Termination, Transition, Violation};

/// Driver of the decision process: asks a policy for actions, executes them and scores them
pub struct Simulation {
    pub transition: Transition,
    pub termination: Termination,
    pub reward: RewardKind,
}

/// Outcome of a single [`Simulation::step`]
#[derive(Clone, Debug)]
pub struct Step {
    pub action: Action,
    pub next_state: State,
    pub reward: f64,
}

/// Summary of a single step of a [`Rollout`]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StepRecord {
    pub index: usize,
    /// Transformation of the action taken
    pub transform: DTransformation,
    pub reward: f64,
    /// Coverage of the bin after the step
    pub coverage: f64,
}

/// A policy rolled out until termination or until the step limit was hit
#[derive(Clone, Debug)]
pub struct Rollout {
    pub steps: Vec<StepRecord>,
    pub final_state: State,
    /// Why the final state is terminal, `None` if the step limit was hit first
    pub violation: Option<Violation>,
}

impl Rollout {
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().map(|s| s.reward).sum()
    }
}

impl Simulation {
    pub fn new(transition: Transition, termination: Termination, reward: RewardKind) -> Self {
        Self {
            transition,
            termination,
            reward,
        }
    }

    /// Empty bin of the given dimensions, with `first_object` pending.
    /// The bin is handed to the visualizer.
    pub fn initial_state(
        &mut self,
        bin_length: f64,
        bin_width: f64,
        first_object: PlacementObject,
    ) -> State {
        let viz = self.transition.visualizer_mut();
        viz.create_environment();
        viz.add_bin(bin_length, bin_width);

        State::new(Arc::new(Bin::new(bin_length, bin_width)), vec![], first_object)
    }

    pub fn step(&mut self, state: &State, policy: &mut impl Policy) -> Result<Step> {
        let action = policy.get_action(state);
        let next_state = self.transition.execute(state, &action)?;
        let reward = self.reward.get_reward(state, &action, &next_state);

        Ok(Step {
            action,
            next_state,
            reward,
        })
    }

    pub fn done(&self, state: &State) -> bool {
        self.termination.done(state)
    }

    pub fn rollout(
        &mut self,
        policy: &mut impl Policy,
        initial_state: State,
        max_steps: usize,
    ) -> Result<Rollout> {
        self.rollout_with(policy, initial_state, max_steps, |_, _, _| Ok(()))
    }

    /// [`Simulation::rollout`], calling `inspect` with every non-terminal state before acting on it
    pub fn rollout_with<F>(
        &mut self,
        policy: &mut impl Policy,
        initial_state: State,
        max_steps: usize,
        mut inspect: F,
    ) -> Result<Rollout>
    where
        F: FnMut(&mut Simulation, &State, usize) -> Result<()>,
    {
        let mut state = initial_state;
        let mut steps = vec![];
        let mut violation = self.termination.check(&state);

        while violation.is_none() && steps.len() < max_steps {
            let index = steps.len();
            inspect(self, &state, index)?;

            let Step {
                action,
                next_state,
                reward,
            } = self.step(&state, policy)?;

            steps.push(StepRecord {
                index,
                transform: action.d_transformation(),
                reward,
                coverage: next_state.coverage(),
            });
            state = next_state;
            violation = self.termination.check(&state);
        }

        let rollout = Rollout {
            steps,
            final_state: state,
            violation,
        };

        info!(
            "[SIM] rollout finished: {} steps, coverage: {:.3}, total reward: {:.3}, terminal: {}",
            rollout.steps.len(),
            rollout.final_state.coverage(),
            rollout.total_reward(),
            rollout.violation.is_some()
        );

        Ok(rollout)
    }
}
