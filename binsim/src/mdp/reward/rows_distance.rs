use std::collections::HashMap;

use log::trace;
use rand::prelude::SmallRng;

use crate::entities::{Action, Bin, State, StateKey};
use crate::geometry::boolean::intersection_area;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::Point;
use crate::mdp::AREA_TOLERANCE;
use crate::mdp::policy::{Policy, RowsPolicy};
use crate::mdp::reward::Reward;

/// Rewards actions for landing close to where [`RowsPolicy`] would have put the object.
///
/// Infeasible actions (object sticking out of the bin or overlapping a placed object) score 0.
/// Otherwise the reward is `1 / distance` between both translations, or 1 when they coincide.
/// The canonical action is computed once per state, so scoring many candidate actions for the same state
/// advances the internal policy only once.
#[derive(Clone, Debug)]
pub struct RowsDistanceReward {
    policy: RowsPolicy,
    canonical_actions: HashMap<StateKey, Action>,
    tolerance: f64,
}

impl RowsDistanceReward {
    pub fn new(bin: &Bin, rng: SmallRng) -> Self {
        Self::with_policy(RowsPolicy::new(bin, rng))
    }

    pub fn with_policy(policy: RowsPolicy) -> Self {
        Self {
            policy,
            canonical_actions: HashMap::new(),
            tolerance: AREA_TOLERANCE,
        }
    }

    /// The action [`RowsPolicy`] takes in `state`
    pub fn canonical_action(&mut self, state: &State) -> &Action {
        let policy = &mut self.policy;
        self.canonical_actions
            .entry(state.key())
            .or_insert_with(|| policy.get_action(state))
    }

    pub fn n_cached(&self) -> usize {
        self.canonical_actions.len()
    }

    fn is_feasible(&self, state: &State, action: &Action) -> bool {
        let placed = action.placed_object();
        let shape = placed.shape();

        let contained = intersection_area(shape, &state.bin.polygon);
        if shape.area() - contained > self.tolerance {
            trace!("[REWARD] object sticks out of the bin: {contained:.4} of {:.4}", shape.area());
            return false;
        }
        !state
            .objects
            .iter()
            .any(|o| intersection_area(shape, o.shape()) > self.tolerance)
    }
}

impl Reward for RowsDistanceReward {
    fn get_reward(&mut self, state: &State, action: &Action, _next_state: &State) -> f64 {
        let canonical: Point = self.canonical_action(state).translation().into();
        let candidate: Point = action.translation().into();
        let dist = canonical.distance(&candidate);

        if !self.is_feasible(state, action) {
            return 0.0;
        }
        match dist == 0.0 {
            true => 1.0,
            false => 1.0 / dist,
        }
    }
}
