use std::f64::consts::TAU;

use anyhow::Result;
use log::debug;
use ndarray::Array2;

use crate::entities::{Action, State};
use crate::geometry::Transformation;
use crate::mdp::Transition;
use crate::mdp::reward::Reward;

/// Integer grid covering the bin, `[-half_length, half_length) x [-half_width, half_width)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub half_length: i64,
    pub half_width: i64,
}

impl Grid {
    pub fn of(state: &State) -> Self {
        Self {
            half_length: (state.bin.length / 2.0).trunc() as i64,
            half_width: (state.bin.width / 2.0).trunc() as i64,
        }
    }

    /// Shape of the reward matrices: (rows along y, columns along x)
    pub fn shape(&self) -> (usize, usize) {
        (2 * self.half_width as usize, 2 * self.half_length as usize)
    }

    pub fn points(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (-self.half_width..self.half_width)
            .flat_map(move |y| (-self.half_length..self.half_length).map(move |x| (x, y)))
    }

    /// Matrix index of grid point (x, y)
    pub fn index(&self, (x, y): (i64, i64)) -> [usize; 2] {
        [(y + self.half_width) as usize, (x + self.half_length) as usize]
    }
}

/// Reward of moving the pending object to every point of the [`Grid`], for `n_rotations` equally spaced rotations.
///
/// The object is rotated around its reference point, which is then moved to the grid point.
/// Every candidate goes through [`Transition::speculate`], so neither the transition nor the visualizer is affected.
/// Entry `[y + half_width, x + half_length]` of the `i`-th matrix holds the reward for rotation `i * 2π / n_rotations`.
pub fn scan(
    state: &State,
    transition: &Transition,
    reward: &mut impl Reward,
    n_rotations: usize,
) -> Result<Vec<Array2<f64>>> {
    let grid = Grid::of(state);
    let reference = state.next_object.reference_point();

    (0..n_rotations)
        .map(|i| {
            let angle = i as f64 * TAU / n_rotations as f64;
            let mut rewards = Array2::zeros(grid.shape());

            for (x, y) in grid.points() {
                let transform = Transformation::from_translation((-reference.0, -reference.1))
                    .rotate(angle)
                    .translate((x as f64, y as f64));
                let action = Action::new(transform, state.next_object.clone());
                let next_state = transition.speculate(state, &action)?;
                rewards[grid.index((x, y))] = reward.get_reward(state, &action, &next_state);
            }

            debug!(
                "[LANDSCAPE] rotation {:.1}°: max reward {:.3}",
                angle.to_degrees(),
                rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            );
            Ok(rewards)
        })
        .collect()
}
