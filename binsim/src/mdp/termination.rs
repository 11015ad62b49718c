use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::entities::State;
use crate::geometry::boolean::intersection_area;
use crate::geometry::geo_traits::Shape;

/// Absolute area tolerance for containment and overlap
pub const AREA_TOLERANCE: f64 = 1e-4;

/// Reason why a [`State`] is terminal
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Violation {
    /// Placed object `index` is not fully inside the bin
    OutOfBin {
        index: usize,
        /// Area of the object inside the bin
        contained: f64,
        area: f64,
    },
    /// Placed objects `a` and `b` overlap
    Overlap { a: usize, b: usize, area: f64 },
}

/// Decides whether the packing process has to stop
#[derive(Clone, Copy, Debug)]
pub struct Termination {
    pub tolerance: f64,
}

impl Termination {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// First violation found in `state`, if any.
    /// Containment of every object is checked before any pair is tested for overlap.
    pub fn check(&self, state: &State) -> Option<Violation> {
        let bin_shape = &state.bin.polygon;

        let out_of_bin = state.objects.iter().enumerate().find_map(|(index, o)| {
            let contained = intersection_area(o.shape(), bin_shape);
            let area = o.shape().area();
            match (contained - area).abs() > self.tolerance {
                true => Some(Violation::OutOfBin {
                    index,
                    contained,
                    area,
                }),
                false => None,
            }
        });

        let violation = out_of_bin.or_else(|| {
            state
                .objects
                .iter()
                .enumerate()
                .tuple_combinations()
                .find_map(|((a, oa), (b, ob))| {
                    let area = intersection_area(oa.shape(), ob.shape());
                    match area > self.tolerance {
                        true => Some(Violation::Overlap { a, b, area }),
                        false => None,
                    }
                })
        });

        if let Some(v) = &violation {
            debug!("[TERM] terminal state: {v:?}");
        }
        violation
    }

    pub fn done(&self, state: &State) -> bool {
        self.check(state).is_some()
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new(AREA_TOLERANCE)
    }
}
