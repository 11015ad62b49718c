use std::sync::Arc;

use itertools::Itertools;

use crate::entities::{Bin, PlacementObject};

/// Resolution at which coordinates are compared when identifying states
const KEY_QUANTUM: f64 = 1e-6;

/// Snapshot of the packing process: the bin, the objects already placed in it and the object to place next.
///
/// Cloning a `State` creates a new object sequence but shares the placed objects themselves:
/// once committed, a placed object is never modified again.
/// The pending object is cloned in full.
#[derive(Clone, Debug)]
pub struct State {
    pub bin: Arc<Bin>,
    /// Placed objects, in the order they entered the bin
    pub objects: Vec<Arc<PlacementObject>>,
    /// Object awaiting placement
    pub next_object: PlacementObject,
}

impl State {
    pub fn new(bin: Arc<Bin>, objects: Vec<Arc<PlacementObject>>, next_object: PlacementObject) -> Self {
        Self {
            bin,
            objects,
            next_object,
        }
    }

    pub fn n_placed(&self) -> usize {
        self.objects.len()
    }

    /// Sum of the areas of all placed objects
    pub fn placed_area(&self) -> f64 {
        self.objects.iter().map(|o| o.area()).sum()
    }

    /// Fraction of the bin's area covered by placed objects (overlap is counted twice)
    pub fn coverage(&self) -> f64 {
        self.placed_area() / self.bin.area
    }

    /// Structural identity of the state, robust to floating point noise below [`KEY_QUANTUM`]
    pub fn key(&self) -> StateKey {
        let quantize = |v: f64| (v / KEY_QUANTUM).round() as i64;
        let vertices = self
            .objects
            .iter()
            .map(|o| o.as_ref())
            .chain(std::iter::once(&self.next_object))
            .map(|o| {
                o.shape()
                    .vertices
                    .iter()
                    .map(|p| (quantize(p.0), quantize(p.1)))
                    .collect_vec()
            })
            .collect_vec();

        StateKey {
            bin: (quantize(self.bin.length), quantize(self.bin.width)),
            n_placed: self.objects.len(),
            vertices,
        }
    }
}

/// Hashable fingerprint of a [`State`]: bin dimensions and the quantized vertices of every object,
/// placed objects in order followed by the pending object.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    bin: (i64, i64),
    n_placed: usize,
    vertices: Vec<Vec<(i64, i64)>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Transformation;

    fn state_with(offset: f64) -> State {
        let placed = PlacementObject::square(2.0)
            .transform_clone(&Transformation::from_translation((offset, 0.0)));
        State::new(
            Arc::new(Bin::new(10.0, 10.0)),
            vec![Arc::new(placed)],
            PlacementObject::square(1.0),
        )
    }

    #[test]
    fn key_ignores_rounding_noise() {
        assert_eq!(state_with(1.0).key(), state_with(1.0 + 1e-12).key());
        assert_ne!(state_with(1.0).key(), state_with(1.1).key());
    }

    #[test]
    fn clone_shares_placed_objects() {
        let state = state_with(0.0);
        let copy = state.clone();
        assert!(Arc::ptr_eq(&state.objects[0], &copy.objects[0]));
        assert!(Arc::ptr_eq(&state.bin, &copy.bin));
    }
}
