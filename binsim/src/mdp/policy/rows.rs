use std::f64::consts::FRAC_PI_2;

use log::{debug, trace};
use rand::Rng;
use rand::prelude::SmallRng;

use crate::entities::{Action, Bin, PlacementObject, State};
use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::SPolygon;
use crate::mdp::policy::{Policy, UniformPoseSampler};
use crate::util::FPA;

/// Margin kept between an object and the left or bottom edge of the bin
pub const WIGGLE_ROOM: f64 = 0.1;

/// Position of the row currently being filled
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPackingCursor {
    /// Top of the tallest object in the current row, baseline of the next row
    pub next_y: f64,
    /// Baseline of the current row
    pub old_y: f64,
}

impl RowPackingCursor {
    /// Cursor of an empty bin: the first row starts at the bottom edge
    pub fn new(bin: &Bin) -> Self {
        Self {
            next_y: bin.bottom_edge(),
            old_y: bin.bottom_edge(),
        }
    }
}

/// Shelf packing heuristic: fills the bin in horizontal rows, left to right,
/// turning objects by 90° when that is the only way they still fit in the row.
///
/// The row cursor assumes it sees every committed placement exactly once, in order.
/// Use [`RowsPolicy::plan`] to evaluate a state without advancing the cursor.
#[derive(Clone, Debug)]
pub struct RowsPolicy {
    cursor: RowPackingCursor,
    rng: SmallRng,
}

impl RowsPolicy {
    pub fn new(bin: &Bin, rng: SmallRng) -> Self {
        Self::with_cursor(RowPackingCursor::new(bin), rng)
    }

    pub fn with_cursor(cursor: RowPackingCursor, rng: SmallRng) -> Self {
        Self { cursor, rng }
    }

    pub fn cursor(&self) -> RowPackingCursor {
        self.cursor
    }

    /// Decides where the pending object of `state` goes, given the row `cursor`.
    /// Returns the action and the cursor to use for the next placement.
    ///
    /// Candidates are tried in order: as-is in the current row, turned by 90° in the current row and,
    /// only if the row was found to be full, both orientations at the baseline of the next row.
    /// If nothing fits, the object gets a uniformly random pose.
    pub fn plan(
        state: &State,
        cursor: RowPackingCursor,
        rng: &mut impl Rng,
    ) -> (Action, RowPackingCursor) {
        let bin = state.bin.as_ref();
        let object = &state.next_object;
        let aligned = AxisAlignment::of(object);

        let RowPackingCursor {
            mut next_y,
            mut old_y,
        } = cursor;
        let mut place_x = bin.left_edge();
        let mut place_y = next_y;
        let mut adjacent_y = old_y;
        let mut row_break = false;

        for placed in state.objects.iter() {
            let bbox = &placed.shape().bbox;
            if FPA(bbox.y_min) < FPA(old_y) {
                //belongs to a previous row
                continue;
            }
            if bbox.y_max > place_y {
                place_y = bbox.y_max;
            }
            if bbox.x_max > place_x {
                place_x = bbox.x_max;
                adjacent_y = bottom_right_y(placed.shape());
                next_y = place_y;
            }

            let remaining = FPA(bin.right_edge() - place_x);
            if remaining < FPA(aligned.length) && remaining < FPA(aligned.width) {
                trace!("[ROWS] row at y: {old_y:.3} is full");
                place_x = bin.left_edge();
                adjacent_y = next_y;
                old_y = next_y;
                next_y = place_y;
                row_break = true;
                break;
            }
        }

        let x = with_wiggle(place_x, bin.left_edge());
        let y = with_wiggle(adjacent_y, bin.bottom_edge());
        let mut candidates = vec![(false, x, y), (true, x, y)];
        if row_break {
            let next_row_y = with_wiggle(next_y, bin.bottom_edge());
            candidates.extend([(false, x, next_row_y), (true, x, next_row_y)]);
        }

        let chosen = candidates.into_iter().find(|&(rotated, x, y)| {
            let (l, w) = aligned.dims(rotated);
            FPA(bin.right_edge() - x) >= FPA(l) && FPA(bin.top_edge() - y) >= FPA(w)
        });

        let transform = match chosen {
            Some((rotated, x, y)) => {
                debug!(
                    "[ROWS] placing {:.3}x{:.3} object at ({x:.3}, {y:.3}), rotated: {rotated}",
                    aligned.length, aligned.width
                );
                aligned.place(rotated, x, y)
            }
            None => {
                debug!("[ROWS] no row fits, falling back to a random pose");
                let pose = UniformPoseSampler::new(bin.bbox()).sample(rng);
                aligned.transform.clone().transform(&pose.compose())
            }
        };

        let next_cursor = RowPackingCursor { next_y, old_y };
        (Action::new(transform, object.clone()), next_cursor)
    }
}

impl Policy for RowsPolicy {
    fn get_action(&mut self, state: &State) -> Action {
        let (action, cursor) = RowsPolicy::plan(state, self.cursor, &mut self.rng);
        self.cursor = cursor;
        action
    }
}

/// Brings an object into the frame of its own minimum-area bounding rectangle,
/// centered at the origin.
struct AxisAlignment {
    /// Counter-rotation followed by centering
    transform: Transformation,
    /// Extent along x once aligned
    length: f64,
    /// Extent along y once aligned
    width: f64,
}

impl AxisAlignment {
    fn of(object: &PlacementObject) -> Self {
        let obb = object.shape().oriented_bbox();
        let (ex, ey) = obb.edge(0).direction();
        let norm = ex.hypot(ey);

        //rotation that turns the first edge of the oriented box upright
        let angle = match norm > 0.0 {
            true => {
                let theta = (ey / norm).clamp(-1.0, 1.0).acos();
                if ex > 0.0 { theta } else { -theta }
            }
            false => 0.0,
        };

        let counter_rotation = Transformation::from_rotation(angle);
        let bbox = object.shape().transform_clone(&counter_rotation).bbox;
        let center = bbox.centroid();

        Self {
            transform: counter_rotation.translate((-center.0, -center.1)),
            length: bbox.width(),
            width: bbox.height(),
        }
    }

    fn dims(&self, rotated: bool) -> (f64, f64) {
        match rotated {
            true => (self.width, self.length),
            false => (self.length, self.width),
        }
    }

    /// Full transformation putting the bottom-left corner of the (possibly rotated) box at (x, y)
    fn place(&self, rotated: bool, x: f64, y: f64) -> Transformation {
        let (l, w) = self.dims(rotated);
        let angle = if rotated { FRAC_PI_2 } else { 0.0 };
        let placement = Transformation::from_rotation_translation(angle, (x + l / 2.0, y + w / 2.0));
        self.transform.clone().transform(&placement)
    }
}

fn with_wiggle(v: f64, edge: f64) -> f64 {
    match FPA(v) == FPA(edge) {
        true => v + WIGGLE_ROOM,
        false => v,
    }
}

/// y-coordinate of the lowest vertex among the rightmost ones
fn bottom_right_y(shape: &SPolygon) -> f64 {
    let x_max = FPA(shape.bbox.x_max);
    shape
        .vertices
        .iter()
        .filter(|p| FPA(p.0) == x_max)
        .map(|p| p.1)
        .fold(f64::INFINITY, f64::min)
}
