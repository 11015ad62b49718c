use std::f64::consts::FRAC_PI_2;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{AARectangle, Point};

/// Filters a set of points to only include those that are part of the convex hull
pub fn convex_hull_from_points(mut points: Vec<Point>) -> Vec<Point> {
    //https://en.wikibooks.org/wiki/Algorithm_Implementation/Geometry/Convex_hull/Monotone_chain

    //sort the points by x coordinate, then y
    points.sort_by_key(|p| (OrderedFloat(p.0), OrderedFloat(p.1)));
    points.dedup();

    if points.len() < 3 {
        return points;
    }

    let mut lower_hull = points
        .iter()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));
    let mut upper_hull = points
        .iter()
        .rev()
        .fold(vec![], |hull, p| grow_convex_hull(hull, *p));

    //First and last element of both hull parts are the same point
    upper_hull.pop();
    lower_hull.pop();

    lower_hull.append(&mut upper_hull);
    lower_hull
}

fn grow_convex_hull(mut h: Vec<Point>, next: Point) -> Vec<Point> {
    //pop all points from the hull which will be made irrelevant due to the new point
    while h.len() >= 2 && cross(h[h.len() - 2], h[h.len() - 1], next) <= 0.0 {
        h.pop();
    }
    h.push(next);
    h
}

fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Minimum-area enclosing rectangle of a set of points, at any rotation.
///
/// One side of the optimal rectangle is always collinear with an edge of the convex hull,
/// so every hull edge is tried as a reference frame. The frame rotation is normalized to [0, π/2),
/// which makes axis-aligned input come back unrotated.
///
/// Corners are returned as bottom-left, top-left, top-right, bottom-right *in the rectangle's own frame*,
/// so the first edge always runs along the rectangle's local +y axis.
pub fn minimum_area_rectangle(points: &[Point]) -> [Point; 4] {
    let hull = convex_hull_from_points(points.to_vec());
    assert!(!hull.is_empty(), "no points to enclose");

    let n = hull.len();
    let frame_angles = (0..n)
        .map(|i| (hull[i], hull[(i + 1) % n]))
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (b.1 - a.1).atan2(b.0 - a.0).rem_euclid(FRAC_PI_2));

    //axis-aligned frame first, so it wins ties
    let (angle, local_bbox) = std::iter::once(0.0)
        .chain(frame_angles)
        .map(|angle| {
            let to_frame = Transformation::from_rotation(-angle);
            let in_frame = hull.iter().map(|p| p.transform_clone(&to_frame)).collect_vec();
            (angle, AARectangle::from_points(&in_frame))
        })
        .min_by_key(|(_, bbox)| OrderedFloat(bbox.area()))
        .expect("at least one frame");

    let from_frame = Transformation::from_rotation(angle);
    local_bbox.corners().map(|c| c.transform_clone(&from_frame))
}
