use geo::{Area, BooleanOps, LineString, Polygon};

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::SPolygon;

/// Area of the intersection of two polygons.
///
/// Polygons whose bounding boxes do not overlap are rejected without clipping.
pub fn intersection_area(a: &SPolygon, b: &SPolygon) -> f64 {
    if !a.bbox.collides_with(&b.bbox) {
        return 0.0;
    }
    to_geo(a).intersection(&to_geo(b)).unsigned_area()
}

fn to_geo(p: &SPolygon) -> Polygon<f64> {
    let exterior = LineString::from(p.vertices.iter().map(|v| (v.0, v.1)).collect::<Vec<_>>());
    Polygon::new(exterior, vec![])
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::geometry::primitives::AARectangle;

    #[test]
    fn overlapping_squares() {
        let a = SPolygon::from(AARectangle::new(0.0, 0.0, 2.0, 2.0));
        let b = SPolygon::from(AARectangle::new(1.0, 1.0, 3.0, 3.0));
        assert!(approx_eq!(f64, intersection_area(&a, &b), 1.0, epsilon = 1e-9));
    }

    #[test]
    fn touching_squares_do_not_overlap() {
        let a = SPolygon::from(AARectangle::new(0.0, 0.0, 2.0, 2.0));
        let b = SPolygon::from(AARectangle::new(2.0, 0.0, 4.0, 2.0));
        assert!(intersection_area(&a, &b) < 1e-9);
    }

    #[test]
    fn contained_polygon() {
        let outer = SPolygon::from(AARectangle::new(-5.0, -5.0, 5.0, 5.0));
        let tri = SPolygon::new(vec![(0.0, 0.0).into(), (2.0, 0.0).into(), (0.0, 2.0).into()]);
        assert!(approx_eq!(f64, intersection_area(&outer, &tri), 2.0, epsilon = 1e-9));
    }
}
