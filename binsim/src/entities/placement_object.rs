use std::sync::Arc;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{Shape, Transformable};
use crate::geometry::primitives::{AARectangle, Point, SPolygon};

/// What kind of shape a [`PlacementObject`] was built from.
/// Squares and rectangles carry their dimensions, arbitrary polygons derive them from their bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    Square { side: f64 },
    Rectangle { length: f64, width: f64 },
    Polygon,
}

/// A polygon that can be placed in a [`Bin`](crate::entities::Bin).
///
/// The object keeps the original, untransformed polygon next to the cumulative
/// transformation applied to it. `shape` is always `base` transformed by `transform`.
/// Cloning yields an independent object: only the immutable base polygon is shared.
#[derive(Clone, Debug)]
pub struct PlacementObject {
    pub kind: ShapeKind,
    /// Polygon before any transformation
    base: Arc<SPolygon>,
    /// Cumulative transformation from `base` to `shape`
    transform: Transformation,
    /// Polygon in world coordinates
    shape: SPolygon,
}

impl PlacementObject {
    pub fn new(kind: ShapeKind, base: SPolygon, transform: Transformation) -> Self {
        let shape = base.transform_clone(&transform);
        Self {
            kind,
            base: Arc::new(base),
            transform,
            shape,
        }
    }

    /// Square with side `side`, centered at the origin
    pub fn square(side: f64) -> Self {
        let h = side / 2.0;
        let base = SPolygon::from(AARectangle::new(-h, -h, h, h));
        PlacementObject::new(ShapeKind::Square { side }, base, Transformation::empty())
    }

    /// Rectangle of `length` along x and `width` along y, centered at the origin
    pub fn rectangle(length: f64, width: f64) -> Self {
        let (hl, hw) = (length / 2.0, width / 2.0);
        let base = SPolygon::from(AARectangle::new(-hl, -hw, hl, hw));
        PlacementObject::new(
            ShapeKind::Rectangle { length, width },
            base,
            Transformation::empty(),
        )
    }

    /// Arbitrary polygon, the points are taken as-is (no centering)
    pub fn polygon(points: Vec<Point>) -> Self {
        PlacementObject::new(
            ShapeKind::Polygon,
            SPolygon::new(points),
            Transformation::empty(),
        )
    }

    /// Applies `t` on top of the current transformation.
    /// The cumulative transformation becomes `t ∘ self.transform`, the base polygon is left untouched.
    pub fn apply_transform(&mut self, t: &Transformation) -> &mut Self {
        self.transform = self.transform.clone().transform(t);
        self.shape = self.base.transform_clone(&self.transform);
        self
    }

    pub fn transform_clone(&self, t: &Transformation) -> Self {
        let mut clone = self.clone();
        clone.apply_transform(t);
        clone
    }

    pub fn shape(&self) -> &SPolygon {
        &self.shape
    }

    pub fn base(&self) -> &SPolygon {
        &self.base
    }

    pub fn transform(&self) -> &Transformation {
        &self.transform
    }

    /// Where the origin of the base polygon ended up
    pub fn reference_point(&self) -> Point {
        self.transform.translation().into()
    }

    /// Extent along the x-axis
    pub fn length(&self) -> f64 {
        match self.kind {
            ShapeKind::Square { side } => side,
            ShapeKind::Rectangle { length, .. } => length,
            ShapeKind::Polygon => self.shape.bbox.width(),
        }
    }

    /// Extent along the y-axis
    pub fn width(&self) -> f64 {
        match self.kind {
            ShapeKind::Square { side } => side,
            ShapeKind::Rectangle { width, .. } => width,
            ShapeKind::Polygon => self.shape.bbox.height(),
        }
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn square_corners_start_bottom_left() {
        let sq = PlacementObject::square(4.0);
        assert_eq!(
            sq.shape().vertices,
            vec![
                Point(-2.0, -2.0),
                Point(-2.0, 2.0),
                Point(2.0, 2.0),
                Point(2.0, -2.0)
            ]
        );
        assert!(approx_eq!(f64, sq.area(), 16.0));
    }

    #[test]
    fn transforms_accumulate_without_touching_base() {
        let mut rect = PlacementObject::rectangle(4.0, 2.0);
        rect.apply_transform(&Transformation::from_rotation(FRAC_PI_2));
        rect.apply_transform(&Transformation::from_translation((5.0, 1.0)));

        assert_eq!(rect.base().bbox, AARectangle::new(-2.0, -1.0, 2.0, 1.0));
        let bbox = &rect.shape().bbox;
        assert!(approx_eq!(f64, bbox.x_min, 4.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_max, 3.0, epsilon = 1e-9));
        assert_eq!(rect.reference_point(), Point(5.0, 1.0));
        //kind dimensions are constants
        assert_eq!((rect.length(), rect.width()), (4.0, 2.0));
    }

    #[test]
    fn clones_are_independent() {
        let original = PlacementObject::square(2.0);
        let moved = original.transform_clone(&Transformation::from_translation((3.0, 0.0)));
        assert_eq!(original.reference_point(), Point(0.0, 0.0));
        assert_eq!(moved.reference_point(), Point(3.0, 0.0));
    }

    #[test]
    fn polygon_dimensions_follow_bbox() {
        let tri = PlacementObject::polygon(vec![Point(0.0, 0.0), Point(3.0, 0.0), Point(0.0, 2.0)]);
        assert_eq!((tri.length(), tri.width()), (3.0, 2.0));
        assert!(approx_eq!(f64, tri.area(), 3.0));
    }
}
