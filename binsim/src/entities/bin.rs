use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{AARectangle, SPolygon};

/// Fixed-size rectangular container, centered at the origin.
/// A `Bin` never changes during a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    /// Extent along the x-axis
    pub length: f64,
    /// Extent along the y-axis
    pub width: f64,
    /// The contour of the bin
    pub polygon: SPolygon,
    pub area: f64,
}

impl Bin {
    pub fn new(length: f64, width: f64) -> Self {
        assert!(
            length > 0.0 && width > 0.0,
            "bin dimensions must be positive, length: {length}, width: {width}"
        );
        let polygon = SPolygon::from(AARectangle::new(
            -length / 2.0,
            -width / 2.0,
            length / 2.0,
            width / 2.0,
        ));
        let area = polygon.area();

        Self {
            length,
            width,
            polygon,
            area,
        }
    }

    pub fn left_edge(&self) -> f64 {
        -self.length / 2.0
    }

    pub fn right_edge(&self) -> f64 {
        self.length / 2.0
    }

    pub fn bottom_edge(&self) -> f64 {
        -self.width / 2.0
    }

    pub fn top_edge(&self) -> f64 {
        self.width / 2.0
    }

    pub fn bbox(&self) -> AARectangle {
        self.polygon.bbox()
    }
}
