use anyhow::{Result, ensure};
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::PlacementObject;
use crate::geometry::primitives::Point;

/// Shape of an object, as it can be written down in a configuration file
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "shape", content = "params")]
pub enum ShapeSpec {
    #[serde(rename = "square")]
    Square { side: f64 },
    #[serde(rename = "rectangle")]
    Rectangle { length: f64, width: f64 },
    #[serde(rename = "polygon")]
    Polygon { points: Vec<(f64, f64)> },
}

impl ShapeSpec {
    pub fn build(&self) -> PlacementObject {
        match self {
            ShapeSpec::Square { side } => PlacementObject::square(*side),
            ShapeSpec::Rectangle { length, width } => PlacementObject::rectangle(*length, *width),
            ShapeSpec::Polygon { points } => {
                PlacementObject::polygon(points.iter().map(|&p| Point::from(p)).collect())
            }
        }
    }
}

/// Distribution from which pending objects are drawn.
/// All ranges are half-open: `[min, max)`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", content = "params")]
pub enum ObjectDistribution {
    /// Squares with an integer side
    #[serde(rename = "square")]
    Square { min_side: u32, max_side: u32 },
    /// Rectangles with integer length and width, drawn independently
    #[serde(rename = "rectangle")]
    Rectangle { min_side: u32, max_side: u32 },
    /// Polygons through a bag of random integer points.
    /// The ring visits the points in the order they were drawn, so it can self-intersect.
    #[serde(rename = "polygon")]
    Polygon {
        min_vertices: usize,
        max_vertices: usize,
        /// Side of the origin-centered square the points are drawn strictly inside of
        min_bound: u32,
        max_bound: u32,
    },
    /// Always the same shape
    #[serde(rename = "fixed")]
    Fixed { shape: ShapeSpec },
}

impl ObjectDistribution {
    pub fn validate(&self) -> Result<()> {
        match self {
            ObjectDistribution::Square { min_side, max_side }
            | ObjectDistribution::Rectangle { min_side, max_side } => {
                ensure!(*min_side > 0, "side lengths must be positive");
                ensure!(min_side < max_side, "empty side range: [{min_side}, {max_side})");
            }
            ObjectDistribution::Polygon {
                min_vertices,
                max_vertices,
                min_bound,
                max_bound,
            } => {
                ensure!(*min_vertices >= 3, "a polygon needs at least 3 vertices");
                ensure!(
                    min_vertices < max_vertices,
                    "empty vertex range: [{min_vertices}, {max_vertices})"
                );
                ensure!(*min_bound > 0, "bounds must be positive");
                ensure!(min_bound < max_bound, "empty bound range: [{min_bound}, {max_bound})");
            }
            ObjectDistribution::Fixed { shape } => match shape {
                ShapeSpec::Square { side } => ensure!(*side > 0.0, "side must be positive"),
                ShapeSpec::Rectangle { length, width } => {
                    ensure!(*length > 0.0 && *width > 0.0, "dimensions must be positive")
                }
                ShapeSpec::Polygon { points } => {
                    ensure!(points.len() >= 3, "a polygon needs at least 3 vertices")
                }
            },
        }
        Ok(())
    }

    /// Draws a single object, which is not guaranteed to be valid.
    /// Objects are always created at the origin, unrotated.
    pub fn sample(&self, rng: &mut impl Rng) -> PlacementObject {
        match self {
            ObjectDistribution::Square { min_side, max_side } => {
                let side = rng.random_range(*min_side..*max_side);
                PlacementObject::square(side as f64)
            }
            ObjectDistribution::Rectangle { min_side, max_side } => {
                let length = rng.random_range(*min_side..*max_side);
                let width = rng.random_range(*min_side..*max_side);
                PlacementObject::rectangle(length as f64, width as f64)
            }
            ObjectDistribution::Polygon {
                min_vertices,
                max_vertices,
                min_bound,
                max_bound,
            } => {
                let n_vertices = rng.random_range(*min_vertices..*max_vertices);
                let bound = rng.random_range(*min_bound..*max_bound);
                PlacementObject::polygon(bag_of_points(n_vertices, bound, rng))
            }
            ObjectDistribution::Fixed { shape } => shape.build(),
        }
    }
}

impl Default for ObjectDistribution {
    fn default() -> Self {
        ObjectDistribution::Polygon {
            min_vertices: 3,
            max_vertices: 8,
            min_bound: 2,
            max_bound: 10,
        }
    }
}

/// `n` integer points strictly inside the origin-centered square with side `bound`
fn bag_of_points(n: usize, bound: u32, rng: &mut impl Rng) -> Vec<Point> {
    //largest integer coordinate strictly below bound/2
    let half = (bound as i64 - 1) / 2;
    (0..n)
        .map(|_| {
            let x = rng.random_range(-half..=half);
            let y = rng.random_range(-half..=half);
            Point(x as f64, y as f64)
        })
        .collect_vec()
}
