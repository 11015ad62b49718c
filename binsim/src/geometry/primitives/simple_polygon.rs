use std::borrow::Borrow;

use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::convex_hull;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::edge::orientation;
use crate::geometry::primitives::{AARectangle, Edge, Point};

/// Area below which a ring is considered degenerate
const DEGENERATE_AREA: f64 = 1e-12;

/// Geometric primitive representing a polygon with a single ring and no holes.
///
/// Unlike a [simple polygon](https://en.wikipedia.org/wiki/Simple_polygon) in the strict sense,
/// the ring is not required to be free of self-intersections: randomly generated point sets
/// can produce invalid rings, which are detected with [`SPolygon::is_valid`].
#[derive(Clone, Debug, PartialEq)]
pub struct SPolygon {
    /// Vertices of the ring, without repeating the first one at the end
    pub vertices: Vec<Point>,
    /// Axis-aligned bounding box
    pub bbox: AARectangle,
    /// Absolute area enclosed by the ring
    pub area: f64,
}

impl SPolygon {
    pub fn new(mut vertices: Vec<Point>) -> Self {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            //closed ring notation, drop the repeated vertex
            vertices.pop();
        }
        assert!(!vertices.is_empty(), "polygon must have at least one vertex");

        let area = SPolygon::calculate_area(&vertices).abs();
        let bbox = AARectangle::from_points(&vertices);

        SPolygon {
            vertices,
            bbox,
            area,
        }
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge::new(self.vertices[i], self.vertices[j])
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// A ring is valid if it has at least three distinct vertices, encloses a non-zero area,
    /// and none of its edges cross, touch or fold back onto each other.
    pub fn is_valid(&self) -> bool {
        let mut ring = self.vertices.iter().copied().dedup().collect_vec();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 || SPolygon::calculate_area(&ring).abs() < DEGENERATE_AREA {
            return false;
        }

        let n = ring.len();
        let edge = |i: usize| Edge::new(ring[i], ring[(i + 1) % n]);

        for (i, j) in (0..n).tuple_combinations() {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                //the shared vertex and the two far endpoints
                let (shared, a, b) = match j == i + 1 {
                    true => (ring[j], ring[i], ring[(j + 1) % n]),
                    false => (ring[0], ring[1], ring[n - 1]),
                };
                if folds_back(&a, &shared, &b) {
                    return false;
                }
            } else if edge(i).collides_with(&edge(j)) {
                return false;
            }
        }
        true
    }

    /// Minimum-area rectangle enclosing the polygon, at any rotation.
    /// The first edge of the returned rectangle runs along its local +y axis.
    pub fn oriented_bbox(&self) -> SPolygon {
        SPolygon::new(convex_hull::minimum_area_rectangle(&self.vertices).to_vec())
    }
}

/// Two consecutive edges a->s and s->b fold back onto each other (a spike of zero width)
fn folds_back(a: &Point, shared: &Point, b: &Point) -> bool {
    let dot = (a.0 - shared.0) * (b.0 - shared.0) + (a.1 - shared.1) * (b.1 - shared.1);
    orientation(a, shared, b) == 0.0 && dot > 0.0
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let signed_area = SPolygon::calculate_area(&self.vertices);
        if signed_area.abs() < DEGENERATE_AREA {
            return self.bbox.centroid();
        }

        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = (i + 1) % self.n_vertices();
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * signed_area;
        c_y /= 6.0 * signed_area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> AARectangle {
        self.bbox.clone()
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            area: _,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //regenerate bounding box
        *bbox = AARectangle::from_points(vertices.iter());

        self
    }
}

impl<T> From<T> for SPolygon
where
    T: Borrow<AARectangle>,
{
    fn from(r: T) -> Self {
        SPolygon::new(r.borrow().corners().to_vec())
    }
}
