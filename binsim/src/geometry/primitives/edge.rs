use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Edge { start, end }
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Direction vector from start to end
    pub fn direction(&self) -> (f64, f64) {
        (self.end.0 - self.start.0, self.end.1 - self.start.1)
    }

    /// Whether `p` lies on the segment, assuming it is collinear with it
    fn covers_collinear(&self, p: &Point) -> bool {
        p.0 >= self.x_min() && p.0 <= self.x_max() && p.1 >= self.y_min() && p.1 <= self.y_max()
    }
}

impl CollidesWith<Edge> for Edge {
    /// Touching (including collinear overlap and shared endpoints) counts as a collision.
    fn collides_with(&self, other: &Edge) -> bool {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max())
            || f64::max(self.y_min(), other.y_min()) > f64::min(self.y_max(), other.y_max())
        {
            //bounding boxes do not overlap
            return false;
        }

        //orientation based test: https://en.wikipedia.org/wiki/Line_segment_intersection
        let o1 = orientation(&self.start, &self.end, &other.start);
        let o2 = orientation(&self.start, &self.end, &other.end);
        let o3 = orientation(&other.start, &other.end, &self.start);
        let o4 = orientation(&other.start, &other.end, &self.end);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }

        (o1 == 0.0 && self.covers_collinear(&other.start))
            || (o2 == 0.0 && self.covers_collinear(&other.end))
            || (o3 == 0.0 && other.covers_collinear(&self.start))
            || (o4 == 0.0 && other.covers_collinear(&self.end))
    }
}

/// Signed area of the triangle (a, b, c): positive if counterclockwise, negative if clockwise, zero if collinear
pub fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}
