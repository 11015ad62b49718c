use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

///Geometric primitive representing an axis-aligned rectangle
#[derive(Clone, Debug, PartialEq)]
pub struct AARectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl AARectangle {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        debug_assert!(
            x_min <= x_max && y_min <= y_max,
            "invalid AARectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        AARectangle {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Smallest rectangle containing all `points`
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        AARectangle::new(x_min, y_min, x_max, y_max)
    }

    /// Returns a new rectangle with the same center, scaled by `factor` in both dimensions
    pub fn scale(self, factor: f64) -> Self {
        let dx = (self.x_max - self.x_min) * (factor - 1.0) / 2.0;
        let dy = (self.y_max - self.y_min) * (factor - 1.0) / 2.0;
        AARectangle::new(
            self.x_min - dx,
            self.y_min - dy,
            self.x_max + dx,
            self.y_max + dy,
        )
    }

    /// Corners in the order: bottom-left, top-left, top-right, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_min, self.y_min),
            Point(self.x_min, self.y_max),
            Point(self.x_max, self.y_max),
            Point(self.x_max, self.y_min),
        ]
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Extent along the x-axis
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the y-axis
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl CollidesWith<AARectangle> for AARectangle {
    #[inline(always)]
    fn collides_with(&self, other: &AARectangle) -> bool {
        f64::max(self.x_min, other.x_min) <= f64::min(self.x_max, other.x_max)
            && f64::max(self.y_min, other.y_min) <= f64::min(self.y_max, other.y_max)
    }
}

impl CollidesWith<Point> for AARectangle {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}
