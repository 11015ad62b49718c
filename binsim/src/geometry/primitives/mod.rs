mod aa_rectangle;
mod edge;
mod point;
mod simple_polygon;

#[doc(inline)]
pub use aa_rectangle::AARectangle;
#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use simple_polygon::SPolygon;
