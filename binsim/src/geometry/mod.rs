pub mod boolean;
pub mod convex_hull;
pub mod geo_traits;
pub mod primitives;

mod d_transformation;
mod transformation;

#[doc(inline)]
pub use d_transformation::DTransformation;
#[doc(inline)]
pub use transformation::Transformation;
