mod distribution;
mod generator;

#[doc(inline)]
pub use distribution::ObjectDistribution;

#[doc(inline)]
pub use distribution::ShapeSpec;

#[doc(inline)]
pub use generator::ObjectGenerator;
