/// Consistency checks used in `debug_assert!()` blocks
pub mod assertions;

mod fpa;

#[doc(inline)]
pub use fpa::FPA;
