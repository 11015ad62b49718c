mod action;
mod bin;
mod placement_object;
mod state;

#[doc(inline)]
pub use action::Action;

#[doc(inline)]
pub use bin::Bin;

#[doc(inline)]
pub use placement_object::PlacementObject;

#[doc(inline)]
pub use placement_object::ShapeKind;

#[doc(inline)]
pub use state::State;

#[doc(inline)]
pub use state::StateKey;
