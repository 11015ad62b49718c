use crate::entities::{Action, State};
use crate::geometry::Transformation;

mod random;
mod rows;

#[doc(inline)]
pub use random::RandomPolicy;

#[doc(inline)]
pub use random::UniformPoseSampler;

#[doc(inline)]
pub use rows::RowPackingCursor;

#[doc(inline)]
pub use rows::RowsPolicy;

#[doc(inline)]
pub use rows::WIGGLE_ROOM;

/// Decision rule mapping a [`State`] to the [`Action`] to take for its pending object
pub trait Policy {
    fn get_action(&mut self, state: &State) -> Action;
}

/// Leaves the pending object where it is
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityPolicy;

impl Policy for IdentityPolicy {
    fn get_action(&mut self, state: &State) -> Action {
        Action::new(Transformation::empty(), state.next_object.clone())
    }
}

/// All available policies
#[derive(Clone, Debug)]
pub enum PolicyKind {
    Identity(IdentityPolicy),
    Random(RandomPolicy),
    Rows(RowsPolicy),
}

impl Policy for PolicyKind {
    fn get_action(&mut self, state: &State) -> Action {
        match self {
            PolicyKind::Identity(p) => p.get_action(state),
            PolicyKind::Random(p) => p.get_action(state),
            PolicyKind::Rows(p) => p.get_action(state),
        }
    }
}
