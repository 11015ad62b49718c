//!
//! Sequential placement of 2D polygons into a fixed rectangular bin, modelled as a Markov decision process.
//!
//! A [`State`](entities::State) (bin, placed objects, one pending object) is advanced by an
//! [`Action`](entities::Action) (a rigid transform of the pending object) through the
//! [`Transition`](mdp::Transition), until [`Termination`](mdp::Termination) detects an overlap
//! or an object sticking out of the bin.
//!

/// Geometric primitives, transformations and the polygon operations the simulation relies on
pub mod geometry;

/// Bin, placement objects, states and actions
pub mod entities;

/// Random generation of pending objects
pub mod generation;

/// Transition, termination, policies, rewards and the simulation driver
pub mod mdp;

/// Helper functions and constants
pub mod util;

/// Capability interface towards a visualization backend
pub mod viz;

mod error;

#[doc(inline)]
pub use error::SimError;
