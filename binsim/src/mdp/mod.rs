/// Reward landscape of the pending object over the bin
pub mod landscape;
pub mod policy;
pub mod reward;

mod simulation;
mod termination;
mod transition;

#[doc(inline)]
pub use simulation::Rollout;

#[doc(inline)]
pub use simulation::Simulation;

#[doc(inline)]
pub use simulation::Step;

#[doc(inline)]
pub use simulation::StepRecord;

#[doc(inline)]
pub use termination::AREA_TOLERANCE;

#[doc(inline)]
pub use termination::Termination;

#[doc(inline)]
pub use termination::Violation;

#[doc(inline)]
pub use transition::Transition;
