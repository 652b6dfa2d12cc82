//! Sort cycle state machine
//!
//! The phase is an explicit value owned by the controller. Transitions are
//! pure: `Phase::transition` maps the current phase and an event to the
//! next phase, and the controller performs the phase's hardware work.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Phase;
