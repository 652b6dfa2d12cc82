//! Step generation, interlocked axis moves and homing
//!
//! Every step is an await point: the pulse generator sleeps through the
//! step period with [`DelayNs`](embedded_hal_async::delay::DelayNs), so a
//! cooperative executor keeps servicing other tasks during long moves.

pub mod homing;
pub mod mover;
pub mod pulse;

pub use homing::{HomingError, HomingReport, HomingSequencer, HOMING_ORDER};
pub use mover::{EmergencyStopped, Gantry};
pub use pulse::StepPulseGenerator;
