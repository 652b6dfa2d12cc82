//! Hardware abstraction traits
//!
//! These traits define the interface between core logic and
//! hardware-specific implementations. Pin polarity and wiring live
//! behind them; everything here speaks in logical levels.

pub mod gantry;
pub mod pump;
pub mod report;

pub use gantry::{MotorOutputs, SwitchInputs};
pub use pump::PumpOutput;
pub use report::Reporter;
