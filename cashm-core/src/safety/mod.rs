//! Emergency stop monitoring
//!
//! The stop input is sampled at the top of every control-loop iteration and
//! by every step of every move. This module owns the latch that decides
//! when a tripped stop counts as released.

pub mod monitor;

pub use monitor::{SafetyMonitor, SafetyStatus};
