//! Configuration types
//!
//! Board-agnostic machine calibration: pulse timing, homing parameters,
//! cycle travel distances and the compartment table. Serialized with
//! postcard when the `serde` feature is enabled.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::{CompartmentTable, ConfigError};
