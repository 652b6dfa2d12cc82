//! Board-agnostic core logic for the note-sorting gantry
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (motor outputs, switches, pump)
//! - CoreXY kinematics and step pulse timing
//! - Bounded, interlocked axis moves and the homing sequence
//! - The sort cycle state machine and its controller
//! - Emergency stop latching
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod gantry;
pub mod motion;
pub mod safety;
pub mod sorter;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use cashm_protocol::{Command, CommandError, Denomination, Request, Response};
