//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cashm-core over `embedded-hal` 1.0 digital pins:
//!
//! - Stepper drivers (STEP/DIR/EN, CoreXY pair plus lift)
//! - Limit switches and emergency stop inputs
//! - Vacuum pump relay
//!
//! Pins must have `Infallible` errors, which holds for on-chip GPIO.

#![no_std]
#![deny(unsafe_code)]

pub mod gantry;
pub mod pins;
pub mod pump;

pub use gantry::{GantryPins, GantryPolarity, PinGantry};
pub use pins::Polarity;
pub use pump::RelayPump;

#[cfg(test)]
pub(crate) mod mock;
