//! Axis identities, directions and coupled-axis kinematics
//!
//! Positions are never stored. Every move is relative to the last homing
//! pass, and `Direction::Negative` always points at an axis's home switch.

pub mod axis;
pub mod kinematics;

pub use axis::{Axis, AxisGroup, Direction, MotionCommand, MoveOutcome};
pub use kinematics::{coupled_levels, z_level, LineLevels};
