//! Homing sequence
//!
//! Z is homed first so the head is raised before any horizontal travel,
//! then Y, then X. After Z touches its switch the head steps back down off
//! it; Y and X are instead driven a few steps further into their stops so
//! the carriage is seated, not just electrically triggered.

use embedded_hal_async::delay::DelayNs;

use super::mover::Gantry;
use crate::config::HomingConfig;
use crate::motion::{Axis, Direction, MotionCommand, MoveOutcome};
use crate::traits::{MotorOutputs, SwitchInputs};

/// Axis order of a homing pass
pub const HOMING_ORDER: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];

/// Homing failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingError {
    /// Emergency stop while homing this axis; the pass was abandoned
    EmergencyStop(Axis),
    /// The seek ran its full travel without reaching the switch
    LimitNotFound(Axis),
}

/// Steps each seek travelled before its switch engaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingReport {
    pub z_seek_steps: u32,
    pub y_seek_steps: u32,
    pub x_seek_steps: u32,
}

impl HomingReport {
    fn record(&mut self, axis: Axis, steps: u32) {
        match axis {
            Axis::X => self.x_seek_steps = steps,
            Axis::Y => self.y_seek_steps = steps,
            Axis::Z => self.z_seek_steps = steps,
        }
    }
}

/// Drives all axes to their switch reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomingSequencer {
    config: HomingConfig,
}

impl HomingSequencer {
    pub fn new(config: &HomingConfig) -> Self {
        Self { config: *config }
    }

    /// Longest seek allowed for an axis
    pub fn seek_limit(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X | Axis::Y => self.config.max_coupled_seek_steps,
            Axis::Z => self.config.max_z_seek_steps,
        }
    }

    /// Move made once the axis switch has engaged
    ///
    /// Z backs off the switch; Y and X overdrive into the stop.
    pub fn seat_move(&self, axis: Axis) -> MotionCommand {
        match axis {
            Axis::Z => MotionCommand::new(Axis::Z, self.config.z_backoff_steps, Direction::Positive),
            Axis::Y => MotionCommand::new(Axis::Y, self.config.y_overdrive_steps, Direction::Negative),
            Axis::X => MotionCommand::new(Axis::X, self.config.x_overdrive_steps, Direction::Negative),
        }
    }

    /// Home Z, then Y, then X
    ///
    /// Stops at the first failure; axes already homed are left where they
    /// are and the caller must run a full pass again.
    pub async fn home_all<IO, D>(&self, gantry: &mut Gantry<IO, D>) -> Result<HomingReport, HomingError>
    where
        IO: MotorOutputs + SwitchInputs,
        D: DelayNs,
    {
        let mut report = HomingReport::default();
        for axis in HOMING_ORDER {
            let steps = self.seek(gantry, axis).await?;
            self.seat(gantry, axis).await?;
            report.record(axis, steps);
        }
        Ok(report)
    }

    async fn seek<IO, D>(&self, gantry: &mut Gantry<IO, D>, axis: Axis) -> Result<u32, HomingError>
    where
        IO: MotorOutputs + SwitchInputs,
        D: DelayNs,
    {
        let command = MotionCommand::negative(axis, self.seek_limit(axis));
        match gantry.move_axis(command).await {
            MoveOutcome::AlreadyAtLimit => Ok(0),
            MoveOutcome::LimitReached { steps_taken } => Ok(steps_taken),
            MoveOutcome::EmergencyStop { .. } => Err(HomingError::EmergencyStop(axis)),
            MoveOutcome::Completed => Err(HomingError::LimitNotFound(axis)),
        }
    }

    async fn seat<IO, D>(&self, gantry: &mut Gantry<IO, D>, axis: Axis) -> Result<(), HomingError>
    where
        IO: MotorOutputs + SwitchInputs,
        D: DelayNs,
    {
        match gantry.move_unguarded(self.seat_move(axis)).await {
            MoveOutcome::EmergencyStop { .. } => Err(HomingError::EmergencyStop(axis)),
            _ => Ok(()),
        }
    }
}
