//! Interlocked axis moves
//!
//! [`Gantry`] owns the motor/switch I/O and the delay source. Every step of
//! every move samples the emergency stop before pulsing, so a stop is
//! honoured within one step period and no pulse is ever issued after the
//! stop was seen active.

use embedded_hal_async::delay::DelayNs;

use super::pulse::StepPulseGenerator;
use crate::config::SorterConfig;
use crate::motion::{coupled_levels, z_level, Axis, Direction, MotionCommand, MoveOutcome};
use crate::traits::{MotorOutputs, SwitchInputs};

/// A dwell or wait was cut short by the emergency stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmergencyStopped;

/// Gantry motion executor (the axis mover)
pub struct Gantry<IO, D> {
    io: IO,
    delay: D,
    pulses: StepPulseGenerator,
    poll_interval_ms: u32,
}

impl<IO, D> Gantry<IO, D>
where
    IO: MotorOutputs + SwitchInputs,
    D: DelayNs,
{
    pub fn new(io: IO, delay: D, config: &SorterConfig) -> Self {
        Self {
            io,
            delay,
            pulses: StepPulseGenerator::new(&config.motion),
            poll_interval_ms: config.safety.poll_interval_ms,
        }
    }

    pub fn estop_active(&mut self) -> bool {
        self.io.estop_active()
    }

    pub fn limit_engaged(&mut self, axis: Axis) -> bool {
        self.io.limit_engaged(axis)
    }

    pub fn set_driver_enabled(&mut self, enabled: bool) {
        self.io.set_driver_enabled(enabled);
    }

    pub fn driver_enabled(&self) -> bool {
        self.io.driver_enabled()
    }

    /// Set the direction line(s) for a logical move
    pub fn set_direction(&mut self, axis: Axis, direction: Direction) {
        match coupled_levels(axis, direction) {
            Some(levels) => self.io.set_coupled_direction(levels),
            None => self.io.set_z_direction(z_level(direction)),
        }
    }

    /// Move up to `command.steps` steps
    ///
    /// Moves toward the home switch stop as soon as the switch reads
    /// engaged; if it is engaged before the first step nothing moves and
    /// `AlreadyAtLimit` is returned.
    pub async fn move_axis(&mut self, command: MotionCommand) -> MoveOutcome {
        self.set_direction(command.axis, command.direction);
        let group = command.axis.group();
        let guard_limit = command.direction.approaches_limit();

        for taken in 0..command.steps {
            if self.io.estop_active() {
                return MoveOutcome::EmergencyStop { steps_taken: taken };
            }
            if guard_limit && self.io.limit_engaged(command.axis) {
                return if taken == 0 {
                    MoveOutcome::AlreadyAtLimit
                } else {
                    MoveOutcome::LimitReached { steps_taken: taken }
                };
            }
            self.pulses.pulse(&mut self.io, &mut self.delay, group).await;
        }

        MoveOutcome::Completed
    }

    /// Move ignoring the limit switch, still honouring the emergency stop
    ///
    /// Used to step off a triggered switch or seat against the hard stop.
    pub async fn move_unguarded(&mut self, command: MotionCommand) -> MoveOutcome {
        self.set_direction(command.axis, command.direction);
        let group = command.axis.group();

        for taken in 0..command.steps {
            if self.io.estop_active() {
                return MoveOutcome::EmergencyStop { steps_taken: taken };
            }
            self.pulses.pulse(&mut self.io, &mut self.delay, group).await;
        }

        MoveOutcome::Completed
    }

    /// Hold position for `ms`, sampling the emergency stop every poll interval
    pub async fn dwell(&mut self, ms: u32) -> Result<(), EmergencyStopped> {
        let mut remaining = ms;
        while remaining > 0 {
            if self.io.estop_active() {
                return Err(EmergencyStopped);
            }
            let slice = remaining.min(self.poll_interval_ms);
            self.delay.delay_ms(slice).await;
            remaining -= slice;
        }
        Ok(())
    }

    /// Plain wait without any checks
    pub async fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }
}
