//! Motor driver outputs and switch inputs

use crate::motion::{Axis, AxisGroup, LineLevels};

/// Step, direction and enable lines of the three stepper drivers
///
/// The A/B pair shares one step timing: a coupled step pulses both motors.
pub trait MotorOutputs {
    /// Set the direction lines of motors A and B
    fn set_coupled_direction(&mut self, levels: LineLevels);

    /// Set the lift motor direction line (`true` lowers the head)
    fn set_z_direction(&mut self, down: bool);

    /// Drive the step line(s) of a motor group
    fn set_step(&mut self, group: AxisGroup, high: bool);

    /// Energize or release the drivers (shared enable line)
    fn set_driver_enabled(&mut self, enabled: bool);

    /// Whether the drivers are energized
    fn driver_enabled(&self) -> bool;
}

/// Limit switches and the emergency stop
///
/// Takes `&mut self` because reading a GPIO may require mutable access.
pub trait SwitchInputs {
    /// Whether the home switch of `axis` is pressed
    fn limit_engaged(&mut self, axis: Axis) -> bool;

    /// Whether the emergency stop is asserted
    fn estop_active(&mut self) -> bool;
}
