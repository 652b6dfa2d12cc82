//! STEP/DIR stepper drivers and switches of the gantry
//!
//! Three step/direction drivers share one enable line: motors A and B form
//! the CoreXY belt pair, the third drives the lift. Limit switches and the
//! emergency stop are normally-open contacts to ground with pull-ups.

use core::convert::Infallible;

use cashm_core::motion::{Axis, AxisGroup, LineLevels};
use cashm_core::traits::{MotorOutputs, SwitchInputs};
use embedded_hal::digital::{InputPin, OutputPin};

use crate::pins::{drive, sense, Polarity};

/// Every pin the gantry uses
pub struct GantryPins<O, I> {
    pub a_step: O,
    pub a_dir: O,
    pub b_step: O,
    pub b_dir: O,
    pub z_step: O,
    pub z_dir: O,
    /// Shared driver enable
    pub enable: O,
    pub x_limit: I,
    pub y_limit: I,
    pub z_limit: I,
    pub estop: I,
}

/// Wiring polarity of each signal
///
/// Direction polarities absorb motor wiring: flip one if an axis runs
/// backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GantryPolarity {
    pub a_dir: Polarity,
    pub b_dir: Polarity,
    pub z_dir: Polarity,
    pub enable: Polarity,
    pub limits: Polarity,
    pub estop: Polarity,
}

impl Default for GantryPolarity {
    fn default() -> Self {
        Self {
            a_dir: Polarity::ActiveHigh,
            b_dir: Polarity::ActiveHigh,
            z_dir: Polarity::ActiveHigh,
            enable: Polarity::ActiveLow,
            limits: Polarity::ActiveLow,
            estop: Polarity::ActiveLow,
        }
    }
}

/// Gantry I/O over GPIO
pub struct PinGantry<O, I> {
    pins: GantryPins<O, I>,
    polarity: GantryPolarity,
    enabled: bool,
}

impl<O, I> PinGantry<O, I>
where
    O: OutputPin<Error = Infallible>,
    I: InputPin<Error = Infallible>,
{
    /// Take the pins; step lines idle low and the drivers start released
    pub fn new(pins: GantryPins<O, I>, polarity: GantryPolarity) -> Self {
        let mut gantry = Self {
            pins,
            polarity,
            enabled: false,
        };
        gantry.set_step(AxisGroup::Coupled, false);
        gantry.set_step(AxisGroup::Z, false);
        gantry.set_driver_enabled(false);
        gantry
    }

    pub fn pins(&self) -> &GantryPins<O, I> {
        &self.pins
    }

    pub fn release(self) -> GantryPins<O, I> {
        self.pins
    }
}

impl<O, I> MotorOutputs for PinGantry<O, I>
where
    O: OutputPin<Error = Infallible>,
    I: InputPin<Error = Infallible>,
{
    fn set_coupled_direction(&mut self, levels: LineLevels) {
        drive(&mut self.pins.a_dir, self.polarity.a_dir, levels.a);
        drive(&mut self.pins.b_dir, self.polarity.b_dir, levels.b);
    }

    fn set_z_direction(&mut self, down: bool) {
        drive(&mut self.pins.z_dir, self.polarity.z_dir, down);
    }

    fn set_step(&mut self, group: AxisGroup, high: bool) {
        match group {
            AxisGroup::Coupled => {
                drive(&mut self.pins.a_step, Polarity::ActiveHigh, high);
                drive(&mut self.pins.b_step, Polarity::ActiveHigh, high);
            }
            AxisGroup::Z => drive(&mut self.pins.z_step, Polarity::ActiveHigh, high),
        }
    }

    fn set_driver_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        drive(&mut self.pins.enable, self.polarity.enable, enabled);
    }

    fn driver_enabled(&self) -> bool {
        self.enabled
    }
}

impl<O, I> SwitchInputs for PinGantry<O, I>
where
    O: OutputPin<Error = Infallible>,
    I: InputPin<Error = Infallible>,
{
    fn limit_engaged(&mut self, axis: Axis) -> bool {
        let pin = match axis {
            Axis::X => &mut self.pins.x_limit,
            Axis::Y => &mut self.pins.y_limit,
            Axis::Z => &mut self.pins.z_limit,
        };
        sense(pin, self.polarity.limits)
    }

    fn estop_active(&mut self) -> bool {
        sense(&mut self.pins.estop, self.polarity.estop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockInput, MockOutput};
    use cashm_core::motion::{coupled_levels, Direction};
    use core::cell::Cell;

    struct Levels {
        x: Cell<bool>,
        y: Cell<bool>,
        z: Cell<bool>,
        estop: Cell<bool>,
    }

    impl Levels {
        /// Pulled up: every switch open
        fn released() -> Self {
            Self {
                x: Cell::new(true),
                y: Cell::new(true),
                z: Cell::new(true),
                estop: Cell::new(true),
            }
        }
    }

    fn gantry(levels: &Levels) -> PinGantry<MockOutput, MockInput<'_>> {
        let pins = GantryPins {
            a_step: MockOutput::new(),
            a_dir: MockOutput::new(),
            b_step: MockOutput::new(),
            b_dir: MockOutput::new(),
            z_step: MockOutput::new(),
            z_dir: MockOutput::new(),
            enable: MockOutput::new(),
            x_limit: MockInput::new(&levels.x),
            y_limit: MockInput::new(&levels.y),
            z_limit: MockInput::new(&levels.z),
            estop: MockInput::new(&levels.estop),
        };
        PinGantry::new(pins, GantryPolarity::default())
    }

    #[test]
    fn test_starts_released() {
        let levels = Levels::released();
        let g = gantry(&levels);
        assert!(!g.driver_enabled());
        // Active-low enable: released = high
        assert!(g.pins().enable.high);
        assert!(!g.pins().a_step.high);
        assert!(!g.pins().z_step.high);
    }

    #[test]
    fn test_enable_is_active_low() {
        let levels = Levels::released();
        let mut g = gantry(&levels);
        g.set_driver_enabled(true);
        assert!(g.driver_enabled());
        assert!(!g.pins().enable.high);
    }

    #[test]
    fn test_coupled_step_pulses_both_motors() {
        let levels = Levels::released();
        let mut g = gantry(&levels);
        g.set_step(AxisGroup::Coupled, true);
        g.set_step(AxisGroup::Coupled, false);
        let pins = g.release();
        assert_eq!(pins.a_step.rising_edges, 1);
        assert_eq!(pins.b_step.rising_edges, 1);
        assert_eq!(pins.z_step.rising_edges, 0);
    }

    #[test]
    fn test_y_direction_lines_complementary() {
        let levels = Levels::released();
        let mut g = gantry(&levels);
        g.set_coupled_direction(coupled_levels(Axis::Y, Direction::Positive).unwrap());
        assert!(g.pins().a_dir.high);
        assert!(!g.pins().b_dir.high);
        g.set_coupled_direction(coupled_levels(Axis::X, Direction::Negative).unwrap());
        assert!(!g.pins().a_dir.high);
        assert!(!g.pins().b_dir.high);
    }

    #[test]
    fn test_inverted_direction_wiring() {
        let levels = Levels::released();
        let mut g = gantry(&levels);
        g.polarity.z_dir = Polarity::ActiveLow;
        g.set_z_direction(true);
        assert!(!g.pins().z_dir.high);
    }

    #[test]
    fn test_switches_active_low() {
        let levels = Levels::released();
        let mut g = gantry(&levels);
        assert!(!g.limit_engaged(Axis::X));
        assert!(!g.estop_active());

        levels.y.set(false);
        assert!(g.limit_engaged(Axis::Y));
        assert!(!g.limit_engaged(Axis::X));
        assert!(!g.limit_engaged(Axis::Z));

        levels.estop.set(false);
        assert!(g.estop_active());
    }
}
