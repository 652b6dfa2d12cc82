//! Logical level helpers over `embedded-hal` pins

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Electrical level of the asserted state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted = pin high
    ActiveHigh,
    /// Asserted = pin low (pulled-up switches, low-side relays, EN lines)
    ActiveLow,
}

impl Polarity {
    /// Pin level that represents `asserted`
    pub const fn level(self, asserted: bool) -> PinState {
        match (self, asserted) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => PinState::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => PinState::Low,
        }
    }

    /// Whether a pin reading high means asserted
    pub const fn is_asserted(self, pin_high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => pin_high,
            Polarity::ActiveLow => !pin_high,
        }
    }
}

/// Drive an output to the level for `asserted`
pub fn drive<P>(pin: &mut P, polarity: Polarity, asserted: bool)
where
    P: OutputPin<Error = Infallible>,
{
    pin.set_state(polarity.level(asserted))
        .unwrap_or_else(|never| match never {});
}

/// Read whether an input is asserted
pub fn sense<P>(pin: &mut P, polarity: Polarity) -> bool
where
    P: InputPin<Error = Infallible>,
{
    let high = pin.is_high().unwrap_or_else(|never| match never {});
    polarity.is_asserted(high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockInput, MockOutput};
    use core::cell::Cell;

    #[test]
    fn test_levels() {
        assert_eq!(Polarity::ActiveHigh.level(true), PinState::High);
        assert_eq!(Polarity::ActiveLow.level(true), PinState::Low);
        assert_eq!(Polarity::ActiveLow.level(false), PinState::High);
    }

    #[test]
    fn test_drive_active_low() {
        let mut pin = MockOutput::new();
        drive(&mut pin, Polarity::ActiveLow, false);
        assert!(pin.high);
        drive(&mut pin, Polarity::ActiveLow, true);
        assert!(!pin.high);
    }

    #[test]
    fn test_sense_pulled_up_switch() {
        let level = Cell::new(true);
        let mut pin = MockInput::new(&level);
        assert!(!sense(&mut pin, Polarity::ActiveLow));
        level.set(false);
        assert!(sense(&mut pin, Polarity::ActiveLow));
        assert!(!sense(&mut pin, Polarity::ActiveHigh));
    }
}
