//! Vacuum pump relay
//!
//! The pump is switched by a relay module on a GPIO pin. Most relay boards
//! energize the coil when their input is pulled low.

use core::convert::Infallible;

use cashm_core::traits::PumpOutput;
use embedded_hal::digital::OutputPin;

use crate::pins::{drive, Polarity};

/// Pump behind a relay
pub struct RelayPump<P> {
    pin: P,
    polarity: Polarity,
    /// Current logical state (true = pump running)
    on: bool,
}

impl<P> RelayPump<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Create a pump output; the pump starts off
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut pump = Self {
            pin,
            polarity,
            on: false,
        };
        pump.set_on(false);
        pump
    }

    /// Relay input asserted low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveLow)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> PumpOutput for RelayPump<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_on(&mut self, on: bool) {
        self.on = on;
        drive(&mut self.pin, self.polarity, on);
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
