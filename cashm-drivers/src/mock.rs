//! Mock GPIO pins for testing

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Output pin that remembers its level and counts rising edges
#[derive(Debug, Default)]
pub struct MockOutput {
    pub high: bool,
    pub rising_edges: u32,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        Ok(())
    }
}

/// Input pin reading a level shared with the test
#[derive(Debug)]
pub struct MockInput<'a> {
    level: &'a Cell<bool>,
}

impl<'a> MockInput<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl ErrorType for MockInput<'_> {
    type Error = Infallible;
}

impl InputPin for MockInput<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}
