//! Vacuum pump output

/// Trait for the suction pump on the lift head
///
/// Implementations switch the pump through a relay or MOSFET.
pub trait PumpOutput {
    /// Turn the pump on or off
    fn set_on(&mut self, on: bool);

    /// Check if the pump is currently running
    fn is_on(&self) -> bool;
}
