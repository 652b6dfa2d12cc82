//! Events that trigger phase transitions

use cashm_protocol::Denomination;

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A valid note value was received while idle
    NoteAccepted(Denomination),
    /// The current phase's hardware work finished
    PhaseComplete,
    /// The emergency stop tripped
    EmergencyStop,
    /// The cycle cannot continue (homing fault)
    Abort,
}
