//! Phase definition and transitions

use cashm_protocol::Denomination;

use super::events::Event;

/// Sort cycle phases
///
/// Every phase after `Idle` carries the note being sorted, so the recorded
/// denomination cannot outlive the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for a note value or named command
    Idle,
    /// Carriage travelling from home to the pickup tray
    MovingToPickup(Denomination),
    /// Head down, pump on, dwell, head up
    PickingUp(Denomination),
    /// Carriage travelling to the denomination's compartment
    MovingToCompartment(Denomination),
    /// Head down, pump off, settle, head up
    Dropping(Denomination),
    /// Full homing pass back to the reference
    ReturningHome(Denomination),
}

impl Phase {
    /// The note being sorted, if a cycle is running
    pub fn denomination(&self) -> Option<Denomination> {
        match *self {
            Phase::Idle => None,
            Phase::MovingToPickup(d)
            | Phase::PickingUp(d)
            | Phase::MovingToCompartment(d)
            | Phase::Dropping(d)
            | Phase::ReturningHome(d) => Some(d),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    /// Whether the pump is supposed to be holding a note in this phase
    pub fn holds_note(&self) -> bool {
        matches!(self, Phase::MovingToCompartment(_) | Phase::Dropping(_))
    }

    /// Name used in progress lines
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::MovingToPickup(_) => "MOVING_TO_PICKUP",
            Phase::PickingUp(_) => "PICKING_UP",
            Phase::MovingToCompartment(_) => "MOVING_TO_COMPARTMENT",
            Phase::Dropping(_) => "DROPPING",
            Phase::ReturningHome(_) => "RETURNING_HOME",
        }
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle, NoteAccepted(d)) => MovingToPickup(d),

            (MovingToPickup(d), PhaseComplete) => PickingUp(d),
            (PickingUp(d), PhaseComplete) => MovingToCompartment(d),
            (MovingToCompartment(d), PhaseComplete) => Dropping(d),
            (Dropping(d), PhaseComplete) => ReturningHome(d),
            (ReturningHome(_), PhaseComplete) => Idle,

            // Any phase drops straight back to idle
            (_, EmergencyStop) => Idle,
            (_, Abort) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}
