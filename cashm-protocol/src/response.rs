//! Lines sent from the gantry to the host
//!
//! The host pattern-matches on tokens: `DONE`, `HOME_DONE`,
//! `COMPARTMENT_VIEW_DONE` and the `Ready` prompt end a request, and any
//! line containing `ERROR` fails it. Everything else is informational.

use core::fmt::{self, Write};

use heapless::String;

use crate::command::{CommandError, VALID_INPUTS};
use crate::denomination::Denomination;

/// Longest formatted response line, excluding the terminator
pub const MAX_RESPONSE_LEN: usize = 128;

/// A status line for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Idle and waiting for the next request
    Ready,
    /// A sort request was accepted
    NoteAccepted(Denomination),
    /// The sort cycle entered a new phase
    Phase(&'static str),
    /// The note was dropped and the gantry is home again
    SortComplete(Denomination),
    /// `HOME` finished
    HomeDone,
    /// `NO_NOTE` finished
    NoNoteDone,
    /// `VIEW_COMPARTMENT` finished
    CompartmentViewDone,
    /// The request was rejected
    Invalid(CommandError),
    /// A request arrived while a cycle was running
    Busy,
    /// The emergency stop tripped; motion aborted
    EmergencyStop,
    /// The emergency stop was released; re-homing
    EmergencyStopReleased,
    /// A homing seek ran out of travel without reaching its switch
    HomingFailed { axis: char },
}

impl Response {
    /// Whether the host treats this line as a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Response::Invalid(_)
                | Response::Busy
                | Response::EmergencyStop
                | Response::HomingFailed { .. }
        )
    }

    /// Format as a line without terminator
    pub fn to_line(&self) -> String<MAX_RESPONSE_LEN> {
        let mut line = String::new();
        // Every variant fits in MAX_RESPONSE_LEN
        let _ = write!(line, "{}", self);
        line
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ready => f.write_str("Ready. Enter note value:"),
            Response::NoteAccepted(d) => write!(f, "Received note: {}", d),
            Response::Phase(label) => write!(f, "STATE: {}", label),
            Response::SortComplete(d) => write!(f, "DONE: {} sorted", d),
            Response::HomeDone => f.write_str("HOME_DONE"),
            Response::NoNoteDone => f.write_str("DONE"),
            Response::CompartmentViewDone => f.write_str("COMPARTMENT_VIEW_DONE"),
            Response::Invalid(err) => write!(f, "ERROR: {}. Valid inputs: {}", err, VALID_INPUTS),
            Response::Busy => f.write_str("ERROR: BUSY"),
            Response::EmergencyStop => f.write_str("ERROR: EMERGENCY_STOP"),
            Response::EmergencyStopReleased => f.write_str("EMERGENCY_STOP_RELEASED, homing"),
            Response::HomingFailed { axis } => write!(f, "ERROR: HOMING_FAILED {}", axis),
        }
    }
}
