//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use cashm_protocol::{Request, Response};

/// Channel capacity for parsed host lines
const REQUEST_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outgoing status lines
///
/// A sort cycle emits one line per phase; sized so a full cycle plus an
/// e-stop recovery fits without the writer keeping up.
const RESPONSE_CHANNEL_SIZE: usize = 16;

/// Requests from the serial receiver, one per received line
pub static REQUESTS: Channel<CriticalSectionRawMutex, Request, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Status lines for the serial transmitter
pub static RESPONSES: Channel<CriticalSectionRawMutex, Response, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
