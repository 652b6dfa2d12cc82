//! CASHM sorter serial protocol
//!
//! This crate defines the line-oriented text protocol between the kiosk host
//! (which identifies the inserted note) and Board A (the sorting gantry).
//!
//! # Protocol Overview
//!
//! Every message is one ASCII line. The host sends one request per line and
//! waits for a line containing a completion token before sending the next:
//!
//! ```text
//! host  → gantry   500\n
//! gantry → host    Received note: 500
//! gantry → host    STATE: MOVING_TO_PICKUP
//! gantry → host    ...
//! gantry → host    DONE: 500 sorted
//! gantry → host    Ready. Enter note value:
//! ```
//!
//! Requests are either a note value ([`Denomination`]) or one of the named
//! commands `HOME`, `NO_NOTE` and `VIEW_COMPARTMENT`. Anything else is
//! answered with a line starting with `ERROR`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod denomination;
pub mod line;
pub mod response;

pub use command::{Command, CommandError, Request};
pub use denomination::{Denomination, UnknownDenomination};
pub use line::{LineBuffer, LineError, MAX_LINE_LEN};
pub use response::{Response, MAX_RESPONSE_LEN};
