//! Byte-at-a-time line assembly for the serial receiver

use heapless::{String, Vec};

/// Longest accepted request line, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// Errors raised while assembling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the whole line was discarded
    Overflow,
    /// Line contained bytes that are not UTF-8
    InvalidUtf8,
}

/// Accumulates received bytes until a newline
///
/// `\r` directly before the newline is dropped and the line is trimmed.
/// A `\r` anywhere else stays part of the line. An overlong line is
/// swallowed up to its newline and reported once.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
    /// A `\r` was received and is held back until the next byte shows
    /// whether it ends the line
    held_cr: bool,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
            held_cr: false,
        }
    }

    /// Feed one byte
    ///
    /// Returns `Ok(Some(line))` when a newline completes a line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<MAX_LINE_LEN>>, LineError> {
        match byte {
            b'\n' => {
                self.held_cr = false;
                self.finish().map(Some)
            }
            b'\r' => {
                self.release_cr();
                self.held_cr = true;
                Ok(None)
            }
            _ => {
                self.release_cr();
                self.push(byte);
                Ok(None)
            }
        }
    }

    /// Discard any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
        self.held_cr = false;
    }

    /// Whether bytes are waiting for a newline
    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty() || self.overflowed || self.held_cr
    }

    /// A held `\r` turned out not to end the line
    fn release_cr(&mut self) {
        if self.held_cr {
            self.held_cr = false;
            self.push(b'\r');
        }
    }

    fn push(&mut self, byte: u8) {
        if !self.overflowed && self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    fn finish(&mut self) -> Result<String<MAX_LINE_LEN>, LineError> {
        if self.overflowed {
            self.reset();
            return Err(LineError::Overflow);
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let mut line = String::new();
                // Cannot fail: trimmed text is no longer than the buffer
                let _ = line.push_str(text.trim());
                Ok(line)
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };
        self.reset();
        result
    }
}
