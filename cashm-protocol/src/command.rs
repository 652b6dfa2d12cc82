//! Requests accepted from the host
//!
//! Input is case-sensitive. A line is either a decimal note value or one of
//! the literal tokens below:
//!
//! | Input | Command |
//! |---|---|
//! | `20`, `50`, `100`, `500`, `1000`, `5000` | [`Command::Sort`] |
//! | `HOME` | [`Command::Home`] |
//! | `NO_NOTE` | [`Command::NoNote`] |
//! | `VIEW_COMPARTMENT` | [`Command::ViewCompartment`] |

use core::fmt;

use crate::denomination::Denomination;
use crate::line::LineError;

/// Literal text of the named commands
pub const HOME_TOKEN: &str = "HOME";
pub const NO_NOTE_TOKEN: &str = "NO_NOTE";
pub const VIEW_COMPARTMENT_TOKEN: &str = "VIEW_COMPARTMENT";

/// Human-readable list of everything the sorter accepts
pub const VALID_INPUTS: &str = "20, 50, 100, 500, 1000, 5000, NO_NOTE, VIEW_COMPARTMENT, HOME";

/// A validated request from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Pick up the note on the tray and drop it in its compartment
    Sort(Denomination),
    /// Home all axes
    Home,
    /// Home, then park the carriage where the tray is visible
    NoNote,
    /// Home, then park the carriage where the compartments are visible
    ViewCompartment,
}

/// Why a line was not accepted as a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Blank line
    Empty,
    /// Not a number and not a known token
    UnknownCommand,
    /// A number with no matching denomination
    UnknownDenomination(u32),
    /// A run of digits too large to be any note value
    ValueTooLarge,
    /// Line exceeded the receive buffer
    LineTooLong,
    /// Line was not valid UTF-8
    InvalidText,
}

/// What the serial receiver hands to the controller
pub type Request = Result<Command, CommandError>;

impl Command {
    /// Parse one received line
    ///
    /// Surrounding whitespace is ignored; everything else must match exactly.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        match input {
            HOME_TOKEN => return Ok(Command::Home),
            NO_NOTE_TOKEN => return Ok(Command::NoNote),
            VIEW_COMPARTMENT_TOKEN => return Ok(Command::ViewCompartment),
            _ => {}
        }

        // Plain decimal only: no sign, no separators
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::UnknownCommand);
        }

        let value: u32 = input.parse().map_err(|_| CommandError::ValueTooLarge)?;
        Denomination::from_value(value)
            .map(Command::Sort)
            .ok_or(CommandError::UnknownDenomination(value))
    }
}

impl From<LineError> for CommandError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::Overflow => CommandError::LineTooLong,
            LineError::InvalidUtf8 => CommandError::InvalidText,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("empty input"),
            CommandError::UnknownCommand => f.write_str("unknown command"),
            CommandError::UnknownDenomination(v) => write!(f, "unsupported note value {}", v),
            CommandError::ValueTooLarge => f.write_str("value out of range"),
            CommandError::LineTooLong => f.write_str("line too long"),
            CommandError::InvalidText => f.write_str("invalid characters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_every_denomination() {
        for d in Denomination::ALL {
            let mut text = heapless::String::<8>::new();
            core::fmt::Write::write_fmt(&mut text, format_args!("{}", d.value())).unwrap();
            assert_eq!(Command::parse(&text), Ok(Command::Sort(d)));
        }
    }

    #[test]
    fn test_parse_named_commands() {
        assert_eq!(Command::parse("HOME"), Ok(Command::Home));
        assert_eq!(Command::parse("NO_NOTE"), Ok(Command::NoNote));
        assert_eq!(Command::parse("VIEW_COMPARTMENT"), Ok(Command::ViewCompartment));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Command::parse("  500\r"), Ok(Command::Sort(Denomination::FiveHundred)));
        assert_eq!(Command::parse("\tHOME "), Ok(Command::Home));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Command::parse("home"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("No_Note"), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Command::parse(""), Err(CommandError::Empty));
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(Command::parse("10"), Err(CommandError::UnknownDenomination(10)));
        assert_eq!(Command::parse("0"), Err(CommandError::UnknownDenomination(0)));
        assert_eq!(Command::parse("99999999999"), Err(CommandError::ValueTooLarge));
    }

    #[test]
    fn test_parse_rejects_signed_and_decimal() {
        assert_eq!(Command::parse("+500"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("-20"), Err(CommandError::UnknownCommand));
        assert_eq!(Command::parse("50.0"), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn test_line_error_conversion() {
        assert_eq!(CommandError::from(LineError::Overflow), CommandError::LineTooLong);
        assert_eq!(CommandError::from(LineError::InvalidUtf8), CommandError::InvalidText);
    }

    proptest! {
        #[test]
        fn prop_parse_never_accepts_other_numbers(value in any::<u32>()) {
            let text = std::format!("{}", value);
            match Command::parse(&text) {
                Ok(Command::Sort(d)) => prop_assert_eq!(u32::from(d.value()), value),
                Ok(other) => prop_assert!(false, "number parsed as {:?}", other),
                Err(err) => {
                    prop_assert_eq!(err, CommandError::UnknownDenomination(value));
                    prop_assert!(Denomination::from_value(value).is_none());
                }
            }
        }

        #[test]
        fn prop_parse_rejects_lowercase_words(word in "[a-z_]{1,20}") {
            prop_assert_eq!(Command::parse(&word), Err(CommandError::UnknownCommand));
        }
    }
}
