//! Note denominations handled by the sorter

use core::fmt;

/// A banknote value the gantry has a compartment for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub enum Denomination {
    Twenty,
    Fifty,
    Hundred,
    FiveHundred,
    Thousand,
    FiveThousand,
}

impl Denomination {
    /// Every denomination, in ascending value order
    pub const ALL: [Denomination; 6] = [
        Denomination::Twenty,
        Denomination::Fifty,
        Denomination::Hundred,
        Denomination::FiveHundred,
        Denomination::Thousand,
        Denomination::FiveThousand,
    ];

    /// Face value of the note
    pub const fn value(self) -> u16 {
        match self {
            Denomination::Twenty => 20,
            Denomination::Fifty => 50,
            Denomination::Hundred => 100,
            Denomination::FiveHundred => 500,
            Denomination::Thousand => 1000,
            Denomination::FiveThousand => 5000,
        }
    }

    /// Look up a denomination by face value
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| u32::from(d.value()) == value)
    }

    /// Position of this denomination in [`Denomination::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A face value with no matching denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownDenomination(pub u16);

impl fmt::Display for UnknownDenomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported note value {}", self.0)
    }
}

impl TryFrom<u16> for Denomination {
    type Error = UnknownDenomination;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_value(u32::from(value)).ok_or(UnknownDenomination(value))
    }
}

impl From<Denomination> for u16 {
    fn from(d: Denomination) -> u16 {
        d.value()
    }
}
