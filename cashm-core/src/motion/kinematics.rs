//! CoreXY direction mapping
//!
//! Motors A and B both drive the X/Y carriage. Turning both the same way
//! moves the carriage along X; turning them in opposite directions moves
//! it along Y:
//!
//! ```text
//!   X+ : A+  B+        Y+ : A+  B-
//!   X- : A-  B-        Y- : A-  B+
//! ```
//!
//! A `true` line level means the motor turns in its positive sense. Any
//! wiring inversion is applied by the pin driver, not here.

use super::axis::{Axis, Direction};

/// Logical direction-line levels for the coupled motor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineLevels {
    pub a: bool,
    pub b: bool,
}

/// Direction-line levels for a logical X or Y move
///
/// Returns `None` for Z, which has its own direction line.
pub const fn coupled_levels(axis: Axis, direction: Direction) -> Option<LineLevels> {
    let forward = matches!(direction, Direction::Positive);
    match axis {
        Axis::X => Some(LineLevels {
            a: forward,
            b: forward,
        }),
        Axis::Y => Some(LineLevels {
            a: forward,
            b: !forward,
        }),
        Axis::Z => None,
    }
}

/// Direction-line level for the lift motor (`true` lowers the head)
pub const fn z_level(direction: Direction) -> bool {
    matches!(direction, Direction::Positive)
}
