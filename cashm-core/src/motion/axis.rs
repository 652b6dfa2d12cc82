//! Logical axes and move descriptions

/// A logical gantry axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Horizontal travel across the compartment row
    X,
    /// Horizontal travel from home toward the pickup tray
    Y,
    /// Vertical travel of the suction head (negative is up)
    Z,
}

impl Axis {
    /// Which physical motor group realizes this axis
    pub const fn group(self) -> AxisGroup {
        match self {
            Axis::X | Axis::Y => AxisGroup::Coupled,
            Axis::Z => AxisGroup::Z,
        }
    }

    /// Single-letter name used in host messages
    pub const fn label(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

/// Physical motor groups sharing step timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisGroup {
    /// Motors A and B of the CoreXY belt pair, always stepped together
    Coupled,
    /// The lift motor
    Z,
}

/// Logical direction along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Away from the home switch (Z: down)
    Positive,
    /// Toward the home switch (Z: up)
    Negative,
}

impl Direction {
    /// Whether motion in this direction can run into the axis limit switch
    pub const fn approaches_limit(self) -> bool {
        matches!(self, Direction::Negative)
    }

    pub const fn reversed(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// A bounded relative move on one logical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionCommand {
    pub axis: Axis,
    pub steps: u32,
    pub direction: Direction,
}

impl MotionCommand {
    pub const fn new(axis: Axis, steps: u32, direction: Direction) -> Self {
        Self {
            axis,
            steps,
            direction,
        }
    }

    pub const fn positive(axis: Axis, steps: u32) -> Self {
        Self::new(axis, steps, Direction::Positive)
    }

    pub const fn negative(axis: Axis, steps: u32) -> Self {
        Self::new(axis, steps, Direction::Negative)
    }
}

/// How a move ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Every requested step was issued
    Completed,
    /// The limit switch was engaged before the first step; nothing moved
    AlreadyAtLimit,
    /// The limit switch engaged part way through
    LimitReached { steps_taken: u32 },
    /// The emergency stop was active; the move was abandoned
    EmergencyStop { steps_taken: u32 },
}

impl MoveOutcome {
    /// Number of pulses issued for a command
    pub fn steps_taken(&self, requested: u32) -> u32 {
        match *self {
            MoveOutcome::Completed => requested,
            MoveOutcome::AlreadyAtLimit => 0,
            MoveOutcome::LimitReached { steps_taken }
            | MoveOutcome::EmergencyStop { steps_taken } => steps_taken,
        }
    }

    pub fn is_emergency_stop(&self) -> bool {
        matches!(self, MoveOutcome::EmergencyStop { .. })
    }

    /// Stopped short by a limit switch (including before the first step)
    pub fn hit_limit(&self) -> bool {
        matches!(
            self,
            MoveOutcome::AlreadyAtLimit | MoveOutcome::LimitReached { .. }
        )
    }
}
