//! Configuration type definitions

use cashm_protocol::Denomination;
use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::AxisGroup;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// One compartment per denomination
pub const MAX_COMPARTMENTS: usize = Denomination::ALL.len();

/// Step pulse timing for one motor group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PulseProfile {
    /// Time the step line is held high (µs)
    pub pulse_width_us: u32,
    /// Time from one rising edge to the next (µs)
    pub period_us: u32,
}

impl PulseProfile {
    /// Low time after the pulse that completes the period
    pub const fn low_time_us(&self) -> u32 {
        self.period_us.saturating_sub(self.pulse_width_us)
    }
}

/// Pulse timing for both motor groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Fast profile for the A/B belt pair
    pub coupled: PulseProfile,
    /// Slow, high-torque profile for the lift
    pub z: PulseProfile,
}

impl MotionConfig {
    pub const fn profile(&self, group: AxisGroup) -> PulseProfile {
        match group {
            AxisGroup::Coupled => self.coupled,
            AxisGroup::Z => self.z,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            coupled: PulseProfile {
                pulse_width_us: 50,
                period_us: 500,
            },
            z: PulseProfile {
                pulse_width_us: 500,
                period_us: 1500,
            },
        }
    }
}

/// Homing sequence parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingConfig {
    /// Steps moved down off the Z switch after it engages
    pub z_backoff_steps: u32,
    /// Extra steps driven into the Y stop after first contact
    pub y_overdrive_steps: u32,
    /// Extra steps driven into the X stop after first contact
    pub x_overdrive_steps: u32,
    /// Longest X or Y seek before declaring the switch missing
    pub max_coupled_seek_steps: u32,
    /// Longest Z seek before declaring the switch missing
    pub max_z_seek_steps: u32,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            z_backoff_steps: 200,
            y_overdrive_steps: 100,
            x_overdrive_steps: 100,
            max_coupled_seek_steps: 40_000,
            max_z_seek_steps: 20_000,
        }
    }
}

/// Travel distances and dwell times of the sort cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CycleConfig {
    /// Y travel from home to the pickup tray
    pub pickup_y_steps: u32,
    /// Z travel down onto the note
    pub pickup_z_steps: u32,
    /// Z travel down into a compartment
    pub drop_z_steps: u32,
    /// Pump-on hold before lifting the note (ms)
    pub pickup_dwell_ms: u32,
    /// Hold after releasing the note (ms)
    pub drop_settle_ms: u32,
    /// Y travel for `NO_NOTE`: carriage clear of the tray camera
    pub display_y_steps: u32,
    /// Y travel for `VIEW_COMPARTMENT`: carriage clear of the compartments
    pub compartment_view_y_steps: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            pickup_y_steps: 18_900,
            pickup_z_steps: 3_200,
            drop_z_steps: 3_200,
            pickup_dwell_ms: 3_000,
            drop_settle_ms: 500,
            display_y_steps: 21_500,
            compartment_view_y_steps: 21_500,
        }
    }
}

/// Emergency stop polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafetyConfig {
    /// E-stop sample interval while idle, dwelling or waiting for release (ms)
    pub poll_interval_ms: u32,
    /// Consecutive released samples required before recovery starts
    pub release_debounce_samples: u8,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            release_debounce_samples: 5,
        }
    }
}

/// Where a denomination is dropped, relative to the pickup point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Compartment {
    pub denomination: Denomination,
    /// Y travel back toward home from the pickup point
    pub y_backoff_steps: u32,
    /// X travel away from home, if the compartment is off the home column
    pub x_offset_steps: Option<u32>,
}

impl Compartment {
    pub const fn new(denomination: Denomination, y_backoff_steps: u32, x_offset_steps: Option<u32>) -> Self {
        Self {
            denomination,
            y_backoff_steps,
            x_offset_steps,
        }
    }
}

/// Calibrated compartment layout of the production cabinet
pub const DEFAULT_COMPARTMENTS: [Compartment; MAX_COMPARTMENTS] = [
    Compartment::new(Denomination::Twenty, 2_000, None),
    Compartment::new(Denomination::Fifty, 2_000, Some(6_950)),
    Compartment::new(Denomination::Hundred, 2_000, Some(13_900)),
    Compartment::new(Denomination::FiveHundred, 6_100, Some(13_900)),
    Compartment::new(Denomination::Thousand, 6_100, Some(6_950)),
    Compartment::new(Denomination::FiveThousand, 6_100, None),
];

/// Root machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SorterConfig {
    /// Layout version, must equal [`CONFIG_VERSION`]
    pub version: u8,
    pub motion: MotionConfig,
    pub homing: HomingConfig,
    pub cycle: CycleConfig,
    pub safety: SafetyConfig,
    pub compartments: Vec<Compartment, MAX_COMPARTMENTS>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        let mut compartments = Vec::new();
        for compartment in DEFAULT_COMPARTMENTS {
            // Capacity equals the table length
            let _ = compartments.push(compartment);
        }

        Self {
            version: CONFIG_VERSION,
            motion: MotionConfig::default(),
            homing: HomingConfig::default(),
            cycle: CycleConfig::default(),
            safety: SafetyConfig::default(),
            compartments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let motion = MotionConfig::default();
        assert!(motion.z.pulse_width_us > motion.coupled.pulse_width_us);
        assert!(motion.z.period_us > motion.coupled.period_us);
        assert_eq!(motion.profile(AxisGroup::Coupled).low_time_us(), 450);
        assert_eq!(motion.profile(AxisGroup::Z).low_time_us(), 1000);
    }

    #[test]
    fn test_default_has_every_denomination() {
        let config = SorterConfig::default();
        assert_eq!(config.compartments.len(), Denomination::ALL.len());
        for d in Denomination::ALL {
            assert!(config.compartments.iter().any(|c| c.denomination == d));
        }
    }

    #[test]
    fn test_default_cycle_values() {
        let cycle = CycleConfig::default();
        assert_eq!(cycle.pickup_y_steps, 18_900);
        assert_eq!(cycle.pickup_dwell_ms, 3_000);
        assert_eq!(cycle.drop_settle_ms, 500);
        assert_eq!(cycle.display_y_steps, 21_500);
    }
}
