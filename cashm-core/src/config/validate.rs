//! Startup validation of [`SorterConfig`]

use cashm_protocol::Denomination;

use super::types::{Compartment, PulseProfile, SorterConfig, CONFIG_VERSION, MAX_COMPARTMENTS};
use crate::motion::{Axis, AxisGroup};

/// Reasons a configuration is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Layout version this firmware does not understand
    UnsupportedVersion(u8),
    /// A step pulse of zero width would never register
    ZeroPulseWidth(AxisGroup),
    /// Period must leave a low phase after the pulse
    PeriodTooShort(AxisGroup),
    /// Homing seek bound of zero steps
    ZeroSeekLimit(Axis),
    /// E-stop poll interval of zero
    ZeroPollInterval,
    /// Release debounce of zero samples
    ZeroReleaseDebounce,
    /// A denomination with no compartment
    MissingCompartment(Denomination),
    /// A denomination listed more than once
    DuplicateCompartment(Denomination),
    /// Backing off further than the pickup travel would hit the Y stop
    BackoffExceedsPickup(Denomination),
}

/// Compartment lookup with exactly one entry per denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompartmentTable {
    entries: [Compartment; MAX_COMPARTMENTS],
}

impl CompartmentTable {
    /// Build from a list, rejecting gaps and duplicates
    pub fn from_compartments(compartments: &[Compartment]) -> Result<Self, ConfigError> {
        let mut slots: [Option<Compartment>; MAX_COMPARTMENTS] = [None; MAX_COMPARTMENTS];
        for compartment in compartments {
            let slot = &mut slots[compartment.denomination.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateCompartment(compartment.denomination));
            }
            *slot = Some(*compartment);
        }

        let mut entries = [Compartment::new(Denomination::Twenty, 0, None); MAX_COMPARTMENTS];
        for d in Denomination::ALL {
            entries[d.index()] = slots[d.index()].ok_or(ConfigError::MissingCompartment(d))?;
        }
        Ok(Self { entries })
    }

    /// Compartment for a denomination
    pub fn get(&self, denomination: Denomination) -> &Compartment {
        &self.entries[denomination.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Compartment> {
        self.entries.iter()
    }
}

fn check_profile(group: AxisGroup, profile: &PulseProfile) -> Result<(), ConfigError> {
    if profile.pulse_width_us == 0 {
        return Err(ConfigError::ZeroPulseWidth(group));
    }
    if profile.period_us <= profile.pulse_width_us {
        return Err(ConfigError::PeriodTooShort(group));
    }
    Ok(())
}

impl SorterConfig {
    /// Check the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compartment_table().map(|_| ())
    }

    /// Validate and build the compartment lookup
    pub fn compartment_table(&self) -> Result<CompartmentTable, ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        check_profile(AxisGroup::Coupled, &self.motion.coupled)?;
        check_profile(AxisGroup::Z, &self.motion.z)?;

        if self.homing.max_z_seek_steps == 0 {
            return Err(ConfigError::ZeroSeekLimit(Axis::Z));
        }
        if self.homing.max_coupled_seek_steps == 0 {
            return Err(ConfigError::ZeroSeekLimit(Axis::Y));
        }

        if self.safety.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.safety.release_debounce_samples == 0 {
            return Err(ConfigError::ZeroReleaseDebounce);
        }

        let table = CompartmentTable::from_compartments(&self.compartments)?;
        if let Some(c) = table
            .iter()
            .find(|c| c.y_backoff_steps > self.cycle.pickup_y_steps)
        {
            return Err(ConfigError::BackoffExceedsPickup(c.denomination));
        }

        Ok(table)
    }
}
