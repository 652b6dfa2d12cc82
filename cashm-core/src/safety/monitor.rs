//! Emergency stop latch with release debounce

use crate::config::SafetyConfig;

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// Stop released (or never pressed)
    Ok,
    /// Stop pressed, or released for fewer than the debounce samples
    Tripped,
}

/// Latches the emergency stop
///
/// A single active sample trips the latch. Releasing it takes
/// `release_debounce_samples` consecutive inactive samples, so contact
/// bounce on the stop button cannot start a recovery early.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyMonitor {
    tripped: bool,
    clear_samples: u8,
    release_samples: u8,
    trip_count: u32,
}

impl SafetyMonitor {
    pub fn new(config: &SafetyConfig) -> Self {
        Self {
            tripped: false,
            clear_samples: 0,
            release_samples: config.release_debounce_samples.max(1),
            trip_count: 0,
        }
    }

    /// Feed one sample of the stop input
    pub fn update(&mut self, estop_active: bool) -> SafetyStatus {
        if estop_active {
            self.trip();
        } else if self.tripped {
            self.clear_samples = self.clear_samples.saturating_add(1);
            if self.clear_samples >= self.release_samples {
                self.tripped = false;
                self.clear_samples = 0;
            }
        }
        self.check()
    }

    /// Latch a trip observed elsewhere (inside a move or dwell)
    pub fn trip(&mut self) {
        if !self.tripped {
            self.trip_count = self.trip_count.saturating_add(1);
        }
        self.tripped = true;
        self.clear_samples = 0;
    }

    pub fn check(&self) -> SafetyStatus {
        if self.tripped {
            SafetyStatus::Tripped
        } else {
            SafetyStatus::Ok
        }
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Number of distinct trips since power-up
    pub fn trip_count(&self) -> u32 {
        self.trip_count
    }
}
