//! Step pulse timing

use embedded_hal_async::delay::DelayNs;

use crate::config::{MotionConfig, PulseProfile};
use crate::motion::AxisGroup;
use crate::traits::MotorOutputs;

/// Emits single step pulses with a fixed profile per motor group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPulseGenerator {
    coupled: PulseProfile,
    z: PulseProfile,
}

impl StepPulseGenerator {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            coupled: config.coupled,
            z: config.z,
        }
    }

    pub fn profile(&self, group: AxisGroup) -> PulseProfile {
        match group {
            AxisGroup::Coupled => self.coupled,
            AxisGroup::Z => self.z,
        }
    }

    /// One step: line high for the pulse width, then low for the rest of
    /// the period
    pub async fn pulse<M: MotorOutputs, D: DelayNs>(&self, outputs: &mut M, delay: &mut D, group: AxisGroup) {
        let profile = self.profile(group);
        outputs.set_step(group, true);
        delay.delay_us(profile.pulse_width_us).await;
        outputs.set_step(group, false);
        delay.delay_us(profile.low_time_us()).await;
    }
}
