//! Emergency stop handling
//!
//! On a trip the controller abandons whatever it was doing, drops to idle,
//! switches the pump off and releases the motor drivers. It then waits for
//! the stop to be released (debounced) and runs a full homing pass before
//! any further request is looked at. A stop pressed again during that pass
//! starts the recovery over.

use cashm_protocol::Response;
use embedded_hal_async::delay::DelayNs;

use super::{Fault, Reference, Sorter};
use crate::safety::SafetyStatus;
use crate::state::Event;
use crate::traits::{MotorOutputs, PumpOutput, Reporter, SwitchInputs};

impl<IO, P, D> Sorter<IO, P, D>
where
    IO: MotorOutputs + SwitchInputs,
    P: PumpOutput,
    D: DelayNs,
{
    pub(super) async fn recover<R: Reporter>(&mut self, reporter: &mut R) {
        loop {
            self.safety.trip();
            self.enter_safe_state(reporter);
            self.wait_for_release().await;

            reporter.report(Response::EmergencyStopReleased);
            match self.home(reporter).await {
                Ok(()) => break,
                Err(Fault::EmergencyStop) => continue,
                Err(Fault::Homing(axis)) => {
                    reporter.report(Response::HomingFailed { axis: axis.label() });
                    break;
                }
            }
        }
        reporter.report(Response::Ready);
    }

    fn enter_safe_state<R: Reporter>(&mut self, reporter: &mut R) {
        reporter.report(Response::EmergencyStop);
        self.phase = self.phase.transition(Event::EmergencyStop);
        self.pump.set_on(false);
        self.gantry.set_driver_enabled(false);
        self.reference = Reference::Unknown;
    }

    async fn wait_for_release(&mut self) {
        let interval = self.gantry.poll_interval_ms();
        loop {
            let active = self.gantry.estop_active();
            if self.safety.update(active) == SafetyStatus::Ok {
                return;
            }
            self.gantry.pause(interval).await;
        }
    }
}
