//! Main controller task
//!
//! Owns the sort controller. Waits for host requests while idle, sampling
//! the emergency stop between them, and drives the sort cycle one phase
//! per iteration otherwise.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Timer};

use cashm_core::gantry::HomingReport;
use cashm_core::motion::{MotionCommand, MoveOutcome};
use cashm_core::sorter::Sorter;
use cashm_core::traits::Reporter;
use cashm_drivers::gantry::PinGantry;
use cashm_drivers::pump::RelayPump;
use cashm_protocol::{Request, Response};

use crate::channels::{REQUESTS, RESPONSES};

/// The controller as wired on Board A
pub type BoardSorter =
    Sorter<PinGantry<Output<'static>, Input<'static>>, RelayPump<Output<'static>>, Delay>;

/// Sends status lines to the TX task and logs what the controller does
struct SerialReporter;

impl Reporter for SerialReporter {
    fn report(&mut self, response: Response) {
        if response.is_error() {
            warn!("{}", response.to_line().as_str());
        } else {
            info!("{}", response.to_line().as_str());
        }

        if RESPONSES.try_send(response).is_err() {
            warn!("Response channel full, dropping {:?}", response);
        }
    }

    fn motion(&mut self, command: &MotionCommand, outcome: MoveOutcome) {
        if outcome.hit_limit() {
            warn!(
                "{:?} {:?} stopped at limit: {} of {} steps",
                command.axis,
                command.direction,
                outcome.steps_taken(command.steps),
                command.steps
            );
        } else {
            debug!("{:?} -> {:?}", command, outcome);
        }
    }

    fn homed(&mut self, report: &HomingReport) {
        info!(
            "Homed: Z {} / Y {} / X {} seek steps",
            report.z_seek_steps, report.y_seek_steps, report.x_seek_steps
        );
    }
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut sorter: BoardSorter) {
    info!("Controller task started");

    let mut reporter = SerialReporter;
    sorter.boot(&mut reporter).await;

    let poll_ms = u64::from(sorter.poll_interval_ms());

    loop {
        // Mid-cycle requests stay queued until the controller is idle again
        let request = if sorter.is_idle() {
            wait_for_request(poll_ms).await
        } else {
            None
        };

        let phase = sorter.poll(request, &mut reporter).await;
        trace!("Phase: {:?}", phase);
    }
}

/// Next request, or `None` once the e-stop is due for a sample
async fn wait_for_request(poll_ms: u64) -> Option<Request> {
    match select(REQUESTS.receive(), Timer::after_millis(poll_ms)).await {
        Either::First(request) => Some(request),
        Either::Second(()) => None,
    }
}
