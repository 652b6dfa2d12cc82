//! Status reporting sink

use cashm_protocol::Response;

use crate::gantry::HomingReport;
use crate::motion::{MotionCommand, MoveOutcome};

/// Destination for everything the controller tells the outside world
pub trait Reporter {
    /// Send a status line to the host
    fn report(&mut self, response: Response);

    /// Observe the outcome of a cycle move (logging only)
    fn motion(&mut self, _command: &MotionCommand, _outcome: MoveOutcome) {}

    /// Observe a completed homing pass (logging only)
    fn homed(&mut self, _report: &HomingReport) {}
}
