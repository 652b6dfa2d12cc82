//! Sort controller
//!
//! [`Sorter`] owns the gantry, the pump and the cycle phase. The firmware
//! calls [`Sorter::poll`] once per control-loop iteration; each call
//!
//! 1. samples the emergency stop and, if it is pressed, runs the full
//!    recovery (safe state, wait for release, re-home) before anything else,
//! 2. accepts at most one request if idle, otherwise
//! 3. performs the current phase's hardware work and advances one phase.
//!
//! Named commands (`HOME`, `NO_NOTE`, `VIEW_COMPARTMENT`) run to completion
//! inside the call that accepts them and leave the phase at `Idle`.

mod cycle;
mod recovery;

use cashm_protocol::{Command, Denomination, Request, Response};
use embedded_hal_async::delay::DelayNs;

use crate::config::{CompartmentTable, ConfigError, CycleConfig, SorterConfig};
use crate::gantry::{Gantry, HomingError, HomingSequencer};
use crate::motion::{Axis, MotionCommand, MoveOutcome};
use crate::safety::{SafetyMonitor, SafetyStatus};
use crate::state::{Event, Phase};
use crate::traits::{MotorOutputs, PumpOutput, Reporter, SwitchInputs};

/// What the controller knows about the carriage position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// Not homed since power-up, an e-stop or a homing failure
    Unknown,
    /// Resting at the switch reference after a homing pass
    AtHome,
    /// Moved away from home since the last homing pass
    Displaced,
}

/// Why the current command or cycle stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    EmergencyStop,
    Homing(Axis),
}

impl From<HomingError> for Fault {
    fn from(err: HomingError) -> Self {
        match err {
            HomingError::EmergencyStop(_) => Fault::EmergencyStop,
            HomingError::LimitNotFound(axis) => Fault::Homing(axis),
        }
    }
}

/// The sort controller
pub struct Sorter<IO, P, D> {
    gantry: Gantry<IO, D>,
    pump: P,
    homing: HomingSequencer,
    compartments: CompartmentTable,
    cycle: CycleConfig,
    safety: SafetyMonitor,
    phase: Phase,
    reference: Reference,
}

impl<IO, P, D> Sorter<IO, P, D>
where
    IO: MotorOutputs + SwitchInputs,
    P: PumpOutput,
    D: DelayNs,
{
    /// Build a controller from a configuration
    ///
    /// The configuration is validated here; the pump is switched off.
    pub fn new(io: IO, mut pump: P, delay: D, config: &SorterConfig) -> Result<Self, ConfigError> {
        let compartments = config.compartment_table()?;
        pump.set_on(false);

        Ok(Self {
            gantry: Gantry::new(io, delay, config),
            pump,
            homing: HomingSequencer::new(&config.homing),
            compartments,
            cycle: config.cycle,
            safety: SafetyMonitor::new(&config.safety),
            phase: Phase::Idle,
            reference: Reference::Unknown,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase.is_idle()
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn safety(&self) -> &SafetyMonitor {
        &self.safety
    }

    /// E-stop sample interval for the caller's idle wait
    pub fn poll_interval_ms(&self) -> u32 {
        self.gantry.poll_interval_ms()
    }

    /// Power-up: energize the drivers and home, then prompt
    pub async fn boot<R: Reporter>(&mut self, reporter: &mut R) {
        let active = self.gantry.estop_active();
        if self.safety.update(active) == SafetyStatus::Tripped {
            self.recover(reporter).await;
            return;
        }

        match self.home(reporter).await {
            Ok(()) => reporter.report(Response::Ready),
            Err(fault) => self.handle_fault(fault, reporter).await,
        }
    }

    /// One control-loop iteration
    ///
    /// `request` should only be supplied while idle; a request handed in
    /// during a cycle is answered with `Busy` and dropped.
    pub async fn poll<R: Reporter>(&mut self, request: Option<Request>, reporter: &mut R) -> Phase {
        let active = self.gantry.estop_active();
        if self.safety.update(active) == SafetyStatus::Tripped {
            self.recover(reporter).await;
        }

        if self.phase.is_idle() {
            if let Some(request) = request {
                self.accept(request, reporter).await;
            }
        } else {
            if request.is_some() {
                reporter.report(Response::Busy);
            }
            self.advance(reporter).await;
        }

        self.phase
    }

    async fn accept<R: Reporter>(&mut self, request: Request, reporter: &mut R) {
        let command = match request {
            Ok(command) => command,
            Err(err) => {
                reporter.report(Response::Invalid(err));
                return;
            }
        };

        let result = match command {
            Command::Sort(denomination) => self.begin_sort(denomination, reporter).await,
            Command::Home => self.run_home(reporter).await,
            Command::NoNote => {
                let steps = self.cycle.display_y_steps;
                self.park(steps, Response::NoNoteDone, reporter).await
            }
            Command::ViewCompartment => {
                let steps = self.cycle.compartment_view_y_steps;
                self.park(steps, Response::CompartmentViewDone, reporter).await
            }
        };

        if let Err(fault) = result {
            self.handle_fault(fault, reporter).await;
        }
    }

    async fn begin_sort<R: Reporter>(&mut self, denomination: Denomination, reporter: &mut R) -> Result<(), Fault> {
        reporter.report(Response::NoteAccepted(denomination));
        if self.reference != Reference::AtHome {
            self.home(reporter).await?;
        }
        self.phase = self.phase.transition(Event::NoteAccepted(denomination));
        reporter.report(Response::Phase(self.phase.label()));
        Ok(())
    }

    async fn run_home<R: Reporter>(&mut self, reporter: &mut R) -> Result<(), Fault> {
        self.home(reporter).await?;
        reporter.report(Response::HomeDone);
        reporter.report(Response::Ready);
        Ok(())
    }

    /// Home, then move out along Y and stay there
    async fn park<R: Reporter>(&mut self, y_steps: u32, done: Response, reporter: &mut R) -> Result<(), Fault> {
        self.home(reporter).await?;
        self.cycle_move(MotionCommand::positive(Axis::Y, y_steps), reporter)
            .await?;
        reporter.report(done);
        reporter.report(Response::Ready);
        Ok(())
    }

    /// Full homing pass with the drivers energized
    async fn home<R: Reporter>(&mut self, reporter: &mut R) -> Result<(), Fault> {
        self.gantry.set_driver_enabled(true);
        match self.homing.home_all(&mut self.gantry).await {
            Ok(report) => {
                self.reference = Reference::AtHome;
                reporter.homed(&report);
                Ok(())
            }
            Err(err) => {
                self.reference = Reference::Unknown;
                Err(err.into())
            }
        }
    }

    /// Interlocked move inside a command or cycle
    ///
    /// A limit truncation is only reported; the cycle ends in a full homing
    /// pass which re-establishes the reference anyway.
    async fn cycle_move<R: Reporter>(&mut self, command: MotionCommand, reporter: &mut R) -> Result<MoveOutcome, Fault> {
        let outcome = self.gantry.move_axis(command).await;
        reporter.motion(&command, outcome);
        if outcome.steps_taken(command.steps) > 0 {
            self.reference = Reference::Displaced;
        }
        if outcome.is_emergency_stop() {
            return Err(Fault::EmergencyStop);
        }
        Ok(outcome)
    }

    async fn dwell(&mut self, ms: u32) -> Result<(), Fault> {
        self.gantry.dwell(ms).await.map_err(|_| Fault::EmergencyStop)
    }

    async fn handle_fault<R: Reporter>(&mut self, fault: Fault, reporter: &mut R) {
        match fault {
            Fault::EmergencyStop => self.recover(reporter).await,
            Fault::Homing(axis) => {
                reporter.report(Response::HomingFailed { axis: axis.label() });
                self.pump.set_on(false);
                self.phase = self.phase.transition(Event::Abort);
                self.reference = Reference::Unknown;
                reporter.report(Response::Ready);
            }
        }
    }
}
