//! Per-phase hardware work of the sort cycle

use cashm_protocol::{Denomination, Response};
use embedded_hal_async::delay::DelayNs;

use super::{Fault, Sorter};
use crate::motion::{Axis, MotionCommand};
use crate::state::{Event, Phase};
use crate::traits::{MotorOutputs, PumpOutput, Reporter, SwitchInputs};

impl<IO, P, D> Sorter<IO, P, D>
where
    IO: MotorOutputs + SwitchInputs,
    P: PumpOutput,
    D: DelayNs,
{
    /// Run the current phase and move to the next one
    pub(super) async fn advance<R: Reporter>(&mut self, reporter: &mut R) {
        let result = match self.phase {
            Phase::Idle => return,
            Phase::MovingToPickup(_) => self.move_to_pickup(reporter).await,
            Phase::PickingUp(_) => self.pick_up(reporter).await,
            Phase::MovingToCompartment(d) => self.move_to_compartment(d, reporter).await,
            Phase::Dropping(_) => self.drop_note(reporter).await,
            Phase::ReturningHome(d) => self.return_home(d, reporter).await,
        };

        match result {
            Ok(()) => {
                self.phase = self.phase.transition(Event::PhaseComplete);
                if self.phase.is_idle() {
                    reporter.report(Response::Ready);
                } else {
                    reporter.report(Response::Phase(self.phase.label()));
                }
            }
            Err(fault) => self.handle_fault(fault, reporter).await,
        }
    }

    async fn move_to_pickup<R: Reporter>(&mut self, reporter: &mut R) -> Result<(), Fault> {
        let steps = self.cycle.pickup_y_steps;
        self.cycle_move(MotionCommand::positive(Axis::Y, steps), reporter)
            .await?;
        Ok(())
    }

    /// Lower onto the note, hold suction for the dwell, lift
    async fn pick_up<R: Reporter>(&mut self, reporter: &mut R) -> Result<(), Fault> {
        let depth = self.cycle.pickup_z_steps;
        let dwell_ms = self.cycle.pickup_dwell_ms;

        self.cycle_move(MotionCommand::positive(Axis::Z, depth), reporter)
            .await?;
        self.pump.set_on(true);
        self.dwell(dwell_ms).await?;
        self.cycle_move(MotionCommand::negative(Axis::Z, depth), reporter)
            .await?;
        Ok(())
    }

    /// Back off along Y, then across along X if the compartment needs it
    async fn move_to_compartment<R: Reporter>(&mut self, denomination: Denomination, reporter: &mut R) -> Result<(), Fault> {
        let compartment = *self.compartments.get(denomination);

        self.cycle_move(
            MotionCommand::negative(Axis::Y, compartment.y_backoff_steps),
            reporter,
        )
        .await?;
        if let Some(x_steps) = compartment.x_offset_steps {
            self.cycle_move(MotionCommand::positive(Axis::X, x_steps), reporter)
                .await?;
        }
        Ok(())
    }

    /// Lower into the compartment, release, settle, lift
    async fn drop_note<R: Reporter>(&mut self, reporter: &mut R) -> Result<(), Fault> {
        let depth = self.cycle.drop_z_steps;
        let settle_ms = self.cycle.drop_settle_ms;

        self.cycle_move(MotionCommand::positive(Axis::Z, depth), reporter)
            .await?;
        self.pump.set_on(false);
        self.dwell(settle_ms).await?;
        self.cycle_move(MotionCommand::negative(Axis::Z, depth), reporter)
            .await?;
        Ok(())
    }

    async fn return_home<R: Reporter>(&mut self, denomination: Denomination, reporter: &mut R) -> Result<(), Fault> {
        self.home(reporter).await?;
        reporter.report(Response::SortComplete(denomination));
        Ok(())
    }
}
