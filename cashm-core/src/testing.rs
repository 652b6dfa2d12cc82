//! Host-side gantry simulator for unit tests
//!
//! One shared [`SimState`] backs the motor/switch I/O, the pump and the
//! delay source so tests can observe motion, pump and time together.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use cashm_protocol::Response;
use embedded_hal_async::delay::DelayNs;

use crate::gantry::HomingReport;
use crate::motion::{Axis, AxisGroup, Direction, LineLevels, MotionCommand, MoveOutcome};
use crate::traits::{MotorOutputs, PumpOutput, Reporter, SwitchInputs};

/// A run of consecutive steps in one direction on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimMove {
    pub axis: Axis,
    pub direction: Direction,
    pub steps: u32,
}

impl SimMove {
    pub fn new(axis: Axis, direction: Direction, steps: u32) -> Self {
        Self {
            axis,
            direction,
            steps,
        }
    }
}

/// Something observable happened to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Move(SimMove),
    Pump(bool),
    Driver(bool),
    /// Millisecond delays, merged while consecutive
    Wait { ms: u32 },
}

#[derive(Debug, Clone, Copy)]
struct EstopScript {
    /// Pulse count when the script became current
    base_pulses: Option<u64>,
    trip_after: u32,
    release_after_reads: Option<u32>,
}

#[derive(Debug, Default)]
struct SimState {
    clock_ns: u64,
    x: i32,
    y: i32,
    z: i32,
    dir_a: bool,
    dir_b: bool,
    dir_z: bool,
    coupled_high: bool,
    z_high: bool,
    high_since_ns: u64,
    last_high_ns: Option<u64>,
    coupled_pulses: u32,
    z_pulses: u32,
    pulses_while_disabled: u32,
    enabled: bool,
    pump: bool,
    estop: bool,
    estop_reads: u32,
    scripts: VecDeque<EstopScript>,
    disconnected: [bool; 3],
    segment_open: bool,
    events: Vec<SimEvent>,
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}

impl SimState {
    fn total_pulses(&self) -> u64 {
        u64::from(self.coupled_pulses) + u64::from(self.z_pulses)
    }

    fn read_estop(&mut self) -> bool {
        let total = self.total_pulses();
        if let Some(script) = self.scripts.front_mut() {
            let base = *script.base_pulses.get_or_insert(total);
            let release_after = script.release_after_reads;
            if !self.estop && total - base >= u64::from(script.trip_after) {
                self.estop = true;
                self.estop_reads = 0;
            }
            if self.estop && release_after.is_some_and(|n| self.estop_reads >= n) {
                self.estop = false;
                self.scripts.pop_front();
            }
        }
        if self.estop {
            self.estop_reads += 1;
        }
        self.estop
    }

    fn record_step(&mut self, axis: Axis, direction: Direction) {
        if self.segment_open {
            if let Some(SimEvent::Move(last)) = self.events.last_mut() {
                if last.axis == axis && last.direction == direction {
                    last.steps += 1;
                    return;
                }
            }
        }
        self.events.push(SimEvent::Move(SimMove::new(axis, direction, 1)));
        self.segment_open = true;
    }

    fn rising_edge(&mut self, group: AxisGroup) {
        if !self.enabled {
            self.pulses_while_disabled += 1;
        }
        self.high_since_ns = self.clock_ns;

        match group {
            AxisGroup::Coupled => {
                self.coupled_pulses += 1;
                let da = if self.dir_a { 1 } else { -1 };
                let db = if self.dir_b { 1 } else { -1 };
                self.x += (da + db) / 2;
                self.y += (da - db) / 2;
                let axis = if self.dir_a == self.dir_b { Axis::X } else { Axis::Y };
                let direction = if self.dir_a {
                    Direction::Positive
                } else {
                    Direction::Negative
                };
                self.record_step(axis, direction);
            }
            AxisGroup::Z => {
                self.z_pulses += 1;
                self.z += if self.dir_z { 1 } else { -1 };
                let direction = if self.dir_z {
                    Direction::Positive
                } else {
                    Direction::Negative
                };
                self.record_step(Axis::Z, direction);
            }
        }
    }
}

/// Simulated CoreXY gantry with switches at logical zero
///
/// Limit switches read engaged whenever the axis is at or behind zero.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SimGantry {
    state: Rc<RefCell<SimState>>,
}

impl SimGantry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: i32, y: i32, z: i32) -> Self {
        let sim = Self::new();
        {
            let mut s = sim.state.borrow_mut();
            s.x = x;
            s.y = y;
            s.z = z;
        }
        sim
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            state: self.state.clone(),
        }
    }

    pub fn pump(&self) -> SimPump {
        SimPump {
            state: self.state.clone(),
        }
    }

    pub fn position(&self) -> (i32, i32, i32) {
        let s = self.state.borrow();
        (s.x, s.y, s.z)
    }

    pub fn pulse_count(&self, group: AxisGroup) -> u32 {
        let s = self.state.borrow();
        match group {
            AxisGroup::Coupled => s.coupled_pulses,
            AxisGroup::Z => s.z_pulses,
        }
    }

    pub fn pulses_while_disabled(&self) -> u32 {
        self.state.borrow().pulses_while_disabled
    }

    pub fn step_line(&self, group: AxisGroup) -> bool {
        let s = self.state.borrow();
        match group {
            AxisGroup::Coupled => s.coupled_high,
            AxisGroup::Z => s.z_high,
        }
    }

    /// Duration of the most recent completed step pulse
    pub fn last_high_us(&self) -> Option<u64> {
        self.state.borrow().last_high_ns.map(|ns| ns / 1_000)
    }

    pub fn coupled_levels(&self) -> (bool, bool) {
        let s = self.state.borrow();
        (s.dir_a, s.dir_b)
    }

    pub fn elapsed_us(&self) -> u64 {
        self.state.borrow().clock_ns / 1_000
    }

    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    pub fn pump_on(&self) -> bool {
        self.state.borrow().pump
    }

    /// Force the stop input; clears any script
    pub fn set_estop(&self, active: bool) {
        let mut s = self.state.borrow_mut();
        s.estop = active;
        s.estop_reads = 0;
        s.scripts.clear();
    }

    /// Trip the stop once `after_pulses` more pulses have been issued and
    /// release it after it has been read active `release_after_reads` times
    ///
    /// Scripts queue up: each one starts counting pulses when the previous
    /// one has released.
    pub fn arm_estop(&self, after_pulses: u32, release_after_reads: Option<u32>) {
        let mut s = self.state.borrow_mut();
        let base_pulses = if s.scripts.is_empty() {
            Some(s.total_pulses())
        } else {
            None
        };
        s.scripts.push_back(EstopScript {
            base_pulses,
            trip_after: after_pulses,
            release_after_reads,
        });
    }

    pub fn estop_asserted(&self) -> bool {
        self.state.borrow().estop
    }

    /// The switch of `axis` never reads engaged
    pub fn disconnect_limit(&self, axis: Axis) {
        self.state.borrow_mut().disconnected[axis_index(axis)] = true;
    }

    pub fn events(&self) -> Vec<SimEvent> {
        self.state.borrow().events.clone()
    }

    pub fn moves(&self) -> Vec<SimMove> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SimEvent::Move(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&self) {
        let mut s = self.state.borrow_mut();
        s.events.clear();
        s.segment_open = false;
    }
}

impl MotorOutputs for SimGantry {
    fn set_coupled_direction(&mut self, levels: LineLevels) {
        let mut s = self.state.borrow_mut();
        s.dir_a = levels.a;
        s.dir_b = levels.b;
        s.segment_open = false;
    }

    fn set_z_direction(&mut self, down: bool) {
        let mut s = self.state.borrow_mut();
        s.dir_z = down;
        s.segment_open = false;
    }

    fn set_step(&mut self, group: AxisGroup, high: bool) {
        let mut s = self.state.borrow_mut();
        let was_high = match group {
            AxisGroup::Coupled => s.coupled_high,
            AxisGroup::Z => s.z_high,
        };
        if high && !was_high {
            s.rising_edge(group);
        } else if !high && was_high {
            s.last_high_ns = Some(s.clock_ns - s.high_since_ns);
        }
        match group {
            AxisGroup::Coupled => s.coupled_high = high,
            AxisGroup::Z => s.z_high = high,
        }
    }

    fn set_driver_enabled(&mut self, enabled: bool) {
        let mut s = self.state.borrow_mut();
        if s.enabled != enabled {
            s.enabled = enabled;
            s.events.push(SimEvent::Driver(enabled));
        }
    }

    fn driver_enabled(&self) -> bool {
        self.state.borrow().enabled
    }
}

impl SwitchInputs for SimGantry {
    fn limit_engaged(&mut self, axis: Axis) -> bool {
        let s = self.state.borrow();
        if s.disconnected[axis_index(axis)] {
            return false;
        }
        let position = match axis {
            Axis::X => s.x,
            Axis::Y => s.y,
            Axis::Z => s.z,
        };
        position <= 0
    }

    fn estop_active(&mut self) -> bool {
        self.state.borrow_mut().read_estop()
    }
}

/// Pump sharing the simulator state
#[derive(Debug, Clone)]
pub struct SimPump {
    state: Rc<RefCell<SimState>>,
}

impl PumpOutput for SimPump {
    fn set_on(&mut self, on: bool) {
        let mut s = self.state.borrow_mut();
        if s.pump != on {
            s.pump = on;
            s.events.push(SimEvent::Pump(on));
        }
    }

    fn is_on(&self) -> bool {
        self.state.borrow().pump
    }
}

/// Delay that advances the simulated clock instantly
#[derive(Debug, Clone)]
pub struct SimDelay {
    state: Rc<RefCell<SimState>>,
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.state.borrow_mut().clock_ns += u64::from(ns);
    }

    async fn delay_us(&mut self, us: u32) {
        self.state.borrow_mut().clock_ns += u64::from(us) * 1_000;
    }

    /// Millisecond waits are dwells and polls; record them
    async fn delay_ms(&mut self, ms: u32) {
        let mut s = self.state.borrow_mut();
        s.clock_ns += u64::from(ms) * 1_000_000;
        if let Some(SimEvent::Wait { ms: total }) = s.events.last_mut() {
            *total += ms;
        } else {
            s.events.push(SimEvent::Wait { ms });
        }
    }
}

/// Reporter that keeps everything it is told
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub responses: Vec<Response>,
    pub motions: Vec<(MotionCommand, MoveOutcome)>,
    pub homing_passes: u32,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Response> {
        core::mem::take(&mut self.responses)
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, response: Response) {
        self.responses.push(response);
    }

    fn motion(&mut self, command: &MotionCommand, outcome: MoveOutcome) {
        self.motions.push((*command, outcome));
    }

    fn homed(&mut self, _report: &HomingReport) {
        self.homing_passes += 1;
    }
}
