// src/ranger/mock.rs

// Simulated HAL shared by the ranger tests. Time only moves through delays,
// pulse measurements and explicit `advance_time` calls.

use crate::common::{
    hal_traits::{DigitalPins, EdgeSource, PulseTimer, RangerTimer},
    pin::{Direction, Level, PinId},
};

const LOG_SIZE: usize = 64;
const PIN_COUNT: usize = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    SetDirection(PinId, Direction),
    Write(PinId, Level),
    Read(PinId),
    DelayUs(u32),
    Pulse { pin: PinId, level: Level, timeout_us: u32, suppressed: bool },
    EnableEdges(PinId),
    DisableEdges(PinId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockIoError;

/// `SUPPRESS` selects the value of `PulseTimer::NEEDS_SUPPRESSION`.
#[derive(Debug, Clone)]
pub(crate) struct MockInterface<const SUPPRESS: bool = false> {
    pub now_us: u32,
    pub ops: [Option<Op>; LOG_SIZE],
    pub op_count: usize,
    pub directions: [Option<Direction>; PIN_COUNT],
    pub levels: [Level; PIN_COUNT],
    pub edges_enabled: [bool; PIN_COUNT],
    pub disable_calls: u32,
    pub suppressed: bool,
    /// Width of the next echo pulse, `None` for a silent sensor.
    pub staged_pulse_us: Option<u32>,
    pub fail_pin: Option<PinId>,
}

impl<const SUPPRESS: bool> MockInterface<SUPPRESS> {
    pub fn new() -> Self {
        MockInterface {
            now_us: 0,
            ops: [None; LOG_SIZE],
            op_count: 0,
            directions: [None; PIN_COUNT],
            levels: [Level::Low; PIN_COUNT],
            edges_enabled: [false; PIN_COUNT],
            disable_calls: 0,
            suppressed: false,
            staged_pulse_us: None,
            fail_pin: None,
        }
    }

    pub fn advance_time(&mut self, us: u32) {
        self.now_us = self.now_us.wrapping_add(us);
    }

    pub fn clear_log(&mut self) {
        self.ops = [None; LOG_SIZE];
        self.op_count = 0;
    }

    pub fn log(&self) -> impl Iterator<Item = Op> + '_ {
        self.ops[..self.op_count].iter().flatten().copied()
    }

    pub fn direction(&self, pin: PinId) -> Option<Direction> {
        self.directions[pin.number() as usize]
    }

    pub fn edges_enabled(&self, pin: PinId) -> bool {
        self.edges_enabled[pin.number() as usize]
    }

    fn record(&mut self, op: Op) {
        assert!(self.op_count < LOG_SIZE, "mock op log full");
        self.ops[self.op_count] = Some(op);
        self.op_count += 1;
    }

    fn check(&self, pin: PinId) -> Result<(), MockIoError> {
        if self.fail_pin == Some(pin) {
            Err(MockIoError)
        } else {
            Ok(())
        }
    }
}

impl<const SUPPRESS: bool> DigitalPins for MockInterface<SUPPRESS> {
    type Error = MockIoError;

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), Self::Error> {
        self.check(pin)?;
        self.record(Op::SetDirection(pin, direction));
        self.directions[pin.number() as usize] = Some(direction);
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        self.check(pin)?;
        self.record(Op::Write(pin, level));
        self.levels[pin.number() as usize] = level;
        Ok(())
    }

    fn read(&mut self, pin: PinId) -> Result<Level, Self::Error> {
        self.check(pin)?;
        self.record(Op::Read(pin));
        Ok(self.levels[pin.number() as usize])
    }
}

impl<const SUPPRESS: bool> RangerTimer for MockInterface<SUPPRESS> {
    fn delay_us(&mut self, us: u32) {
        self.record(Op::DelayUs(us));
        self.advance_time(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms * 1000);
    }

    fn now_us(&self) -> u32 {
        self.now_us
    }
}

impl<const SUPPRESS: bool> PulseTimer for MockInterface<SUPPRESS> {
    const NEEDS_SUPPRESSION: bool = SUPPRESS;

    fn pulse_width_us(
        &mut self,
        pin: PinId,
        level: Level,
        timeout_us: u32,
    ) -> Result<Option<u32>, Self::Error> {
        self.check(pin)?;
        let suppressed = self.suppressed;
        self.record(Op::Pulse { pin, level, timeout_us, suppressed });
        match self.staged_pulse_us.take() {
            Some(width) if width <= timeout_us => {
                self.advance_time(width);
                Ok(Some(width))
            }
            _ => {
                self.advance_time(timeout_us);
                Ok(None)
            }
        }
    }

    fn suppress_notifications<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        critical_section::with(|_cs| {
            self.suppressed = true;
            let result = f(self);
            self.suppressed = false;
            result
        })
    }
}

impl<const SUPPRESS: bool> EdgeSource for MockInterface<SUPPRESS> {
    fn enable_edge_notification(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.check(pin)?;
        self.record(Op::EnableEdges(pin));
        self.edges_enabled[pin.number() as usize] = true;
        Ok(())
    }

    fn disable_edge_notification(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.check(pin)?;
        self.record(Op::DisableEdges(pin));
        self.edges_enabled[pin.number() as usize] = false;
        self.disable_calls += 1;
        Ok(())
    }
}

pub(crate) type Mock = MockInterface<false>;
pub(crate) type SuppressingMock = MockInterface<true>;
