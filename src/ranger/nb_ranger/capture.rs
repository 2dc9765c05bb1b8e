// src/ranger/nb_ranger/capture.rs

use crate::common::pin::Level;
use portable_atomic::{AtomicU64, Ordering};

// Layout of the state word: phase tag in bits 32..40, payload in bits 0..32.
const TAG_SHIFT: u32 = 32;
const TAG_IDLE: u64 = 0;
const TAG_ARMED: u64 = 1;
const TAG_PULSE_STARTED: u64 = 2;
const TAG_COMPLETE: u64 = 3;
const TAG_TIMED_OUT: u64 = 4;

/// Where the current measurement cycle stands, as seen by the edge handler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CapturePhase {
    /// No measurement armed. Edges are ignored.
    Idle,
    /// Trigger sent, waiting for the echo to rise.
    Armed { triggered_at: u32 },
    /// Echo is high since `started_at`.
    PulseStarted { started_at: u32 },
    /// Echo fell again. Terminal until the next arm.
    Complete { duration_us: u32 },
    /// The poller gave up. Terminal until the next arm.
    TimedOut,
}

impl CapturePhase {
    const fn encode(self) -> u64 {
        let (tag, payload) = match self {
            CapturePhase::Idle => (TAG_IDLE, 0),
            CapturePhase::Armed { triggered_at } => (TAG_ARMED, triggered_at),
            CapturePhase::PulseStarted { started_at } => (TAG_PULSE_STARTED, started_at),
            CapturePhase::Complete { duration_us } => (TAG_COMPLETE, duration_us),
            CapturePhase::TimedOut => (TAG_TIMED_OUT, 0),
        };
        (tag << TAG_SHIFT) | payload as u64
    }

    const fn decode(word: u64) -> Self {
        let payload = word as u32;
        match word >> TAG_SHIFT {
            TAG_ARMED => CapturePhase::Armed { triggered_at: payload },
            TAG_PULSE_STARTED => CapturePhase::PulseStarted { started_at: payload },
            TAG_COMPLETE => CapturePhase::Complete { duration_us: payload },
            TAG_TIMED_OUT => CapturePhase::TimedOut,
            _ => CapturePhase::Idle,
        }
    }
}

/// Echo timestamps shared between the edge interrupt and the polling ranger.
///
/// The whole state (phase and timestamp or duration) lives in one atomic
/// word, so a reader sees either the complete result of an edge or nothing of
/// it. Place it in a `static` and hand a reference to both the
/// [`NbRanger`](super::NbRanger) and the interrupt handler:
///
/// ```ignore
/// static ECHO: EchoCapture = EchoCapture::new();
///
/// #[interrupt]
/// fn PCINT2() {
///     ECHO.on_edge(echo_level(), micros());
/// }
/// ```
#[derive(Debug)]
pub struct EchoCapture {
    state: AtomicU64,
}

impl EchoCapture {
    pub const fn new() -> Self {
        EchoCapture {
            state: AtomicU64::new(CapturePhase::Idle.encode()),
        }
    }

    pub fn phase(&self) -> CapturePhase {
        CapturePhase::decode(self.state.load(Ordering::Acquire))
    }

    /// Edge handler entry point. `level` is the echo pin level after the
    /// transition, `now_us` the wrapping microsecond clock.
    ///
    /// Only timestamps and compares; safe to call from interrupt context at
    /// any priority. Must not be called reentrantly for the same capture.
    #[inline]
    pub fn on_edge(&self, level: Level, now_us: u32) {
        match level {
            Level::High => self.on_rising(now_us),
            Level::Low => self.on_falling(now_us),
        }
    }

    /// Start of the echo pulse. A second rising edge restarts the pulse.
    pub fn on_rising(&self, now_us: u32) {
        let current = self.state.load(Ordering::Acquire);
        if let CapturePhase::Armed { .. } | CapturePhase::PulseStarted { .. } =
            CapturePhase::decode(current)
        {
            let next = CapturePhase::PulseStarted { started_at: now_us }.encode();
            // Losing the exchange means the poller timed out in between
            let _ = self
                .state
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire);
        }
    }

    /// End of the echo pulse. Ignored unless a start was recorded, so a line
    /// that was already high when the capture got armed is skipped.
    pub fn on_falling(&self, now_us: u32) {
        let current = self.state.load(Ordering::Acquire);
        if let CapturePhase::PulseStarted { started_at } = CapturePhase::decode(current) {
            let next = CapturePhase::Complete {
                duration_us: now_us.wrapping_sub(started_at),
            }
            .encode();
            let _ = self
                .state
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire);
        }
    }

    /// Starts a new cycle, dropping whatever the previous one left behind.
    pub(crate) fn arm(&self, now_us: u32) {
        self.state.store(
            CapturePhase::Armed { triggered_at: now_us }.encode(),
            Ordering::Release,
        );
    }

    pub(crate) fn reset(&self) {
        self.state.store(CapturePhase::Idle.encode(), Ordering::Release);
    }

    /// Moves from `observed` to [`CapturePhase::TimedOut`].
    ///
    /// Fails with the actual phase if an edge changed the state after
    /// `observed` was read; the caller then has to look again instead of
    /// discarding a measurement that just completed.
    pub(crate) fn time_out(&self, observed: CapturePhase) -> Result<(), CapturePhase> {
        self.state
            .compare_exchange(
                observed.encode(),
                CapturePhase::TimedOut.encode(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(CapturePhase::decode)
    }
}

impl Default for EchoCapture {
    fn default() -> Self {
        Self::new()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_encode_decode() {
        for phase in [
            CapturePhase::Idle,
            CapturePhase::Armed { triggered_at: u32::MAX },
            CapturePhase::PulseStarted { started_at: 17 },
            CapturePhase::Complete { duration_us: 0 },
            CapturePhase::TimedOut,
        ] {
            assert_eq!(CapturePhase::decode(phase.encode()), phase);
        }
    }

    #[test]
    fn test_edges_ignored_when_idle() {
        let capture = EchoCapture::new();
        capture.on_rising(10);
        capture.on_falling(20);
        assert_eq!(capture.phase(), CapturePhase::Idle);
    }

    #[test]
    fn test_rising_then_falling_completes() {
        let capture = EchoCapture::new();
        capture.arm(0);
        capture.on_edge(Level::High, 0);
        assert_eq!(capture.phase(), CapturePhase::PulseStarted { started_at: 0 });
        capture.on_edge(Level::Low, 2914);
        assert_eq!(capture.phase(), CapturePhase::Complete { duration_us: 2914 });

        // late edges do not touch a finished cycle
        capture.on_rising(3000);
        capture.on_falling(4000);
        assert_eq!(capture.phase(), CapturePhase::Complete { duration_us: 2914 });
    }

    #[test]
    fn test_falling_before_rising_is_ignored() {
        let capture = EchoCapture::new();
        capture.arm(5);
        capture.on_falling(10);
        assert_eq!(capture.phase(), CapturePhase::Armed { triggered_at: 5 });
    }

    #[test]
    fn test_second_rising_restarts_pulse() {
        let capture = EchoCapture::new();
        capture.arm(0);
        capture.on_rising(100);
        capture.on_rising(150);
        capture.on_falling(400);
        assert_eq!(capture.phase(), CapturePhase::Complete { duration_us: 250 });
    }

    #[test]
    fn test_duration_across_clock_wrap() {
        let capture = EchoCapture::new();
        capture.arm(u32::MAX - 1000);
        capture.on_rising(u32::MAX - 99);
        capture.on_falling(500);
        assert_eq!(capture.phase(), CapturePhase::Complete { duration_us: 600 });
    }

    #[test]
    fn test_time_out_loses_against_completion() {
        let capture = EchoCapture::new();
        capture.arm(0);
        capture.on_rising(10);
        let observed = capture.phase();
        // edge fires between the poller's read and its exchange
        capture.on_falling(60);
        assert_eq!(
            capture.time_out(observed),
            Err(CapturePhase::Complete { duration_us: 50 })
        );
        assert_eq!(capture.phase(), CapturePhase::Complete { duration_us: 50 });
    }

    #[test]
    fn test_edges_ignored_after_time_out() {
        let capture = EchoCapture::new();
        capture.arm(0);
        assert_eq!(capture.time_out(CapturePhase::Armed { triggered_at: 0 }), Ok(()));
        capture.on_rising(10);
        capture.on_falling(20);
        assert_eq!(capture.phase(), CapturePhase::TimedOut);
    }

    #[test]
    fn test_reader_never_sees_partial_result() {
        static CAPTURE: EchoCapture = EchoCapture::new();

        for round in 0..200u32 {
            CAPTURE.arm(0);
            let start = round * 10;
            std::thread::scope(|scope| {
                scope.spawn(|| {
                    CAPTURE.on_rising(start);
                    CAPTURE.on_falling(start + 2914);
                });
                loop {
                    match CAPTURE.phase() {
                        CapturePhase::Complete { duration_us } => {
                            assert_eq!(duration_us, 2914);
                            break;
                        }
                        CapturePhase::Armed { .. } | CapturePhase::PulseStarted { .. } => {
                            core::hint::spin_loop()
                        }
                        other => panic!("unexpected phase {:?}", other),
                    }
                }
            });
        }
    }
}
