// src/common/hal_traits.rs

use super::pin::{Direction, Level, PinId};
use core::fmt::Debug;

/// Digital I/O primitives the rangers drive the sensor with.
pub trait DigitalPins {
    /// Associated error type for pin access errors.
    type Error: Debug;

    /// Configures `pin` as input or output.
    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), Self::Error>;

    /// Drives an output pin to `level`.
    ///
    /// Writing to a pin that is currently an input must be accepted; the
    /// one-pin sequence writes the level before switching to output so the
    /// direction change itself does not produce a trigger edge.
    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;

    /// Reads the current level of `pin`.
    fn read(&mut self, pin: PinId) -> Result<Level, Self::Error>;
}

/// Abstraction for delay and clock operations.
///
/// Note: the delays could be replaced by `embedded_hal::delay::DelayNs`; the
/// `impl-embedded-hal` adapter does exactly that.
pub trait RangerTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Monotonic microsecond counter.
    ///
    /// The counter wraps at a platform-defined period. Differences must be
    /// taken with `wrapping_sub`, which is correct as long as the measured
    /// interval is shorter than one wrap.
    fn now_us(&self) -> u32;
}

/// Blocking pulse-width measurement used by the blocking ranger.
pub trait PulseTimer: DigitalPins {
    /// Whether [`pulse_width_us`](Self::pulse_width_us) must run with
    /// asynchronous notifications suppressed to give correct readings.
    ///
    /// Platforms whose pulse measurement counts loop iterations set this;
    /// platforms that read a free-running clock leave it `false` so their
    /// millisecond tick keeps running during the wait.
    const NEEDS_SUPPRESSION: bool = false;

    /// Waits for `pin` to go to `level` and measures how long it stays there.
    ///
    /// A pulse already in progress when the call starts is skipped. Returns
    /// `Ok(None)` if no complete pulse was observed within `timeout_us`.
    fn pulse_width_us(
        &mut self,
        pin: PinId,
        level: Level,
        timeout_us: u32,
    ) -> Result<Option<u32>, Self::Error>;

    /// Runs `f` with asynchronous notifications (interrupts) suppressed and
    /// restores them afterwards.
    ///
    /// The default uses the global `critical-section` implementation of the
    /// target.
    fn suppress_notifications<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        critical_section::with(|_cs| f(self))
    }
}

/// Edge-change notification for the echo pin, used by the non-blocking ranger.
///
/// The implementation's interrupt handler is expected to forward every
/// transition of the enabled pin to
/// [`EchoCapture::on_edge`](crate::ranger::EchoCapture::on_edge). Which
/// hardware facility delivers the edges (pin change groups, EXTI lines, GPIOTE
/// channels) is the implementation's choice.
pub trait EdgeSource: DigitalPins {
    /// Starts delivering both rising and falling edges of `pin`.
    fn enable_edge_notification(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Stops delivering edges of `pin`.
    fn disable_edge_notification(&mut self, pin: PinId) -> Result<(), Self::Error>;
}
