// src/adapters/embedded_hal.rs

//! Ranger HAL traits on top of `embedded-hal` 1.0 pins and delays.
//!
//! `embedded-hal` pins have a fixed direction, so this adapter only serves
//! two-pin wiring: configure the ranger with [`TRIGGER`] and [`ECHO`]. The
//! microsecond clock is not part of `embedded-hal` and is passed in as a
//! closure, e.g. reading a free-running timer counter.
//!
//! Edge notification is platform specific and not provided here; use the
//! adapter with [`SyncRanger`](crate::ranger::SyncRanger).

use crate::common::{
    hal_traits::{DigitalPins, PulseTimer, RangerTimer},
    pin::{Direction, Level, PinId},
};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Identifier of the trigger output pin.
pub const TRIGGER: PinId = PinId::new(0);
/// Identifier of the echo input pin.
pub const ECHO: PinId = PinId::new(1);

/// Errors of the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError<PE>
where
    PE: core::fmt::Debug,
{
    /// The pin driver failed.
    #[error("pin error: {0:?}")]
    Pin(PE),

    /// Neither [`TRIGGER`] nor [`ECHO`].
    #[error("unknown {0}")]
    UnknownPin(PinId),

    /// The pin cannot be used in the requested way, e.g. switching the
    /// trigger to input for one-pin wiring.
    #[error("{0} does not support this operation")]
    Unsupported(PinId),
}

/// Two `embedded-hal` pins, a delay and a microsecond clock.
pub struct EmbeddedHalPins<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
}

impl<T, E, D, C> EmbeddedHalPins<T, E, D, C>
where
    T: OutputPin,
    E: InputPin<Error = T::Error>,
    D: DelayNs,
    C: Fn() -> u32,
{
    pub fn new(trigger: T, echo: E, delay: D, clock: C) -> Self {
        EmbeddedHalPins {
            trigger,
            echo,
            delay,
            clock,
        }
    }

    /// Returns the wrapped peripherals.
    pub fn release(self) -> (T, E, D, C) {
        (self.trigger, self.echo, self.delay, self.clock)
    }

    fn echo_level(&mut self) -> Result<Level, AdapterError<T::Error>> {
        self.echo.is_high().map(Level::from).map_err(AdapterError::Pin)
    }
}

impl<T, E, D, C> DigitalPins for EmbeddedHalPins<T, E, D, C>
where
    T: OutputPin,
    E: InputPin<Error = T::Error>,
    D: DelayNs,
    C: Fn() -> u32,
{
    type Error = AdapterError<T::Error>;

    fn set_direction(&mut self, pin: PinId, direction: Direction) -> Result<(), Self::Error> {
        // Directions are fixed by the pin types, only the matching one is accepted
        match (pin, direction) {
            (TRIGGER, Direction::Output) | (ECHO, Direction::Input) => Ok(()),
            (TRIGGER, _) | (ECHO, _) => Err(AdapterError::Unsupported(pin)),
            _ => Err(AdapterError::UnknownPin(pin)),
        }
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        match pin {
            TRIGGER => {
                let result = match level {
                    Level::High => self.trigger.set_high(),
                    Level::Low => self.trigger.set_low(),
                };
                result.map_err(AdapterError::Pin)
            }
            ECHO => Err(AdapterError::Unsupported(pin)),
            _ => Err(AdapterError::UnknownPin(pin)),
        }
    }

    fn read(&mut self, pin: PinId) -> Result<Level, Self::Error> {
        match pin {
            ECHO => self.echo_level(),
            TRIGGER => Err(AdapterError::Unsupported(pin)),
            _ => Err(AdapterError::UnknownPin(pin)),
        }
    }
}

impl<T, E, D, C> RangerTimer for EmbeddedHalPins<T, E, D, C>
where
    T: OutputPin,
    E: InputPin<Error = T::Error>,
    D: DelayNs,
    C: Fn() -> u32,
{
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn now_us(&self) -> u32 {
        (self.clock)()
    }
}

impl<T, E, D, C> PulseTimer for EmbeddedHalPins<T, E, D, C>
where
    T: OutputPin,
    E: InputPin<Error = T::Error>,
    D: DelayNs,
    C: Fn() -> u32,
{
    // Timing comes from the free-running clock, interrupts only add jitter
    const NEEDS_SUPPRESSION: bool = false;

    fn pulse_width_us(
        &mut self,
        pin: PinId,
        level: Level,
        timeout_us: u32,
    ) -> Result<Option<u32>, Self::Error> {
        if pin != ECHO {
            return Err(AdapterError::Unsupported(pin));
        }
        let start = self.now_us();
        let expired = |now: u32| now.wrapping_sub(start) >= timeout_us;

        // skip the tail of a pulse already in progress
        while self.echo_level()? == level {
            if expired(self.now_us()) {
                return Ok(None);
            }
        }
        while self.echo_level()? != level {
            if expired(self.now_us()) {
                return Ok(None);
            }
        }
        let pulse_start = self.now_us();
        while self.echo_level()? == level {
            if expired(self.now_us()) {
                return Ok(None);
            }
        }
        Ok(Some(self.now_us().wrapping_sub(pulse_start)))
    }
}
