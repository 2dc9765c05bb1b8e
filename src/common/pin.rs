// src/common/pin.rs

use core::fmt;
use core::ops::Not;

/// Identifier of a digital I/O pin as understood by the HAL implementation.
///
/// The driver never interprets the number; it is handed back verbatim to the
/// [`DigitalPins`](super::hal_traits::DigitalPins) and
/// [`EdgeSource`](super::hal_traits::EdgeSource) implementations. Passing an
/// identifier the platform does not know is a caller contract violation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PinId(u8);

impl PinId {
    #[inline]
    pub const fn new(number: u8) -> Self {
        PinId(number)
    }

    #[inline]
    pub const fn number(&self) -> u8 {
        self.0
    }
}

impl From<u8> for PinId {
    fn from(value: u8) -> Self {
        PinId(value)
    }
}

impl From<PinId> for u8 {
    fn from(value: PinId) -> Self {
        value.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

/// Logic level of a digital pin.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Direction a pin is configured for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Input,
    Output,
}
