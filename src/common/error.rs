// src/common/error.rs

/// Errors reported by the rangers.
///
/// `E` is the error type of the HAL implementation (see
/// [`DigitalPins::Error`](super::hal_traits::DigitalPins::Error)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangerError<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No echo pulse was observed within the timeout.
    #[error("No echo within timeout")]
    Timeout,

    /// A measurement was requested before the pins were configured.
    #[error("Sensor pins not configured")]
    NotConfigured,

    /// The non-blocking ranger was polled without a prior start.
    #[error("No measurement in progress")]
    NotStarted,
}

impl<E: core::fmt::Debug> RangerError<E> {
    /// True for the outcome "the sensor answered nothing", as opposed to a
    /// usage or I/O problem.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RangerError::Timeout)
    }
}

// Allow mapping from underlying HAL error, so `?` works on HAL calls
impl<E: core::fmt::Debug> From<E> for RangerError<E> {
    fn from(e: E) -> Self {
        RangerError::Io(e)
    }
}
