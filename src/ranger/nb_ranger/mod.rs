// src/ranger/nb_ranger/mod.rs

mod capture;

pub use capture::{CapturePhase, EchoCapture};

use super::protocol::{apply_wiring, emit_trigger};
use crate::common::{
    conversion::{micros_from_centimeters, Echo, Sentinel},
    error::RangerError,
    hal_traits::{EdgeSource, RangerTimer},
    pin::PinId,
    timing, Wiring,
};

/// Progress of the current cycle as tracked by the polling side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Cycle {
    NotStarted,
    InFlight { echo_pin: PinId },
    /// `None` for a timeout.
    Finished(Option<Echo>),
}

/// Interrupt-driven HC-SR04 ranger.
///
/// [`start_measurement`](Self::start_measurement) emits the trigger pulse,
/// arms edge notification on the echo pin and returns after roughly the
/// trigger pulse width. The platform's edge interrupt feeds
/// [`EchoCapture::on_edge`]; [`poll_measurement_finished`](Self::poll_measurement_finished)
/// picks up the result or declares a timeout.
///
/// Polling follows the `nb` convention, so a caller that wants to wait can
/// use `nb::block!(ranger.poll_measurement_finished())`.
#[derive(Debug)]
pub struct NbRanger<'c, HAL>
where
    HAL: EdgeSource + RangerTimer,
{
    interface: HAL,
    capture: &'c EchoCapture,
    wiring: Wiring,
    timeout_us: u32,
    cycle: Cycle,
}

impl<'c, HAL> NbRanger<'c, HAL>
where
    HAL: EdgeSource + RangerTimer,
{
    pub fn new(interface: HAL, capture: &'c EchoCapture) -> Self {
        NbRanger {
            interface,
            capture,
            wiring: Wiring::Unconfigured,
            timeout_us: timing::DEFAULT_TIMEOUT_US,
            cycle: Cycle::NotStarted,
        }
    }

    /// Separate trigger and echo pins. Sets both directions right away.
    pub fn configure_two_pin(
        &mut self,
        trigger: PinId,
        echo: PinId,
    ) -> Result<(), RangerError<HAL::Error>> {
        self.configure_wiring(Wiring::TwoPin { trigger, echo })
    }

    /// One pin for trigger and echo, switched to input after each trigger.
    pub fn configure_one_pin(&mut self, pin: PinId) -> Result<(), RangerError<HAL::Error>> {
        self.configure_wiring(Wiring::OnePin { pin })
    }

    /// Two-pin wiring if `echo` is given, one-pin wiring otherwise.
    pub fn configure(
        &mut self,
        trigger: PinId,
        echo: Option<PinId>,
    ) -> Result<(), RangerError<HAL::Error>> {
        self.configure_wiring(Wiring::from_pins(trigger, echo))
    }

    fn configure_wiring(&mut self, wiring: Wiring) -> Result<(), RangerError<HAL::Error>> {
        // The old echo pin must not keep delivering edges
        self.cancel_measurement()?;
        self.wiring = Wiring::Unconfigured;
        apply_wiring(&mut self.interface, wiring)?;
        self.wiring = wiring;
        Ok(())
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Echo timeout of the current (or last) cycle in microseconds.
    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    /// True between a successful start and the poll that finished it.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.cycle, Cycle::InFlight { .. })
    }

    /// Triggers a measurement and returns without waiting for the echo.
    ///
    /// `timeout_cm` bounds the distance searched, see
    /// [`micros_from_centimeters`]. A cycle still in flight is abandoned.
    pub fn start_measurement(&mut self, timeout_cm: u32) -> Result<(), RangerError<HAL::Error>> {
        if !self.wiring.is_configured() {
            return Err(RangerError::NotConfigured);
        }
        self.cancel_measurement()?;

        self.timeout_us = micros_from_centimeters(timeout_cm);
        let echo_pin = emit_trigger(&mut self.interface, self.wiring)?;

        // Armed only after the turnaround, the trigger's own edges stay out
        self.capture.arm(self.interface.now_us());
        if let Err(e) = self.interface.enable_edge_notification(echo_pin) {
            self.capture.reset();
            return Err(RangerError::Io(e));
        }
        self.cycle = Cycle::InFlight { echo_pin };
        trace!("measurement started, timeout {} us", self.timeout_us);
        Ok(())
    }

    /// Checks whether the measurement started last has finished.
    ///
    /// - `Ok(echo)`: the echo completed; edge notification is off again.
    /// - `Err(WouldBlock)`: still waiting for the echo.
    /// - `Err(Other(Timeout))`: no complete echo in time; edge notification is
    ///   off again.
    /// - `Err(Other(NotStarted))`: no measurement was ever started.
    ///
    /// Once finished, further polls return the same result without touching
    /// the hardware, until the next start.
    pub fn poll_measurement_finished(&mut self) -> nb::Result<Echo, RangerError<HAL::Error>> {
        let echo_pin = match self.cycle {
            Cycle::NotStarted => return Err(nb::Error::Other(RangerError::NotStarted)),
            Cycle::Finished(outcome) => {
                return outcome.ok_or(nb::Error::Other(RangerError::Timeout))
            }
            Cycle::InFlight { echo_pin } => echo_pin,
        };

        let phase = self.capture.phase();
        let outcome = match phase {
            CapturePhase::Complete { duration_us } => Some(Echo::from_micros(duration_us)),
            CapturePhase::PulseStarted { started_at } => {
                self.time_out_after(phase, started_at, self.timeout_us)?;
                None
            }
            CapturePhase::Armed { triggered_at } => {
                let limit = self.timeout_us.saturating_add(timing::ECHO_RISE_ALLOWANCE_US);
                self.time_out_after(phase, triggered_at, limit)?;
                None
            }
            // Capture was re-armed or reset behind our back, nothing will arrive
            CapturePhase::Idle | CapturePhase::TimedOut => None,
        };

        self.interface
            .disable_edge_notification(echo_pin)
            .map_err(|e| nb::Error::Other(RangerError::Io(e)))?;
        self.cycle = Cycle::Finished(outcome);

        match outcome {
            Some(echo) => {
                trace!("echo {} us", echo.micros());
                Ok(echo)
            }
            None => {
                trace!("no echo within {} us", self.timeout_us);
                Err(nb::Error::Other(RangerError::Timeout))
            }
        }
    }

    /// Declares a timeout if more than `limit_us` passed since `since`.
    ///
    /// `WouldBlock` while the limit has not passed, or if an edge arrived
    /// while deciding, in which case the next poll sees the newer phase.
    fn time_out_after(
        &self,
        observed: CapturePhase,
        since: u32,
        limit_us: u32,
    ) -> nb::Result<(), RangerError<HAL::Error>> {
        if self.interface.now_us().wrapping_sub(since) < limit_us {
            return Err(nb::Error::WouldBlock);
        }
        self.capture
            .time_out(observed)
            .map_err(|_| nb::Error::WouldBlock)
    }

    /// Abandons a measurement in flight and turns its edge notification off.
    ///
    /// Callers that stop polling should cancel, otherwise the interrupt keeps
    /// firing for a sensor nobody reads. A no-op when nothing is in flight.
    pub fn cancel_measurement(&mut self) -> Result<(), RangerError<HAL::Error>> {
        if let Cycle::InFlight { echo_pin } = self.cycle {
            self.interface.disable_edge_notification(echo_pin)?;
            self.capture.reset();
            self.cycle = Cycle::NotStarted;
            warn!("measurement cancelled");
        }
        Ok(())
    }

    /// Distance of the last finished cycle in centimeters, 0 after a timeout
    /// or if no cycle finished yet.
    pub fn last_distance_centimeters(&self) -> u32 {
        match self.cycle {
            Cycle::Finished(outcome) => outcome.ok_or(()).centimeters_or_zero(),
            _ => 0,
        }
    }

    /// Returns the HAL interface, consuming the ranger.
    ///
    /// A measurement still in flight keeps its edge notification enabled;
    /// cancel it first.
    pub fn release(self) -> HAL {
        self.interface
    }
}
