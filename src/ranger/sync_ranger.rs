// src/ranger/sync_ranger.rs

use super::protocol::{apply_wiring, emit_trigger};
use crate::common::{
    conversion::{micros_from_centimeters, Echo},
    error::RangerError,
    hal_traits::{PulseTimer, RangerTimer},
    pin::{Level, PinId},
    Wiring,
};

/// Blocking HC-SR04 ranger.
///
/// Every measurement emits a trigger pulse and then waits inside
/// [`PulseTimer::pulse_width_us`] until the echo ended or the timeout passed,
/// so a call blocks for up to the timeout plus the sensor's burst delay.
#[derive(Debug)]
pub struct SyncRanger<HAL>
where
    HAL: PulseTimer + RangerTimer,
{
    interface: HAL,
    wiring: Wiring,
}

impl<HAL> SyncRanger<HAL>
where
    HAL: PulseTimer + RangerTimer,
{
    /// Creates an unconfigured ranger. Call one of the `configure_*` methods
    /// before measuring.
    pub fn new(interface: HAL) -> Self {
        SyncRanger {
            interface,
            wiring: Wiring::Unconfigured,
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

    /// One pin for trigger and echo. The direction is left as is until the
    /// next measurement.
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
        // Forget the old wiring first, a half-applied one must not be used
        self.wiring = Wiring::Unconfigured;
        apply_wiring(&mut self.interface, wiring)?;
        self.wiring = wiring;
        debug!(
            "ranger wired, trigger {:?} echo {:?}",
            wiring.trigger_pin().map(u8::from),
            wiring.echo_pin().map(u8::from)
        );
        Ok(())
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Triggers one measurement and returns the echo duration.
    ///
    /// Fails with [`RangerError::NotConfigured`] without touching any pin if
    /// no wiring was configured, and with [`RangerError::Timeout`] if no echo
    /// pulse completed within `timeout_us`.
    pub fn measure_distance_micros(
        &mut self,
        timeout_us: u32,
    ) -> Result<Echo, RangerError<HAL::Error>> {
        let echo_pin = emit_trigger(&mut self.interface, self.wiring)?;

        let width = if HAL::NEEDS_SUPPRESSION {
            self.interface.suppress_notifications(|iface| {
                iface.pulse_width_us(echo_pin, Level::High, timeout_us)
            })?
        } else {
            self.interface.pulse_width_us(echo_pin, Level::High, timeout_us)?
        };

        match width {
            Some(micros) => {
                trace!("echo {} us", micros);
                Ok(Echo::from_micros(micros))
            }
            None => {
                trace!("no echo within {} us", timeout_us);
                Err(RangerError::Timeout)
            }
        }
    }

    /// Like [`measure_distance_micros`](Self::measure_distance_micros),
    /// converted to centimeters at 20 degrees celsius.
    pub fn measure_distance_centimeters(
        &mut self,
        timeout_us: u32,
    ) -> Result<u32, RangerError<HAL::Error>> {
        self.measure_distance_micros(timeout_us)
            .map(|echo| echo.centimeters())
    }

    /// Gives up on echoes from objects further away than `timeout_cm`.
    ///
    /// 100 cm corresponds to a timeout of 5825 us.
    pub fn measure_distance_centimeters_with_centimeter_timeout(
        &mut self,
        timeout_cm: u32,
    ) -> Result<u32, RangerError<HAL::Error>> {
        self.measure_distance_centimeters(micros_from_centimeters(timeout_cm))
    }

    /// Returns the HAL interface, consuming the ranger.
    pub fn release(self) -> HAL {
        self.interface
    }
}
