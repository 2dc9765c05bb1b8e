// src/ranger/protocol.rs

// Pin sequences shared by the blocking and the non-blocking ranger.

use crate::common::{
    error::RangerError,
    hal_traits::{DigitalPins, RangerTimer},
    pin::{Direction, Level, PinId},
    timing, Wiring,
};

/// Puts the pins into their idle directions for `wiring`.
///
/// Two-pin wiring fixes the directions once. A shared pin is left alone: it is
/// switched per measurement, and switching it to output here could already
/// look like a trigger edge to the sensor.
pub(crate) fn apply_wiring<HAL>(interface: &mut HAL, wiring: Wiring) -> Result<(), HAL::Error>
where
    HAL: DigitalPins,
{
    if let Wiring::TwoPin { trigger, echo } = wiring {
        interface.set_direction(trigger, Direction::Output)?;
        interface.set_direction(echo, Direction::Input)?;
    }
    Ok(())
}

/// Emits the trigger pulse and prepares the echo pin for sensing.
///
/// Returns the pin the echo has to be read from. On return a shared pin has
/// already been turned around to input; a separate echo pin is never touched.
pub(crate) fn emit_trigger<HAL>(
    interface: &mut HAL,
    wiring: Wiring,
) -> Result<PinId, RangerError<HAL::Error>>
where
    HAL: DigitalPins + RangerTimer,
{
    let (trigger, echo) = match wiring {
        Wiring::Unconfigured => return Err(RangerError::NotConfigured),
        Wiring::OnePin { pin } => (pin, None),
        Wiring::TwoPin { trigger, echo } => (trigger, Some(echo)),
    };

    interface.write(trigger, Level::High)?;
    if echo.is_none() {
        // only now, so that the switch to output happens on an already high level
        interface.set_direction(trigger, Direction::Output)?;
    }
    interface.delay_us(timing::TRIGGER_PULSE_US);
    // falling edge starts the measurement cycle inside the sensor
    interface.write(trigger, Level::Low)?;

    match echo {
        Some(echo) => Ok(echo),
        None => {
            // line reads high after the switch because of the module's pull-up
            interface.delay_us(timing::ONE_PIN_TURNAROUND_US);
            interface.set_direction(trigger, Direction::Input)?;
            Ok(trigger)
        }
    }
}
