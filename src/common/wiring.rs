// src/common/wiring.rs

use super::pin::PinId;

/// How the sensor is connected to the controller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Wiring {
    /// No configuration call has been made yet. Measurements fail with
    /// [`RangerError::NotConfigured`](super::error::RangerError::NotConfigured).
    #[default]
    Unconfigured,
    /// Trigger and echo share one pin (HY-SRF05 with OUT grounded, or an
    /// HC-SR04 with trigger and echo bridged by a resistor). The direction is
    /// switched inside every measurement.
    OnePin { pin: PinId },
    /// Separate trigger output and echo input.
    TwoPin { trigger: PinId, echo: PinId },
}

impl Wiring {
    /// `None` as echo pin selects one-pin mode.
    pub const fn from_pins(trigger: PinId, echo: Option<PinId>) -> Self {
        match echo {
            Some(echo) => Wiring::TwoPin { trigger, echo },
            None => Wiring::OnePin { pin: trigger },
        }
    }

    #[inline]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Wiring::Unconfigured)
    }

    /// The pin the trigger pulse is emitted on.
    pub const fn trigger_pin(&self) -> Option<PinId> {
        match *self {
            Wiring::Unconfigured => None,
            Wiring::OnePin { pin } => Some(pin),
            Wiring::TwoPin { trigger, .. } => Some(trigger),
        }
    }

    /// The pin the echo pulse is read from.
    pub const fn echo_pin(&self) -> Option<PinId> {
        match *self {
            Wiring::Unconfigured => None,
            Wiring::OnePin { pin } => Some(pin),
            Wiring::TwoPin { echo, .. } => Some(echo),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        let wiring = Wiring::default();
        assert!(!wiring.is_configured());
        assert_eq!(wiring.trigger_pin(), None);
        assert_eq!(wiring.echo_pin(), None);
    }

    #[test]
    fn test_from_pins() {
        let one = Wiring::from_pins(PinId::new(4), None);
        assert_eq!(one, Wiring::OnePin { pin: PinId::new(4) });
        assert_eq!(one.trigger_pin(), one.echo_pin());

        let two = Wiring::from_pins(PinId::new(4), Some(PinId::new(5)));
        assert_eq!(two.trigger_pin(), Some(PinId::new(4)));
        assert_eq!(two.echo_pin(), Some(PinId::new(5)));
    }
}
