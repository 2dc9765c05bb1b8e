// src/common/timing.rs

// All values in microseconds. The sensor side figures come from the HC-SR04
// datasheet and from measurements on the common module variants.

// === Trigger Pulse ===

/// High time of the trigger pulse. The sensor needs at least 10 us.
#[cfg(not(feature = "scope-trigger"))]
pub const TRIGGER_PULSE_US: u32 = 10;
/// High time of the trigger pulse, stretched so it is visible on a scope.
#[cfg(feature = "scope-trigger")]
pub const TRIGGER_PULSE_US: u32 = 100;

/// Low time after the trigger pulse before a shared pin is switched to input.
/// 20 us instead of 10 us also covers the slower JSN-SR04T modules.
pub const ONE_PIN_TURNAROUND_US: u32 = 20;

// === Echo ===

/// The falling trigger edge starts the sensor's burst; the echo line rises
/// 400 us (old modules) to 600 us (new modules) later. While waiting for that
/// rising edge the non-blocking ranger allows this much on top of the timeout.
pub const ECHO_RISE_ALLOWANCE_US: u32 = 1_000;

/// Timeout used when the caller does not pick one: 20 ms, about 3.43 m.
pub const DEFAULT_TIMEOUT_US: u32 = 20_000;

// === Speed Of Sound (20 degrees celsius) ===
// 331.5 + 0.6 * T m/s gives 343.46 m/s at 20 C, i.e. 58.23 us per centimeter
// there and back. The conversion uses 58.25 so both directions stay integer.

/// Numerator of the microseconds per centimeter ratio (58.25 = 5825 / 100).
pub const MICROS_PER_CM_X100: u32 = 5825;
