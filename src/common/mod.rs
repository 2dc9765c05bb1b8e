// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod conversion;
pub mod error;
pub mod hal_traits;
pub mod pin;
pub mod timing;
pub mod wiring;

// --- Re-export key types/traits/functions for easier access ---

// From conversion.rs
pub use conversion::{centimeters_from_micros, micros_from_centimeters, Echo, Sentinel};

// From error.rs
pub use error::RangerError;

// From hal_traits.rs
pub use hal_traits::{DigitalPins, EdgeSource, PulseTimer, RangerTimer};

// From pin.rs
pub use pin::{Direction, Level, PinId};

// From wiring.rs
pub use wiring::Wiring;

// timing.rs constants are reached as common::timing::*
