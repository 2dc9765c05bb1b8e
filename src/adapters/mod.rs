// src/adapters/mod.rs

// Ready-made HAL trait implementations for common driver crates.

#[cfg(feature = "impl-embedded-hal")]
pub mod embedded_hal;

#[cfg(feature = "impl-embedded-hal")]
pub use self::embedded_hal::{AdapterError, EmbeddedHalPins};
