// src/lib.rs

//! Driver for HC-SR04 style ultrasonic rangers.
//!
//! Two wirings are supported: separate trigger and echo pins, or a single pin
//! that is switched between output and input within every measurement. Two
//! rangers share the pin sequence and the distance conversion:
//!
//! - [`SyncRanger`] blocks until the echo pulse ended or the timeout passed.
//! - [`NbRanger`] only emits the trigger pulse; the echo edges are timestamped
//!   from the platform's pin change interrupt into an [`EchoCapture`] and the
//!   result is picked up by polling.
//!
//! The hardware is reached through the traits in [`common::hal_traits`].
//! Distances assume sound at 20 degrees celsius (58.25 us per centimeter,
//! there and back).

#![no_std] // Specify no_std at the crate root

#[macro_use]
mod fmt;

pub mod adapters;
pub mod common;
pub mod ranger;

// Re-export key types for convenience
pub use common::{centimeters_from_micros, micros_from_centimeters};
pub use common::{Echo, PinId, RangerError, Sentinel, Wiring};
pub use ranger::{EchoCapture, NbRanger, SyncRanger};
