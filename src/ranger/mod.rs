// src/ranger/mod.rs

mod protocol;

pub mod nb_ranger;
pub mod sync_ranger;

#[cfg(test)]
pub(crate) mod mock;

// Re-export the public ranger structs
pub use nb_ranger::{CapturePhase, EchoCapture, NbRanger};
pub use sync_ranger::SyncRanger;
