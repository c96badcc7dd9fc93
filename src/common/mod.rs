//! Common types and utilities shared by the resolver and the probe.

// Submodule declarations
pub mod error;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{ErrorPayload, ProbeError, Result};
pub use unit::{Emu, Length, LengthUnit};
