//! Unified error types for the probe.
//!
//! This module provides the error taxonomy shared by the resolver and the
//! probe, plus conversions from the package-layer errors.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{ErrorPayload, ProbeError, Result};
