//! Unified error types for the probe.
//!
//! Errors from the package layers (`OpcError`, `OoxmlError`) are folded into a
//! single [`ProbeError`] so that callers see one taxonomy, and every error can be
//! turned into a serializable [`ErrorPayload`] instead of surfacing as a crash.
use serde::Serialize;
use thiserror::Error;

/// Main error type for probe and resolver operations.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The template path does not exist
    #[error("Template not found: {0}")]
    FileNotFound(String),

    /// The template path exists but is not a regular file
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// The template could not be read due to permissions
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The template's content changed while it was being probed
    #[error("Template was modified during probe (before {before}, after {after})")]
    MutationDetected { before: String, after: String },

    /// A throwaway slide could not be created from a layout
    #[error("Failed to instantiate layout '{layout}': {reason}")]
    InstantiationFailed { layout: String, reason: String },

    /// A coordinate specification was malformed or out of range
    #[error("Invalid coordinate spec: {0}")]
    InvalidCoordinateSpec(String),

    /// The assembled report is missing a required field
    #[error("Report schema incomplete: {0}")]
    SchemaIncomplete(String),

    /// The file is not a readable presentation package
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the presentation layer
    #[error("OOXML error: {0}")]
    Ooxml(#[from] crate::ooxml::error::OoxmlError),
}

impl ProbeError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::FileNotFound(_) => "file_not_found",
            ProbeError::NotAFile(_) => "not_a_file",
            ProbeError::PermissionDenied(_) => "permission_denied",
            ProbeError::MutationDetected { .. } => "mutation_detected",
            ProbeError::InstantiationFailed { .. } => "instantiation_failed",
            ProbeError::InvalidCoordinateSpec(_) => "invalid_coordinate_spec",
            ProbeError::SchemaIncomplete(_) => "schema_incomplete",
            ProbeError::InvalidTemplate(_) => "invalid_template",
            ProbeError::Io(_) => "io",
            ProbeError::Ooxml(_) => "ooxml",
        }
    }

    /// Convert into the structured payload handed to CLI callers.
    pub fn to_payload(&self) -> ErrorPayload {
        let (checksum_before, checksum_after) = match self {
            ProbeError::MutationDetected { before, after } => {
                (Some(before.clone()), Some(after.clone()))
            },
            _ => (None, None),
        };

        ErrorPayload {
            status: "error",
            kind: self.kind(),
            message: self.to_string(),
            checksum_before,
            checksum_after,
        }
    }
}

/// Structured error result, serialized in place of a report when a probe fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub status: &'static str,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_after: Option<String>,
}

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
