//! Error types for the PresentationML layer.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Errors raised while reading or editing the in-memory presentation.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// The main part is not a presentation or template
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// A required relationship is missing or points nowhere
    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Structurally invalid content
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A transient slide could not be fully removed again
    #[error("Slide removal incomplete: {0}")]
    SlideRemoval(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
