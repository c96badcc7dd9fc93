//! Open Packaging Conventions (OPC) layer.
//!
//! Reads the ZIP container of an Office Open XML document into an in-memory
//! part arena:
//!
//! - package structure (parts, relationships)
//! - content type discovery from `[Content_Types].xml`
//! - partname resolution for relative relationship targets
//!
//! The package is read-only with respect to the file on disk; in-memory parts can
//! be added and removed freely.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
