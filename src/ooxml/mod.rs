//! Office Open XML (OOXML) support for presentation templates.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, content types, parts,
//!    relationships) held entirely in memory
//! 2. **PresentationML** (`pptx`): presentation, masters, layouts, slides,
//!    themes and placeholders on top of the OPC layer
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_probe::ooxml::pptx::Package;
//!
//! let pkg = Package::open("corporate.potx")?;
//! let pres = pkg.presentation()?;
//! println!("{} layouts", pres.slide_layouts()?.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
