//! pptx-probe - Read-only capability probing for PowerPoint templates
//!
//! This library answers the questions a slide generator has before it places
//! anything on a branded template: how big the slides are, which layouts exist,
//! where their placeholders really end up, what the theme's colours and fonts
//! are, and whether footer, slide-number and date placeholders are available.
//! It also turns human-friendly placement descriptions into exact EMU boxes.
//!
//! # Features
//!
//! - **Capability probe**: geometry, layouts, themes and capabilities of a
//!   `.pptx`/`.potx` file in one serializable report
//! - **Deep analysis**: placeholders are measured on throwaway in-memory slides,
//!   so inherited geometry is reported as PowerPoint would show it
//! - **Integrity guard**: the template is checksummed before and after and is
//!   never written
//! - **Coordinate resolver**: percentages, anchors, grid cells, cell labels
//!   such as `C4`, and absolute lengths
//!
//! # Example - Probing a template
//!
//! ```no_run
//! use pptx_probe::{ProbeOptions, probe, render_text};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = probe("corporate.potx", &ProbeOptions::default())?;
//!
//! // Structured record
//! println!("{}", report.to_json_pretty()?);
//!
//! // Or a short summary for people
//! println!("{}", render_text(&report));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Resolving coordinates
//!
//! ```
//! use pptx_probe::coords::{AnchorPoint, CoordinateSpec, Position, SizeSpec, SlideGeometry};
//! use pptx_probe::resolve;
//!
//! # fn main() -> Result<(), pptx_probe::ProbeError> {
//! let geometry = SlideGeometry::new(12_192_000, 6_858_000);
//! let spec = CoordinateSpec::new(
//!     Position::anchor(AnchorPoint::BottomRight),
//!     SizeSpec::parse("20%", "10%")?,
//! );
//! let bbox = resolve(&spec, &geometry, None)?;
//! assert_eq!(bbox.right(), geometry.width);
//! assert_eq!(bbox.bottom(), geometry.height);
//! # Ok(())
//! # }
//! ```

/// Shared error taxonomy, units and XML helpers
pub mod common;

/// Coordinate specifications and their resolution into EMU boxes
///
/// Pure arithmetic over a [`coords::SlideGeometry`]; nothing here touches a
/// file.
pub mod coords;

/// OOXML (Office Open XML) package and PresentationML support
///
/// This module provides the in-memory package the probe reads and on which
/// transient slides are created.
pub mod ooxml;

/// Template capability probing and reporting
pub mod probe;

// Re-export commonly used types for convenience
pub use common::{Emu, ErrorPayload, Length, LengthUnit, ProbeError, Result};
pub use coords::{
    CoordinateSpec, PercentBox, ResolvedBox, Resolver, SlideGeometry, resolve, to_percentages,
};
pub use probe::{CapabilityReport, ProbeOptions, probe, render_text};
