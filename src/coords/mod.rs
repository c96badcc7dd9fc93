//! Coordinate resolution.
//!
//! Callers describe placement in whichever system suits them: slide
//! percentages, a named anchor plus offsets, a numeric grid cell, a spreadsheet
//! style cell label, or absolute lengths. [`Resolver`] turns any of them into a
//! [`ResolvedBox`] in EMUs, and [`to_percentages`] goes back the other way.
//!
//! # Example
//!
//! ```
//! use pptx_probe::coords::{CoordinateSpec, SizeSpec, SlideGeometry, resolve, to_percentages};
//!
//! let geometry = SlideGeometry::new(12_192_000, 6_858_000);
//! let spec = CoordinateSpec::new("C4".parse()?, SizeSpec::parse("25%", "grid:2")?);
//! let bbox = resolve(&spec, &geometry, None)?;
//! let pct = to_percentages(&bbox, &geometry);
//! assert_eq!(pct.width, 25.0);
//! # Ok::<(), pptx_probe::ProbeError>(())
//! ```

pub mod cell;
pub mod geometry;
pub mod resolver;
pub mod spec;

pub use geometry::SlideGeometry;
pub use resolver::{PercentBox, ResolvedBox, Resolver, resolve, to_percentages};
pub use spec::{AnchorPoint, CoordinateSpec, DEFAULT_GRID_SIZE, Dimension, Position, SizeSpec};
