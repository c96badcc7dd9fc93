//! PowerPoint (.pptx/.potx) presentation support.
//!
//! A read-mostly model of PresentationML packages: the presentation part, slide
//! masters, layouts, slides and themes, plus the ability to add and remove slides
//! in memory so placeholder geometry can be measured on a real slide.
//!
//! - `Package`: the package opened from a file or bytes
//! - `Presentation`: slide size, masters, layouts and slides
//! - `Slide`, `SlideLayout`, `SlideMaster`: relationship-aware views over parts
//! - `with_transient_slide`: create, measure and discard a slide
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_probe::ooxml::pptx::Package;
//!
//! let package = Package::open("corporate.potx")?;
//! let pres = package.presentation()?;
//!
//! for (master_index, layout) in pres.slide_layouts()? {
//!     println!("master {}: {}", master_index, layout.name()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod lifecycle;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;
pub mod slide_xml;

#[cfg(test)]
pub(crate) mod fixtures;

pub use lifecycle::with_transient_slide;
pub use package::{Package, SlideHandle};
pub use presentation::Presentation;
pub use shapes::{PlaceholderShape, PlaceholderType, Xfrm};
pub use slide::{Slide, SlideLayout, SlideMaster};
