//! Parts for PowerPoint presentation documents.
//!
//! Thin wrappers over raw OPC parts that know how to read one kind of
//! PresentationML part.
pub mod presentation;
pub mod slide;
pub mod theme;

pub use presentation::{PresentationPart, SlideId};
pub use slide::{SlideLayoutPart, SlideMasterPart, SlidePart};
pub use theme::{FontFaces, FontScheme, SchemeColor, Theme, ThemePart};
