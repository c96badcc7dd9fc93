//! Shapes on slides, layouts and masters.
//!
//! Only placeholder shapes are modelled.
pub mod placeholder;

pub use placeholder::{PlaceholderShape, PlaceholderType, Xfrm};
