//! Document object model.
//!
//! Value types for the revisable document tree: a [`Document`] is either a
//! Word paragraph sequence or a slide/shape tree, and every rewritable
//! [`TextUnit`] owns ordered, styled [`Run`]s plus any embedded [`Drawing`]s.
//! All types are serde round-trippable; JSON is the persistence format.

mod document;
mod unit;

pub use document::{Body, Document, Metadata, Shape, Slide};
pub use unit::{Drawing, RgbColor, Run, RunStyle, TextUnit, UnitSnapshot};
