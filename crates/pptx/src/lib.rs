//! PPTX (Office Open XML) package engine for proposal deck assembly.
//!
//! A presentation is handled as an in-memory map of ZIP parts. The engine
//! supports opening existing packages or seeding a blank skeleton, analyzing
//! template layouts and placeholders, composing new slides (placeholders,
//! rich-text runs, tables, speaker notes), cloning slides across packages,
//! and saving to disk or bytes.

pub mod analyze;
pub mod clone;
pub mod compose;
pub mod extract;
pub mod package;
mod skeleton;

pub use analyze::{LayoutInfo, PlaceholderInfo, TemplateAnalysis};
pub use compose::ShapeSpec;
pub use package::Pptx;
