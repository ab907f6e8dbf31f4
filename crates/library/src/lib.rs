//! Slide library index: scans a theme-organized directory tree, classifies
//! each slide file against the proposal taxonomy, and serves keyword search
//! and section-based retrieval for deck assembly.

pub mod manager;

pub use manager::{IndexSummary, LibraryStats, SlideLibraryManager, ThemeStats};
