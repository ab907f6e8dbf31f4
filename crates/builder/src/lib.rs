//! Proposal deck assembly on top of the PPTX engine: title slides, section
//! dividers, rich content slides, and whole-slide reuse from the library.

pub mod builder;

pub use builder::{BuildSummary, ProposalDeckBuilder};
