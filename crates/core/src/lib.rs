//! Core domain types, classification taxonomy, and the keyword classifier
//! for the RFP slide library and proposal deck builder.

pub mod classify;
pub mod error;
pub mod taxonomy;
pub mod types;

pub use classify::{classify_text, resolve_section, Classification};
pub use error::{Error, Result};
pub use taxonomy::{BackendSection, PrimaryLabel};
pub use types::{
    parse_formatted_text, SlideContent, SlideEntry, SlideSearchResult, TextSegment, ThemeInfo,
};
