//! Error types shared across the slide library and deck builder crates.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing the slide library or assembling a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// A required path (library root, template, or source file) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// ZIP container error (PPTX packages are ZIP archives).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error inside a PPTX part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The file is not a usable PPTX package.
    #[error("Invalid or corrupted package: {0}")]
    CorruptedPackage(String),

    /// A requested slide index exceeds the source file's slide count.
    #[error("Slide index {requested} out of range: source has {available} slides")]
    SlideIndexOutOfRange { requested: usize, available: usize },

    /// A requested layout index exceeds the deck's layout count.
    #[error("Layout index {requested} out of range: deck has {available} layouts")]
    LayoutIndexOutOfRange { requested: usize, available: usize },

    /// Search or retrieval was called before the library was indexed.
    #[error("Slide library not indexed yet: call index() first")]
    NotIndexed,

    /// A deck operation was called with no open presentation.
    #[error("No active deck: create or open a presentation first")]
    NoActiveDeck,
}
