//! Domain types for the slide library index and proposal deck content.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::taxonomy::{BackendSection, PrimaryLabel};

/// A single slide file (which may itself be a multi-slide sub-deck) in the
/// library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideEntry {
    /// Stable sequential id assigned during indexing (e.g. "slide_0001").
    pub id: String,

    /// Name of the theme folder this slide belongs to.
    pub theme: String,

    /// File name of the slide file (without path).
    pub file_name: String,

    /// Absolute path to the slide file.
    pub pptx_path: PathBuf,

    /// OCR/plain-text sidecar content; empty if no sidecar exists.
    pub ocr_text: String,

    /// Primary classification label.
    pub primary_label: PrimaryLabel,

    /// Resolved backend proposal section.
    pub backend_section: BackendSection,

    /// Classification confidence in [0, 1].
    pub confidence: f64,

    /// Lexicon keywords that drove the classification.
    pub keywords_matched: Vec<String>,

    /// Number of slides inside the file (always at least 1).
    pub slide_count: usize,

    /// Path to an adjacent thumbnail image, if one exists.
    pub thumbnail_path: Option<PathBuf>,

    /// Free-form metadata loaded from an adjacent JSON file.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl SlideEntry {
    /// Whether a thumbnail image was found next to the slide file.
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_path.is_some()
    }
}

/// Aggregate summary of one theme folder, recomputed on every index scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeInfo {
    /// Theme folder name.
    pub name: String,

    /// Path to the theme directory.
    pub path: PathBuf,

    /// Number of slide files in the theme.
    pub slide_count: usize,

    /// Count of slides per primary label present in the theme.
    pub label_distribution: BTreeMap<PrimaryLabel, usize>,

    /// Count of slides per backend section present in the theme.
    pub section_distribution: BTreeMap<BackendSection, usize>,

    /// Deduplicated sample of matched keywords (first-seen order, at most 10).
    pub sample_keywords: Vec<String>,
}

/// A scored search result from the slide library.
#[derive(Debug, Clone, Serialize)]
pub struct SlideSearchResult {
    /// The matching slide.
    pub slide: SlideEntry,

    /// Relevance score in [0, 1], rounded to 3 decimals.
    pub score: f64,

    /// Human-readable list of the query tokens that matched.
    pub match_reason: String,
}

/// A run of formatted text destined for a placeholder.
///
/// Formatting flags are independent; an embedded newline starts a new
/// paragraph in the rendered text frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    /// The text content.
    pub text: String,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    #[serde(default)]
    pub underline: bool,

    /// Optional hex color string, e.g. "#4B4BF9".
    #[serde(default)]
    pub color: Option<String>,

    /// Optional font size in points.
    #[serde(default)]
    pub font_size: Option<u32>,
}

impl TextSegment {
    /// Create a plain, unformatted segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Content for a single proposal section slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideContent {
    /// Backend section this slide covers.
    pub section_type: BackendSection,

    /// Slide title.
    pub title: String,

    /// Rich-text body segments.
    #[serde(default)]
    pub body_segments: Vec<TextSegment>,

    /// Optional subtitle.
    #[serde(default)]
    pub subtitle: Option<String>,

    /// Optional speaker notes carrying evidence ids and proof-tier tags.
    #[serde(default)]
    pub speaker_notes: Option<String>,

    /// Optional table rows; each cell is rendered stringified.
    #[serde(default)]
    pub table_data: Option<Vec<Vec<String>>>,
}

impl SlideContent {
    /// Create content with a title and plain body text.
    pub fn new(section_type: BackendSection, title: impl Into<String>) -> Self {
        Self {
            section_type,
            title: title.into(),
            body_segments: Vec::new(),
            subtitle: None,
            speaker_notes: None,
            table_data: None,
        }
    }
}

/// Matches simplified HTML-like formatting tags: `<b>`, `<i>`, `<u>`, `<br>`.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)(\w+)(?:\s+[^>]*)?/?>").unwrap());

/// Parse simplified HTML-like markup into a list of text segments.
///
/// Supported tags: `<b>`, `<i>`, `<u>` (toggling), and `<br>`/`<br/>` (line
/// break). Unknown tags are stripped.
pub fn parse_formatted_text(markup: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut underline = false;
    let mut pos = 0;

    for cap in TAG_REGEX.captures_iter(markup) {
        let whole = cap.get(0).unwrap();
        let before = &markup[pos..whole.start()];
        if !before.is_empty() {
            segments.push(TextSegment {
                text: before.to_string(),
                bold,
                italic,
                underline,
                ..TextSegment::default()
            });
        }

        let closing = &cap[1] == "/";
        match cap[2].to_lowercase().as_str() {
            "b" => bold = !closing,
            "i" => italic = !closing,
            "u" => underline = !closing,
            "br" => segments.push(TextSegment::plain("\n")),
            _ => {}
        }

        pos = whole.end();
    }

    let remaining = &markup[pos..];
    if !remaining.is_empty() {
        segments.push(TextSegment {
            text: remaining.to_string(),
            bold,
            italic,
            underline,
            ..TextSegment::default()
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bold_and_italic_runs() {
        let segments = parse_formatted_text("plain <b>bold</b> and <i>italic</i>");
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].text, "plain ");
        assert!(!segments[0].bold);
        assert_eq!(segments[1].text, "bold");
        assert!(segments[1].bold);
        assert_eq!(segments[3].text, "italic");
        assert!(segments[3].italic && !segments[3].bold);
    }

    #[test]
    fn br_produces_a_newline_segment() {
        let segments = parse_formatted_text("line one<br/>line two");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "\n");
    }

    #[test]
    fn unknown_tags_are_stripped() {
        let segments = parse_formatted_text("<span>kept</span>");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "kept");
    }

    #[test]
    fn nested_formatting_accumulates() {
        let segments = parse_formatted_text("<b>bold <u>both</u></b>");
        assert_eq!(segments[1].text, "both");
        assert!(segments[1].bold && segments[1].underline);
    }

    #[test]
    fn slide_content_deserializes_with_defaults() {
        let json = r#"{"section_type": "technology", "title": "Our Stack"}"#;
        let content: SlideContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.section_type, BackendSection::Technology);
        assert!(content.body_segments.is_empty());
        assert!(content.table_data.is_none());
    }
}
