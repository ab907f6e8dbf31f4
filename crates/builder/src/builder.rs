//! Stateful deck builder for assembling proposal presentations.

use rfp_core::taxonomy::BackendSection;
use rfp_core::types::{SlideContent, TextSegment};
use rfp_core::{Error, Result};
use rfp_pptx::{PlaceholderInfo, Pptx, ShapeSpec, TemplateAnalysis};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Report of what a build produced so far.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    /// Slides currently in the deck.
    pub slide_count: usize,

    /// Sections that received at least one content slide, in the order they
    /// were first added.
    pub sections_added: Vec<BackendSection>,

    /// Canonical sections not yet covered.
    pub sections_missing: Vec<BackendSection>,
}

/// Builds one proposal deck at a time.
///
/// The builder holds no deck until `create_blank`, `create_from_template`,
/// or `open_existing` is called; content operations before that fail with
/// `NoActiveDeck`. Layout analysis is captured when the deck is opened and
/// drives placeholder targeting for every slide added afterwards.
pub struct ProposalDeckBuilder {
    deck: Option<Pptx>,
    analysis: Option<TemplateAnalysis>,
    sections_added: Vec<BackendSection>,
}

impl ProposalDeckBuilder {
    pub fn new() -> Self {
        Self {
            deck: None,
            analysis: None,
            sections_added: Vec::new(),
        }
    }

    /// Start a new deck from the built-in blank template.
    pub fn create_blank(&mut self) -> Result<()> {
        let deck = Pptx::blank();
        self.analysis = Some(deck.analyze(Path::new("blank.pptx"))?);
        self.deck = Some(deck);
        self.sections_added.clear();
        log::info!("created blank presentation");
        Ok(())
    }

    /// Start a new deck from an existing template file, returning its layout
    /// analysis so callers can pick layouts by inspection.
    pub fn create_from_template(&mut self, path: &Path) -> Result<TemplateAnalysis> {
        let deck = Pptx::open(path)?;
        let analysis = deck.analyze(path)?;
        self.deck = Some(deck);
        self.analysis = Some(analysis.clone());
        self.sections_added.clear();
        log::info!(
            "opened template {} ({} layouts)",
            path.display(),
            analysis.layout_count
        );
        Ok(analysis)
    }

    /// Continue editing an existing presentation, returning its slide count.
    pub fn open_existing(&mut self, path: &Path) -> Result<usize> {
        let deck = Pptx::open(path)?;
        self.analysis = Some(deck.analyze(path)?);
        let count = deck.slide_count();
        self.deck = Some(deck);
        self.sections_added.clear();
        log::info!("opened {} with {} slides", path.display(), count);
        Ok(count)
    }

    /// Find a layout index in the active deck by partial name match.
    pub fn find_layout_by_name(&self, pattern: &str) -> Result<Option<usize>> {
        Ok(self.analysis()?.find_layout_by_name(pattern))
    }

    /// Add a title slide. Without an explicit layout index, the first layout
    /// whose name contains "title" is used, falling back to layout 0.
    ///
    /// Layouts defining no placeholders still get generic title/subtitle
    /// placeholder shapes: generated slides do not inherit layout shapes, so
    /// skipping the fill would lose the text entirely.
    pub fn add_title_slide(
        &mut self,
        title: &str,
        subtitle: Option<&str>,
        layout_index: Option<usize>,
    ) -> Result<usize> {
        let analysis = self.analysis()?;
        let layout = match layout_index {
            Some(index) => index,
            None => analysis.find_layout_by_name("title").unwrap_or(0),
        };

        let placeholders = layout_placeholders(analysis, layout);
        let mut shapes = Vec::new();
        match placeholders.first() {
            Some(ph) => shapes.push(placeholder_spec(ph, vec![TextSegment::plain(title)])),
            None => shapes.push(ShapeSpec::Placeholder {
                ph_type: Some("ctrTitle".to_string()),
                ph_idx: 0,
                segments: vec![TextSegment::plain(title)],
            }),
        }
        if let Some(subtitle) = subtitle {
            match placeholders.get(1) {
                Some(ph) => shapes.push(placeholder_spec(ph, vec![TextSegment::plain(subtitle)])),
                None => shapes.push(ShapeSpec::Placeholder {
                    ph_type: Some("subTitle".to_string()),
                    ph_idx: 1,
                    segments: vec![TextSegment::plain(subtitle)],
                }),
            }
        }

        self.deck_mut()?.add_slide(layout, &shapes)
    }

    /// Add a numbered section divider slide, e.g. "Section 3: Delivery Model".
    ///
    /// Uses the first layout whose name contains "section", falling back to
    /// layout 0.
    pub fn add_section_divider(&mut self, section: BackendSection, number: usize) -> Result<usize> {
        let analysis = self.analysis()?;
        let layout = analysis.find_layout_by_name("section").unwrap_or(0);

        let heading = format!("Section {}: {}", number, section.display_name());
        let shape = match layout_placeholders(analysis, layout).first() {
            Some(ph) => placeholder_spec(ph, vec![TextSegment::plain(&heading)]),
            None => ShapeSpec::Placeholder {
                ph_type: Some("title".to_string()),
                ph_idx: 0,
                segments: vec![TextSegment::plain(&heading)],
            },
        };

        self.deck_mut()?.add_slide(layout, &[shape])
    }

    /// Add a content slide for one proposal section: title, rich body text,
    /// an optional table, and optional speaker notes. As with title slides,
    /// a layout without placeholders gets generic placeholder shapes rather
    /// than dropping the text.
    pub fn add_section_slide(&mut self, content: &SlideContent) -> Result<usize> {
        let analysis = self.analysis()?;
        let layout = analysis
            .find_layout_by_name("content")
            .unwrap_or_else(|| 1.min(analysis.layout_count.saturating_sub(1)));
        let placeholders = layout_placeholders(analysis, layout);

        let mut shapes = Vec::new();
        let title_spec = match placeholders.first() {
            Some(ph) => placeholder_spec(ph, vec![TextSegment::plain(&content.title)]),
            None => ShapeSpec::Placeholder {
                ph_type: Some("title".to_string()),
                ph_idx: 0,
                segments: vec![TextSegment::plain(&content.title)],
            },
        };
        shapes.push(title_spec);

        // Subtitle renders as the body's leading bold paragraph.
        let mut body = Vec::new();
        if let Some(subtitle) = &content.subtitle {
            body.push(TextSegment {
                text: format!("{}\n", subtitle),
                bold: true,
                ..TextSegment::default()
            });
        }
        body.extend(content.body_segments.iter().cloned());
        if !body.is_empty() {
            let body_spec = match placeholders.get(1) {
                Some(ph) => placeholder_spec(ph, body),
                None => ShapeSpec::Placeholder {
                    ph_type: None,
                    ph_idx: 1,
                    segments: body,
                },
            };
            shapes.push(body_spec);
        }

        if let Some(data) = &content.table_data {
            shapes.push(ShapeSpec::Table { data: data.clone() });
        }

        let index = self.deck_mut()?.add_slide(layout, &shapes)?;
        if let Some(notes) = &content.speaker_notes {
            self.deck_mut()?.set_notes(index, notes)?;
        }

        self.sections_added.push(content.section_type);
        Ok(index)
    }

    /// Clone a slide out of a library file into the active deck, optionally
    /// appending text (evidence ids, provenance) to the cloned notes.
    pub fn add_slide_from_library(
        &mut self,
        source_path: &Path,
        source_slide_index: usize,
        notes_append: Option<&str>,
    ) -> Result<usize> {
        let source = Pptx::open(source_path)?;
        let deck = self.deck_mut()?;
        let index = deck.clone_slide_from(&source, source_slide_index)?;

        if let Some(extra) = notes_append {
            let combined = match deck.notes_text(index)? {
                Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, extra),
                _ => extra.to_string(),
            };
            deck.set_notes(index, &combined)?;
        }
        Ok(index)
    }

    /// Assemble a complete proposal into the active deck: an optional title
    /// slide, then each covered section in canonical order. Dividers are
    /// numbered by the section's canonical position, so "Proof Points &
    /// Evidence" is always Section 9 even when earlier sections are absent.
    /// Returns the final slide count.
    pub fn build_full_proposal(
        &mut self,
        title: Option<&str>,
        subtitle: Option<&str>,
        sections: &std::collections::BTreeMap<BackendSection, Vec<SlideContent>>,
        include_dividers: bool,
    ) -> Result<usize> {
        self.deck()?;
        if let Some(title) = title {
            self.add_title_slide(title, subtitle, None)?;
        }

        for (position, section) in BackendSection::ALL.into_iter().enumerate() {
            let Some(contents) = sections.get(&section).filter(|c| !c.is_empty()) else {
                continue;
            };
            if include_dividers {
                self.add_section_divider(section, position + 1)?;
            }
            for content in contents {
                self.add_section_slide(content)?;
            }
        }

        let count = self.slide_count();
        log::info!("built proposal with {} slides", count);
        Ok(count)
    }

    /// Save the active deck, returning the absolute path written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        self.deck()?.save(path)?;
        Ok(path.canonicalize()?)
    }

    /// Serialize the active deck to PPTX bytes.
    pub fn save_to_bytes(&self) -> Result<Vec<u8>> {
        self.deck()?.to_bytes()
    }

    /// Slides currently in the deck (0 when no deck is active).
    pub fn slide_count(&self) -> usize {
        self.deck.as_ref().map_or(0, Pptx::slide_count)
    }

    /// Summarize section coverage of the build so far.
    pub fn get_build_summary(&self) -> BuildSummary {
        let mut added = Vec::new();
        for &section in &self.sections_added {
            if !added.contains(&section) {
                added.push(section);
            }
        }
        let missing = BackendSection::ALL
            .into_iter()
            .filter(|s| !added.contains(s))
            .collect();
        BuildSummary {
            slide_count: self.slide_count(),
            sections_added: added,
            sections_missing: missing,
        }
    }

    fn deck(&self) -> Result<&Pptx> {
        self.deck.as_ref().ok_or(Error::NoActiveDeck)
    }

    fn deck_mut(&mut self) -> Result<&mut Pptx> {
        self.deck.as_mut().ok_or(Error::NoActiveDeck)
    }

    fn analysis(&self) -> Result<&TemplateAnalysis> {
        self.analysis.as_ref().ok_or(Error::NoActiveDeck)
    }
}

impl Default for ProposalDeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Placeholders of one layout, cloned so the deck can be mutated while they
/// are used to build shape specs.
fn layout_placeholders(analysis: &TemplateAnalysis, layout: usize) -> Vec<PlaceholderInfo> {
    analysis
        .layouts
        .get(layout)
        .map(|l| l.placeholders.clone())
        .unwrap_or_default()
}

fn placeholder_spec(ph: &PlaceholderInfo, segments: Vec<TextSegment>) -> ShapeSpec {
    ShapeSpec::Placeholder {
        ph_type: ph.ph_type_raw.clone(),
        ph_idx: ph.idx,
        segments,
    }
}
