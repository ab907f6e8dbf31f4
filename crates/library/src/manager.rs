//! The slide library manager: index, search, and selection.

use rfp_core::classify::{classify_text, resolve_section, round3};
use rfp_core::taxonomy::{BackendSection, PrimaryLabel};
use rfp_core::types::{SlideEntry, SlideSearchResult, ThemeInfo};
use rfp_core::{Error, Result};
use rfp_pptx::Pptx;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Thumbnail sidecar extensions, checked in preference order.
const THUMBNAIL_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Search-score multiplier when a query token appears in the theme name.
const THEME_QUERY_BOOST: f64 = 1.3;

/// How many of a slide's matched keywords feed the theme keyword sample.
const SAMPLE_KEYWORDS_PER_SLIDE: usize = 3;

/// Cap on a theme's deduplicated keyword sample.
const SAMPLE_KEYWORDS_MAX: usize = 10;

/// Summary statistics returned by an index scan.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    pub total_slides: usize,
    pub total_themes: usize,
    /// Slide count per theme.
    pub themes: BTreeMap<String, usize>,
    pub label_distribution: BTreeMap<PrimaryLabel, usize>,
    pub section_distribution: BTreeMap<BackendSection, usize>,
}

/// Per-theme breakdown inside the full library report.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeStats {
    pub slides: usize,
    pub labels: BTreeMap<PrimaryLabel, usize>,
    pub sections: BTreeMap<BackendSection, usize>,
}

/// Full library statistics report.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub library_path: PathBuf,
    pub total_slides: usize,
    pub total_themes: usize,
    pub themes: BTreeMap<String, ThemeStats>,
    pub global_label_distribution: BTreeMap<PrimaryLabel, usize>,
    pub global_section_distribution: BTreeMap<BackendSection, usize>,
}

/// Manages a theme-organized slide library.
///
/// `index()` scans the directory tree and rebuilds the in-memory index from
/// scratch; search and retrieval read that index. The manager is a plain
/// owned value with no internal locking: callers must serialize `index()`
/// against concurrent reads (typically by indexing once at startup).
pub struct SlideLibraryManager {
    library_path: PathBuf,
    slides: Vec<SlideEntry>,
    themes: BTreeMap<String, ThemeInfo>,
    indexed: bool,
}

impl SlideLibraryManager {
    /// Create a manager for a library root. No I/O happens until `index()`.
    pub fn new(library_path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: library_path.into(),
            slides: Vec::new(),
            themes: BTreeMap::new(),
            indexed: false,
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }

    /// Scan the library directory and rebuild the in-memory index.
    ///
    /// Theme folders and slide files are visited in lexicographic order,
    /// which fixes the assigned ids. The previous index is replaced only
    /// after the scan completes, so a failed scan leaves the old index
    /// intact.
    pub fn index(&mut self) -> Result<IndexSummary> {
        if !self.library_path.exists() {
            return Err(Error::NotFound(self.library_path.display().to_string()));
        }

        let mut slides: Vec<SlideEntry> = Vec::new();
        let mut themes: BTreeMap<String, ThemeInfo> = BTreeMap::new();
        let mut slide_id = 0usize;

        for theme_dir in sorted_entries(&self.library_path)? {
            if !theme_dir.is_dir() {
                continue;
            }
            let theme_name = match theme_dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let mut theme_slides: Vec<SlideEntry> = Vec::new();
            for pptx_path in slide_files(&theme_dir)? {
                slide_id += 1;
                theme_slides.push(self.scan_slide(&pptx_path, &theme_name, slide_id)?);
            }

            if !theme_slides.is_empty() {
                themes.insert(
                    theme_name.clone(),
                    theme_summary(&theme_name, &theme_dir, &theme_slides),
                );
            }
            slides.extend(theme_slides);
        }

        self.slides = slides;
        self.themes = themes;
        self.indexed = true;

        log::info!(
            "Indexed slide library: {} slides across {} themes",
            self.slides.len(),
            self.themes.len()
        );

        Ok(IndexSummary {
            total_slides: self.slides.len(),
            total_themes: self.themes.len(),
            themes: self
                .themes
                .iter()
                .map(|(name, info)| (name.clone(), info.slide_count))
                .collect(),
            label_distribution: self.global_label_distribution(),
            section_distribution: self.global_section_distribution(),
        })
    }

    /// Build one slide entry from a slide file and its sidecars.
    fn scan_slide(&self, pptx_path: &Path, theme_name: &str, slide_id: usize) -> Result<SlideEntry> {
        let ocr_text = match std::fs::read(pptx_path.with_extension("txt")) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        };

        let thumbnail_path = THUMBNAIL_EXTENSIONS
            .iter()
            .map(|ext| pptx_path.with_extension(ext))
            .find(|p| p.exists());

        let classification = classify_text(&ocr_text, theme_name);
        let section = resolve_section(classification.label, &ocr_text);
        let slide_count = Pptx::count_slides_in_file(pptx_path);
        let metadata = load_metadata(&pptx_path.with_extension("json"));

        let file_name = pptx_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(SlideEntry {
            id: format!("slide_{:04}", slide_id),
            theme: theme_name.to_string(),
            file_name,
            pptx_path: pptx_path.to_path_buf(),
            ocr_text,
            primary_label: classification.label,
            backend_section: section,
            confidence: classification.confidence,
            keywords_matched: classification.keywords_matched,
            slide_count,
            thumbnail_path,
            metadata,
        })
    }

    /// Search the library by keyword matching against OCR text.
    ///
    /// Query tokens shorter than two characters are discarded; a query with
    /// no usable tokens matches nothing. Filters are conjunctive. Results
    /// are sorted by score descending, ties keeping index order.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        theme_filter: Option<&str>,
        label_filter: Option<PrimaryLabel>,
        section_filter: Option<BackendSection>,
    ) -> Result<Vec<SlideSearchResult>> {
        self.ensure_indexed()?;

        let query_terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.trim().to_string())
            .filter(|t| t.chars().count() >= 2)
            .collect();

        let mut results: Vec<SlideSearchResult> = Vec::new();

        for slide in &self.slides {
            if let Some(theme) = theme_filter {
                if !slide.theme.eq_ignore_ascii_case(theme) {
                    continue;
                }
            }
            if let Some(label) = label_filter {
                if slide.primary_label != label {
                    continue;
                }
            }
            if let Some(section) = section_filter {
                if slide.backend_section != section {
                    continue;
                }
            }

            let search_text =
                format!("{} {} {}", slide.theme, slide.ocr_text, slide.file_name).to_lowercase();
            let matched_terms: Vec<&str> = query_terms
                .iter()
                .map(String::as_str)
                .filter(|t| search_text.contains(*t))
                .collect();
            if matched_terms.is_empty() {
                continue;
            }

            let mut score = matched_terms.len() as f64 / query_terms.len() as f64;

            let theme_lower = slide.theme.to_lowercase();
            if query_terms.iter().any(|t| theme_lower.contains(t.as_str())) {
                score *= THEME_QUERY_BOOST;
            }

            // High-confidence classification lifts relevance, but a
            // 0-confidence slide is still discoverable at half weight.
            score *= 0.5 + slide.confidence * 0.5;

            results.push(SlideSearchResult {
                slide: slide.clone(),
                score: round3(score.min(1.0)),
                match_reason: format!("Matched: {}", matched_terms.join(", ")),
            });
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);
        Ok(results)
    }

    /// Slides mapped to a backend section, best confidence first.
    pub fn get_slides_for_section(
        &self,
        section: BackendSection,
        limit: usize,
    ) -> Result<Vec<SlideEntry>> {
        self.ensure_indexed()?;
        let mut matches: Vec<SlideEntry> = self
            .slides
            .iter()
            .filter(|s| s.backend_section == section)
            .cloned()
            .collect();
        sort_by_confidence(&mut matches);
        matches.truncate(limit);
        Ok(matches)
    }

    /// Slides with a specific primary label, best confidence first.
    pub fn get_slides_for_label(
        &self,
        label: PrimaryLabel,
        limit: usize,
    ) -> Result<Vec<SlideEntry>> {
        self.ensure_indexed()?;
        let mut matches: Vec<SlideEntry> = self
            .slides
            .iter()
            .filter(|s| s.primary_label == label)
            .cloned()
            .collect();
        sort_by_confidence(&mut matches);
        matches.truncate(limit);
        Ok(matches)
    }

    /// All slides in a theme (name match is case-insensitive).
    pub fn get_theme_slides(&self, theme: &str) -> Result<Vec<SlideEntry>> {
        self.ensure_indexed()?;
        Ok(self
            .slides
            .iter()
            .filter(|s| s.theme.eq_ignore_ascii_case(theme))
            .cloned()
            .collect())
    }

    /// All themes, largest first.
    pub fn list_themes(&self) -> Result<Vec<ThemeInfo>> {
        self.ensure_indexed()?;
        let mut themes: Vec<ThemeInfo> = self.themes.values().cloned().collect();
        themes.sort_by(|a, b| b.slide_count.cmp(&a.slide_count));
        Ok(themes)
    }

    /// Full library statistics report.
    pub fn get_library_stats(&self) -> Result<LibraryStats> {
        self.ensure_indexed()?;
        Ok(LibraryStats {
            library_path: self.library_path.clone(),
            total_slides: self.slides.len(),
            total_themes: self.themes.len(),
            themes: self
                .themes
                .iter()
                .map(|(name, info)| {
                    (
                        name.clone(),
                        ThemeStats {
                            slides: info.slide_count,
                            labels: info.label_distribution.clone(),
                            sections: info.section_distribution.clone(),
                        },
                    )
                })
                .collect(),
            global_label_distribution: self.global_label_distribution(),
            global_section_distribution: self.global_section_distribution(),
        })
    }

    /// Best candidate slides for a proposal, organized by backend section.
    ///
    /// Sections with zero candidates are omitted from the map entirely, so
    /// callers can tell "no data" from "empty selection" by key absence.
    pub fn select_slides_for_proposal(
        &self,
        sections: Option<&[BackendSection]>,
        max_per_section: usize,
    ) -> Result<BTreeMap<BackendSection, Vec<SlideEntry>>> {
        self.ensure_indexed()?;
        let targets: &[BackendSection] = sections.unwrap_or(&BackendSection::ALL);

        let mut result = BTreeMap::new();
        for &section in targets {
            let candidates = self.get_slides_for_section(section, max_per_section)?;
            if !candidates.is_empty() {
                result.insert(section, candidates);
            }
        }
        Ok(result)
    }

    fn ensure_indexed(&self) -> Result<()> {
        if self.indexed {
            Ok(())
        } else {
            Err(Error::NotIndexed)
        }
    }

    fn global_label_distribution(&self) -> BTreeMap<PrimaryLabel, usize> {
        let mut dist = BTreeMap::new();
        for slide in &self.slides {
            *dist.entry(slide.primary_label).or_insert(0) += 1;
        }
        dist
    }

    fn global_section_distribution(&self) -> BTreeMap<BackendSection, usize> {
        let mut dist = BTreeMap::new();
        for slide in &self.slides {
            *dist.entry(slide.backend_section).or_insert(0) += 1;
        }
        dist
    }
}

/// Directory entries sorted by name, matching the id-assignment order.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    Ok(entries)
}

/// Slide-deck files in a theme directory, sorted by name.
fn slide_files(theme_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(sorted_entries(theme_dir)?
        .into_iter()
        .filter(|p| {
            p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("pptx")
        })
        .collect())
}

/// Load an optional metadata sidecar. Anything but a JSON object is treated
/// as absent, never fatal.
fn load_metadata(path: &Path) -> BTreeMap<String, serde_json::Value> {
    let Ok(bytes) = std::fs::read(path) else {
        return BTreeMap::new();
    };
    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        Ok(_) => {
            log::debug!("metadata {} is not a JSON object; ignoring", path.display());
            BTreeMap::new()
        }
        Err(e) => {
            log::debug!("malformed metadata {}: {}; ignoring", path.display(), e);
            BTreeMap::new()
        }
    }
}

/// Aggregate a theme's slides into its summary.
fn theme_summary(name: &str, dir: &Path, slides: &[SlideEntry]) -> ThemeInfo {
    let mut label_distribution = BTreeMap::new();
    let mut section_distribution = BTreeMap::new();
    let mut sample_keywords: Vec<String> = Vec::new();

    for slide in slides {
        *label_distribution.entry(slide.primary_label).or_insert(0) += 1;
        *section_distribution
            .entry(slide.backend_section)
            .or_insert(0) += 1;
        for kw in slide.keywords_matched.iter().take(SAMPLE_KEYWORDS_PER_SLIDE) {
            if !sample_keywords.contains(kw) {
                sample_keywords.push(kw.clone());
            }
        }
    }
    sample_keywords.truncate(SAMPLE_KEYWORDS_MAX);

    ThemeInfo {
        name: name.to_string(),
        path: dir.to_path_buf(),
        slide_count: slides.len(),
        label_distribution,
        section_distribution,
        sample_keywords,
    }
}

fn sort_by_confidence(slides: &mut [SlideEntry]) {
    slides.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Build a library directory with (theme, file stem, ocr text) triples.
    /// Slide files are placeholder bytes; slide-count falls back to 1.
    fn write_library(root: &Path, slides: &[(&str, &str, &str)]) {
        for (theme, stem, text) in slides {
            let theme_dir = root.join(theme);
            fs::create_dir_all(&theme_dir).unwrap();
            fs::write(theme_dir.join(format!("{stem}.pptx")), b"placeholder").unwrap();
            if !text.is_empty() {
                fs::write(theme_dir.join(format!("{stem}.txt")), text).unwrap();
            }
        }
    }

    fn two_theme_library() -> (tempfile::TempDir, SlideLibraryManager) {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                (
                    "Exec Decks",
                    "slide_001",
                    "Executive Summary: Why Foundever overview",
                ),
                ("Compliance", "slide_001", "SOC 2 certification and PCI audit"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        (dir, manager)
    }

    #[test]
    fn missing_root_is_not_found() {
        let mut manager = SlideLibraryManager::new("/no/such/library");
        assert!(matches!(manager.index(), Err(Error::NotFound(_))));
    }

    #[test]
    fn search_before_index_is_not_indexed() {
        let manager = SlideLibraryManager::new("/anywhere");
        assert!(matches!(
            manager.search("query", 10, None, None, None),
            Err(Error::NotIndexed)
        ));
        assert!(matches!(
            manager.get_library_stats(),
            Err(Error::NotIndexed)
        ));
    }

    #[test]
    fn end_to_end_two_theme_scenario() {
        let (_dir, manager) = two_theme_library();

        let stats = manager.get_library_stats().unwrap();
        assert_eq!(stats.total_slides, 2);
        assert_eq!(stats.total_themes, 2);

        // Themes sort alphabetically, so Compliance gets slide_0001.
        let compliance = &manager.get_theme_slides("Compliance").unwrap()[0];
        assert_eq!(compliance.id, "slide_0001");
        assert_eq!(compliance.primary_label, PrimaryLabel::ComplianceSecurity);
        assert_eq!(
            compliance.backend_section,
            BackendSection::GovernanceCompliance
        );

        let exec = &manager.get_theme_slides("Exec Decks").unwrap()[0];
        assert_eq!(exec.id, "slide_0002");
        assert_eq!(exec.primary_label, PrimaryLabel::ExecutiveSummary);
        assert_eq!(exec.backend_section, BackendSection::ExecutiveSummary);

        let audit = manager.search("audit", 10, None, None, None).unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].slide.theme, "Compliance");
        assert!(audit[0].score > 0.0);

        let foundever = manager.search("foundever", 10, None, None, None).unwrap();
        assert_eq!(foundever.len(), 1);
        assert_eq!(foundever[0].slide.theme, "Exec Decks");
    }

    #[test]
    fn total_slides_matches_per_theme_sum_and_sections_are_canonical() {
        let (_dir, manager) = two_theme_library();
        let summary = manager.get_library_stats().unwrap();
        let per_theme: usize = summary.themes.values().map(|t| t.slides).sum();
        assert_eq!(summary.total_slides, per_theme);
        for slide in manager.get_theme_slides("Compliance").unwrap() {
            assert!(BackendSection::ALL.contains(&slide.backend_section));
        }
    }

    #[test]
    fn reindexing_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Ops", "a", "staffing process workflow quality"),
                ("Ops", "b", ""),
                ("Pricing", "a", "rate card and commercial fee model"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        let first: Vec<_> = manager
            .get_theme_slides("Ops")
            .unwrap()
            .into_iter()
            .map(|s| (s.id, s.primary_label, s.confidence, s.backend_section))
            .collect();

        manager.index().unwrap();
        let second: Vec<_> = manager
            .get_theme_slides("Ops")
            .unwrap()
            .into_iter()
            .map(|s| (s.id, s.primary_label, s.confidence, s.backend_section))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unmatched_query_returns_nothing() {
        let (_dir, manager) = two_theme_library();
        let results = manager
            .search("zzz_no_such_token", 10, None, None, None)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn short_token_query_matches_nothing() {
        let (_dir, manager) = two_theme_library();
        // Every token is under two characters, so the query has no usable
        // terms and intentionally matches nothing.
        let results = manager.search("a b c", 10, None, None, None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn filters_are_conjunctive_and_removing_one_grows_results() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Compliance", "a", "security audit coverage"),
                ("Security Ops", "a", "security audit runbook"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();

        let both = manager.search("security", 10, None, None, None).unwrap();
        assert_eq!(both.len(), 2);

        let filtered = manager
            .search(
                "security",
                10,
                Some("Compliance"),
                None,
                Some(BackendSection::GovernanceCompliance),
            )
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].slide.theme, "Compliance");

        let one_filter = manager
            .search("security", 10, None, None, Some(BackendSection::GovernanceCompliance))
            .unwrap();
        assert!(one_filter.len() >= filtered.len());
    }

    #[test]
    fn theme_name_match_boosts_search_score() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Pricing", "a", "commercial rate card"),
                ("General", "a", "commercial rate card"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();

        let results = manager.search("pricing rate", 10, None, None, None).unwrap();
        assert_eq!(results[0].slide.theme, "Pricing");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn search_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Ops", "a", "quality scorecard"),
                ("Ops", "b", "quality scorecard"),
                ("Ops", "c", "quality scorecard"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        let results = manager.search("quality", 2, None, None, None).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn selection_omits_sections_with_no_candidates() {
        let (_dir, manager) = two_theme_library();
        let selection = manager.select_slides_for_proposal(None, 5).unwrap();
        for slides in selection.values() {
            assert!(!slides.is_empty());
        }
        // Nothing classified into implementation in this library.
        assert!(!selection.contains_key(&BackendSection::Implementation));
        assert!(selection.contains_key(&BackendSection::GovernanceCompliance));
    }

    #[test]
    fn retrieval_sorts_by_confidence() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Mixed", "weak", "one audit mention"),
                ("Mixed", "strong", "compliance security certification SOC PCI audit"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();

        let slides = manager
            .get_slides_for_label(PrimaryLabel::ComplianceSecurity, 10)
            .unwrap();
        assert_eq!(slides.len(), 2);
        assert!(slides[0].confidence >= slides[1].confidence);
        assert_eq!(slides[0].file_name, "strong.pptx");
    }

    #[test]
    fn metadata_sidecars_load_and_malformed_ones_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[("Ops", "good", "workflow"), ("Ops", "bad", "workflow")],
        );
        fs::write(
            dir.path().join("Ops/good.json"),
            r#"{"client": "Acme", "year": 2025}"#,
        )
        .unwrap();
        fs::write(dir.path().join("Ops/bad.json"), "{not json").unwrap();

        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();

        let slides = manager.get_theme_slides("Ops").unwrap();
        let bad = slides.iter().find(|s| s.file_name == "bad.pptx").unwrap();
        let good = slides.iter().find(|s| s.file_name == "good.pptx").unwrap();
        assert!(bad.metadata.is_empty());
        assert_eq!(
            good.metadata.get("client").and_then(|v| v.as_str()),
            Some("Acme")
        );
    }

    #[test]
    fn thumbnail_extensions_are_checked_in_preference_order() {
        let dir = tempfile::tempdir().unwrap();
        write_library(dir.path(), &[("Ops", "a", "workflow")]);
        fs::write(dir.path().join("Ops/a.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("Ops/a.png"), b"png").unwrap();

        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        let slide = &manager.get_theme_slides("Ops").unwrap()[0];
        assert!(slide.has_thumbnail());
        assert_eq!(
            slide.thumbnail_path.as_ref().unwrap().extension().unwrap(),
            "png"
        );
    }

    #[test]
    fn real_deck_slide_count_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let theme_dir = dir.path().join("Built");
        fs::create_dir_all(&theme_dir).unwrap();

        let mut deck = Pptx::blank();
        deck.add_slide(3, &[]).unwrap();
        deck.add_slide(3, &[]).unwrap();
        deck.save(&theme_dir.join("deck.pptx")).unwrap();

        let mut manager = SlideLibraryManager::new(dir.path());
        let summary = manager.index().unwrap();
        assert_eq!(summary.total_slides, 1);
        let slide = &manager.get_theme_slides("Built").unwrap()[0];
        assert_eq!(slide.slide_count, 2);
    }

    #[test]
    fn empty_text_slides_classify_from_theme_name() {
        let dir = tempfile::tempdir().unwrap();
        write_library(dir.path(), &[("Pricing", "a", "")]);
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        let slide = &manager.get_theme_slides("Pricing").unwrap()[0];
        assert_eq!(slide.primary_label, PrimaryLabel::Pricing);
        assert!(slide.confidence > 0.0);
    }

    #[test]
    fn list_themes_sorts_largest_first() {
        let dir = tempfile::tempdir().unwrap();
        write_library(
            dir.path(),
            &[
                ("Small", "a", "workflow"),
                ("Big", "a", "workflow"),
                ("Big", "b", "workflow"),
            ],
        );
        let mut manager = SlideLibraryManager::new(dir.path());
        manager.index().unwrap();
        let themes = manager.list_themes().unwrap();
        assert_eq!(themes[0].name, "Big");
        assert_eq!(themes[0].slide_count, 2);
    }
}
