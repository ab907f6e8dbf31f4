//! Keyword-density classification of slide text.
//!
//! Deterministic scoring: for each candidate label, the score is the fraction
//! of its lexicon keywords found in the combined theme-name + slide text,
//! multiplied by 1.5 when a keyword also appears in the theme name itself,
//! clamped to 1.0. The multipliers and thresholds here are tuned policy
//! constants; downstream ranking depends on them.

use crate::taxonomy::{
    primary_section_for_label, BackendSection, PrimaryLabel, LABEL_KEYWORDS, SECTION_REFINEMENT,
};

/// Score multiplier applied when a matched keyword appears in the theme name.
const THEME_MATCH_BOOST: f64 = 1.5;

/// Minimum keyword hits for a refinement table entry to claim a slide.
const REFINEMENT_MIN_HITS: usize = 2;

/// Outcome of classifying one slide's text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Winning primary label (`Unclassified` when nothing matched).
    pub label: PrimaryLabel,
    /// Confidence in [0, 1], rounded to 3 decimals.
    pub confidence: f64,
    /// Lexicon keywords that drove the classification.
    pub keywords_matched: Vec<String>,
}

impl Classification {
    fn unclassified() -> Self {
        Self {
            label: PrimaryLabel::Unclassified,
            confidence: 0.0,
            keywords_matched: Vec::new(),
        }
    }
}

/// Classify slide text to a primary label using keyword matching.
///
/// Empty text falls back to the theme name, so every slide gets some signal.
/// Equal scores are broken by lexicon declaration order (first wins).
pub fn classify_text(text: &str, theme_name: &str) -> Classification {
    let effective = if text.trim().is_empty() {
        theme_name
    } else {
        text
    };

    let lower_text = effective.to_lowercase();
    let lower_theme = theme_name.to_lowercase();
    let combined = format!("{} {}", lower_theme, lower_text);

    let mut best: Option<Classification> = None;

    for (label, keywords) in LABEL_KEYWORDS {
        let matched: Vec<String> = keywords
            .iter()
            .filter(|kw| combined.contains(&kw.to_lowercase()))
            .map(|kw| kw.to_string())
            .collect();
        if matched.is_empty() {
            continue;
        }

        let mut score = matched.len() as f64 / keywords.len() as f64;
        let theme_match = keywords
            .iter()
            .any(|kw| lower_theme.contains(&kw.to_lowercase()));
        if theme_match {
            score *= THEME_MATCH_BOOST;
        }
        let score = score.min(1.0);

        // Strictly-greater comparison keeps the first label on ties.
        if best.as_ref().map_or(true, |b| score > b.confidence) {
            best = Some(Classification {
                label: *label,
                confidence: score,
                keywords_matched: matched,
            });
        }
    }

    match best {
        Some(mut c) => {
            c.confidence = round3(c.confidence);
            c
        }
        None => Classification::unclassified(),
    }
}

/// Resolve a primary label to a single backend section.
///
/// Non-operational labels map through a fixed table. `OperationalDetails`
/// fans out via the refinement tables: the first section whose keyword set
/// has at least two hits in the slide text wins, defaulting to
/// `DeliveryModel`.
pub fn resolve_section(label: PrimaryLabel, text: &str) -> BackendSection {
    if label != PrimaryLabel::OperationalDetails {
        return primary_section_for_label(label);
    }

    let lower_text = text.to_lowercase();
    for (section, keywords) in SECTION_REFINEMENT {
        let hits = keywords
            .iter()
            .filter(|kw| lower_text.contains(&kw.to_lowercase()))
            .count();
        if hits >= REFINEMENT_MIN_HITS {
            return *section;
        }
    }

    BackendSection::DeliveryModel
}

/// Round to 3 decimal places, matching the scores reported by search.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keyword_match_is_unclassified_with_zero_confidence() {
        let c = classify_text("lorem ipsum dolor", "Random Folder");
        assert_eq!(c.label, PrimaryLabel::Unclassified);
        assert_eq!(c.confidence, 0.0);
        assert!(c.keywords_matched.is_empty());
    }

    #[test]
    fn executive_summary_text_classifies() {
        let c = classify_text("Executive Summary: Why Foundever overview", "Exec Decks");
        assert_eq!(c.label, PrimaryLabel::ExecutiveSummary);
        assert!(c.confidence > 0.0);
        assert!(c.keywords_matched.contains(&"executive summary".to_string()));
    }

    #[test]
    fn compliance_text_classifies() {
        let c = classify_text("SOC 2 certification and PCI audit", "Compliance");
        assert_eq!(c.label, PrimaryLabel::ComplianceSecurity);
        assert!(c.confidence > 0.0);
    }

    #[test]
    fn theme_name_match_scores_strictly_higher_than_body_only() {
        let body_only = classify_text("quarterly pricing review", "Misc Decks");
        let with_theme = classify_text("quarterly pricing review", "Pricing Decks");
        assert_eq!(body_only.label, PrimaryLabel::Pricing);
        assert_eq!(with_theme.label, PrimaryLabel::Pricing);
        assert!(with_theme.confidence > body_only.confidence);
    }

    #[test]
    fn empty_text_falls_back_to_theme_name() {
        let c = classify_text("", "Pricing");
        assert_eq!(c.label, PrimaryLabel::Pricing);
        assert!(c.confidence > 0.0);
    }

    #[test]
    fn confidence_is_clamped_to_one() {
        // All seven pricing keywords plus a theme-name match would exceed 1.0
        // before clamping.
        let text = "pricing cost rate commercial fee investment budget";
        let c = classify_text(text, "Pricing");
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "staffing process and workflow quality scorecard";
        let a = classify_text(text, "Operations");
        let b = classify_text(text, "Operations");
        assert_eq!(a, b);
    }

    #[test]
    fn non_operational_labels_map_directly() {
        assert_eq!(
            resolve_section(PrimaryLabel::CaseStudy, "anything"),
            BackendSection::ProofPoints
        );
        assert_eq!(
            resolve_section(PrimaryLabel::Unclassified, ""),
            BackendSection::ExecutiveSummary
        );
    }

    #[test]
    fn operational_refinement_needs_two_hits() {
        // One technology keyword is not enough; falls through to the default.
        assert_eq!(
            resolve_section(PrimaryLabel::OperationalDetails, "a platform overview"),
            BackendSection::DeliveryModel
        );
        // Two technology keywords claim the slide.
        assert_eq!(
            resolve_section(
                PrimaryLabel::OperationalDetails,
                "platform automation roadmap"
            ),
            BackendSection::Technology
        );
    }

    #[test]
    fn operational_refinement_prefers_earlier_tables() {
        // Hits in both team_leadership and technology tables: team_leadership
        // is declared first and wins.
        let text = "org chart shows leadership, plus platform and automation";
        assert_eq!(
            resolve_section(PrimaryLabel::OperationalDetails, text),
            BackendSection::TeamLeadership
        );
    }
}
