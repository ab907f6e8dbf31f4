//! Classification taxonomy: primary labels, backend proposal sections, and
//! the keyword lexicons that drive classification.
//!
//! The taxonomy is fixed; it is not derived from the library content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse-grained classification bucket for a slide's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryLabel {
    ExecutiveSummary,
    SolutionOverview,
    OperationalDetails,
    CaseStudy,
    ComplianceSecurity,
    ProjectPlan,
    Pricing,
    Other,
    Unclassified,
}

impl PrimaryLabel {
    /// All labels, including the guaranteed-present `Unclassified` fallback.
    pub const ALL: [PrimaryLabel; 9] = [
        PrimaryLabel::ExecutiveSummary,
        PrimaryLabel::SolutionOverview,
        PrimaryLabel::OperationalDetails,
        PrimaryLabel::CaseStudy,
        PrimaryLabel::ComplianceSecurity,
        PrimaryLabel::ProjectPlan,
        PrimaryLabel::Pricing,
        PrimaryLabel::Other,
        PrimaryLabel::Unclassified,
    ];

    /// Snake-case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryLabel::ExecutiveSummary => "executive_summary",
            PrimaryLabel::SolutionOverview => "solution_overview",
            PrimaryLabel::OperationalDetails => "operational_details",
            PrimaryLabel::CaseStudy => "case_study",
            PrimaryLabel::ComplianceSecurity => "compliance_security",
            PrimaryLabel::ProjectPlan => "project_plan",
            PrimaryLabel::Pricing => "pricing",
            PrimaryLabel::Other => "other",
            PrimaryLabel::Unclassified => "unclassified",
        }
    }

    /// Parse a snake-case identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }
}

impl fmt::Display for PrimaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the nine canonical proposal-document sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendSection {
    ExecutiveSummary,
    ClientUnderstanding,
    SolutionOverview,
    DeliveryModel,
    Technology,
    GovernanceCompliance,
    Implementation,
    TeamLeadership,
    ProofPoints,
}

impl BackendSection {
    /// The nine sections in canonical proposal order.
    pub const ALL: [BackendSection; 9] = [
        BackendSection::ExecutiveSummary,
        BackendSection::ClientUnderstanding,
        BackendSection::SolutionOverview,
        BackendSection::DeliveryModel,
        BackendSection::Technology,
        BackendSection::GovernanceCompliance,
        BackendSection::Implementation,
        BackendSection::TeamLeadership,
        BackendSection::ProofPoints,
    ];

    /// Snake-case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendSection::ExecutiveSummary => "executive_summary",
            BackendSection::ClientUnderstanding => "client_understanding",
            BackendSection::SolutionOverview => "solution_overview",
            BackendSection::DeliveryModel => "delivery_model",
            BackendSection::Technology => "technology",
            BackendSection::GovernanceCompliance => "governance_compliance",
            BackendSection::Implementation => "implementation",
            BackendSection::TeamLeadership => "team_leadership",
            BackendSection::ProofPoints => "proof_points",
        }
    }

    /// Human-readable display name used on divider slides.
    pub fn display_name(&self) -> &'static str {
        match self {
            BackendSection::ExecutiveSummary => "Executive Summary",
            BackendSection::ClientUnderstanding => "Understanding Client Needs",
            BackendSection::SolutionOverview => "Solution Overview",
            BackendSection::DeliveryModel => "Delivery Model",
            BackendSection::Technology => "Technology & Innovation",
            BackendSection::GovernanceCompliance => "Governance & Compliance",
            BackendSection::Implementation => "Implementation & Transition",
            BackendSection::TeamLeadership => "Team & Leadership",
            BackendSection::ProofPoints => "Proof Points & Evidence",
        }
    }

    /// Parse a snake-case identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sec| sec.as_str() == s)
    }
}

impl fmt::Display for BackendSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword signals for classifying slide content to primary labels.
///
/// Declaration order is significant: when two labels score equally, the one
/// declared first wins. This is the documented tie-break, not an accident.
pub const LABEL_KEYWORDS: &[(PrimaryLabel, &[&str])] = &[
    (
        PrimaryLabel::ExecutiveSummary,
        &[
            "executive summary",
            "overview",
            "strategic",
            "partnership",
            "why foundever",
            "at a glance",
            "introduction",
        ],
    ),
    (
        PrimaryLabel::SolutionOverview,
        &[
            "solution",
            "approach",
            "capability",
            "platform",
            "ecosystem",
            "offering",
            "service model",
            "our approach",
        ],
    ),
    (
        PrimaryLabel::OperationalDetails,
        &[
            "process",
            "workflow",
            "staffing",
            "FTE",
            "headcount",
            "shift",
            "scorecard",
            "quality",
            "site",
            "facility",
            "roster",
            "SOP",
            "workforce",
            "scheduling",
            "training",
            "ramp",
            "attrition",
            "org chart",
            "leadership",
            "account manager",
        ],
    ),
    (
        PrimaryLabel::CaseStudy,
        &[
            "case study",
            "client example",
            "success story",
            "outcome",
            "result",
            "before and after",
            "proof point",
            "testimonial",
        ],
    ),
    (
        PrimaryLabel::ComplianceSecurity,
        &[
            "compliance",
            "security",
            "certification",
            "SOC",
            "PCI",
            "HIPAA",
            "GDPR",
            "regulatory",
            "audit",
            "risk",
            "governance",
            "ISO",
            "NIST",
        ],
    ),
    (
        PrimaryLabel::ProjectPlan,
        &[
            "implementation",
            "transition",
            "timeline",
            "milestone",
            "go-live",
            "phase",
            "migration",
            "ramp plan",
            "project plan",
        ],
    ),
    (
        PrimaryLabel::Pricing,
        &[
            "pricing", "cost", "rate", "commercial", "fee", "investment", "budget",
        ],
    ),
];

/// Secondary keyword tables for the `operational_details` fan-out.
///
/// The first section (in this order) with at least two keyword hits in the
/// slide text wins; otherwise `DeliveryModel` is the default.
pub const SECTION_REFINEMENT: &[(BackendSection, &[&str])] = &[
    (
        BackendSection::TeamLeadership,
        &[
            "org chart",
            "leadership",
            "escalation",
            "account manager",
            "director",
            "VP",
            "management structure",
        ],
    ),
    (
        BackendSection::Technology,
        &[
            "platform",
            "tool",
            "software",
            "CRM",
            "telephony",
            "IVR",
            "API",
            "AI",
            "automation",
            "analytics",
            "dashboard",
        ],
    ),
    (
        BackendSection::DeliveryModel,
        &[
            "FTE",
            "staffing",
            "site",
            "headcount",
            "shift",
            "roster",
            "capacity",
            "facility",
            "location",
            "onshore",
            "offshore",
            "nearshore",
        ],
    ),
    (
        BackendSection::SolutionOverview,
        &["process", "workflow", "SOP", "procedure", "methodology"],
    ),
];

/// Primary label → backend section mapping (non-operational labels).
pub fn primary_section_for_label(label: PrimaryLabel) -> BackendSection {
    match label {
        PrimaryLabel::ExecutiveSummary => BackendSection::ExecutiveSummary,
        PrimaryLabel::SolutionOverview => BackendSection::SolutionOverview,
        PrimaryLabel::OperationalDetails => BackendSection::DeliveryModel,
        PrimaryLabel::CaseStudy => BackendSection::ProofPoints,
        PrimaryLabel::ComplianceSecurity => BackendSection::GovernanceCompliance,
        PrimaryLabel::ProjectPlan => BackendSection::Implementation,
        PrimaryLabel::Pricing => BackendSection::ExecutiveSummary,
        PrimaryLabel::Other => BackendSection::ExecutiveSummary,
        PrimaryLabel::Unclassified => BackendSection::ExecutiveSummary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_identifiers_round_trip() {
        for label in PrimaryLabel::ALL {
            assert_eq!(PrimaryLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(PrimaryLabel::parse("no_such_label"), None);
    }

    #[test]
    fn section_identifiers_round_trip() {
        for section in BackendSection::ALL {
            assert_eq!(BackendSection::parse(section.as_str()), Some(section));
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&BackendSection::GovernanceCompliance).unwrap();
        assert_eq!(json, "\"governance_compliance\"");
        let label: PrimaryLabel = serde_json::from_str("\"case_study\"").unwrap();
        assert_eq!(label, PrimaryLabel::CaseStudy);
    }

    #[test]
    fn every_label_maps_to_a_canonical_section() {
        for label in PrimaryLabel::ALL {
            let section = primary_section_for_label(label);
            assert!(BackendSection::ALL.contains(&section));
        }
    }

    #[test]
    fn lexicon_covers_all_labels_except_fallbacks() {
        let listed: Vec<PrimaryLabel> = LABEL_KEYWORDS.iter().map(|(l, _)| *l).collect();
        assert_eq!(listed.len(), 7);
        assert!(!listed.contains(&PrimaryLabel::Other));
        assert!(!listed.contains(&PrimaryLabel::Unclassified));
    }
}
