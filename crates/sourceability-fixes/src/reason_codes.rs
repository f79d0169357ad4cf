//! The closed set of 19 reason codes explaining why a question failed,
//! plus their severity/category metadata. Grounded on
//! `original_source/worker/fixes/reason_codes.py`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    MissingDefinition,
    MissingPricing,
    MissingContact,
    MissingLocation,
    MissingFeatures,
    MissingSocialProof,
    BuriedAnswer,
    FragmentedInfo,
    NoDedicatedPage,
    PoorHeadings,
    NotCitable,
    VagueLanguage,
    OutdatedInfo,
    Inconsistent,
    TrustGap,
    NoAuthority,
    UnverifiedClaims,
    RenderRequired,
    BlockedByRobots,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 19] = [
        ReasonCode::MissingDefinition,
        ReasonCode::MissingPricing,
        ReasonCode::MissingContact,
        ReasonCode::MissingLocation,
        ReasonCode::MissingFeatures,
        ReasonCode::MissingSocialProof,
        ReasonCode::BuriedAnswer,
        ReasonCode::FragmentedInfo,
        ReasonCode::NoDedicatedPage,
        ReasonCode::PoorHeadings,
        ReasonCode::NotCitable,
        ReasonCode::VagueLanguage,
        ReasonCode::OutdatedInfo,
        ReasonCode::Inconsistent,
        ReasonCode::TrustGap,
        ReasonCode::NoAuthority,
        ReasonCode::UnverifiedClaims,
        ReasonCode::RenderRequired,
        ReasonCode::BlockedByRobots,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MissingDefinition => "missing_definition",
            ReasonCode::MissingPricing => "missing_pricing",
            ReasonCode::MissingContact => "missing_contact",
            ReasonCode::MissingLocation => "missing_location",
            ReasonCode::MissingFeatures => "missing_features",
            ReasonCode::MissingSocialProof => "missing_social_proof",
            ReasonCode::BuriedAnswer => "buried_answer",
            ReasonCode::FragmentedInfo => "fragmented_info",
            ReasonCode::NoDedicatedPage => "no_dedicated_page",
            ReasonCode::PoorHeadings => "poor_headings",
            ReasonCode::NotCitable => "not_citable",
            ReasonCode::VagueLanguage => "vague_language",
            ReasonCode::OutdatedInfo => "outdated_info",
            ReasonCode::Inconsistent => "inconsistent",
            ReasonCode::TrustGap => "trust_gap",
            ReasonCode::NoAuthority => "no_authority",
            ReasonCode::UnverifiedClaims => "unverified_claims",
            ReasonCode::RenderRequired => "render_required",
            ReasonCode::BlockedByRobots => "blocked_by_robots",
        }
    }

    pub fn info(&self) -> ReasonCodeInfo {
        reason_info(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Content,
    Structure,
    Quality,
    Trust,
    Technical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonCodeInfo {
    pub code: ReasonCode,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub category: IssueCategory,
    pub typical_impact: f64,
}

pub fn reason_info(code: ReasonCode) -> ReasonCodeInfo {
    use IssueCategory::*;
    use Severity::*;
    let (name, description, severity, category, typical_impact) = match code {
        ReasonCode::MissingDefinition => (
            "Missing Definition",
            "Core business concept or term is not clearly defined",
            Critical,
            Content,
            0.3,
        ),
        ReasonCode::MissingPricing => (
            "Missing Pricing",
            "Pricing information is not available on the site",
            High,
            Content,
            0.25,
        ),
        ReasonCode::MissingContact => (
            "Missing Contact Info",
            "Contact information is not easily accessible",
            High,
            Content,
            0.2,
        ),
        ReasonCode::MissingLocation => (
            "Missing Location",
            "Service area or location information is not specified",
            Medium,
            Content,
            0.15,
        ),
        ReasonCode::MissingFeatures => (
            "Missing Features",
            "Product or service features are not clearly listed",
            High,
            Content,
            0.2,
        ),
        ReasonCode::MissingSocialProof => (
            "Missing Social Proof",
            "No testimonials, case studies, or reviews present",
            Medium,
            Content,
            0.15,
        ),
        ReasonCode::BuriedAnswer => (
            "Buried Answer",
            "Information exists but is difficult to find or extract",
            Medium,
            Structure,
            0.15,
        ),
        ReasonCode::FragmentedInfo => (
            "Fragmented Information",
            "Related information is scattered across multiple pages",
            Medium,
            Structure,
            0.1,
        ),
        ReasonCode::NoDedicatedPage => (
            "No Dedicated Page",
            "Important topic lacks its own dedicated page",
            Medium,
            Structure,
            0.15,
        ),
        ReasonCode::PoorHeadings => (
            "Poor Headings",
            "Page headings don't match common search queries",
            Low,
            Structure,
            0.1,
        ),
        ReasonCode::NotCitable => (
            "Not Citable",
            "Information cannot be clearly attributed to a source",
            Medium,
            Quality,
            0.1,
        ),
        ReasonCode::VagueLanguage => (
            "Vague Language",
            "Content uses generic or buzzword-heavy language",
            Medium,
            Quality,
            0.1,
        ),
        ReasonCode::OutdatedInfo => (
            "Outdated Information",
            "Content appears to be outdated or stale",
            High,
            Quality,
            0.2,
        ),
        ReasonCode::Inconsistent => (
            "Inconsistent Information",
            "Conflicting information found across pages",
            Critical,
            Quality,
            0.25,
        ),
        ReasonCode::TrustGap => (
            "Trust Gap",
            "Lacks credibility signals like reviews or certifications",
            Medium,
            Trust,
            0.15,
        ),
        ReasonCode::NoAuthority => (
            "No Authority Signals",
            "No indicators of expertise or authority in the field",
            Medium,
            Trust,
            0.1,
        ),
        ReasonCode::UnverifiedClaims => (
            "Unverified Claims",
            "Claims are made without supporting evidence",
            Medium,
            Trust,
            0.1,
        ),
        ReasonCode::RenderRequired => (
            "JavaScript Required",
            "Content requires JavaScript rendering to be visible",
            High,
            Technical,
            0.2,
        ),
        ReasonCode::BlockedByRobots => (
            "Blocked by Robots",
            "Content is blocked by robots.txt",
            Critical,
            Technical,
            0.3,
        ),
    };
    ReasonCodeInfo {
        code,
        name,
        description,
        severity,
        category,
        typical_impact,
    }
}

pub fn codes_by_category(category: IssueCategory) -> Vec<ReasonCode> {
    ReasonCode::ALL
        .into_iter()
        .filter(|c| reason_info(*c).category == category)
        .collect()
}

pub fn codes_by_severity(severity: Severity) -> Vec<ReasonCode> {
    ReasonCode::ALL
        .into_iter()
        .filter(|c| reason_info(*c).severity == severity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_info() {
        for code in ReasonCode::ALL {
            let info = reason_info(code);
            assert_eq!(info.code, code);
            assert!(info.typical_impact > 0.0);
        }
    }

    #[test]
    fn technical_category_has_two_codes() {
        assert_eq!(
            codes_by_category(IssueCategory::Technical).len(),
            2
        );
    }
}
