//! Diagnoses scoring gaps into a prioritized, impact-estimated fix plan.
//! Grounded on `original_source/worker/fixes/{reason_codes,generator,templates,impact,synthetic}.py`.

mod generator;
mod impact;
mod reason_codes;
mod synthetic;
mod templates;

pub use generator::{
    EffortLevel, ExtractedContent, Fix, FixGenerator, FixGeneratorConfig, FixPlan,
};
pub use impact::{EstimateConfidence, FixImpactEstimate, FixPlanImpact, ImpactRange, TierCEstimator};
pub use reason_codes::{
    codes_by_category, codes_by_severity, reason_info, IssueCategory, ReasonCode, ReasonCodeInfo,
    Severity,
};
pub use synthetic::{PatchedQuestionResult, SyntheticChunk, TierBConfig, TierBEstimate, TierBEstimator};
pub use templates::{template_for, FixTemplate};
