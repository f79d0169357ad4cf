//! Report assembly: turns the outputs of scoring, fix generation,
//! observation, and benchmarking into the versioned `FullReport` wire
//! contract. Grounded on `original_source/worker/reports/{assembler,contract}.py`
//! and the teacher's `riptide-schemas` versioned-envelope idiom.

mod assembler;
mod contract;

pub use assembler::{assemble, ObservationInputs, ReportInputs, ReportMetadataInputs};
pub use contract::{
    BenchmarkSection, CriterionScoreItem, DivergenceSection, FixItem, FixSection, FullReport,
    ImpactRangeItem, ObservationQuestionResult, ObservationSection, ReportMetadata,
    ReportVersion, ScoreSection, CURRENT_VERSION,
};

/// Generates a fresh report id. Separated out so the engine doesn't need
/// its own `uuid` dependency just to stamp a `FullReport`.
pub fn generate_report_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
