//! Comparator + Benchmarker: checks simulation predictions against
//! observed AI behavior, and benchmarks observed sourceability against
//! named competitors. Grounded on
//! `original_source/worker/observation/{comparison,benchmark}.py`.

mod benchmarker;
mod comparator;

pub use benchmarker::{
    benchmark, BenchmarkOutcome, BenchmarkResult, CompetitorInfo, HeadToHead, MentionLevel,
    QuestionBenchmark,
};
pub use comparator::{
    compare, ComparisonSummary, DivergenceLevel, DivergenceSection, DivergenceThresholds,
    OutcomeMatch, QuestionComparison,
};
