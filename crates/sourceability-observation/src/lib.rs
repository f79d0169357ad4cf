//! Observation Runner + Parser: executes a bounded batch of provider
//! calls and turns each response into structured mention/citation
//! signals. Grounded on
//! `original_source/worker/observation/{providers,parser}.py`.

mod parser;
mod runner;

pub use parser::{
    parse_observation, Citation, CitationType, Mention, MentionType, ObservedConfidence,
    ParsedObservation, Sentiment,
};
pub use runner::{ObservationOutcome, ObservationRunner, RunnerConfig};
