//! Orchestrates every pipeline stage — question generation, retrieval,
//! simulation, scoring, fix generation, impact estimation, observation,
//! benchmarking, and report assembly — into one audit run. Grounded on
//! the teacher's `riptide-facade` builder and phase-composition idiom.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod question_service;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use logging::init_tracing;
pub use pipeline::{run, EngineInputs, ObservationPlan};
pub use question_service::{QuestionService, QuestionStats};
