//! Aggregated configuration for a pipeline run.
//!
//! Per-stage tunables stay defined as `Default`-implementing structs in
//! their owning crate (simulation thresholds, fix generator limits,
//! impact caps, divergence bands); this struct only bundles them for the
//! orchestration layer, per the "explicit option records" design note.

use sourceability_benchmark::DivergenceThresholds;
use sourceability_config::ProviderConfig;
use sourceability_fixes::FixGeneratorConfig;
use sourceability_observation::RunnerConfig;
use sourceability_scoring::ScoringRubric;
use sourceability_simulation::SimulationConfig;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub simulation: SimulationConfig,
    pub rubric: ScoringRubric,
    pub fix_generator: FixGeneratorConfig,
    pub max_total_impact: f64,
    pub provider: ProviderConfig,
    pub observation_runner: RunnerConfig,
    pub divergence: DivergenceThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            rubric: ScoringRubric::default(),
            fix_generator: FixGeneratorConfig::default(),
            max_total_impact: 30.0,
            provider: ProviderConfig::default(),
            observation_runner: RunnerConfig::default(),
            divergence: DivergenceThresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_stage_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_total_impact, 30.0);
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.observation_runner.requests_per_minute, 60);
    }
}
