//! The pipeline runner: wires every stage together into one audit run.
//! Pure stages (retrieval, simulation, scoring, fix generation, impact
//! estimation, comparison, benchmarking, report assembly) run
//! synchronously; only the Observation stage suspends. Grounded on the
//! teacher's `riptide-facade` builder + phase-execution idiom
//! (`RiptideBuilder`, `PipelinePhasesFacade`'s `tracing::info!` spans and
//! `Instant`-based timing), adapted to a single linear pipeline instead
//! of a stage-selectable facade tree.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::question_service::QuestionService;
use chrono::Utc;
use sourceability_benchmark::{benchmark, compare, BenchmarkResult, CompetitorInfo, ComparisonSummary};
use sourceability_fixes::{FixGenerator, TierCEstimator};
use sourceability_intelligence::{ObservationRequest, Provider};
use sourceability_observation::{parse_observation, ObservationRunner, ParsedObservation, RunnerConfig};
use sourceability_questions::Question;
use sourceability_reports::{assemble, FullReport, ObservationInputs, ReportInputs, ReportMetadataInputs};
use sourceability_retriever::Retriever;
use sourceability_scoring::ScoreCalculator;
use sourceability_simulation::SimulationRunner;
use sourceability_types::model::{CancellationToken, Chunk, SiteContext};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// Observation behavior for a run: a primary provider, an optional
/// fallback, the model label recorded on the report, and an optional
/// list of competitors to benchmark against over the same question set.
pub struct ObservationPlan<'a> {
    pub primary: &'a dyn Provider,
    pub fallback: Option<&'a dyn Provider>,
    pub model: String,
    pub competitors: Vec<CompetitorInfo>,
}

/// Everything one pipeline run needs from its caller. The crawl,
/// extraction, chunking and embedding that produce `chunks` all happen
/// upstream of this crate, per the collaborator boundary.
pub struct EngineInputs<'a> {
    pub run_id: String,
    pub site_id: String,
    pub site: &'a SiteContext,
    pub chunks: &'a [Chunk],
    pub observation: Option<ObservationPlan<'a>>,
    pub cancel: &'a CancellationToken,
}

/// Runs the full pipeline and returns the assembled report. `.await`s
/// only at the Observation stage boundary; every other stage is
/// synchronous CPU-bound work. Checks `cancel` at the question/fix
/// boundaries named in the concurrency model.
pub async fn run(inputs: EngineInputs<'_>, config: &EngineConfig) -> Result<FullReport> {
    let run_started_at = Utc::now();
    let start = Instant::now();

    let question_set = QuestionService::generate_for_site(inputs.site);
    let all_questions: Vec<Question> = question_set.all().cloned().collect();
    info!(questions = all_questions.len(), "generated question set");

    let mut retriever = Retriever::new();
    for chunk in inputs.chunks {
        retriever.add(
            chunk.id.clone(),
            chunk.content.clone(),
            chunk.embedding.clone(),
            chunk.url.clone(),
            chunk.title.clone(),
            chunk.heading_path.clone(),
        );
    }

    if inputs.cancel.is_cancelled() {
        return Err(EngineError::Cancelled { stage: "retrieval" });
    }

    let simulation = SimulationRunner::new(&retriever, config.simulation.clone())
        .run(&inputs.site.company_name, &all_questions);
    info!(overall_score = simulation.overall_score, "simulation complete");

    if inputs.cancel.is_cancelled() {
        return Err(EngineError::Cancelled { stage: "simulation" });
    }

    let score = ScoreCalculator::new(config.rubric.clone()).calculate(&simulation);
    info!(total_score = score.total_score, grade = %score.grade, "scoring complete");

    let fix_plan = FixGenerator::new(config.fix_generator.clone()).generate(&simulation);
    let fix_plan_impact = TierCEstimator::new(config.max_total_impact).estimate_plan(&fix_plan);
    info!(fixes = fix_plan.fixes.len(), "fix generation complete");

    if inputs.cancel.is_cancelled() {
        return Err(EngineError::Cancelled { stage: "fix_generation" });
    }

    let mut observation_section: Option<(String, String, HashMap<String, ParsedObservation>, ComparisonSummary)> = None;
    let mut benchmark_section: Option<BenchmarkResult> = None;

    if let Some(plan) = inputs.observation {
        let your_observations = observe_company(
            &inputs.site.company_name,
            &inputs.site.domain,
            &all_questions,
            plan.primary,
            plan.fallback,
            &plan.model,
            &config.observation_runner,
            inputs.cancel,
        )
        .await;
        let comparison = compare(&simulation.question_results, &your_observations, &config.divergence);
        info!(
            mention_rate_obs = comparison.mention_rate_obs,
            prediction_accuracy = comparison.prediction_accuracy,
            "observation complete"
        );

        if !plan.competitors.is_empty() {
            let mut competitor_observations = Vec::with_capacity(plan.competitors.len());
            for competitor in &plan.competitors {
                if inputs.cancel.is_cancelled() {
                    break;
                }
                let observed = observe_company(
                    &competitor.name,
                    &competitor.domain,
                    &all_questions,
                    plan.primary,
                    plan.fallback,
                    &plan.model,
                    &config.observation_runner,
                    inputs.cancel,
                )
                .await;
                competitor_observations.push((competitor.clone(), observed));
            }
            if !competitor_observations.is_empty() {
                let result = benchmark(&your_observations, &competitor_observations);
                info!(overall_wins = result.overall_wins, "benchmark complete");
                benchmark_section = Some(result);
            }
        }

        observation_section = Some((plan.primary.name().to_string(), plan.model, your_observations, comparison));
    }

    let run_completed_at = Utc::now();

    let report = assemble(ReportInputs {
        metadata: ReportMetadataInputs {
            report_id: sourceability_reports::generate_report_id(),
            site_id: inputs.site_id,
            run_id: inputs.run_id,
            company_name: inputs.site.company_name.clone(),
            domain: inputs.site.domain.clone(),
            created_at: run_completed_at,
            run_started_at: Some(run_started_at),
            run_completed_at: Some(run_completed_at),
            limitations: Vec::new(),
            notes: Vec::new(),
        },
        score: &score,
        fix_plan: &fix_plan,
        fix_plan_impact: Some(&fix_plan_impact),
        observation: observation_section
            .as_ref()
            .map(|(provider, model, observations, comparison)| ObservationInputs {
                provider: provider.clone(),
                model: model.clone(),
                observations,
                comparison,
            }),
        benchmark: benchmark_section.as_ref(),
    });

    info!(elapsed_ms = start.elapsed().as_millis(), "pipeline run complete");
    Ok(report)
}

/// Runs every universal/derived question against one company's name and
/// domain, then parses each successful response into mention/citation
/// signals. Used both for the audited company itself and, separately,
/// for each benchmark competitor over the same question set.
async fn observe_company(
    company_name: &str,
    domain: &str,
    questions: &[Question],
    primary: &dyn Provider,
    fallback: Option<&dyn Provider>,
    model: &str,
    runner_config: &RunnerConfig,
    cancel: &CancellationToken,
) -> HashMap<String, ParsedObservation> {
    let requests: Vec<ObservationRequest> = questions
        .iter()
        .map(|q| ObservationRequest {
            question_id: q.id.clone(),
            question_text: q.render(company_name),
            company_name: company_name.to_string(),
            domain: domain.to_string(),
            model: model.to_string(),
            temperature: 0.0,
            max_tokens: 512,
        })
        .collect();

    let runner = ObservationRunner::new(primary, fallback, runner_config.clone());
    let outcomes = runner.run_batch(&requests, cancel).await;

    outcomes
        .into_iter()
        .filter_map(|outcome| {
            let response = outcome.response?;
            let parsed = parse_observation(&response.content, company_name, domain, &[]);
            Some((outcome.question_id, parsed))
        })
        .collect()
}
