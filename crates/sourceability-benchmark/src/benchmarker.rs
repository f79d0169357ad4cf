//! Benchmarks a company's observed sourceability against named
//! competitors on a shared question set. Grounded on
//! `original_source/worker/observation/benchmark.py`.

use serde::{Deserialize, Serialize};
use sourceability_observation::ParsedObservation;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionLevel {
    Cited,
    Mentioned,
    Omitted,
}

fn mention_level(p: &ParsedObservation) -> MentionLevel {
    if p.has_url_citation {
        MentionLevel::Cited
    } else if p.has_company_mention {
        MentionLevel::Mentioned
    } else {
        MentionLevel::Omitted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkOutcome {
    Win,
    Loss,
    Tie,
    MutualWin,
    MutualLoss,
}

fn classify(you: MentionLevel, them: MentionLevel) -> BenchmarkOutcome {
    let you_visible = you != MentionLevel::Omitted;
    let them_visible = them != MentionLevel::Omitted;

    match (you_visible, them_visible) {
        (true, true) => {
            if you == them {
                BenchmarkOutcome::MutualWin
            } else if you == MentionLevel::Cited {
                BenchmarkOutcome::Win
            } else {
                BenchmarkOutcome::Loss
            }
        }
        (true, false) => BenchmarkOutcome::Win,
        (false, true) => BenchmarkOutcome::Loss,
        (false, false) => BenchmarkOutcome::MutualLoss,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorInfo {
    pub name: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBenchmark {
    pub question_id: String,
    pub you_mention_level: MentionLevel,
    pub competitor_mention_levels: HashMap<String, MentionLevel>,
    pub outcomes: HashMap<String, BenchmarkOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadToHead {
    pub competitor_name: String,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub win_rate: f64,
    pub mention_advantage: f64,
    pub citation_advantage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub total_questions: usize,
    pub total_competitors: usize,
    pub your_mention_rate: f64,
    pub your_citation_rate: f64,
    pub avg_competitor_mention_rate: f64,
    pub avg_competitor_citation_rate: f64,
    pub overall_wins: usize,
    pub overall_losses: usize,
    pub overall_ties: usize,
    pub overall_win_rate: f64,
    pub unique_wins: Vec<String>,
    pub unique_losses: Vec<String>,
    pub head_to_heads: Vec<HeadToHead>,
    pub question_benchmarks: Vec<QuestionBenchmark>,
}

/// `your_observations` and each competitor's observations are keyed by
/// question id; a question only contributes to the benchmark when it is
/// present for your company (competitor omission of a shared question
/// is itself meaningful and counted as `Omitted`, not skipped).
pub fn benchmark(
    your_observations: &HashMap<String, ParsedObservation>,
    competitors: &[(CompetitorInfo, HashMap<String, ParsedObservation>)],
) -> BenchmarkResult {
    let question_ids: Vec<String> = your_observations.keys().cloned().collect();
    let total_questions = question_ids.len();
    let total_competitors = competitors.len();

    let mut question_benchmarks = Vec::with_capacity(total_questions);
    let mut overall_wins = 0;
    let mut overall_losses = 0;
    let mut overall_ties = 0;

    let mut per_competitor_outcomes: HashMap<String, Vec<BenchmarkOutcome>> = HashMap::new();
    let mut win_question_ids: HashMap<String, HashSet<String>> = HashMap::new();
    let mut loss_question_ids: HashMap<String, HashSet<String>> = HashMap::new();

    let mut your_mentioned = 0;
    let mut your_cited = 0;

    for qid in &question_ids {
        let your_parsed = &your_observations[qid];
        let you_level = mention_level(your_parsed);
        if your_parsed.has_company_mention {
            your_mentioned += 1;
        }
        if your_parsed.has_url_citation {
            your_cited += 1;
        }

        let mut competitor_mention_levels = HashMap::new();
        let mut outcomes = HashMap::new();

        for (info, comp_obs) in competitors {
            let them_level = comp_obs.get(qid).map(mention_level).unwrap_or(MentionLevel::Omitted);
            let outcome = classify(you_level, them_level);
            competitor_mention_levels.insert(info.name.clone(), them_level);
            outcomes.insert(info.name.clone(), outcome);

            per_competitor_outcomes.entry(info.name.clone()).or_default().push(outcome);

            match outcome {
                BenchmarkOutcome::Win => {
                    overall_wins += 1;
                    win_question_ids.entry(qid.clone()).or_default().insert(info.name.clone());
                }
                BenchmarkOutcome::Loss => {
                    overall_losses += 1;
                    loss_question_ids.entry(qid.clone()).or_default().insert(info.name.clone());
                }
                BenchmarkOutcome::Tie | BenchmarkOutcome::MutualWin | BenchmarkOutcome::MutualLoss => {
                    overall_ties += 1;
                }
            }
        }

        question_benchmarks.push(QuestionBenchmark {
            question_id: qid.clone(),
            you_mention_level: you_level,
            competitor_mention_levels,
            outcomes,
        });
    }

    let your_mention_rate = if total_questions > 0 { your_mentioned as f64 / total_questions as f64 } else { 0.0 };
    let your_citation_rate = if total_questions > 0 { your_cited as f64 / total_questions as f64 } else { 0.0 };

    let mut competitor_mention_rates = Vec::new();
    let mut competitor_citation_rates = Vec::new();
    let mut head_to_heads = Vec::with_capacity(competitors.len());

    for (info, comp_obs) in competitors {
        let mentioned = question_ids.iter().filter(|qid| comp_obs.get(*qid).map_or(false, |p| p.has_company_mention)).count();
        let cited = question_ids.iter().filter(|qid| comp_obs.get(*qid).map_or(false, |p| p.has_url_citation)).count();
        let mention_rate = if total_questions > 0 { mentioned as f64 / total_questions as f64 } else { 0.0 };
        let citation_rate = if total_questions > 0 { cited as f64 / total_questions as f64 } else { 0.0 };
        competitor_mention_rates.push(mention_rate);
        competitor_citation_rates.push(citation_rate);

        let outcomes = per_competitor_outcomes.get(&info.name).cloned().unwrap_or_default();
        let wins = outcomes.iter().filter(|o| matches!(o, BenchmarkOutcome::Win)).count();
        let losses = outcomes.iter().filter(|o| matches!(o, BenchmarkOutcome::Loss)).count();
        let ties = outcomes.len() - wins - losses;
        let win_rate = if !outcomes.is_empty() { wins as f64 / outcomes.len() as f64 } else { 0.0 };

        head_to_heads.push(HeadToHead {
            competitor_name: info.name.clone(),
            wins,
            losses,
            ties,
            win_rate,
            mention_advantage: your_mention_rate - mention_rate,
            citation_advantage: your_citation_rate - citation_rate,
        });
    }

    let avg_competitor_mention_rate = average(&competitor_mention_rates);
    let avg_competitor_citation_rate = average(&competitor_citation_rates);
    let overall_total = overall_wins + overall_losses + overall_ties;
    let overall_win_rate = if overall_total > 0 { overall_wins as f64 / overall_total as f64 } else { 0.0 };

    let competitor_names: HashSet<String> = competitors.iter().map(|(c, _)| c.name.clone()).collect();
    let unique_wins: Vec<String> = win_question_ids
        .into_iter()
        .filter(|(_, names)| names == &competitor_names && !competitor_names.is_empty())
        .map(|(qid, _)| qid)
        .collect();
    let unique_losses: Vec<String> = loss_question_ids
        .into_iter()
        .filter(|(_, names)| names == &competitor_names && !competitor_names.is_empty())
        .map(|(qid, _)| qid)
        .collect();

    BenchmarkResult {
        total_questions,
        total_competitors,
        your_mention_rate,
        your_citation_rate,
        avg_competitor_mention_rate,
        avg_competitor_citation_rate,
        overall_wins,
        overall_losses,
        overall_ties,
        overall_win_rate,
        unique_wins,
        unique_losses,
        head_to_heads,
        question_benchmarks,
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(mentioned: bool, cited: bool) -> ParsedObservation {
        ParsedObservation {
            has_company_mention: mentioned,
            has_url_citation: cited,
            ..Default::default()
        }
    }

    #[test]
    fn cited_vs_omitted_is_a_win() {
        let mut you = HashMap::new();
        you.insert("q1".to_string(), parsed(true, true));
        let mut comp = HashMap::new();
        comp.insert("q1".to_string(), parsed(false, false));
        let result = benchmark(&you, &[(CompetitorInfo { name: "Rival".to_string(), domain: "rival.com".to_string() }, comp)]);
        assert_eq!(result.overall_wins, 1);
        assert_eq!(result.unique_wins, vec!["q1".to_string()]);
    }

    #[test]
    fn both_omitted_is_mutual_loss() {
        let mut you = HashMap::new();
        you.insert("q1".to_string(), parsed(false, false));
        let mut comp = HashMap::new();
        comp.insert("q1".to_string(), parsed(false, false));
        let result = benchmark(&you, &[(CompetitorInfo { name: "Rival".to_string(), domain: "rival.com".to_string() }, comp)]);
        assert_eq!(result.overall_wins, 0);
        assert_eq!(result.overall_losses, 0);
        assert_eq!(result.overall_ties, 1);
    }
}
