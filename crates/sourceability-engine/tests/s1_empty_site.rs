//! An empty site: no crawled chunks at all. Every universal question
//! must come back unanswerable and the report must grade it `F`.

use sourceability_engine::{run, EngineConfig, EngineInputs};
use sourceability_types::model::{CancellationToken, SiteContext};

#[tokio::test]
async fn empty_site_grades_f_with_a_missing_definition_fix() {
    let site = SiteContext {
        company_name: "Acme Widgets".to_string(),
        domain: "acmewidgets.example".to_string(),
        ..Default::default()
    };
    let cancel = CancellationToken::new();
    let inputs = EngineInputs {
        run_id: "run-s1".to_string(),
        site_id: "site-s1".to_string(),
        site: &site,
        chunks: &[],
        observation: None,
        cancel: &cancel,
    };

    let report = run(inputs, &EngineConfig::default())
        .await
        .expect("pipeline should run to completion on an empty site");

    assert_eq!(report.score.total_questions, 15);
    assert_eq!(report.score.questions_unanswered, 15);
    assert_eq!(report.score.questions_answered, 0);
    assert_eq!(report.score.grade, "F");
    // The confidence criterion still scores a nonzero contribution even
    // when every question is confidently unanswerable, so this is a
    // loose bound rather than an exact zero.
    assert!(report.score.total_score < 20.0, "got {}", report.score.total_score);

    assert!(!report.fixes.fixes.is_empty());
    assert!(report
        .fixes
        .fixes
        .iter()
        .any(|f| f.reason_code == "missing_definition"));

    assert!(report.observation.is_none());
    assert!(report.benchmark.is_none());
    assert!(report.divergence.is_none());
}
