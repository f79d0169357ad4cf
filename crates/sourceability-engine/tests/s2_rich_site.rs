//! A well-documented site: one chunk per universal question, each
//! written to carry that question's expected signal phrases. The
//! pipeline should come back with most questions answered and few, if
//! any, generated fixes.

use sourceability_engine::{run, EngineConfig, EngineInputs};
use sourceability_types::model::{CancellationToken, Chunk, SiteContext};

fn chunk(id: &str, url: &str, title: &str, content: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        content: content.to_string(),
        url: url.to_string(),
        title: title.to_string(),
        heading_path: vec![title.to_string()],
        embedding: Vec::new(),
    }
}

fn rich_chunks() -> Vec<Chunk> {
    vec![
        chunk(
            "c-about",
            "/about",
            "About Acme Widgets",
            "Acme Widgets is a software company in the industrial automation sector. \
             Our primary activity is building sensor-driven inventory software for factories. \
             This clear business description covers what Acme Widgets does every day.",
        ),
        chunk(
            "c-history",
            "/about/history",
            "Our History",
            "Acme Widgets was founded by Jane Castellano and Tomas Ruiz in 2011, our founding year. \
             The founding story began in a garage workshop outside Austin and grew from there.",
        ),
        chunk(
            "c-locations",
            "/locations",
            "Locations",
            "Acme Widgets' headquarters location is Austin, Texas. We operate in operating regions \
             across North America and Europe, with office locations in Austin, Denver, and Lisbon.",
        ),
        chunk(
            "c-products",
            "/products",
            "Products",
            "Acme Widgets offers three product/service names: WidgetTrack, WidgetScan, and WidgetAlert. \
             Each comes with clear descriptions and key features like real-time dashboards and barcode scanning.",
        ),
        chunk(
            "c-pricing",
            "/pricing",
            "Pricing",
            "Acme Widgets publishes pricing tiers starting at specific prices of $49, $149, and $499 per month. \
             Our pricing model explanation is usage-based billing with no hidden fees.",
        ),
        chunk(
            "c-customers",
            "/customers",
            "Who We Serve",
            "Acme Widgets serves customer segments including mid-size manufacturers and logistics firms. \
             Common use cases span warehouse tracking across industry verticals like automotive and food packaging.",
        ),
        chunk(
            "c-problems",
            "/solutions",
            "Problems We Solve",
            "Acme Widgets addresses pain points addressed by manual inventory counts and lost stock. \
             The solutions provided automate reconciliation, and outcomes achieved include 30% fewer stockouts.",
        ),
        chunk(
            "c-contact",
            "/contact",
            "Contact Us",
            "Reach Acme Widgets by email address support@acmewidgets.example or phone number (555) 010-1234. \
             You can also use our contact form mention on this page, or write to our physical address at 100 Widget Way, Austin, TX.",
        ),
        chunk(
            "c-signup",
            "/get-started",
            "Get Started",
            "Getting started steps with Acme Widgets begin with our signup process on the pricing page. \
             A trial/demo availability option lets you test WidgetTrack free for 14 days.",
        ),
        chunk(
            "c-clients",
            "/customers/stories",
            "Client Stories",
            "Notable client names using Acme Widgets include Vantage Freight and Harbor Foods. \
             Our case studies and testimonials describe measurable gains, and our logos/partnerships page lists them all.",
        ),
        chunk(
            "c-awards",
            "/press",
            "Press & Recognition",
            "Acme Widgets has awards mentioned such as the 2023 Supply Chain Innovation Award. \
             Our certifications listed include ISO 9001, and industry recognition plus press coverage came from Logistics Weekly.",
        ),
        chunk(
            "c-track-record",
            "/about/track-record",
            "Track Record",
            "Acme Widgets has 12 years in business with steady growth metrics year over year. \
             Our success stories and customer count now exceed 1,200 manufacturers worldwide.",
        ),
        chunk(
            "c-differentiation",
            "/why-us",
            "Why Acme Widgets",
            "Acme Widgets' unique features include proprietary technology for offline-first scanning. \
             These competitive advantages and differentiating factors set us apart from generic inventory tools.",
        ),
        chunk(
            "c-choose",
            "/why-us/compare",
            "Why Choose Us",
            "Choosing Acme Widgets means value propositions like faster deployment and benefits over alternatives \
             such as legacy ERP add-ons. Our unique selling points center on reliability in harsh warehouse environments.",
        ),
        chunk(
            "c-mission",
            "/mission",
            "Our Mission",
            "Acme Widgets' mission statement is to make inventory visibility effortless for every warehouse. \
             Our vision statement and core values emphasize honesty, and our company purpose is reducing waste.",
        ),
    ]
}

#[tokio::test]
async fn rich_site_answers_most_universal_questions_with_few_fixes() {
    let site = SiteContext {
        company_name: "Acme Widgets".to_string(),
        domain: "acmewidgets.example".to_string(),
        title: Some("Acme Widgets - Industrial Inventory Software".to_string()),
        description: Some("Acme Widgets builds sensor-driven inventory software for factories.".to_string()),
        ..Default::default()
    };
    let chunks = rich_chunks();
    let cancel = CancellationToken::new();
    let inputs = EngineInputs {
        run_id: "run-s2".to_string(),
        site_id: "site-s2".to_string(),
        site: &site,
        chunks: &chunks,
        observation: None,
        cancel: &cancel,
    };

    let report = run(inputs, &EngineConfig::default())
        .await
        .expect("pipeline should run to completion on a well-documented site");

    assert!(report.score.total_questions >= 15);
    assert!(
        report.score.questions_answered + report.score.questions_partial
            > report.score.questions_unanswered,
        "expected most questions to be at least partially answerable, got answered={} partial={} unanswered={}",
        report.score.questions_answered,
        report.score.questions_partial,
        report.score.questions_unanswered
    );
    assert_ne!(report.score.grade, "F");
    assert!(
        report.score.total_score > 40.0,
        "got {}",
        report.score.total_score
    );

    // A well-documented site should need noticeably fewer fixes than an
    // empty one, even though some signal phrases may still be missed by
    // lexical retrieval.
    assert!(report.fixes.fixes.len() <= 10);
}
