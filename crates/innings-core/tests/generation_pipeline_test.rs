//! End-to-end tests for generate -> parse -> render -> export.
//!
//! Providers are fixtures or in-test stubs; nothing touches the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use innings_core::artifact::{
    ResultView, RoadmapView, export_filename, parse_artifact, to_markdown,
};
use innings_core::generate::GenerationClient;
use innings_core::intake::{
    ConstraintTag, DiscoveryProfile, FinancialUrgency, Level, LockerRoomRole, PhysicalCapacity,
    PivotIntake, PivotProfile, PivotStep, Profile,
};
use innings_core::provider::{FixtureProvider, GenerationProvider, GenerationRequest, ProviderError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn cricket_profile() -> Profile {
    Profile::Discovery(DiscoveryProfile {
        sport: "Cricket".into(),
        age: 16,
        level: Level::Intermediate,
        goal: "Play Ranji Trophy".into(),
    })
}

/// Provider whose transport is always down.
struct UnreachableProvider;

#[async_trait]
impl GenerationProvider for UnreachableProvider {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}

/// Provider that never answers.
struct HangingProvider;

#[async_trait]
impl GenerationProvider for HangingProvider {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cricket_discovery_renders_and_exports() {
    let provider = FixtureProvider::from_file(fixture("cricket_discovery.json"))
        .await
        .unwrap();
    let client = GenerationClient::new(Arc::new(provider));

    let payload = client.generate(&cricket_profile()).await;
    // The fixture is fenced the way providers often answer.
    assert!(payload.trim_start().starts_with("```json"));

    let artifact = parse_artifact(&payload).unwrap();
    assert_eq!(artifact.phases.len(), 4);
    assert!(artifact.pivot_options.is_none());

    let view = RoadmapView::new(&artifact);
    assert!(view.phases[0].expanded);
    assert!(view.phases[1..].iter().all(|p| !p.expanded));
    assert!(!view.show_pivot_options());
    assert_eq!(
        view.institutions[0].map_url,
        "https://www.google.com/maps/search/?api=1&query=SAI%20Centre%2C%20Bengaluru"
    );

    let md = to_markdown(&artifact);
    assert!(md.starts_with("# Cricket Path: U-16 to Ranji\n"));
    assert!(md.contains("### Phase 4: National/Pro Leagues (IPL)\n**Duration:** 3+ years\n"));
    assert!(!md.contains("CAREER PIVOT OPTIONS"));
    assert_eq!(md, to_markdown(&parse_artifact(&payload).unwrap()));
    assert_eq!(export_filename(&artifact.title), "cricket_path__u_16_to_ranji.md");
}

const CRICKET_PIVOT_PLAN: &str = r#"{
  "title": "Pivot Plan: Cricket",
  "current_status_analysis": "Ten seasons of match craft and a strategist's eye.",
  "roadmap_steps": [
    {"phase": "Certify", "duration": "0-3 months", "actions": ["BCCI Level 1 coaching course"]},
    {"phase": "Assist", "duration": "3-12 months", "actions": ["Assistant coach at a state academy"]},
    {"phase": "Lead", "duration": "1-2 years", "actions": ["Head coach, age-group side"]}
  ],
  "pivot_options": [
    {"role": "Performance Analyst", "description": "Match video and data.", "pathway": "Analytics certificate"}
  ],
  "key_institutions": ["NCA Bengaluru", "NIS Patiala", "LNIPE Gwalior"],
  "financial_aid_tips": ["Khelo India coaching stipend"]
}"#;

#[tokio::test]
async fn cricket_pivot_scenario_renders_phases_and_institutions_in_order() {
    let client = GenerationClient::new(Arc::new(FixtureProvider::new(CRICKET_PIVOT_PLAN)));
    let mut intake = PivotIntake::new();

    intake.set_sport("Cricket").unwrap();
    intake.set_years_played("10").unwrap();
    intake.confirm().unwrap();
    intake.toggle_constraint(ConstraintTag::AgeFactor).unwrap();
    intake.confirm().unwrap();
    intake.set_identity_score(8).unwrap();
    intake.confirm().unwrap();
    intake.set_physical_capacity(PhysicalCapacity::Mixed).unwrap();
    intake.confirm().unwrap();
    intake.set_role(LockerRoomRole::Strategist).unwrap();
    intake.confirm().unwrap();
    intake.set_financial_urgency(FinancialUrgency::Stable).unwrap();
    assert_eq!(intake.step(), PivotStep::Urgency);

    let payload = intake.generate(&client).await.unwrap().to_string();
    assert_eq!(intake.step(), PivotStep::Results);

    let view = ResultView::from_payload(&payload);
    let view = view.view().expect("pivot plan should render");
    assert_eq!(view.title, "Pivot Plan: Cricket");
    assert_eq!(
        view.phases.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Certify", "Assist", "Lead"]
    );
    assert_eq!(
        view.phases.iter().map(|p| p.index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        view.institutions.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["NCA Bengaluru", "NIS Patiala", "LNIPE Gwalior"]
    );
    assert!(view.show_pivot_options());
    assert_eq!(view.pivot_options[0].role, "Performance Analyst");
}

#[tokio::test]
async fn pivot_fixture_renders_pivot_options() {
    let provider = FixtureProvider::from_file(fixture("pivot_plan.json"))
        .await
        .unwrap();
    let client = GenerationClient::new(Arc::new(provider));
    let payload = client
        .generate(&Profile::Pivot(PivotProfile {
            years_played: "10".into(),
            ..PivotProfile::default()
        }))
        .await;

    let view = ResultView::from_payload(&payload);
    let view = view.view().expect("pivot fixture should render");
    assert!(view.show_pivot_options());
    assert_eq!(view.pivot_options.len(), 3);

    let md = to_markdown(&parse_artifact(&payload).unwrap());
    assert!(md.contains("## CAREER PIVOT OPTIONS\n\n### Certified Coach\n"));
}

#[tokio::test]
async fn unreachable_provider_yields_error_artifact() {
    let client = GenerationClient::new(Arc::new(UnreachableProvider));

    let payload = client.generate(&cricket_profile()).await;
    let artifact = parse_artifact(&payload).expect("error artifact must parse");
    assert_eq!(artifact.title, "Error");
    assert!(!artifact.situation_analysis.is_empty());
    assert!(artifact.phases.is_empty());
    assert!(artifact.institutions.is_empty());
    assert!(artifact.aid_tips.is_empty());

    // Renders like any other artifact, flagged as the failure payload.
    let view = ResultView::from_payload(&payload);
    assert!(view.view().unwrap().is_error);
}

#[tokio::test(start_paused = true)]
async fn hanging_provider_times_out_into_error_artifact() {
    let client =
        GenerationClient::new(Arc::new(HangingProvider)).with_timeout(Duration::from_secs(60));
    let payload = client.generate(&cricket_profile()).await;
    let artifact = parse_artifact(&payload).unwrap();
    assert!(artifact.is_error());
}

#[tokio::test]
async fn prose_answer_is_unsupported_not_guessed() {
    let client = GenerationClient::new(Arc::new(FixtureProvider::new(
        "Sure! Here is a great plan for you: practice every day.",
    )));
    let payload = client.generate(&cricket_profile()).await;
    assert!(matches!(
        ResultView::from_payload(&payload),
        ResultView::Unsupported { .. }
    ));
}
