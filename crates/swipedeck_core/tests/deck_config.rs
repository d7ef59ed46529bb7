use std::io::Write;
use swipedeck_core::{
    CandidateCard, ConfigError, DeckConfig, DeckController, DeckSetupError, JobCard, MatchTier,
    NoopListener, SwipeAxes,
};

#[test]
fn load_from_path_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"thresholds":{{"distance_threshold":60,"velocity_threshold":350}},"skip_enabled":false,"exit_delay_ms":150}}"#
    )
    .expect("write config");

    let config = DeckConfig::load_from_path(file.path()).expect("load config");
    assert_eq!(config.thresholds.distance_threshold, 60.0);
    assert_eq!(config.thresholds.velocity_threshold, 350.0);
    assert_eq!(config.axes(), SwipeAxes::HorizontalOnly);
    assert_eq!(config.exit_delay_ms, 150);
}

#[test]
fn load_from_missing_path_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = DeckConfig::load_from_path(dir.path().join("missing.json"))
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn controller_refuses_invalid_config() {
    let mut config = DeckConfig::default();
    config.thresholds.distance_threshold = f64::NAN;
    let result = DeckController::new(vec!["a".to_string()], config, NoopListener);
    assert!(matches!(result, Err(DeckSetupError::Config(_))));
}

#[test]
fn candidate_and_job_cards_load_from_json() {
    let candidates: Vec<CandidateCard> = serde_json::from_value(serde_json::json!([
        {"id": "c1", "name": "Lin", "title": "Frontend engineer", "match_percentage": 95},
        {"id": "c2", "name": "Wu", "title": "Designer", "match_percentage": 74, "skills": ["Figma"]}
    ]))
    .expect("candidate cards");
    assert_eq!(candidates[0].match_tier(), MatchTier::Excellent);
    assert_eq!(candidates[1].match_tier(), MatchTier::Fair);
    assert_eq!(candidates[1].skills, vec!["Figma".to_string()]);

    let jobs: Vec<JobCard> = serde_json::from_value(serde_json::json!([
        {"id": "1", "company": "Acme", "position": "Frontend", "match_percentage": 92},
        {"id": "2", "company": "Beta", "position": "UI/UX", "match_percentage": 78}
    ]))
    .expect("job cards");
    assert_eq!(jobs[0].match_tier(), MatchTier::Strong);
    assert_eq!(jobs[1].match_tier(), MatchTier::Fair);

    let deck = DeckController::new(jobs, DeckConfig::job_deck(), NoopListener).expect("job deck");
    assert_eq!(deck.state().len(), 2);
}

#[test]
fn controller_refuses_out_of_range_match() {
    let jobs: Vec<JobCard> = serde_json::from_value(serde_json::json!([
        {"id": "1", "company": "Acme", "position": "Frontend", "match_percentage": 120}
    ]))
    .expect("u8 accepts 120");
    let result = DeckController::new(jobs, DeckConfig::job_deck(), NoopListener);
    assert!(matches!(result, Err(DeckSetupError::Items(_))));
}
