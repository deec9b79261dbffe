//! End-to-end claim workflow against the file-backed record store: intake,
//! simulated assessment, results, dashboard, and export.

mod common {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use claimsight::workflows::claims::{ClaimSubmission, IncidentType};

    pub(super) fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 24, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    pub(super) fn submission() -> ClaimSubmission {
        ClaimSubmission {
            policy_number: "POL555001".to_string(),
            vehicle_make: "Ford".to_string(),
            vehicle_model: "F-150".to_string(),
            vehicle_year: "2012".to_string(),
            incident_type: Some(IncidentType::Theft),
            damage_description: "Vehicle stolen from driveway overnight".to_string(),
            claim_amount: "14500".to_string(),
            driver_age: "22".to_string(),
            driver_experience: "4".to_string(),
            previous_claims: "1".to_string(),
            location: "48 Harbor Rd, Portland".to_string(),
            incident_date: Some(now() - Duration::days(2)),
        }
    }
}

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use claimsight::workflows::claims::{
    export_history_to_path, AssessmentConfig, AssessmentOutcome, AssessmentSimulator,
    ClaimIntake, ClaimRecords, Dashboard, IntakeError, JsonFileStore, Navigator, Resolution,
    ResultsPage, ResultsPresenter, Route, ScoringEngine, SilentObserver,
};

use common::{now, submission};

#[tokio::test(start_paused = true)]
async fn claim_flows_from_intake_to_dashboard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let records = ClaimRecords::new(Arc::new(JsonFileStore::open(&path)));
    let mut rng = StdRng::seed_from_u64(2024);

    let navigator = Navigator::new(records.clone());
    assert_eq!(
        navigator.resolve(Route::Assessment).expect("resolves"),
        Resolution::Redirect {
            from: Route::Assessment,
            to: Route::SubmitClaim,
        }
    );

    let claim = ClaimIntake::new(records.clone())
        .submit(submission(), now(), &mut rng)
        .expect("submission accepted");
    assert!(claim.claim_id.as_str().starts_with("CLM"));

    let simulator = AssessmentSimulator::new(
        records.clone(),
        Arc::new(ScoringEngine::default()),
        AssessmentConfig::with_speed(10.0),
    );
    let outcome = simulator
        .run(&mut rng, &mut SilentObserver)
        .await
        .expect("assessment runs");
    let score = match outcome {
        AssessmentOutcome::Scored { report } => report.score,
        other => panic!("expected a score, got {other:?}"),
    };
    // 75 - 15 (large amount) - 12 (young driver) - 8 (one prior claim)
    let engine = ScoringEngine::default();
    assert_eq!(score.base_score + engine.base_adjustment(&claim), 40.0);
    assert!((0.0..=100.0).contains(&score.score));

    // Reopening the file sees everything the first handle wrote.
    let reopened = ClaimRecords::new(Arc::new(JsonFileStore::open(&path)));
    assert_eq!(reopened.current_claim().expect("claim"), Some(claim.clone()));
    assert_eq!(
        reopened.prediction_score().expect("score"),
        Some(score.score)
    );

    let page = ResultsPresenter::new(reopened.clone())
        .present(now())
        .expect("results present");
    match page {
        ResultsPage::Ready { view } => {
            assert_eq!(view.claim.claim_id, claim.claim_id);
            assert_eq!(view.claim_amount, "$14,500");
        }
        other => panic!("expected results, got {other:?}"),
    }

    let summary = Dashboard::new(reopened.clone())
        .summary(now(), &mut rng)
        .expect("dashboard loads");
    assert_eq!(summary.total_claims, 1);
    assert_eq!(summary.recent_claims[0].claim_id, claim.claim_id.to_string());

    let export_path = dir.path().join("history.csv");
    let written =
        export_history_to_path(&reopened.history().expect("history"), &export_path)
            .expect("export succeeds");
    assert_eq!(written, 1);
    let csv = std::fs::read_to_string(&export_path).expect("csv readable");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("Claim ID,Policy Number,Vehicle,Incident Type,Claim Amount,Incident Date,Submission Date,Assessment Date,Prediction Score,Outcome")
    );
    let row = lines.next().expect("one data row");
    assert!(row.starts_with(&format!("{},POL555001,2012 Ford F-150,theft,14500,", claim.claim_id)));
    assert!(lines.next().is_none());
}

#[test]
fn new_submission_replaces_claim_and_clears_score() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = ClaimRecords::new(Arc::new(JsonFileStore::open(
        dir.path().join("records.json"),
    )));
    let mut rng = StdRng::seed_from_u64(7);
    let intake = ClaimIntake::new(records.clone());

    intake
        .submit(submission(), now(), &mut rng)
        .expect("first submission");
    records.set_prediction_score(81.0).expect("score stored");

    let mut second = submission();
    second.vehicle_make = "Tesla".to_string();
    second.vehicle_model = "Model 3".to_string();
    let replacement = intake.submit(second, now(), &mut rng).expect("second submission");

    assert_eq!(records.current_claim().expect("claim"), Some(replacement));
    assert!(records.prediction_score().expect("score").is_none());
    assert_eq!(
        Navigator::new(records)
            .resolve(Route::Results)
            .expect("resolves")
            .destination(),
        &Route::SubmitClaim
    );
}

#[test]
fn missing_incident_date_keeps_store_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("records.json");
    let records = ClaimRecords::new(Arc::new(JsonFileStore::open(&path)));

    let mut incomplete = submission();
    incomplete.incident_date = None;
    let err = ClaimIntake::new(records.clone())
        .submit(incomplete, now(), &mut StdRng::seed_from_u64(1))
        .expect_err("submission blocked");

    assert!(matches!(err, IntakeError::MissingIncidentDate));
    assert_eq!(err.to_string(), "Please select an incident date");
    assert!(records.current_claim().expect("claim").is_none());
    assert!(!path.exists());
}
