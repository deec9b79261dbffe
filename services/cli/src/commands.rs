//! Command handlers. Each one works against any record store and writes its
//! page to the given output.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use claimsight::error::AppError;
use claimsight::workflows::claims::{
    export_history_to_path, AssessmentConfig, AssessmentObserver, AssessmentOutcome,
    AssessmentSimulator, ClaimIntake, ClaimRecord, ClaimRecords, ClaimSubmission, Dashboard,
    IntakeError, Navigator, RecordStore, Resolution, ResultsPage, ResultsPresenter, Route,
    ScoringEngine,
};
use rand::Rng;
use tracing::info;

use crate::render;

/// Validates and stores a submission. Rejections re-render the form with the
/// offending fields before the error propagates.
pub(crate) fn submit<S, R>(
    records: &ClaimRecords<S>,
    submission: ClaimSubmission,
    now: DateTime<Utc>,
    rng: &mut R,
    out: &mut impl Write,
) -> Result<ClaimRecord, AppError>
where
    S: RecordStore,
    R: Rng + ?Sized,
{
    match ClaimIntake::new(records.clone()).submit(submission, now, rng) {
        Ok(claim) => {
            writeln!(out, "Claim {} submitted.", claim.claim_id)?;
            writeln!(
                out,
                "Next: {} ({}), run `claimsight assess`.",
                Route::Assessment,
                Route::Assessment.title()
            )?;
            Ok(claim)
        }
        Err(IntakeError::InvalidFields(errors)) => {
            render::submit_form(out, &errors)?;
            Err(IntakeError::InvalidFields(errors).into())
        }
        Err(IntakeError::MissingIncidentDate) => {
            writeln!(out, "{}", IntakeError::MissingIncidentDate)?;
            Err(IntakeError::MissingIncidentDate.into())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn assess<S, R, O>(
    records: &ClaimRecords<S>,
    config: AssessmentConfig,
    rng: &mut R,
    observer: &mut O,
    out: &mut impl Write,
) -> Result<AssessmentOutcome, AppError>
where
    S: RecordStore,
    R: Rng + ?Sized,
    O: AssessmentObserver + ?Sized,
{
    writeln!(out, "{}", Route::Assessment.title())?;
    let simulator =
        AssessmentSimulator::new(records.clone(), Arc::new(ScoringEngine::default()), config);
    let outcome = simulator.run(rng, observer).await?;

    match &outcome {
        AssessmentOutcome::Scored { report } => {
            let flagged = report.flagged_steps().count();
            if flagged > 0 {
                writeln!(
                    out,
                    "{flagged} stage(s) were flagged for specialist review."
                )?;
            }
            let next = outcome.next_route();
            writeln!(
                out,
                "Next: {next} ({}), run `claimsight results`.",
                next.title()
            )?;
        }
        AssessmentOutcome::Redirected { to } => render::redirect(out, &Route::Assessment, to)?,
    }
    Ok(outcome)
}

pub(crate) fn results<S: RecordStore>(
    records: &ClaimRecords<S>,
    now: DateTime<Utc>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let page = ResultsPresenter::new(records.clone()).present(now)?;
    match page {
        ResultsPage::Ready { view } if json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
        ResultsPage::Ready { view } => out.write_all(view.render_report().as_bytes())?,
        ResultsPage::Redirect { to } => render::redirect(out, &Route::Results, &to)?,
    }
    Ok(())
}

pub(crate) fn dashboard<S, R>(
    records: &ClaimRecords<S>,
    now: DateTime<Utc>,
    rng: &mut R,
    json: bool,
    out: &mut impl Write,
) -> Result<(), AppError>
where
    S: RecordStore,
    R: Rng + ?Sized,
{
    let summary = Dashboard::new(records.clone()).summary(now, rng)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        render::dashboard(out, &summary)?;
    }
    Ok(())
}

pub(crate) fn export<S: RecordStore>(
    records: &ClaimRecords<S>,
    path: &Path,
    out: &mut impl Write,
) -> Result<usize, AppError> {
    let history = records.history()?;
    let written = export_history_to_path(&history, path)?;
    info!(path = %path.display(), written, "claim history exported");
    writeln!(out, "Exported {written} claim(s) to {}", path.display())?;
    Ok(written)
}

/// Opens a page by path, applying the navigation guards first.
pub(crate) async fn open<S, R, O>(
    records: &ClaimRecords<S>,
    raw_path: &str,
    config: AssessmentConfig,
    now: DateTime<Utc>,
    rng: &mut R,
    observer: &mut O,
    out: &mut impl Write,
) -> Result<(), AppError>
where
    S: RecordStore,
    R: Rng + ?Sized,
    O: AssessmentObserver + ?Sized,
{
    let route = match Navigator::new(records.clone()).resolve(Route::parse(raw_path))? {
        Resolution::Render { route } => route,
        Resolution::Redirect { from, to } => {
            render::redirect(out, &from, &to)?;
            to
        }
    };

    match route {
        Route::Home => render::home(out)?,
        Route::SubmitClaim => render::submit_form(out, &[])?,
        Route::Assessment => {
            assess(records, config, rng, observer, out).await?;
        }
        Route::Results => results(records, now, false, out)?,
        Route::Dashboard => dashboard(records, now, rng, false, out)?,
        Route::NotFound(path) => render::not_found(out, &path)?,
    }
    Ok(())
}

pub(crate) fn reset<S: RecordStore>(
    records: &ClaimRecords<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    records.clear()?;
    info!("claim records cleared");
    writeln!(out, "Current claim, score, and history cleared.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use claimsight::workflows::claims::{IncidentType, InMemoryStore, SilentObserver};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 24, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn records() -> ClaimRecords<InMemoryStore> {
        ClaimRecords::new(Arc::new(InMemoryStore::new()))
    }

    fn submission() -> ClaimSubmission {
        ClaimSubmission {
            policy_number: "POL123".to_string(),
            vehicle_make: "BMW".to_string(),
            vehicle_model: "X5".to_string(),
            vehicle_year: "2021".to_string(),
            incident_type: Some(IncidentType::Vandalism),
            damage_description: "Keyed along the driver side".to_string(),
            claim_amount: "800".to_string(),
            driver_age: "45".to_string(),
            driver_experience: "20".to_string(),
            previous_claims: "0".to_string(),
            location: "301 Lake Dr, Austin".to_string(),
            incident_date: Some(now() - Duration::days(1)),
        }
    }

    fn text(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf8 output")
    }

    #[test]
    fn rejected_submission_shows_form_errors() {
        let records = records();
        let mut invalid = submission();
        invalid.driver_age = "12".to_string();
        let mut out = Vec::new();

        let err = submit(
            &records,
            invalid,
            now(),
            &mut StdRng::seed_from_u64(1),
            &mut out,
        )
        .expect_err("rejected");

        assert!(matches!(err, AppError::Intake(IntakeError::InvalidFields(_))));
        assert!(text(out).contains("- driverAge must be at least 16"));
        assert!(records.current_claim().expect("claim").is_none());
    }

    #[test]
    fn results_without_claim_print_redirect() {
        let mut out = Vec::new();

        results(&records(), now(), false, &mut out).expect("renders");

        assert!(text(out).contains("redirecting to /submit-claim"));
    }

    #[tokio::test(start_paused = true)]
    async fn open_walks_the_full_workflow() {
        let records = records();
        let mut rng = StdRng::seed_from_u64(3);
        submit(&records, submission(), now(), &mut rng, &mut Vec::new()).expect("submitted");

        let mut out = Vec::new();
        open(
            &records,
            "/assessment",
            AssessmentConfig::default(),
            now(),
            &mut rng,
            &mut SilentObserver,
            &mut out,
        )
        .await
        .expect("assessment opens");
        assert!(text(out).contains("Next: /results (Assessment Results)"));
        assert!(records.prediction_score().expect("score").is_some());

        let mut out = Vec::new();
        open(
            &records,
            "/results",
            AssessmentConfig::default(),
            now(),
            &mut rng,
            &mut SilentObserver,
            &mut out,
        )
        .await
        .expect("results open");
        let report = text(out);
        assert!(report.contains("Claim Assessment Results"));
        assert!(report.contains("- Vehicle: 2021 BMW X5"));
        assert_eq!(records.history().expect("history").len(), 1);
    }

    #[test]
    fn export_writes_history_file() {
        let records = records();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.csv");

        let written = export(&records, &path, &mut Vec::new()).expect("exported");

        assert_eq!(written, 0);
        assert!(path.exists());
    }

    #[test]
    fn reset_clears_every_key() {
        let records = records();
        submit(
            &records,
            submission(),
            now(),
            &mut StdRng::seed_from_u64(5),
            &mut Vec::new(),
        )
        .expect("submitted");
        records.set_prediction_score(50.0).expect("score");

        reset(&records, &mut Vec::new()).expect("reset");

        assert!(!records.has_current_claim().expect("has"));
        assert!(!records.has_prediction_score().expect("has"));
        assert!(records.history_if_present().expect("history").is_none());
    }
}
