use super::common::*;
use crate::workflows::claims::domain::{IncidentType, RiskLevel};
use crate::workflows::claims::navigation::Route;
use crate::workflows::claims::results::{risk_factors, ResultsPage, ResultsPresenter, ResultsView};

#[test]
fn results_without_stored_claim_redirect_to_intake() {
    let (_, records) = records();
    let presenter = ResultsPresenter::new(records.clone());

    let page = presenter.present(now()).expect("presents");

    assert_eq!(
        page,
        ResultsPage::Redirect {
            to: Route::SubmitClaim
        }
    );
    assert!(records.history().expect("history").is_empty());
}

#[test]
fn results_without_score_redirect_to_intake() {
    let (_, records) = records();
    records
        .set_current_claim(&claim("3200", "35", "0"))
        .expect("stored");
    let presenter = ResultsPresenter::new(records);

    let page = presenter.present(now()).expect("presents");

    assert!(matches!(page, ResultsPage::Redirect { .. }));
}

#[test]
fn presenting_results_appends_history_every_time() {
    let (_, records) = records();
    let claim = claim("12000", "30", "1");
    records.set_current_claim(&claim).expect("stored");
    records.set_prediction_score(72.4).expect("score stored");
    let presenter = ResultsPresenter::new(records.clone());

    let first = presenter.present(now()).expect("presents");
    presenter.present(now()).expect("presents again");

    let view = match first {
        ResultsPage::Ready { view } => view,
        other => panic!("expected results, got {other:?}"),
    };
    assert_eq!(view.rounded_score, 72);
    assert_eq!(view.band_label, "Likely Approved");
    assert_eq!(view.claim_amount, "$12,000");

    let history = records.history().expect("history");
    assert_eq!(history.len(), 2);
    assert!(history
        .iter()
        .all(|entry| entry.claim == claim && entry.prediction_score == 72.4));
    assert_eq!(history[0].assessment_date, now());
}

#[test]
fn risk_factors_reflect_claim_attributes() {
    let mut claim = claim("7500", "35", "0");
    claim.incident_type = IncidentType::Theft;
    claim.vehicle_year = "2010".to_string();

    let factors = risk_factors(&claim, 2025);
    let levels: Vec<(&str, RiskLevel)> = factors
        .iter()
        .map(|factor| (factor.label, factor.level))
        .collect();

    assert_eq!(
        levels,
        vec![
            ("Claim Amount", RiskLevel::High),
            ("Incident Type", RiskLevel::High),
            ("Vehicle Age", RiskLevel::Medium),
            ("Policy History", RiskLevel::Low),
            ("Documentation", RiskLevel::Medium),
            ("Fraud Indicators", RiskLevel::Low),
        ]
    );

    let mut mild = claim.clone();
    mild.claim_amount = "5000".to_string();
    mild.incident_type = IncidentType::Weather;
    mild.vehicle_year = "2015".to_string();
    let factors = risk_factors(&mild, 2025);
    assert_eq!(factors[0].level, RiskLevel::Low);
    assert_eq!(factors[1].level, RiskLevel::Medium);
    assert_eq!(factors[2].level, RiskLevel::Low);
}

#[test]
fn report_lists_summary_steps_and_factors() {
    let view = ResultsView::build(claim("900", "35", "0"), 31.6, now());

    let report = view.render_report();

    assert!(report.contains("Claim ID: CLM654321"));
    assert!(report.contains("Approval Likelihood: 32%"));
    assert!(report.contains("Likely Denied"));
    assert!(report.contains("A senior claims specialist will contact you within 24 hours."));
    assert!(report.contains("- Vehicle: 2018 Honda Accord"));
    assert!(report.contains("- Fraud Indicators: Low Risk"));
}

#[test]
fn report_text_matches_display_output() {
    let view = ResultsView::build(claim("4800", "28", "2"), 55.0, now());

    let report = view.render_report();

    assert_eq!(report, format!("{view}"));
    assert!(report.starts_with("Claim Assessment Results\nClaim ID: CLM654321 | Submitted on September 23, 2025\n"));
    assert!(report.contains("\nNext Steps\n- Additional documentation is required for review.\n"));
    assert!(report.ends_with("- Fraud Indicators: Low Risk\n"));
}
