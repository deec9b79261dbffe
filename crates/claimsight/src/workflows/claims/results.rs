use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;
use tracing::info;

use super::domain::{
    format_amount, format_long_date, ApprovalBand, ClaimRecord, HistoryEntry, IncidentType,
    RiskLevel,
};
use super::navigation::Route;
use super::store::{ClaimRecords, RecordStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub label: &'static str,
    pub level: RiskLevel,
    pub level_label: &'static str,
}

impl RiskFactor {
    fn new(label: &'static str, level: RiskLevel) -> Self {
        Self {
            label,
            level,
            level_label: level.label(),
        }
    }
}

/// Per-claim risk breakdown shown beside the score. Only the first three rows
/// depend on the claim.
pub fn risk_factors(claim: &ClaimRecord, current_year: i32) -> Vec<RiskFactor> {
    let amount_level = match claim.claim_amount_value() {
        Some(amount) if amount > 5000 => RiskLevel::High,
        _ => RiskLevel::Low,
    };

    let incident_level = match claim.incident_type {
        IncidentType::Theft | IncidentType::Fire => RiskLevel::High,
        _ => RiskLevel::Medium,
    };

    let vehicle_level = match claim.vehicle_year_value() {
        Some(year) if i64::from(current_year) - year > 10 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };

    vec![
        RiskFactor::new("Claim Amount", amount_level),
        RiskFactor::new("Incident Type", incident_level),
        RiskFactor::new("Vehicle Age", vehicle_level),
        RiskFactor::new("Policy History", RiskLevel::Low),
        RiskFactor::new("Documentation", RiskLevel::Medium),
        RiskFactor::new("Fraud Indicators", RiskLevel::Low),
    ]
}

/// Everything the results page displays for one assessed claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub claim: ClaimRecord,
    pub score: f64,
    pub rounded_score: u8,
    pub band: ApprovalBand,
    pub band_label: &'static str,
    pub message: &'static str,
    pub submitted_on: String,
    pub incident_on: String,
    pub claim_amount: String,
    pub next_steps: Vec<&'static str>,
    pub risk_factors: Vec<RiskFactor>,
    pub assessment_date: DateTime<Utc>,
}

impl ResultsView {
    pub fn build(claim: ClaimRecord, score: f64, assessment_date: DateTime<Utc>) -> Self {
        let band = ApprovalBand::from_score(score);
        let risk_factors = risk_factors(&claim, assessment_date.year());
        let claim_amount = claim
            .claim_amount_value()
            .map(format_amount)
            .unwrap_or_else(|| claim.claim_amount.clone());

        Self {
            submitted_on: format_long_date(&claim.submission_date),
            incident_on: format_long_date(&claim.incident_date),
            claim_amount,
            rounded_score: score.round().clamp(0.0, 100.0) as u8,
            band,
            band_label: band.label(),
            message: band.message(),
            next_steps: band.next_steps().to_vec(),
            risk_factors,
            score,
            assessment_date,
            claim,
        }
    }

    /// Printable plain-text report of the assessment.
    pub fn render_report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let claim = &self.claim;

        writeln!(f, "Claim Assessment Results")?;
        writeln!(
            f,
            "Claim ID: {} | Submitted on {}",
            claim.claim_id, self.submitted_on
        )?;
        writeln!(f, "Approval Likelihood: {}%", self.rounded_score)?;
        writeln!(f, "{}: {}", self.band_label, self.message)?;

        writeln!(f, "\nSummary")?;
        writeln!(f, "- Policy: {}", claim.policy_number)?;
        writeln!(f, "- Incident Date: {}", self.incident_on)?;
        writeln!(f, "- Claim Amount: {}", self.claim_amount)?;

        writeln!(f, "\nNext Steps")?;
        for step in &self.next_steps {
            writeln!(f, "- {step}")?;
        }

        writeln!(f, "\nClaim Details")?;
        writeln!(f, "- Vehicle: {}", claim.vehicle_label())?;
        writeln!(f, "- Incident Type: {}", claim.incident_type.label())?;
        writeln!(f, "- Location: {}", claim.location)?;
        writeln!(f, "- Damage: {}", claim.damage_description)?;

        writeln!(f, "\nRisk Factors")?;
        for factor in &self.risk_factors {
            writeln!(f, "- {}: {}", factor.label, factor.level_label)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum ResultsPage {
    Ready { view: Box<ResultsView> },
    Redirect { to: Route },
}

/// Loads the current claim and score; presenting them records the assessment
/// in the history.
pub struct ResultsPresenter<S> {
    records: ClaimRecords<S>,
}

impl<S: RecordStore> ResultsPresenter<S> {
    pub fn new(records: ClaimRecords<S>) -> Self {
        Self { records }
    }

    /// Every presentation appends a history entry; repeated views of the same
    /// claim are recorded again.
    pub fn present(&self, now: DateTime<Utc>) -> Result<ResultsPage, StoreError> {
        let (Some(claim), Some(score)) =
            (self.records.current_claim()?, self.records.prediction_score()?)
        else {
            info!("results requested without claim data, redirecting to intake");
            return Ok(ResultsPage::Redirect {
                to: Route::SubmitClaim,
            });
        };

        let history_len = self.records.append_history(HistoryEntry {
            claim: claim.clone(),
            prediction_score: score,
            assessment_date: now,
        })?;
        info!(
            claim_id = %claim.claim_id,
            score,
            history_len,
            "assessment recorded in claim history"
        );

        Ok(ResultsPage::Ready {
            view: Box::new(ResultsView::build(claim, score, now)),
        })
    }
}
