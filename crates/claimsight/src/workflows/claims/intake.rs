use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{parse_whole, ClaimId, ClaimRecord, IncidentType};
use super::store::{ClaimRecords, RecordStore, StoreError};

pub const MISSING_INCIDENT_DATE_MESSAGE: &str = "Please select an incident date";

/// Raw values captured by the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimSubmission {
    pub policy_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: String,
    pub incident_type: Option<IncidentType>,
    pub damage_description: String,
    pub claim_amount: String,
    pub driver_age: String,
    pub driver_experience: String,
    pub previous_claims: String,
    pub location: String,
    pub incident_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{}", MISSING_INCIDENT_DATE_MESSAGE)]
    MissingIncidentDate,
    #[error("claim submission has {} invalid field(s): {}", .0.len(), describe(.0))]
    InvalidFields(Vec<FieldError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{} {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates submissions and stores accepted claims as the current claim.
pub struct ClaimIntake<S> {
    records: ClaimRecords<S>,
}

impl<S: RecordStore> ClaimIntake<S> {
    pub fn new(records: ClaimRecords<S>) -> Self {
        Self { records }
    }

    pub fn submit<R: Rng + ?Sized>(
        &self,
        submission: ClaimSubmission,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ClaimRecord, IntakeError> {
        let (incident_type, incident_date) = match validate(&submission) {
            Ok(validated) => validated,
            Err(err) => {
                warn!(error = %err, "claim submission rejected");
                return Err(err);
            }
        };

        let record = ClaimRecord {
            claim_id: ClaimId::generate(rng),
            policy_number: submission.policy_number.trim().to_string(),
            vehicle_make: submission.vehicle_make.trim().to_string(),
            vehicle_model: submission.vehicle_model.trim().to_string(),
            vehicle_year: submission.vehicle_year.trim().to_string(),
            incident_type,
            damage_description: submission.damage_description.trim().to_string(),
            claim_amount: submission.claim_amount.trim().to_string(),
            driver_age: submission.driver_age.trim().to_string(),
            driver_experience: submission.driver_experience.trim().to_string(),
            previous_claims: submission.previous_claims.trim().to_string(),
            location: submission.location.trim().to_string(),
            incident_date,
            submission_date: now,
        };

        self.records.set_current_claim(&record)?;
        info!(
            claim_id = %record.claim_id,
            incident_type = %record.incident_type,
            "claim submitted"
        );
        Ok(record)
    }
}

/// Field checks mirror the form constraints; the incident date is checked
/// once every other field is acceptable.
pub fn validate(
    submission: &ClaimSubmission,
) -> Result<(IncidentType, DateTime<Utc>), IntakeError> {
    let mut errors = Vec::new();

    let required = [
        ("policyNumber", &submission.policy_number),
        ("vehicleMake", &submission.vehicle_make),
        ("vehicleModel", &submission.vehicle_model),
        ("location", &submission.location),
        ("damageDescription", &submission.damage_description),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "is required"));
        }
    }

    check_whole_in_range(
        &mut errors,
        "vehicleYear",
        &submission.vehicle_year,
        1900,
        Some(2030),
    );
    check_whole_in_range(
        &mut errors,
        "driverAge",
        &submission.driver_age,
        16,
        Some(100),
    );
    check_whole_in_range(
        &mut errors,
        "driverExperience",
        &submission.driver_experience,
        0,
        Some(80),
    );
    check_whole_in_range(
        &mut errors,
        "previousClaims",
        &submission.previous_claims,
        0,
        None,
    );

    let amount = submission.claim_amount.trim();
    if amount.is_empty() {
        errors.push(FieldError::new("claimAmount", "is required"));
    } else {
        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => {}
            _ => errors.push(FieldError::new(
                "claimAmount",
                "must be a non-negative number",
            )),
        }
    }

    let incident_type = match submission.incident_type {
        Some(kind) if errors.is_empty() => kind,
        kind => {
            if kind.is_none() {
                errors.push(FieldError::new("incidentType", "is required"));
            }
            return Err(IntakeError::InvalidFields(errors));
        }
    };

    let incident_date = submission
        .incident_date
        .ok_or(IntakeError::MissingIncidentDate)?;

    Ok((incident_type, incident_date))
}

fn check_whole_in_range(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    raw: &str,
    min: i64,
    max: Option<i64>,
) {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return;
    }

    match parse_whole(raw) {
        Some(value) if value < min => {
            errors.push(FieldError::new(field, format!("must be at least {min}")));
        }
        Some(value) => {
            if let Some(max) = max.filter(|max| value > *max) {
                errors.push(FieldError::new(field, format!("must be at most {max}")));
            }
        }
        None => errors.push(FieldError::new(field, "must be a whole number")),
    }
}
