use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::workflows::claims::domain::{ClaimId, ClaimRecord, HistoryEntry, IncidentType};
use crate::workflows::claims::intake::ClaimSubmission;
use crate::workflows::claims::store::{ClaimRecords, InMemoryStore};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 14, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) fn records() -> (Arc<InMemoryStore>, ClaimRecords<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let records = ClaimRecords::new(Arc::clone(&store));
    (store, records)
}

pub(super) fn submission() -> ClaimSubmission {
    ClaimSubmission {
        policy_number: "POL123456789".to_string(),
        vehicle_make: "Toyota".to_string(),
        vehicle_model: "Camry".to_string(),
        vehicle_year: "2019".to_string(),
        incident_type: Some(IncidentType::Collision),
        damage_description: "Rear bumper crushed at a stop light".to_string(),
        claim_amount: "3200".to_string(),
        driver_age: "35".to_string(),
        driver_experience: "15".to_string(),
        previous_claims: "0".to_string(),
        location: "123 Main St, Springfield".to_string(),
        incident_date: Some(now() - Duration::days(3)),
    }
}

pub(super) fn claim(amount: &str, age: &str, previous: &str) -> ClaimRecord {
    ClaimRecord {
        claim_id: ClaimId("CLM654321".to_string()),
        policy_number: "POL987654".to_string(),
        vehicle_make: "Honda".to_string(),
        vehicle_model: "Accord".to_string(),
        vehicle_year: "2018".to_string(),
        incident_type: IncidentType::Collision,
        damage_description: "Front quarter panel dented".to_string(),
        claim_amount: amount.to_string(),
        driver_age: age.to_string(),
        driver_experience: "10".to_string(),
        previous_claims: previous.to_string(),
        location: "9 Elm Ave, Madison".to_string(),
        incident_date: now() - Duration::days(5),
        submission_date: now() - Duration::days(1),
    }
}

pub(super) fn history_entry(
    id: &str,
    amount: &str,
    incident_type: IncidentType,
    score: f64,
    days_ago: i64,
) -> HistoryEntry {
    let mut claim = claim(amount, "40", "0");
    claim.claim_id = ClaimId(id.to_string());
    claim.incident_type = incident_type;
    claim.submission_date = now() - Duration::days(days_ago);
    HistoryEntry {
        claim,
        prediction_score: score,
        assessment_date: now() - Duration::days(days_ago) + Duration::days(1),
    }
}
