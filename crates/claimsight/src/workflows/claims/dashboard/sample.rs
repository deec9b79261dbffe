use super::super::domain::{ClaimId, ClaimRecord, HistoryEntry, IncidentType};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const SAMPLE_HISTORY_SIZE: usize = 12;

const SAMPLE_INCIDENTS: [IncidentType; 5] = [
    IncidentType::Collision,
    IncidentType::Theft,
    IncidentType::Vandalism,
    IncidentType::Weather,
    IncidentType::Fire,
];

const SAMPLE_VEHICLES: [(&str, &str); 5] = [
    ("Toyota", "Camry"),
    ("Honda", "Accord"),
    ("Ford", "F-150"),
    ("BMW", "X5"),
    ("Tesla", "Model 3"),
];

const SAMPLE_LOCATIONS: [&str; 4] = [
    "123 Main St, Springfield",
    "48 Harbor Rd, Portland",
    "9 Elm Ave, Madison",
    "301 Lake Dr, Austin",
];

/// Demonstration history: submissions within the last 90 days, incidents up
/// to 30 days before submission, assessment the day after.
pub fn generate_sample_history<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    count: usize,
    rng: &mut R,
) -> Vec<HistoryEntry> {
    (0..count)
        .map(|index| {
            let submission_date = now - Duration::days(rng.gen_range(0..90));
            let incident_date = submission_date - Duration::days(rng.gen_range(0..30));
            let assessment_date = submission_date + Duration::days(1);

            let incident_type = SAMPLE_INCIDENTS
                .choose(rng)
                .copied()
                .unwrap_or(IncidentType::Other);
            let (make, model) = SAMPLE_VEHICLES
                .choose(rng)
                .copied()
                .unwrap_or(("Toyota", "Camry"));
            let location = SAMPLE_LOCATIONS.choose(rng).copied().unwrap_or_default();

            let claim = ClaimRecord {
                claim_id: ClaimId(format!("{}{}", ClaimId::PREFIX, 100_000 + index)),
                policy_number: format!("POL{}", 200_000 + rng.gen_range(0..99_999)),
                vehicle_make: make.to_string(),
                vehicle_model: model.to_string(),
                vehicle_year: rng.gen_range(2008..=2024).to_string(),
                incident_type,
                damage_description: format!("{} damage reported", incident_type.label()),
                claim_amount: rng.gen_range(1_000..16_000).to_string(),
                driver_age: rng.gen_range(18..=75).to_string(),
                driver_experience: rng.gen_range(0..=40).to_string(),
                previous_claims: rng.gen_range(0..=3).to_string(),
                location: location.to_string(),
                incident_date,
                submission_date,
            };

            HistoryEntry {
                claim,
                prediction_score: f64::from(rng.gen_range(0u8..100)),
                assessment_date,
            }
        })
        .collect()
}
