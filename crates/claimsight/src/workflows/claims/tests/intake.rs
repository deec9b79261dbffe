use super::common::*;
use crate::workflows::claims::intake::{
    validate, ClaimIntake, IntakeError, MISSING_INCIDENT_DATE_MESSAGE,
};
use crate::workflows::claims::store::RecordStore;
use crate::workflows::claims::store::{CURRENT_CLAIM_KEY, PREDICTION_SCORE_KEY};

#[test]
fn submission_without_incident_date_is_blocked_with_message() {
    let (store, records) = records();
    let intake = ClaimIntake::new(records);
    let mut submission = submission();
    submission.incident_date = None;

    let err = intake
        .submit(submission, now(), &mut rng(1))
        .expect_err("missing date rejected");

    assert!(matches!(err, IntakeError::MissingIncidentDate));
    assert_eq!(err.to_string(), MISSING_INCIDENT_DATE_MESSAGE);
    assert!(!store.has(CURRENT_CLAIM_KEY).expect("has"));
}

#[test]
fn accepted_submission_becomes_current_claim() {
    let (store, records) = records();
    store
        .set(PREDICTION_SCORE_KEY, "88".to_string())
        .expect("seed stale score");
    let intake = ClaimIntake::new(records.clone());

    let record = intake
        .submit(submission(), now(), &mut rng(2))
        .expect("submission accepted");

    assert!(record.claim_id.as_str().starts_with("CLM"));
    assert_eq!(record.claim_id.as_str().len(), 9);
    assert_eq!(record.submission_date, now());
    assert_eq!(records.current_claim().expect("load"), Some(record));
    assert!(
        !store.has(PREDICTION_SCORE_KEY).expect("has"),
        "stale score cleared for the new claim"
    );
}

#[test]
fn submission_trims_text_fields() {
    let (_, records) = records();
    let intake = ClaimIntake::new(records);
    let mut submission = submission();
    submission.vehicle_make = "  Subaru ".to_string();
    submission.claim_amount = " 4100 ".to_string();

    let record = intake
        .submit(submission, now(), &mut rng(3))
        .expect("submission accepted");

    assert_eq!(record.vehicle_make, "Subaru");
    assert_eq!(record.claim_amount_value(), Some(4100));
}

#[test]
fn every_invalid_field_is_reported() {
    let mut submission = submission();
    submission.policy_number = "   ".to_string();
    submission.vehicle_year = "1800".to_string();
    submission.driver_age = "15".to_string();
    submission.driver_experience = "ninety".to_string();
    submission.claim_amount = "-5".to_string();
    submission.incident_type = None;

    match validate(&submission) {
        Err(IntakeError::InvalidFields(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|error| error.field).collect();
            for expected in [
                "policyNumber",
                "vehicleYear",
                "driverAge",
                "driverExperience",
                "claimAmount",
                "incidentType",
            ] {
                assert!(fields.contains(&expected), "missing error for {expected}");
            }
        }
        other => panic!("expected field errors, got {other:?}"),
    }
}

#[test]
fn upper_bounds_are_enforced() {
    let mut submission = submission();
    submission.vehicle_year = "2031".to_string();
    submission.driver_age = "101".to_string();

    match validate(&submission) {
        Err(IntakeError::InvalidFields(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors
                .iter()
                .all(|error| error.message.starts_with("must be at most")));
        }
        other => panic!("expected field errors, got {other:?}"),
    }
}
