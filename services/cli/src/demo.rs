use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use clap::Args;
use claimsight::config::parse_speed;
use claimsight::error::AppError;
use claimsight::workflows::claims::{
    AssessmentConfig, ClaimRecords, ClaimSubmission, InMemoryStore, IncidentType,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands;
use crate::infra::ConsoleObserver;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Multiplier applied to the simulated stage delays.
    #[arg(long, default_value_t = 10.0, value_parser = parse_speed)]
    pub(crate) speed: f64,
    /// Seed for reproducible claim ids, stage statuses, and scores.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

/// Walks a sample claim through every page against an in-memory store, so the
/// configured record file is left untouched.
pub(crate) async fn run_demo(args: DemoArgs, now: DateTime<Utc>) -> Result<(), AppError> {
    let DemoArgs { speed, seed } = args;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let records = ClaimRecords::new(Arc::new(InMemoryStore::new()));
    let mut out = io::stdout();

    writeln!(out, "ClaimSight workflow demo")?;
    writeln!(out, "\n== Claim intake")?;
    commands::submit(&records, demo_submission(now), now, &mut rng, &mut out)?;

    writeln!(out, "\n== Assessment")?;
    let mut observer = ConsoleObserver::new(io::stdout());
    commands::assess(
        &records,
        AssessmentConfig::with_speed(speed),
        &mut rng,
        &mut observer,
        &mut out,
    )
    .await?;

    writeln!(out, "\n== Results")?;
    commands::results(&records, now, false, &mut out)?;

    writeln!(out, "\n== Dashboard")?;
    commands::dashboard(&records, now, &mut rng, false, &mut out)?;
    Ok(())
}

fn demo_submission(now: DateTime<Utc>) -> ClaimSubmission {
    ClaimSubmission {
        policy_number: "POL482913".to_string(),
        vehicle_make: "Toyota".to_string(),
        vehicle_model: "Camry".to_string(),
        vehicle_year: "2016".to_string(),
        incident_type: Some(IncidentType::Collision),
        damage_description: "Rear-ended at a stop light; bumper and trunk lid damaged"
            .to_string(),
        claim_amount: "4200".to_string(),
        driver_age: "34".to_string(),
        driver_experience: "12".to_string(),
        previous_claims: "1".to_string(),
        location: "123 Main St, Springfield".to_string(),
        incident_date: Some(now - Duration::days(3)),
    }
}
