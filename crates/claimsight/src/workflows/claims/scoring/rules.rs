use super::super::domain::ClaimRecord;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn amount_adjustment(amount: i64, config: &ScoringConfig) -> f64 {
    if amount > config.large_claim_threshold {
        -config.large_claim_penalty
    } else if amount > config.moderate_claim_threshold {
        -config.moderate_claim_penalty
    } else if amount <= config.small_claim_ceiling {
        config.small_claim_bonus
    } else {
        0.0
    }
}

pub(crate) fn age_adjustment(age: i64, config: &ScoringConfig) -> f64 {
    if age < config.young_driver_age {
        -config.young_driver_penalty
    } else if age > config.senior_driver_age {
        config.senior_driver_bonus
    } else {
        0.0
    }
}

/// Deterministic adjustments; fields that do not parse contribute nothing.
pub(crate) fn score_components(claim: &ClaimRecord, config: &ScoringConfig) -> Vec<ScoreComponent> {
    let mut components = Vec::new();

    match claim.claim_amount_value() {
        Some(amount) => {
            let points = amount_adjustment(amount, config);
            let notes = if amount > config.large_claim_threshold {
                format!("claim amount {amount} above {}", config.large_claim_threshold)
            } else if amount > config.moderate_claim_threshold {
                format!(
                    "claim amount {amount} above {}",
                    config.moderate_claim_threshold
                )
            } else if amount <= config.small_claim_ceiling {
                format!(
                    "claim amount {amount} at or below {}",
                    config.small_claim_ceiling
                )
            } else {
                format!("claim amount {amount} within standard range")
            };
            components.push(ScoreComponent {
                factor: ScoreFactor::ClaimAmount,
                points,
                notes,
            });
        }
        None => components.push(ScoreComponent {
            factor: ScoreFactor::ClaimAmount,
            points: 0.0,
            notes: "claim amount not numeric".to_string(),
        }),
    }

    match claim.driver_age_value() {
        Some(age) => {
            let points = age_adjustment(age, config);
            let notes = if age < config.young_driver_age {
                format!("driver age {age} under {}", config.young_driver_age)
            } else if age > config.senior_driver_age {
                format!("driver age {age} over {}", config.senior_driver_age)
            } else {
                format!("driver age {age} within standard band")
            };
            components.push(ScoreComponent {
                factor: ScoreFactor::DriverAge,
                points,
                notes,
            });
        }
        None => components.push(ScoreComponent {
            factor: ScoreFactor::DriverAge,
            points: 0.0,
            notes: "driver age not numeric".to_string(),
        }),
    }

    let previous = claim.previous_claims_value().unwrap_or(0);
    components.push(ScoreComponent {
        factor: ScoreFactor::PreviousClaims,
        points: -(previous as f64) * config.previous_claim_penalty,
        notes: format!("{previous} previous claim(s)"),
    });

    components
}
