use serde::{Deserialize, Serialize};

/// Weights of the approval-likelihood heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: f64,
    pub large_claim_threshold: i64,
    pub large_claim_penalty: f64,
    pub moderate_claim_threshold: i64,
    pub moderate_claim_penalty: f64,
    pub small_claim_ceiling: i64,
    pub small_claim_bonus: f64,
    pub young_driver_age: i64,
    pub young_driver_penalty: f64,
    pub senior_driver_age: i64,
    pub senior_driver_bonus: f64,
    pub previous_claim_penalty: f64,
    pub perturbation: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 75.0,
            large_claim_threshold: 10_000,
            large_claim_penalty: 15.0,
            moderate_claim_threshold: 5_000,
            moderate_claim_penalty: 8.0,
            small_claim_ceiling: 1_000,
            small_claim_bonus: 10.0,
            young_driver_age: 25,
            young_driver_penalty: 12.0,
            senior_driver_age: 60,
            senior_driver_bonus: 5.0,
            previous_claim_penalty: 8.0,
            perturbation: 10.0,
        }
    }
}
