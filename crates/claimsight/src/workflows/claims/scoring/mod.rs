mod config;
mod rules;

pub use config::ScoringConfig;

use super::domain::{ApprovalBand, ClaimId, ClaimRecord};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Stateless heuristic mapping a claim to an approval likelihood in [0, 100].
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Adjustment the claim amount alone contributes to the base score.
    pub fn amount_adjustment(&self, amount: i64) -> f64 {
        rules::amount_adjustment(amount, &self.config)
    }

    /// Adjustment the driver age alone contributes to the base score.
    pub fn age_adjustment(&self, age: i64) -> f64 {
        rules::age_adjustment(age, &self.config)
    }

    /// Sum of the deterministic adjustments, before randomness and clamping.
    pub fn base_adjustment(&self, claim: &ClaimRecord) -> f64 {
        rules::score_components(claim, &self.config)
            .iter()
            .map(|component| component.points)
            .sum()
    }

    pub fn score<R: Rng + ?Sized>(&self, claim: &ClaimRecord, rng: &mut R) -> ScoreOutcome {
        let spread = self.config.perturbation.abs();
        let perturbation = if spread > 0.0 {
            rng.gen_range(-spread..=spread)
        } else {
            0.0
        };
        self.score_with_perturbation(claim, perturbation)
    }

    /// Scores with a caller-chosen perturbation instead of a random one.
    pub fn score_with_perturbation(&self, claim: &ClaimRecord, perturbation: f64) -> ScoreOutcome {
        let components = rules::score_components(claim, &self.config);
        let adjustment: f64 = components.iter().map(|component| component.points).sum();
        let raw_score = self.config.base_score + adjustment + perturbation;
        let score = clamp_score(raw_score);

        debug!(
            claim_id = %claim.claim_id,
            adjustment,
            perturbation,
            score,
            "claim scored"
        );

        ScoreOutcome {
            claim_id: claim.claim_id.clone(),
            base_score: self.config.base_score,
            components,
            perturbation,
            raw_score,
            score,
            band: ApprovalBand::from_score(score),
        }
    }
}

/// Clamps into [0, 100]; NaN collapses to the floor.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    ClaimAmount,
    DriverAge,
    PreviousClaims,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClaimAmount => "Claim Amount",
            Self::DriverAge => "Driver Age",
            Self::PreviousClaims => "Previous Claims",
        }
    }
}

/// Discrete contribution to a score, kept for audit output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub claim_id: ClaimId,
    pub base_score: f64,
    pub components: Vec<ScoreComponent>,
    pub perturbation: f64,
    pub raw_score: f64,
    pub score: f64,
    pub band: ApprovalBand,
}
