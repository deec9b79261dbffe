//! Simulated multi-stage assessment that precedes the score reveal.
//!
//! Each stage is marked processing, waits out its simulated duration, then
//! lands on complete (or, one time in ten, error). The terminal status is
//! cosmetic: it never changes the score or stops the sequence.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use super::navigation::Route;
use super::scoring::{ScoreOutcome, ScoringEngine};
use super::store::{ClaimRecords, RecordStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Processing,
    Complete,
    Error,
}

impl StepStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Complete => "Complete",
            Self::Error => "Reviewing",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub duration_ms: u64,
}

pub const STANDARD_STAGES: [StageDefinition; 5] = [
    StageDefinition {
        name: "Data Validation",
        description: "Verifying the submitted information",
        duration_ms: 2500,
    },
    StageDefinition {
        name: "Risk Assessment",
        description: "Calculating risk factors based on claim data",
        duration_ms: 3000,
    },
    StageDefinition {
        name: "Fraud Detection",
        description: "Running AI analysis for potential fraud indicators",
        duration_ms: 3500,
    },
    StageDefinition {
        name: "Coverage Verification",
        description: "Checking policy terms and coverage limits",
        duration_ms: 2000,
    },
    StageDefinition {
        name: "Final Assessment",
        description: "Generating approval prediction and recommendations",
        duration_ms: 2500,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentStep {
    pub name: &'static str,
    pub description: &'static str,
    pub simulated_duration_ms: u64,
    pub status: StepStatus,
}

impl From<&StageDefinition> for AssessmentStep {
    fn from(stage: &StageDefinition) -> Self {
        Self {
            name: stage.name,
            description: stage.description,
            simulated_duration_ms: stage.duration_ms,
            status: StepStatus::Pending,
        }
    }
}

pub fn standard_steps() -> Vec<AssessmentStep> {
    STANDARD_STAGES.iter().map(AssessmentStep::from).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentConfig {
    /// Divides every simulated delay; 2.0 runs twice as fast.
    pub speed: f64,
    pub error_probability: f64,
    pub settle_delay_ms: u64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            error_probability: 0.1,
            settle_delay_ms: 1000,
        }
    }
}

impl AssessmentConfig {
    pub fn with_speed(speed: f64) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Simulated delay at the configured speed. A speed that is not a positive
    /// number, or that would stretch the delay past what `Duration` holds,
    /// leaves the delay unscaled.
    pub fn scaled(&self, duration_ms: u64) -> Duration {
        let unscaled = Duration::from_millis(duration_ms);
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return unscaled;
        }
        Duration::try_from_secs_f64(unscaled.as_secs_f64() / self.speed).unwrap_or(unscaled)
    }

    fn error_probability(&self) -> f64 {
        if self.error_probability.is_nan() {
            0.0
        } else {
            self.error_probability.clamp(0.0, 1.0)
        }
    }
}

/// Receives progress as the simulation advances.
pub trait AssessmentObserver {
    fn step_started(&mut self, _index: usize, _step: &AssessmentStep) {}
    fn step_finished(&mut self, _index: usize, _step: &AssessmentStep, _progress: f64) {}
    fn scored(&mut self, _outcome: &ScoreOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl AssessmentObserver for SilentObserver {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub steps: Vec<AssessmentStep>,
    pub progress: f64,
    pub score: ScoreOutcome,
}

impl AssessmentReport {
    pub fn flagged_steps(&self) -> impl Iterator<Item = &AssessmentStep> {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Scored { report: AssessmentReport },
    Redirected { to: Route },
}

impl AssessmentOutcome {
    /// Route the workflow moves to once the run settles.
    pub fn next_route(&self) -> Route {
        match self {
            AssessmentOutcome::Scored { .. } => Route::Results,
            AssessmentOutcome::Redirected { to } => to.clone(),
        }
    }
}

pub struct AssessmentSimulator<S> {
    records: ClaimRecords<S>,
    engine: Arc<ScoringEngine>,
    config: AssessmentConfig,
}

impl<S: RecordStore> AssessmentSimulator<S> {
    pub fn new(records: ClaimRecords<S>, engine: Arc<ScoringEngine>, config: AssessmentConfig) -> Self {
        Self {
            records,
            engine,
            config,
        }
    }

    /// Runs every stage in order, then scores the current claim and stores the
    /// result. Without a current claim the run redirects to intake at once.
    pub async fn run<R, O>(&self, rng: &mut R, observer: &mut O) -> Result<AssessmentOutcome, StoreError>
    where
        R: Rng + ?Sized,
        O: AssessmentObserver + ?Sized,
    {
        if !self.records.has_current_claim()? {
            info!("no current claim, redirecting to intake");
            return Ok(AssessmentOutcome::Redirected {
                to: Route::SubmitClaim,
            });
        }

        let mut steps = standard_steps();
        let total = steps.len();
        let mut progress = 0.0;
        let error_probability = self.config.error_probability();

        for index in 0..total {
            steps[index].status = StepStatus::Processing;
            info!(stage = steps[index].name, "assessment stage started");
            observer.step_started(index, &steps[index]);

            tokio::time::sleep(self.config.scaled(steps[index].simulated_duration_ms)).await;

            let status = if rng.gen_bool(error_probability) {
                StepStatus::Error
            } else {
                StepStatus::Complete
            };
            steps[index].status = status;
            progress = ((index + 1) * 100) as f64 / total as f64;

            info!(
                stage = steps[index].name,
                status = status.label(),
                progress,
                "assessment stage finished"
            );
            observer.step_finished(index, &steps[index], progress);
        }

        tokio::time::sleep(self.config.scaled(self.config.settle_delay_ms)).await;

        let Some(claim) = self.records.current_claim()? else {
            warn!("current claim disappeared during assessment, redirecting to intake");
            return Ok(AssessmentOutcome::Redirected {
                to: Route::SubmitClaim,
            });
        };

        let outcome = self.engine.score(&claim, rng);
        self.records.set_prediction_score(outcome.score)?;
        info!(
            claim_id = %claim.claim_id,
            score = outcome.score,
            band = outcome.band.label(),
            "prediction score stored"
        );
        observer.scored(&outcome);

        Ok(AssessmentOutcome::Scored {
            report: AssessmentReport {
                steps,
                progress,
                score: outcome,
            },
        })
    }
}
