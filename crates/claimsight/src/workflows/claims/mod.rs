//! Claim intake, simulated assessment, scoring, and reporting.

pub mod assessment;
pub mod dashboard;
pub mod domain;
pub mod export;
pub mod intake;
pub mod navigation;
pub mod results;
pub mod scoring;
pub mod store;

#[cfg(test)]
mod tests;

pub use assessment::{
    AssessmentConfig, AssessmentObserver, AssessmentOutcome, AssessmentReport,
    AssessmentSimulator, AssessmentStep, SilentObserver, StepStatus,
};
pub use dashboard::{summarize, AmountBand, Dashboard, DashboardSummary};
pub use domain::{
    ApprovalBand, ClaimId, ClaimRecord, HistoryEntry, IncidentType, RiskLevel,
};
pub use export::{export_history_csv, export_history_to_path, ExportError};
pub use intake::{ClaimIntake, ClaimSubmission, FieldError, IntakeError};
pub use navigation::{Navigator, Resolution, Route};
pub use results::{ResultsPage, ResultsPresenter, ResultsView};
pub use scoring::{ScoreOutcome, ScoringConfig, ScoringEngine};
pub use store::{ClaimRecords, InMemoryStore, JsonFileStore, RecordStore, StoreError};
