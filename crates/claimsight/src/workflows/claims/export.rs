use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::domain::{format_short_date, HistoryEntry};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("export destination unavailable: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Claim ID")]
    claim_id: &'a str,
    #[serde(rename = "Policy Number")]
    policy_number: &'a str,
    #[serde(rename = "Vehicle")]
    vehicle: String,
    #[serde(rename = "Incident Type")]
    incident_type: &'static str,
    #[serde(rename = "Claim Amount")]
    claim_amount: &'a str,
    #[serde(rename = "Incident Date")]
    incident_date: String,
    #[serde(rename = "Submission Date")]
    submission_date: String,
    #[serde(rename = "Assessment Date")]
    assessment_date: String,
    #[serde(rename = "Prediction Score")]
    prediction_score: String,
    #[serde(rename = "Outcome")]
    outcome: &'static str,
}

impl<'a> From<&'a HistoryEntry> for HistoryRow<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        let claim = &entry.claim;
        Self {
            claim_id: claim.claim_id.as_str(),
            policy_number: &claim.policy_number,
            vehicle: claim.vehicle_label(),
            incident_type: claim.incident_type.as_str(),
            claim_amount: &claim.claim_amount,
            incident_date: format_short_date(&claim.incident_date),
            submission_date: format_short_date(&claim.submission_date),
            assessment_date: format_short_date(&entry.assessment_date),
            prediction_score: format!("{:.1}", entry.prediction_score),
            outcome: entry.band().label(),
        }
    }
}

/// Writes one CSV row per history entry, with a header row. Returns the
/// number of entries written.
pub fn export_history_csv<W: Write>(
    history: &[HistoryEntry],
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in history {
        csv_writer.serialize(HistoryRow::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(history.len())
}

pub fn export_history_to_path(
    history: &[HistoryEntry],
    path: impl AsRef<Path>,
) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    export_history_csv(history, file)
}
