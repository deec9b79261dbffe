use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use claimsight::config::StorageConfig;
use claimsight::workflows::claims::{
    AssessmentObserver, AssessmentStep, ClaimRecords, IncidentType, JsonFileStore, ScoreOutcome,
};

pub(crate) fn open_records(storage: &StorageConfig) -> ClaimRecords<JsonFileStore> {
    ClaimRecords::new(Arc::new(JsonFileStore::open(&storage.path)))
}

/// Incident dates are entered as calendar days and stored at midnight UTC.
pub(crate) fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

pub(crate) fn parse_incident_type(raw: &str) -> Result<IncidentType, String> {
    raw.parse::<IncidentType>().map_err(|err| err.to_string())
}

/// Prints stage transitions as the simulated assessment advances. Write
/// failures are ignored; the assessment itself must not depend on them.
pub(crate) struct ConsoleObserver<W> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AssessmentObserver for ConsoleObserver<W> {
    fn step_started(&mut self, index: usize, step: &AssessmentStep) {
        let _ = writeln!(
            self.out,
            "  [{}] {}: {}...",
            index + 1,
            step.name,
            step.description
        );
    }

    fn step_finished(&mut self, _index: usize, step: &AssessmentStep, progress: f64) {
        let _ = writeln!(
            self.out,
            "      {} ({progress:.0}% complete)",
            step.status.label()
        );
    }

    fn scored(&mut self, outcome: &ScoreOutcome) {
        let _ = writeln!(
            self.out,
            "  Assessment complete: {:.0}% approval likelihood ({})",
            outcome.score,
            outcome.band.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendar_dates_at_midnight_utc() {
        let parsed = parse_date(" 2025-03-04 ").expect("valid date");
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0)
                .single()
                .expect("valid timestamp")
        );
        assert!(parse_date("03/04/2025").is_err());
    }

    #[test]
    fn incident_type_errors_name_the_choices() {
        assert_eq!(parse_incident_type("Fire"), Ok(IncidentType::Fire));
        let err = parse_incident_type("meteor").expect_err("unknown type");
        assert!(err.contains("collision"));
    }
}
