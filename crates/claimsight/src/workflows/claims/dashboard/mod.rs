//! Aggregate views over the claim history.

mod sample;
mod summary;
pub mod views;

pub use sample::{generate_sample_history, SAMPLE_HISTORY_SIZE};
pub use summary::summarize;
pub use views::DashboardSummary;

use super::domain::HistoryEntry;
use super::store::{ClaimRecords, RecordStore, StoreError};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;

/// Claim-amount ranges of the distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBand {
    UpTo2000,
    UpTo5000,
    UpTo10000,
    Above10000,
}

impl AmountBand {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::UpTo2000,
            Self::UpTo5000,
            Self::UpTo10000,
            Self::Above10000,
        ]
    }

    pub const fn for_amount(amount: i64) -> Self {
        if amount <= 2_000 {
            Self::UpTo2000
        } else if amount <= 5_000 {
            Self::UpTo5000
        } else if amount <= 10_000 {
            Self::UpTo10000
        } else {
            Self::Above10000
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo2000 => "$0 - $2,000",
            Self::UpTo5000 => "$2,001 - $5,000",
            Self::UpTo10000 => "$5,001 - $10,000",
            Self::Above10000 => "$10,001+",
        }
    }
}

/// Loads the history for the dashboard, seeding demonstration data the first
/// time the history key is absent.
pub struct Dashboard<S> {
    records: ClaimRecords<S>,
}

impl<S: RecordStore> Dashboard<S> {
    pub fn new(records: ClaimRecords<S>) -> Self {
        Self { records }
    }

    pub fn load<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        if let Some(history) = self.records.history_if_present()? {
            return Ok(history);
        }

        let sample = generate_sample_history(now, SAMPLE_HISTORY_SIZE, rng);
        self.records.replace_history(&sample)?;
        info!(entries = sample.len(), "seeded claim history with sample data");
        Ok(sample)
    }

    pub fn summary<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DashboardSummary, StoreError> {
        let history = self.load(now, rng)?;
        Ok(summarize(&history))
    }
}
