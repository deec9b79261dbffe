use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Synthetic claim identifier: a fixed prefix plus a random six-digit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(pub String);

impl ClaimId {
    pub const PREFIX: &'static str = "CLM";

    /// Draws a new identifier. Collisions are possible and not checked.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suffix: u32 = rng.gen_range(100_000..=999_999);
        Self(format!("{}{suffix}", Self::PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Collision,
    Theft,
    Vandalism,
    Weather,
    Fire,
    Other,
}

impl IncidentType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Collision,
            Self::Theft,
            Self::Vandalism,
            Self::Weather,
            Self::Fire,
            Self::Other,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collision => "collision",
            Self::Theft => "theft",
            Self::Vandalism => "vandalism",
            Self::Weather => "weather",
            Self::Fire => "fire",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Collision => "Collision",
            Self::Theft => "Theft",
            Self::Vandalism => "Vandalism",
            Self::Weather => "Weather",
            Self::Fire => "Fire",
            Self::Other => "Other",
        }
    }

    /// Wording used on the intake form.
    pub const fn form_label(self) -> &'static str {
        match self {
            Self::Weather => "Weather Damage",
            Self::Fire => "Fire Damage",
            other => other.label(),
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown incident type '{0}' (expected collision, theft, vandalism, weather, fire, or other)")]
pub struct UnknownIncidentType(pub String);

impl FromStr for IncidentType {
    type Err = UnknownIncidentType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownIncidentType(value.to_string()))
    }
}

/// Claim as captured at submission. Numeric attributes keep the form's string
/// representation; accessors below interpret them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub claim_id: ClaimId,
    pub policy_number: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: String,
    pub incident_type: IncidentType,
    pub damage_description: String,
    pub claim_amount: String,
    pub driver_age: String,
    pub driver_experience: String,
    pub previous_claims: String,
    pub location: String,
    pub incident_date: DateTime<Utc>,
    pub submission_date: DateTime<Utc>,
}

impl ClaimRecord {
    pub fn claim_amount_value(&self) -> Option<i64> {
        parse_whole(&self.claim_amount)
    }

    pub fn driver_age_value(&self) -> Option<i64> {
        parse_whole(&self.driver_age)
    }

    pub fn previous_claims_value(&self) -> Option<i64> {
        parse_whole(&self.previous_claims)
    }

    pub fn vehicle_year_value(&self) -> Option<i64> {
        parse_whole(&self.vehicle_year)
    }

    pub fn vehicle_label(&self) -> String {
        format!(
            "{} {} {}",
            self.vehicle_year.trim(),
            self.vehicle_make.trim(),
            self.vehicle_model.trim()
        )
    }
}

/// Completed assessment appended to the claim history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub claim: ClaimRecord,
    pub prediction_score: f64,
    pub assessment_date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn band(&self) -> ApprovalBand {
        ApprovalBand::from_score(self.prediction_score)
    }
}

/// Approval likelihood bucket derived from a prediction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalBand {
    LikelyApproved,
    ManualReview,
    LikelyDenied,
}

impl ApprovalBand {
    pub const APPROVED_FLOOR: f64 = 70.0;
    pub const REVIEW_FLOOR: f64 = 40.0;

    pub const fn ordered() -> [Self; 3] {
        [Self::LikelyApproved, Self::ManualReview, Self::LikelyDenied]
    }

    pub fn from_score(score: f64) -> Self {
        if score >= Self::APPROVED_FLOOR {
            Self::LikelyApproved
        } else if score >= Self::REVIEW_FLOOR {
            Self::ManualReview
        } else {
            Self::LikelyDenied
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LikelyApproved => "Likely Approved",
            Self::ManualReview => "Manual Review",
            Self::LikelyDenied => "Likely Denied",
        }
    }

    /// Short name used on the distribution chart.
    pub const fn chart_label(self) -> &'static str {
        match self {
            Self::LikelyApproved => "Approved",
            Self::ManualReview => "Review",
            Self::LikelyDenied => "Denied",
        }
    }

    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::LikelyApproved => RiskLevel::Low,
            Self::ManualReview => RiskLevel::Medium,
            Self::LikelyDenied => RiskLevel::High,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::LikelyApproved => "Your claim is likely to be approved based on our assessment.",
            Self::ManualReview => "Your claim requires additional review by our specialists.",
            Self::LikelyDenied => "Your claim may be denied based on our initial assessment.",
        }
    }

    pub const fn next_steps(self) -> [&'static str; 3] {
        match self {
            Self::LikelyApproved => [
                "Your claim is being processed. Expect approval within 3-5 business days.",
                "An adjuster may contact you for additional verification.",
                "Payment will be issued after final approval.",
            ],
            Self::ManualReview => [
                "Additional documentation is required for review.",
                "A claims specialist will contact you within 2 business days.",
                "Please have vehicle repair estimates ready for review.",
            ],
            Self::LikelyDenied => [
                "Your claim requires comprehensive review due to risk factors.",
                "A senior claims specialist will contact you within 24 hours.",
                "Please prepare all incident documentation for detailed review.",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

/// Reads a whole number the way the intake form's numeric inputs are read:
/// integers as-is, decimals truncated toward zero.
pub(crate) fn parse_whole(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    })
}

/// `$12,345` style rendering of a whole-dollar amount.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Long date form used on the results page, e.g. `March 4, 2025`.
pub fn format_long_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

/// Short date form used on the dashboard tables, e.g. `Mar 4, 2025`.
pub fn format_short_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}
