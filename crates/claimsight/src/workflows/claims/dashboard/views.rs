use super::super::domain::{ApprovalBand, IncidentType};
use super::AmountBand;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCountEntry {
    pub band: ApprovalBand,
    pub label: &'static str,
    pub chart_label: &'static str,
    pub risk_label: &'static str,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentTypeEntry {
    pub incident_type: IncidentType,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountBandEntry {
    pub band: AmountBand,
    pub label: &'static str,
    pub count: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRowView {
    pub claim_id: String,
    pub policy_number: String,
    pub vehicle: String,
    pub incident_type: &'static str,
    pub claim_amount: String,
    pub submitted_on: String,
    pub assessed_on: String,
    pub score: u8,
    pub band_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_claims: usize,
    pub total_claim_amount: i64,
    pub total_claim_amount_label: String,
    pub approval_rate: u32,
    pub bands: Vec<BandCountEntry>,
    pub incident_types: Vec<IncidentTypeEntry>,
    pub amount_bands: Vec<AmountBandEntry>,
    pub recent_claims: Vec<ClaimRowView>,
    pub history: Vec<ClaimRowView>,
}

impl DashboardSummary {
    pub fn band(&self, band: ApprovalBand) -> Option<&BandCountEntry> {
        self.bands.iter().find(|entry| entry.band == band)
    }
}
