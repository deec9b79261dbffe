use super::super::domain::{
    format_amount, format_short_date, ApprovalBand, HistoryEntry, IncidentType,
};
use super::views::{
    AmountBandEntry, BandCountEntry, ClaimRowView, DashboardSummary, IncidentTypeEntry,
};
use super::AmountBand;
use std::cmp::Reverse;
use std::collections::HashMap;

pub(crate) const RECENT_CLAIM_LIMIT: usize = 5;

/// Share of `count` in `total` as a rounded whole percentage; zero when empty.
pub(crate) fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

pub fn summarize(history: &[HistoryEntry]) -> DashboardSummary {
    let total_claims = history.len();

    let mut band_counts: HashMap<ApprovalBand, usize> = HashMap::new();
    let mut incident_counts: HashMap<IncidentType, usize> = HashMap::new();
    let mut amount_counts: HashMap<AmountBand, usize> = HashMap::new();
    let mut total_claim_amount: i64 = 0;

    for entry in history {
        *band_counts.entry(entry.band()).or_default() += 1;
        *incident_counts.entry(entry.claim.incident_type).or_default() += 1;

        let amount = entry.claim.claim_amount_value().unwrap_or(0);
        total_claim_amount = total_claim_amount.saturating_add(amount);
        *amount_counts.entry(AmountBand::for_amount(amount)).or_default() += 1;
    }

    let bands: Vec<BandCountEntry> = ApprovalBand::ordered()
        .into_iter()
        .map(|band| {
            let count = band_counts.get(&band).copied().unwrap_or(0);
            BandCountEntry {
                band,
                label: band.label(),
                chart_label: band.chart_label(),
                risk_label: band.risk_level().label(),
                count,
                percent: percent_of(count, total_claims),
            }
        })
        .collect();

    let incident_types = IncidentType::ordered()
        .into_iter()
        .filter_map(|incident_type| {
            incident_counts
                .get(&incident_type)
                .map(|&count| IncidentTypeEntry {
                    incident_type,
                    label: incident_type.label(),
                    count,
                })
        })
        .collect();

    let amount_bands = AmountBand::ordered()
        .into_iter()
        .map(|band| {
            let count = amount_counts.get(&band).copied().unwrap_or(0);
            AmountBandEntry {
                band,
                label: band.label(),
                count,
                percent: percent_of(count, total_claims),
            }
        })
        .collect();

    let approved = band_counts
        .get(&ApprovalBand::LikelyApproved)
        .copied()
        .unwrap_or(0);

    let mut recent: Vec<&HistoryEntry> = history.iter().collect();
    recent.sort_by_key(|entry| Reverse(entry.claim.submission_date));
    let recent_claims = recent
        .into_iter()
        .take(RECENT_CLAIM_LIMIT)
        .map(row_view)
        .collect();

    DashboardSummary {
        total_claims,
        total_claim_amount,
        total_claim_amount_label: format_amount(total_claim_amount),
        approval_rate: percent_of(approved, total_claims),
        bands,
        incident_types,
        amount_bands,
        recent_claims,
        history: history.iter().map(row_view).collect(),
    }
}

fn row_view(entry: &HistoryEntry) -> ClaimRowView {
    let claim = &entry.claim;
    ClaimRowView {
        claim_id: claim.claim_id.to_string(),
        policy_number: claim.policy_number.clone(),
        vehicle: format!("{} {}", claim.vehicle_make, claim.vehicle_model),
        incident_type: claim.incident_type.label(),
        claim_amount: claim
            .claim_amount_value()
            .map(format_amount)
            .unwrap_or_else(|| claim.claim_amount.clone()),
        submitted_on: format_short_date(&claim.submission_date),
        assessed_on: format_short_date(&entry.assessment_date),
        score: entry.prediction_score.round().clamp(0.0, 100.0) as u8,
        band_label: entry.band().label(),
    }
}
