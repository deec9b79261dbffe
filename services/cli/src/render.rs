//! Text renderings of the workflow pages.

use std::io::{self, Write};

use claimsight::workflows::claims::dashboard::views::ClaimRowView;
use claimsight::workflows::claims::{DashboardSummary, FieldError, IncidentType, Route};

pub(crate) fn home(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", Route::Home.title())?;
    writeln!(
        out,
        "Submit a claim and get an instant approval-likelihood estimate."
    )?;
    writeln!(out, "\nPages")?;
    for route in [Route::SubmitClaim, Route::Assessment, Route::Results, Route::Dashboard] {
        writeln!(out, "- {:<14} {}", route.path(), route.title())?;
    }
    writeln!(out, "\nStart with `claimsight submit --help`.")
}

/// Intake form reference, with the rejected fields listed first when present.
pub(crate) fn submit_form(out: &mut impl Write, errors: &[FieldError]) -> io::Result<()> {
    writeln!(out, "{}", Route::SubmitClaim.title())?;
    if !errors.is_empty() {
        writeln!(out, "\nPlease correct the following:")?;
        for error in errors {
            writeln!(out, "- {} {}", error.field, error.message)?;
        }
    }

    writeln!(out, "\nFields")?;
    let fields = [
        ("--policy-number", "Policy number"),
        ("--vehicle-make", "Vehicle make"),
        ("--vehicle-model", "Vehicle model"),
        ("--vehicle-year", "Vehicle year (1900-2030)"),
        ("--incident-type", "Incident type"),
        ("--incident-date", "Incident date (YYYY-MM-DD)"),
        ("--location", "Incident location"),
        ("--damage-description", "Description of damage"),
        ("--claim-amount", "Estimated claim amount in dollars"),
        ("--driver-age", "Driver age (16-100)"),
        ("--driver-experience", "Years of driving experience (0-80)"),
        ("--previous-claims", "Number of previous claims"),
    ];
    for (flag, label) in fields {
        writeln!(out, "  {flag:<22} {label}")?;
    }

    writeln!(out, "\nIncident types")?;
    for kind in IncidentType::ordered() {
        writeln!(out, "  {:<10} {}", kind.as_str(), kind.form_label())?;
    }
    Ok(())
}

pub(crate) fn not_found(out: &mut impl Write, path: &str) -> io::Result<()> {
    writeln!(out, "404 {}", Route::NotFound(path.to_string()).title())?;
    writeln!(out, "Oops! No page lives at '{path}'.")?;
    writeln!(out, "Return to {} to start over.", Route::Home.path())
}

pub(crate) fn redirect(out: &mut impl Write, from: &Route, to: &Route) -> io::Result<()> {
    writeln!(
        out,
        "No claim data for {from}; redirecting to {to} ({}).",
        to.title()
    )?;
    writeln!(out, "Submit a claim first with `claimsight submit`.")
}

pub(crate) fn dashboard(out: &mut impl Write, summary: &DashboardSummary) -> io::Result<()> {
    writeln!(out, "{}", Route::Dashboard.title())?;
    writeln!(out, "- Total claims: {}", summary.total_claims)?;
    writeln!(out, "- Approval rate: {}%", summary.approval_rate)?;
    writeln!(
        out,
        "- Total claim amount: {}",
        summary.total_claim_amount_label
    )?;

    writeln!(out, "\nApproval distribution")?;
    for entry in &summary.bands {
        writeln!(
            out,
            "- {:<9} {:>3} ({:>3}%)",
            entry.chart_label, entry.count, entry.percent
        )?;
    }

    writeln!(out, "\nRisk analysis")?;
    for entry in &summary.bands {
        writeln!(
            out,
            "- {:<12} {:>3} claims ({}%)",
            entry.risk_label, entry.count, entry.percent
        )?;
    }

    writeln!(out, "\nClaims by incident type")?;
    if summary.incident_types.is_empty() {
        writeln!(out, "- none")?;
    }
    for entry in &summary.incident_types {
        writeln!(out, "- {:<10} {:>3}", entry.label, entry.count)?;
    }

    writeln!(out, "\nClaim amounts")?;
    for entry in &summary.amount_bands {
        writeln!(
            out,
            "- {:<17} {:>3} ({:>3}%)",
            entry.label, entry.count, entry.percent
        )?;
    }

    writeln!(out, "\nRecent claims")?;
    claim_rows(out, &summary.recent_claims)?;

    writeln!(out, "\nClaim history")?;
    claim_rows(out, &summary.history)
}

fn claim_rows(out: &mut impl Write, rows: &[ClaimRowView]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "- none");
    }
    for row in rows {
        writeln!(
            out,
            "- {} | {} | {} | {} | submitted {} | {}% {}",
            row.claim_id,
            row.vehicle,
            row.incident_type,
            row.claim_amount,
            row.submitted_on,
            row.score,
            row.band_label
        )?;
    }
    Ok(())
}
