//! Plain text rendering of command results.

use vehicle_rating_core::imports::ImportReport;
use vehicle_rating_core::mileage::MileageBandIssue;
use vehicle_rating_core::rating::{RatingAnomaly, RatingResult};

pub fn format_rating(result: &RatingResult) -> String {
    let mut out = format!(
        "Region factor:    {}\nVehicle factor:   {}\nMileage factor:   {}\nComposite factor: {}\n",
        result.region_factor,
        result.vehicle_factor,
        result.mileage_factor,
        result.composite_factor
    );
    for anomaly in &result.anomalies {
        out.push_str(&format!("Warning: {}\n", format_anomaly(anomaly)));
    }
    out
}

fn format_anomaly(anomaly: &RatingAnomaly) -> String {
    match anomaly {
        RatingAnomaly::OverlappingMileageBand {
            annual_mileage,
            chosen_band_id,
            matching_band_ids,
        } => {
            let ids: Vec<String> = matching_band_ids.iter().map(|id| id.to_string()).collect();
            format!(
                "mileage {} falls into overlapping bands [{}]; used band {}",
                annual_mileage,
                ids.join(", "),
                chosen_band_id
            )
        }
    }
}

pub fn format_import_report(report: &ImportReport) -> String {
    let mut out = String::new();
    for outcome in &report.stages {
        match (&outcome.summary, &outcome.error) {
            (_, Some(error)) => {
                out.push_str(&format!("{}: failed ({})\n", outcome.stage, error));
            }
            (Some(summary), None) => out.push_str(&format!(
                "{}: {} inserted, {} relinked, {} skipped, {} failed\n",
                outcome.stage, summary.inserted, summary.relinked, summary.skipped, summary.failed
            )),
            (None, None) => out.push_str(&format!("{}: not run\n", outcome.stage)),
        }
    }
    out
}

pub fn format_band_issues(issues: &[MileageBandIssue]) -> String {
    if issues.is_empty() {
        return "Mileage bands cover every annual mileage exactly once.\n".to_string();
    }
    let mut out = format!("Found {} mileage band issue(s):\n", issues.len());
    for issue in issues {
        out.push_str(&format!("  - {}\n", issue));
    }
    out
}
