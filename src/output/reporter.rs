//! End-of-run summary reporting.

use crate::pipeline::RunReport;
use std::path::Path;
use tracing::{info, warn};

/// Log the run summary and surface per-clip failures.
pub fn report_run(report: &RunReport, output_dir: &Path, elapsed_secs: f64) {
    info!(
        "complete: {} highlights in {} scanned seconds ({elapsed_secs:.2}s elapsed)",
        report.records.len(),
        report.units_scanned
    );

    if report.partial {
        warn!("the scan ended early; results are partial");
    }

    let failed: Vec<&crate::clipper::JobOutcome> = report
        .outcomes
        .iter()
        .filter(|outcome| !outcome.succeeded())
        .collect();

    for outcome in &failed {
        let reason = outcome.error.as_deref().unwrap_or("unknown");
        warn!("clip for unit {} was not written: {reason}", outcome.unit_index);
    }

    let written = report.outcomes.len() - failed.len();
    if written > 0 {
        info!(
            "success! {written} clip(s) should be found in {}",
            output_dir.display()
        );
    } else if report.records.is_empty() {
        info!("no moments crossed the threshold; nothing was extracted");
    }
}
