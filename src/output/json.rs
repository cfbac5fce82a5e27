//! Structured results dump.

use crate::clipper::{JobOutcome, format_timestamp};
use crate::config::AnalysisSettings;
use crate::constants::RESULTS_FILE_NAME;
use crate::detector::DetectionRecord;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Results file structure.
#[derive(Debug, Serialize)]
pub struct ResultsFile {
    /// Source media file name.
    pub source_file: String,
    /// Analysis timestamp.
    pub analysis_date: DateTime<Utc>,
    /// Settings the run used.
    pub settings: ResultsSettings,
    /// Accepted highlights, in stream order.
    pub highlights: Vec<HighlightEntry>,
    /// Summary statistics.
    pub summary: ResultsSummary,
}

/// Analysis settings echoed into the dump for replay.
#[derive(Debug, Serialize)]
pub struct ResultsSettings {
    /// Analysis mode.
    pub mode: String,
    /// Intensity threshold the detector compared against.
    pub threshold: f64,
    /// Seconds captured before each highlight.
    pub cooldown_before: u64,
    /// Seconds captured after each highlight.
    pub cooldown_after: u64,
    /// Sub-chunks per second of audio.
    pub resolution: usize,
    /// Cap on accepted highlights (0 = unbounded).
    pub max_highlights: usize,
}

/// One accepted highlight.
#[derive(Debug, Serialize)]
pub struct HighlightEntry {
    /// Unit index (seconds since stream start).
    pub unit_index: u64,
    /// Elapsed time at the highlight.
    pub time: String,
    /// Elapsed time with the qualifying sub-chunk appended.
    pub time_with_sub: String,
    /// Metric value that crossed the threshold.
    pub metric_value: f64,
}

/// Summary statistics.
#[derive(Debug, Serialize)]
pub struct ResultsSummary {
    /// Number of accepted highlights.
    pub total_highlights: usize,
    /// Number of units the scan covered.
    pub units_scanned: u64,
    /// Whether the scan ended early (read failure or interrupt).
    pub partial: bool,
    /// Unit indices whose clip extraction failed.
    pub failed_clips: Vec<u64>,
}

/// Write the results dump into the output directory.
pub fn write_results(
    output_dir: &Path,
    source: &Path,
    settings: &AnalysisSettings,
    records: &BTreeMap<u64, DetectionRecord>,
    outcomes: &[JobOutcome],
    units_scanned: u64,
    partial: bool,
) -> Result<PathBuf> {
    let highlights = records
        .values()
        .map(|record| HighlightEntry {
            unit_index: record.unit_index,
            time: format_timestamp(record.unit_index),
            time_with_sub: format!(
                "{}.{}",
                format_timestamp(record.unit_index),
                record.sub_index
            ),
            metric_value: record.metric_value,
        })
        .collect();

    let failed_clips = outcomes
        .iter()
        .filter(|outcome| !outcome.succeeded())
        .map(|outcome| outcome.unit_index)
        .collect();

    let results = ResultsFile {
        source_file: source
            .file_name()
            .map_or_else(|| source.display().to_string(), |n| n.to_string_lossy().to_string()),
        analysis_date: Utc::now(),
        settings: ResultsSettings {
            mode: settings.mode.to_string(),
            threshold: settings.metric_threshold(),
            cooldown_before: settings.cooldown_before,
            cooldown_after: settings.cooldown_after,
            resolution: settings.resolution,
            max_highlights: settings.max_highlights,
        },
        highlights,
        summary: ResultsSummary {
            total_highlights: records.len(),
            units_scanned,
            partial,
            failed_clips,
        },
    };

    let path = output_dir.join(RESULTS_FILE_NAME);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &results).map_err(|e| {
        Error::ResultsWrite {
            path: path.clone(),
            source: e,
        }
    })?;

    Ok(path)
}
