//! Resolved per-run analysis settings.

use crate::cli::AnalyzeArgs;
use crate::config::{AnalysisMode, Config};
use std::path::PathBuf;

/// Fully-resolved settings for one analysis run.
///
/// Built once from CLI arguments layered over the config file and built-in
/// defaults; immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Which stream the detector listens to.
    pub mode: AnalysisMode,

    /// Loudness threshold in dB (audio mode).
    pub threshold: f64,

    /// Luminance threshold 0-255 (video mode).
    pub brightness: u8,

    /// Seconds captured before a highlight; also the suppression radius.
    pub cooldown_before: u64,

    /// Seconds captured after a highlight.
    pub cooldown_after: u64,

    /// Sub-chunks per second of audio.
    pub resolution: usize,

    /// Cap on accepted highlights (0 = unbounded).
    pub max_highlights: usize,

    /// Destination directory for extracted clips.
    pub output_dir: PathBuf,

    /// Number of concurrent extraction jobs.
    pub workers: usize,

    /// Per-job timeout in seconds.
    pub job_timeout_secs: u64,

    /// Write a highlights.json dump into the output directory.
    pub dump_results: bool,
}

impl AnalysisSettings {
    /// Resolve settings from CLI arguments, config file values, and defaults.
    pub fn resolve(args: &AnalyzeArgs, config: &Config) -> Self {
        let mode = if args.video {
            AnalysisMode::Video
        } else {
            AnalysisMode::Audio
        };

        Self {
            mode,
            threshold: args.threshold.unwrap_or(config.defaults.threshold),
            brightness: args.brightness.unwrap_or(config.defaults.brightness),
            cooldown_before: args.before.unwrap_or(config.defaults.cooldown_before),
            cooldown_after: args.after.unwrap_or(config.defaults.cooldown_after),
            resolution: args.resolution.unwrap_or(config.defaults.resolution),
            max_highlights: args.max_highlights.unwrap_or(config.defaults.max_highlights),
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.defaults.output_dir.clone()),
            workers: args.workers.unwrap_or(config.extraction.workers),
            job_timeout_secs: args.job_timeout.unwrap_or(config.extraction.job_timeout_secs),
            dump_results: args.dump_results || config.extraction.dump_results,
        }
    }

    /// The intensity threshold the detector compares readings against.
    pub fn metric_threshold(&self) -> f64 {
        match self.mode {
            AnalysisMode::Audio => self.threshold,
            AnalysisMode::Video => f64::from(self.brightness),
        }
    }
}
