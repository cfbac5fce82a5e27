//! Configuration type definitions.

use crate::constants::{
    DEFAULT_BRIGHTNESS, DEFAULT_COOLDOWN_AFTER, DEFAULT_COOLDOWN_BEFORE, DEFAULT_MAX_HIGHLIGHTS,
    DEFAULT_OUTPUT_DIR, DEFAULT_RESOLUTION, DEFAULT_THRESHOLD_DB, scheduler,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default analysis settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Clip extraction settings.
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Default analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
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
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD_DB,
            brightness: DEFAULT_BRIGHTNESS,
            cooldown_before: DEFAULT_COOLDOWN_BEFORE,
            cooldown_after: DEFAULT_COOLDOWN_AFTER,
            resolution: DEFAULT_RESOLUTION,
            max_highlights: DEFAULT_MAX_HIGHLIGHTS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Clip extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of concurrent extraction jobs.
    pub workers: usize,

    /// Per-job timeout in seconds.
    pub job_timeout_secs: u64,

    /// Write a highlights.json dump into the output directory.
    pub dump_results: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            workers: scheduler::DEFAULT_WORKERS,
            job_timeout_secs: scheduler::DEFAULT_JOB_TIMEOUT_SECS,
            dump_results: false,
        }
    }
}

/// Which stream the detector listens to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Detect on audio loudness.
    #[default]
    Audio,
    /// Detect on video brightness.
    Video,
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audio => write!(f, "audio"),
            Self::Video => write!(f, "video"),
        }
    }
}
