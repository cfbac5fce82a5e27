//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "reeler";

/// Default loudness threshold in decibels for audio-mode detection.
pub const DEFAULT_THRESHOLD_DB: f64 = 85.0;

/// Default luminance threshold (0-255) for video-mode detection.
pub const DEFAULT_BRIGHTNESS: u8 = 125;

/// Default number of seconds captured before a highlight.
///
/// Doubles as the suppression radius: a qualifying moment closer than this
/// to an already-captured one is treated as an echo of the same event.
pub const DEFAULT_COOLDOWN_BEFORE: u64 = 20;

/// Default number of seconds captured after a highlight.
pub const DEFAULT_COOLDOWN_AFTER: u64 = 20;

/// Default number of sub-chunks an audio window is split into.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// Default cap on accepted highlights (0 = unbounded).
pub const DEFAULT_MAX_HIGHLIGHTS: usize = 0;

/// Default destination directory for extracted clips.
pub const DEFAULT_OUTPUT_DIR: &str = "highlights";

/// File name of the structured results dump.
pub const RESULTS_FILE_NAME: &str = "highlights.json";

/// Extension of extracted clip files.
pub const CLIP_EXTENSION: &str = "mp4";

/// Intermediate audio track parameters.
pub mod track {
    /// Sample rate of the intermediate PCM track in Hz.
    pub const SAMPLE_RATE: u32 = 44_100;

    /// Channel count of the intermediate PCM track.
    pub const CHANNELS: u16 = 2;

    /// File name of the intermediate track inside the run's working directory.
    pub const FILE_NAME: &str = "audio.wav";
}

/// Video frame sampling parameters.
pub mod frame {
    /// Width of the downsampled analysis raster in pixels.
    pub const SAMPLE_WIDTH: u32 = 48;

    /// Height of the downsampled analysis raster in pixels.
    pub const SAMPLE_HEIGHT: u32 = 27;

    /// Bytes per rgb24 pixel.
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Size of one downsampled frame in bytes.
    pub const FRAME_BYTES: usize =
        SAMPLE_WIDTH as usize * SAMPLE_HEIGHT as usize * BYTES_PER_PIXEL;
}

/// Clip extraction scheduling parameters.
pub mod scheduler {
    /// Default number of concurrent extraction jobs.
    pub const DEFAULT_WORKERS: usize = 4;

    /// Default per-job timeout in seconds.
    pub const DEFAULT_JOB_TIMEOUT_SECS: u64 = 120;
}

/// Luminance channel weights (ITU-R BT.601).
pub mod luminance {
    /// Red channel weight.
    pub const RED: f64 = 0.299;

    /// Green channel weight.
    pub const GREEN: f64 = 0.587;

    /// Blue channel weight.
    pub const BLUE: f64 = 0.114;
}
