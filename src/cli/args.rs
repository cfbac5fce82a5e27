//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Highlight detection and clip extraction for long recordings.
#[derive(Debug, Parser)]
#[command(name = "reeler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source media file to analyze.
    pub input: Option<PathBuf>,

    /// Common options for analysis.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Scan a recording and suggest a starting loudness threshold.
    Reference {
        /// Source media file to scan.
        input: PathBuf,

        /// Sub-chunks per second of audio.
        #[arg(short = 'a', long, value_parser = parse_resolution)]
        resolution: Option<usize>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalyzeArgs {
    /// Loudness threshold in dB required to highlight a moment.
    #[arg(short = 't', long, value_parser = parse_threshold, env = "REELER_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Detect with video brightness instead of audio loudness.
    #[arg(long)]
    pub video: bool,

    /// Luminance threshold (0-255) required to highlight a moment (video mode).
    #[arg(long, env = "REELER_BRIGHTNESS")]
    pub brightness: Option<u8>,

    /// Seconds captured before a highlight; also the suppression radius.
    #[arg(long, env = "REELER_BEFORE")]
    pub before: Option<u64>,

    /// Seconds captured after a highlight.
    #[arg(long, env = "REELER_AFTER")]
    pub after: Option<u64>,

    /// Sub-chunks per second of audio (higher = finer sub-second timing).
    #[arg(short = 'a', long, value_parser = parse_resolution, env = "REELER_RESOLUTION")]
    pub resolution: Option<usize>,

    /// Stop after this many highlights (0 = unbounded).
    #[arg(short = 'm', long, env = "REELER_MAX_HIGHLIGHTS")]
    pub max_highlights: Option<usize>,

    /// Destination directory for extracted clips.
    #[arg(short = 'o', long, env = "REELER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of concurrent extraction jobs.
    #[arg(long, value_parser = parse_workers, env = "REELER_WORKERS")]
    pub workers: Option<usize>,

    /// Per-clip extraction timeout in seconds.
    #[arg(long, env = "REELER_JOB_TIMEOUT")]
    pub job_timeout: Option<u64>,

    /// Write a highlights.json dump of the results into the output directory.
    #[arg(long)]
    pub dump_results: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Parse and validate a loudness threshold.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("threshold must be finite, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a resolution value.
fn parse_resolution(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;

    if value == 0 {
        return Err("resolution must be at least 1".to_string());
    }

    Ok(value)
}

/// Parse and validate a worker count.
fn parse_workers(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid integer"))?;

    if value == 0 {
        return Err("workers must be at least 1".to_string());
    }

    Ok(value)
}
