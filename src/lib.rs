//! Reeler - highlight clip extraction CLI tool.
//!
//! This crate scans a recording's audio loudness (or video brightness) for
//! highlight moments and extracts a short clip around each one.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod detector;
pub mod error;
pub mod ffmpeg;
pub mod output;
pub mod pipeline;
pub mod video;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, ConfigAction};
use config::{AnalysisMode, AnalysisSettings, Config};
use std::path::Path;
use tokio::sync::watch;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the reeler CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.analyze.verbose, cli.analyze.quiet);

    // Load configuration
    let config = config::load_default_config()?;
    config::validate_config(&config)?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config, &cli.analyze);
    }

    // Default: analyze the input file
    let Some(input) = cli.input else {
        let mut command = <Cli as clap::CommandFactory>::command();
        command.print_help()?;
        return Ok(());
    };

    analyze_file(&input, &cli.analyze, &config)
}

/// Analyze one input file with the given options.
fn analyze_file(input: &Path, args: &AnalyzeArgs, config: &Config) -> Result<()> {
    use std::time::Instant;

    let total_start = Instant::now();

    let settings = AnalysisSettings::resolve(args, config);
    config::validate_settings(&settings)?;

    info!("using \"{}\" as input ...", input.display());
    match settings.mode {
        AnalysisMode::Audio => info!(
            "minimum decibels to highlight a moment: {} (resolution {})",
            settings.threshold, settings.resolution
        ),
        AnalysisMode::Video => {
            info!("minimum luminance to highlight a moment: {}", settings.brightness);
        }
    }

    // Fail fast before any window is processed
    pipeline::preflight(input, &settings.output_dir)?;

    // Ctrl+C flips the cancellation flag; the scan loop observes it per
    // window and returns whatever it found so far.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = cancel_tx.send(true);
    }) {
        warn!("failed to install Ctrl+C handler: {e}");
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("failed to create async runtime: {e}"),
    })?;

    let progress_enabled = !args.quiet && !args.no_progress;
    let report = runtime.block_on(pipeline::run_analysis(
        input,
        &settings,
        cancel_rx,
        progress_enabled,
    ))?;

    if settings.dump_results {
        let path = output::write_results(
            &settings.output_dir,
            input,
            &settings,
            &report.records,
            &report.outcomes,
            report.units_scanned,
            report.partial,
        )?;
        info!("results dump written to {}", path.display());
    }

    output::report_run(
        &report,
        &settings.output_dir,
        total_start.elapsed().as_secs_f64(),
    );

    Ok(())
}

fn handle_command(command: Command, config: &Config, args: &AnalyzeArgs) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Reference { input, resolution } => handle_reference_command(
            &input,
            resolution.unwrap_or(config.defaults.resolution),
            args,
        ),
    }
}

/// Handle the `reference` command: suggest a starting threshold.
fn handle_reference_command(input: &Path, resolution: usize, args: &AnalyzeArgs) -> Result<()> {
    if !input.is_file() {
        return Err(Error::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    ffmpeg::locate()?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("failed to create async runtime: {e}"),
    })?;

    let progress_enabled = !args.quiet && !args.no_progress;
    let stats = runtime.block_on(pipeline::run_reference(input, resolution, progress_enabled))?;

    match (stats.overall_average(), stats.greatest(), stats.suggested_threshold()) {
        (Some(average), Some(greatest), Some(suggested)) => {
            println!("average dB:  {average:.2}");
            println!("greatest dB: {greatest:.2}");
            println!();
            println!("it is recommended to set your target close to the greatest value,");
            println!("for example: reeler <input> -t {suggested:.1}");
            println!();
            println!("moving the target toward the average finds more moments (and uses");
            println!("more disk space); a target above the greatest finds none at all.");
        }
        _ => println!("no finite readings found; the stream may be entirely silent."),
    }

    Ok(())
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config::config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = config::save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = config::load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config::config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}
