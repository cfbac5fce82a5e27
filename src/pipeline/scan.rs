//! The sequential scan loop.
//!
//! Windows are evaluated strictly in order: a unit's accept/suppress
//! decision depends on the ledger state left by every unit before it, so
//! there is no parallel window processing. Only clip extraction runs
//! concurrently, behind the scheduler.

use crate::audio::{self, AudioWindows, chunk_decibels, decibel_readings};
use crate::clipper::{ClipJob, ClipScheduler, JobOutcome, format_timestamp};
use crate::config::{AnalysisMode, AnalysisSettings};
use crate::detector::{Decision, DetectionRecord, Detector, Reading, ReferenceStats};
use crate::error::Result;
use crate::output::progress;
use crate::video::{FrameStream, luminance};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Everything one analysis run produced.
#[derive(Debug)]
pub struct RunReport {
    /// Accepted highlights, ordered by unit index.
    pub records: BTreeMap<u64, DetectionRecord>,
    /// Per-clip extraction outcomes.
    pub outcomes: Vec<JobOutcome>,
    /// Whether the scan ended early (read failure or interrupt).
    pub partial: bool,
    /// Number of units the scan covered.
    pub units_scanned: u64,
}

/// Ordered window source for one analysis mode.
enum WindowSource {
    Audio(AudioWindows),
    Video(FrameStream),
}

impl WindowSource {
    fn total_units(&self) -> Option<u64> {
        match self {
            Self::Audio(windows) => Some(windows.total_units()),
            Self::Video(_) => None,
        }
    }

    async fn next_readings(&mut self, resolution: usize) -> Result<Option<Vec<Reading>>> {
        match self {
            Self::Audio(windows) => Ok(windows
                .next_window()?
                .map(|samples| decibel_readings(&samples, resolution))),
            Self::Video(frames) => Ok(frames.next_frame().await?.map(|frame| {
                vec![Reading {
                    sub_index: 0,
                    value: luminance(&frame),
                }]
            })),
        }
    }

    async fn finish(self) {
        if let Self::Video(frames) = self {
            frames.finish().await;
        }
    }
}

/// Scan a source media file and extract a clip per accepted highlight.
///
/// The intermediate working directory is scoped to this call and released
/// on every exit path. A mid-stream read failure or an interrupt ends the
/// scan with a partial report, never an error.
pub async fn run_analysis(
    input: &Path,
    settings: &AnalysisSettings,
    cancel: watch::Receiver<bool>,
    progress_enabled: bool,
) -> Result<RunReport> {
    let workdir = tempfile::tempdir()?;

    let mut source = match settings.mode {
        AnalysisMode::Audio => {
            let track = audio::extract_track(input, workdir.path()).await?;
            WindowSource::Audio(AudioWindows::open(&track)?)
        }
        AnalysisMode::Video => WindowSource::Video(FrameStream::open(input)?),
    };

    info!("now analyzing for any moments ...");

    let scheduler = ClipScheduler::start(
        settings.workers,
        Duration::from_secs(settings.job_timeout_secs),
    );

    let mut detector = Detector::new(
        settings.metric_threshold(),
        settings.cooldown_before,
        settings.max_highlights,
    );

    let pb = progress::create_scan_progress(source.total_units(), progress_enabled);
    let mut partial = false;
    let mut units_scanned: u64 = 0;
    let mut unit: u64 = 0;
    let mut dispatch_error = None;

    loop {
        if *cancel.borrow() {
            info!("interrupted, keeping {} highlights found so far", detector.accepted());
            partial = true;
            break;
        }

        let readings = match source.next_readings(settings.resolution).await {
            Ok(Some(readings)) => readings,
            Ok(None) => break,
            Err(e) => {
                warn!("stream read failed at unit {unit}: {e}");
                partial = true;
                break;
            }
        };
        units_scanned += 1;

        match detector.evaluate(unit, &readings) {
            Decision::Accepted(record) => {
                let job = ClipJob::plan(
                    &record,
                    input,
                    &settings.output_dir,
                    settings.cooldown_before,
                    settings.cooldown_after,
                );
                if let Err(e) = scheduler.dispatch(job).await {
                    dispatch_error = Some(e);
                    break;
                }
                progress::set_message(
                    pb.as_ref(),
                    format!("({} highlights so far)", detector.accepted()),
                );
            }
            Decision::Suppressed => {
                debug!("redundant highlight at {}, skipping", format_timestamp(unit));
            }
            Decision::Quiet | Decision::MaxReached => {}
        }

        if detector.max_reached() {
            warn!("max amount of highlights reached");
            break;
        }

        unit += 1;
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "scan complete");
    source.finish().await;

    // Drain the pool before reporting, whatever ended the loop
    let outcomes = scheduler.finish().await;

    if let Some(e) = dispatch_error {
        return Err(e);
    }

    Ok(RunReport {
        records: detector.into_records(),
        outcomes,
        partial,
        units_scanned,
    })
}

/// Independent reference pass: no suppression, no ledger, no extraction.
pub async fn run_reference(
    input: &Path,
    resolution: usize,
    progress_enabled: bool,
) -> Result<ReferenceStats> {
    let workdir = tempfile::tempdir()?;
    let track = audio::extract_track(input, workdir.path()).await?;
    let mut windows = AudioWindows::open(&track)?;

    let pb = progress::create_scan_progress(Some(windows.total_units()), progress_enabled);
    let mut stats = ReferenceStats::new();

    while let Some(window) = windows.next_window()? {
        stats.observe(&chunk_decibels(&window, resolution));
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "reference complete");
    Ok(stats)
}
