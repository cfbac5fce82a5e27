//! Bounded worker pool for clip extraction.

use crate::clipper::ClipJob;
use crate::error::{Error, Result};
use crate::ffmpeg::FfmpegCommand;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Result of one extraction job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Unit index of the highlight the job belonged to.
    pub unit_index: u64,
    /// Destination the clip was written to (or would have been).
    pub destination: PathBuf,
    /// Failure reason, if the job did not produce a clip.
    pub error: Option<String>,
}

impl JobOutcome {
    /// Whether the job produced its clip.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs extraction jobs concurrently with the scan, bounded by a fixed-size
/// worker pool.
///
/// Dispatch blocks only when the pool's queue is full, which is the
/// backpressure that keeps a highlight-dense stream from piling up
/// unbounded transcoder processes. Job failures never abort the run; they
/// are collected and returned from [`ClipScheduler::finish`].
pub struct ClipScheduler {
    tx: Option<mpsc::Sender<ClipJob>>,
    collector: tokio::task::JoinHandle<Vec<JobOutcome>>,
}

impl ClipScheduler {
    /// Start the pool with `workers` concurrent jobs and a per-job timeout.
    pub fn start(workers: usize, job_timeout: Duration) -> Self {
        let workers = workers.max(1);
        let (tx, rx) = mpsc::channel(workers);
        let collector = tokio::spawn(collect_outcomes(rx, workers, job_timeout));

        Self {
            tx: Some(tx),
            collector,
        }
    }

    /// Enqueue a job, waiting if the pool's queue is full.
    pub async fn dispatch(&self, job: ClipJob) -> Result<()> {
        debug!(
            "dispatching clip job for unit {} [{}, {}]",
            job.unit_index, job.start, job.end
        );

        let tx = self.tx.as_ref().ok_or_else(|| Error::Internal {
            message: "extraction pool already shut down".to_string(),
        })?;

        tx.send(job).await.map_err(|_| Error::Internal {
            message: "extraction pool stopped accepting jobs".to_string(),
        })
    }

    /// Stop accepting jobs, drain the pool, and return all outcomes.
    pub async fn finish(mut self) -> Vec<JobOutcome> {
        self.tx.take();
        self.collector.await.unwrap_or_default()
    }
}

/// Pool loop: admit jobs as permits free up, gather outcomes as jobs land.
async fn collect_outcomes(
    mut rx: mpsc::Receiver<ClipJob>,
    workers: usize,
    job_timeout: Duration,
) -> Vec<JobOutcome> {
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut running = JoinSet::new();
    let mut outcomes = Vec::new();

    while let Some(job) = rx.recv().await {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        running.spawn(async move {
            let _permit = permit;
            run_job(job, job_timeout).await
        });

        while let Some(done) = running.try_join_next() {
            if let Ok(outcome) = done {
                outcomes.push(outcome);
            }
        }
    }

    while let Some(done) = running.join_next().await {
        if let Ok(outcome) = done {
            outcomes.push(outcome);
        }
    }

    outcomes
}

/// Run one stream-copy extraction to completion.
async fn run_job(job: ClipJob, timeout: Duration) -> JobOutcome {
    let result = FfmpegCommand::slice_copy(&job.source, job.start, job.end, &job.destination)
        .run(Some(timeout))
        .await;

    match result {
        Ok(()) => {
            info!(
                "clip for unit {} written to {}",
                job.unit_index,
                job.destination.display()
            );
            JobOutcome {
                unit_index: job.unit_index,
                destination: job.destination,
                error: None,
            }
        }
        Err(e) => {
            warn!("clip extraction failed for unit {}: {e}", job.unit_index);
            JobOutcome {
                unit_index: job.unit_index,
                destination: job.destination,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success_flag() {
        let ok = JobOutcome {
            unit_index: 1,
            destination: PathBuf::from("1.mp4"),
            error: None,
        };
        assert!(ok.succeeded());

        let failed = JobOutcome {
            unit_index: 2,
            destination: PathBuf::from("2.mp4"),
            error: Some("timed out".to_string()),
        };
        assert!(!failed.succeeded());
    }
}
