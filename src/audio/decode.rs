//! Intermediate audio track production.

use crate::constants::track;
use crate::error::{Error, Result};
use crate::ffmpeg::FfmpegCommand;
use std::path::{Path, PathBuf};
use tracing::info;

/// Produce the intermediate stereo PCM track for a source media file.
///
/// The track is written into the run's working directory and lives only as
/// long as that directory does.
pub async fn extract_track(source: &Path, workdir: &Path) -> Result<PathBuf> {
    let destination = workdir.join(track::FILE_NAME);

    info!("extracting audio track from {}", source.display());

    FfmpegCommand::extract_track(source, &destination)
        .run(None)
        .await
        .map_err(|e| Error::DecodeFailed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !destination.is_file() {
        return Err(Error::DecodeFailed {
            path: source.to_path_buf(),
            reason: "no audio track produced".to_string(),
        });
    }

    Ok(destination)
}
