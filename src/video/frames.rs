//! Per-second downsampled frame reader.

use crate::constants::frame;
use crate::error::{Error, Result};
use crate::ffmpeg;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStdout};

/// Sequential one-per-second frames decoded by the external transcoder.
///
/// Frames arrive already downsampled to the analysis raster, so each read
/// yields exactly [`frame::FRAME_BYTES`] of rgb24 data.
pub struct FrameStream {
    child: Child,
    stdout: ChildStdout,
}

impl FrameStream {
    /// Spawn the decoder and begin streaming frames.
    pub fn open(source: &Path) -> Result<Self> {
        let mut child = ffmpeg::spawn_frame_stream(source)?;
        let stdout = child.stdout.take().ok_or_else(|| Error::Internal {
            message: "frame stream stdout not captured".to_string(),
        })?;

        Ok(Self { child, stdout })
    }

    /// Read the next sampled frame.
    ///
    /// Returns `Ok(None)` once the decoder closes its output. A torn final
    /// frame is discarded rather than analyzed.
    pub async fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buffer = vec![0u8; frame::FRAME_BYTES];
        let mut filled = 0;

        while filled < buffer.len() {
            let read = self.stdout.read(&mut buffer[filled..]).await?;
            if read == 0 {
                return Ok(None);
            }
            filled += read;
        }

        Ok(Some(buffer))
    }

    /// Reap the decoder process after the stream is drained or abandoned.
    pub async fn finish(mut self) {
        let _ = self.child.kill().await;
        let _ = self.child.wait().await;
    }
}
