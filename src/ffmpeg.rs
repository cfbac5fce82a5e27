//! ffmpeg command builder and runner.
//!
//! The external transcoder is used for exactly three things: producing the
//! intermediate PCM track for audio analysis, streaming downsampled frames
//! for video analysis, and stream-copy slice extraction of clips.

use crate::constants::{frame, track};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Locate the ffmpeg binary on PATH.
pub fn locate() -> Result<PathBuf> {
    which::which("ffmpeg").map_err(|_| Error::FfmpegNotFound)
}

/// Builder for ffmpeg invocations that write a single output file.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path.
    input: PathBuf,
    /// Output file path.
    output: PathBuf,
    /// Arguments placed before `-i`.
    input_args: Vec<String>,
    /// Arguments placed after `-i`.
    output_args: Vec<String>,
}

impl FfmpegCommand {
    /// Create a new ffmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
        }
    }

    /// Command producing the intermediate stereo PCM track for audio analysis.
    pub fn extract_track(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Self {
        Self::new(source, destination)
            .output_arg("-vn")
            .output_arg("-ac")
            .output_arg(track::CHANNELS.to_string())
            .output_arg("-ar")
            .output_arg(track::SAMPLE_RATE.to_string())
    }

    /// Command slicing `[start, end]` out of the source without re-encoding.
    pub fn slice_copy(
        source: impl AsRef<Path>,
        start: u64,
        end: u64,
        destination: impl AsRef<Path>,
    ) -> Self {
        Self::new(source, destination)
            .output_arg("-ss")
            .output_arg(start.to_string())
            .output_arg("-to")
            .output_arg(end.to_string())
            .output_arg("-c")
            .output_arg("copy")
    }

    /// Add an argument before `-i`.
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an argument after `-i`.
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Build the full argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-y".to_string(),
            "-v".to_string(),
            "error".to_string(),
        ];

        args.extend(self.input_args.clone());
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());
        args.extend(self.output_args.clone());
        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Run the command to completion.
    ///
    /// With a timeout, the process is killed when the deadline passes and
    /// `FfmpegTimeout` is returned. A non-zero exit maps to `FfmpegFailed`.
    pub async fn run(&self, timeout: Option<Duration>) -> Result<()> {
        let args = self.build_args();
        debug!("running ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let status = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    warn!("ffmpeg timed out after {}s, killing process", limit.as_secs());
                    let _ = child.kill().await;
                    return Err(Error::FfmpegTimeout {
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::FfmpegFailed {
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

/// Spawn ffmpeg streaming one downsampled rgb24 frame per second to stdout.
///
/// The caller owns the child and reads raw frames of
/// [`frame::FRAME_BYTES`] from its stdout; the process is killed if the
/// child handle is dropped mid-stream.
pub fn spawn_frame_stream(source: &Path) -> Result<tokio::process::Child> {
    let filter = format!(
        "fps=1,scale={}:{}",
        frame::SAMPLE_WIDTH,
        frame::SAMPLE_HEIGHT
    );

    debug!("spawning frame stream for {}", source.display());

    let source_arg = source.to_string_lossy().to_string();
    let child = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-v",
            "error",
            "-i",
            source_arg.as_str(),
            "-vf",
            filter.as_str(),
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "pipe:1",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_copy_args() {
        let cmd = FfmpegCommand::slice_copy("in.mp4", 10, 50, "out.mp4");
        let args = cmd.build_args();

        let ss = args.iter().position(|a| a == "-ss");
        assert!(ss.is_some_and(|i| args[i + 1] == "10"));
        let to = args.iter().position(|a| a == "-to");
        assert!(to.is_some_and(|i| args[i + 1] == "50"));
        assert!(args.windows(2).any(|w| w[0] == "-c" && w[1] == "copy"));
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[test]
    fn test_extract_track_args() {
        let cmd = FfmpegCommand::extract_track("in.mp4", "audio.wav");
        let args = cmd.build_args();

        assert!(args.contains(&"-vn".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-ac" && w[1] == "2"));
        assert!(args.windows(2).any(|w| w[0] == "-ar" && w[1] == "44100"));
        // Input precedes output arguments
        let i = args.iter().position(|a| a == "-i");
        let vn = args.iter().position(|a| a == "-vn");
        assert!(i < vn);
    }

    #[test]
    fn test_build_args_always_overwrites_quietly() {
        let args = FfmpegCommand::new("a", "b").build_args();
        assert!(args.contains(&"-y".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "-v" && w[1] == "error"));
    }
}
