//! Run orchestration: pre-flight checks and the scan loop.

mod scan;

pub use scan::{RunReport, run_analysis, run_reference};

use crate::error::{Error, Result};
use crate::ffmpeg;
use std::path::Path;

/// Validate everything the run depends on before any window is processed.
///
/// Fail-fast by design: a run that would die halfway through extraction is
/// refused up front.
pub fn preflight(input: &Path, output_dir: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(Error::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    ffmpeg::locate()?;
    prepare_output_dir(output_dir)
}

/// Create the destination directory if missing; refuse a non-empty one.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreate {
            path: dir.to_path_buf(),
            source: e,
        });
    }

    let mut entries = std::fs::read_dir(dir)?;
    if entries.next().is_some() {
        return Err(Error::OutputNotEmpty {
            path: dir.to_path_buf(),
        });
    }

    Ok(())
}
