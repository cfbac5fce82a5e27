//! Per-second window reader over the intermediate PCM track.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sequential one-second windows of interleaved samples from a WAV track.
pub struct AudioWindows {
    samples: hound::WavIntoSamples<BufReader<File>, i16>,
    window_len: usize,
    total_units: u64,
}

impl AudioWindows {
    /// Open the intermediate track for windowed reading.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = hound::WavReader::open(path).map_err(|e| Error::TrackOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        let spec = reader.spec();
        let window_len = spec.sample_rate as usize * usize::from(spec.channels);
        let total_units = u64::from(reader.duration() / spec.sample_rate);

        Ok(Self {
            samples: reader.into_samples(),
            window_len,
            total_units,
        })
    }

    /// Number of whole one-second units in the track.
    pub fn total_units(&self) -> u64 {
        self.total_units
    }

    /// Read the next window of interleaved samples.
    ///
    /// Returns `Ok(None)` at end of stream. The final window may be shorter
    /// than a full second. A decode error mid-stream surfaces as `Err`; the
    /// caller treats it as end-of-input with a partial result.
    pub fn next_window(&mut self) -> Result<Option<Vec<i16>>> {
        let mut window = Vec::with_capacity(self.window_len);

        for _ in 0..self.window_len {
            match self.samples.next() {
                Some(Ok(sample)) => window.push(sample),
                Some(Err(e)) => return Err(Error::TrackRead { source: e }),
                None => break,
            }
        }

        if window.is_empty() {
            Ok(None)
        } else {
            Ok(Some(window))
        }
    }
}
