//! Audio stream source and loudness estimation.

mod decode;
mod levels;
mod windows;

pub use decode::extract_track;
pub use levels::{chunk_decibels, decibel_readings};
pub use windows::AudioWindows;
