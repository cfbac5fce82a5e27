//! Progress bar utilities for the scan loop.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar over scan units.
///
/// With an unknown stream length (video mode) a spinner with a unit counter
/// is shown instead of a bar.
pub fn create_scan_progress(total_units: Option<u64>, enabled: bool) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }

    let pb = match total_units {
        Some(total) if total > 0 => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}s {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓▒░ "),
            );
            pb
        }
        _ => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos}s scanned {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb
        }
    };

    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Update the status message next to the bar.
pub fn set_message(pb: Option<&ProgressBar>, message: String) {
    if let Some(pb) = pb {
        pb.set_message(message);
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}
