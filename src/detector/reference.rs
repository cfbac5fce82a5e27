//! Reference statistics for threshold selection.

/// Aggregated intensity statistics over a full stream.
///
/// An independent, non-mutating pass with no ledger: it never suppresses
/// anything, it only summarizes what the stream sounds like so the user can
/// pick a sensible threshold.
#[derive(Debug, Default)]
pub struct ReferenceStats {
    unit_averages: Vec<f64>,
    peak: Option<f64>,
}

impl ReferenceStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one unit's raw readings.
    ///
    /// Non-finite values (silent chunks decode to `-inf`) are excluded from
    /// both the unit average and the running peak; a unit with no finite
    /// readings contributes no average.
    #[allow(clippy::cast_precision_loss)]
    pub fn observe(&mut self, readings: &[f64]) {
        let finite: Vec<f64> = readings.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return;
        }

        let average = finite.iter().sum::<f64>() / finite.len() as f64;
        self.unit_averages.push(average);

        for value in finite {
            if self.peak.is_none_or(|p| value > p) {
                self.peak = Some(value);
            }
        }
    }

    /// Per-unit averages, in stream order.
    pub fn unit_averages(&self) -> &[f64] {
        &self.unit_averages
    }

    /// Mean of the per-unit averages.
    #[allow(clippy::cast_precision_loss)]
    pub fn overall_average(&self) -> Option<f64> {
        if self.unit_averages.is_empty() {
            return None;
        }
        Some(self.unit_averages.iter().sum::<f64>() / self.unit_averages.len() as f64)
    }

    /// Greatest finite reading seen across the whole stream.
    pub fn greatest(&self) -> Option<f64> {
        self.peak
    }

    /// Recommended starting threshold: just under the greatest reading.
    pub fn suggested_threshold(&self) -> Option<f64> {
        self.peak.map(|p| p.round() - 1.0)
    }
}
