//! The streaming detection and suppression engine.
//!
//! Consumes ordered per-unit intensity readings and decides, one unit at a
//! time, whether a moment becomes a highlight, is suppressed as an echo of
//! a recent one, or passes unremarked.

mod reference;

pub use reference::ReferenceStats;

use std::collections::{BTreeMap, BTreeSet};

/// One intensity reading within a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Position of the sub-chunk within the window's chronological order.
    pub sub_index: usize,
    /// Intensity metric: decibels (audio) or luminance (video).
    pub value: f64,
}

/// An accepted highlight moment. Immutable once created.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DetectionRecord {
    /// Unit index (seconds since stream start).
    pub unit_index: u64,
    /// Sub-chunk that crossed the threshold first.
    pub sub_index: usize,
    /// Metric value of that sub-chunk.
    pub metric_value: f64,
}

/// Outcome of evaluating one unit's readings.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// No reading met the threshold; the unit passes unremarked.
    Quiet,
    /// A reading qualified but a captured unit sits inside the suppression
    /// radius; the unit was marked captured without producing a record.
    Suppressed,
    /// The unit produced a new highlight record.
    Accepted(DetectionRecord),
    /// The accepted-highlight cap was already reached; nothing evaluated.
    MaxReached,
}

/// Threshold + cooldown + cap state machine over ordered units.
///
/// Owns the capture ledger and the result map exclusively; unit indices must
/// be fed in ascending order.
pub struct Detector {
    threshold: f64,
    cooldown: u64,
    max_detections: usize,
    ledger: BTreeSet<u64>,
    records: BTreeMap<u64, DetectionRecord>,
}

impl Detector {
    /// Create a detector.
    ///
    /// `cooldown` is the suppression radius in units; `max_detections` of 0
    /// means unbounded.
    pub fn new(threshold: f64, cooldown: u64, max_detections: usize) -> Self {
        Self {
            threshold,
            cooldown,
            max_detections,
            ledger: BTreeSet::new(),
            records: BTreeMap::new(),
        }
    }

    /// Evaluate one unit's readings in chronological order.
    ///
    /// The earliest reading at or above the threshold decides the whole
    /// unit; later readings in the same unit are ignored, so a unit never
    /// yields more than one record.
    pub fn evaluate(&mut self, unit: u64, readings: &[Reading]) -> Decision {
        if self.max_reached() {
            return Decision::MaxReached;
        }

        let Some(hit) = readings.iter().find(|r| r.value >= self.threshold) else {
            return Decision::Quiet;
        };

        // A captured unit strictly closer than the radius suppresses this
        // one; a unit exactly the radius away does not.
        if self.cooldown > 0 {
            let radius_start = unit.saturating_sub(self.cooldown - 1);
            if self.ledger.range(radius_start..unit).next_back().is_some() {
                // Mark the echo too, so the suppression window keeps
                // rolling forward over a sustained loud stretch.
                self.ledger.insert(unit);
                return Decision::Suppressed;
            }
        }

        self.ledger.insert(unit);
        let record = DetectionRecord {
            unit_index: unit,
            sub_index: hit.sub_index,
            metric_value: hit.value,
        };
        self.records.insert(unit, record.clone());

        Decision::Accepted(record)
    }

    /// Whether the accepted-highlight cap has been reached.
    ///
    /// Only accepted records count toward the cap, never suppressed units.
    pub fn max_reached(&self) -> bool {
        self.max_detections > 0 && self.records.len() >= self.max_detections
    }

    /// Number of accepted records so far.
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    /// The result map accumulated so far, ordered by unit index.
    pub fn records(&self) -> &BTreeMap<u64, DetectionRecord> {
        &self.records
    }

    /// Consume the detector, returning the result map.
    pub fn into_records(self) -> BTreeMap<u64, DetectionRecord> {
        self.records
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn reading(value: f64) -> Vec<Reading> {
        vec![Reading {
            sub_index: 0,
            value,
        }]
    }

    #[test]
    fn test_single_event_is_accepted() {
        let mut detector = Detector::new(80.0, 20, 0);
        for unit in 0..100 {
            let readings = if unit == 50 {
                reading(85.0)
            } else {
                reading(10.0)
            };
            detector.evaluate(unit, &readings);
        }

        let records = detector.into_records();
        assert_eq!(records.len(), 1);
        assert!(records.contains_key(&50));
        assert_eq!(records[&50].metric_value, 85.0);
    }

    #[test]
    fn test_quiet_unit_does_not_mark_ledger() {
        let mut detector = Detector::new(80.0, 10, 0);
        assert_eq!(detector.evaluate(0, &reading(10.0)), Decision::Quiet);
        // A quiet unit must not suppress a following qualifying one
        assert!(matches!(
            detector.evaluate(1, &reading(90.0)),
            Decision::Accepted(_)
        ));
    }

    #[test]
    fn test_events_within_radius_collapse() {
        let mut detector = Detector::new(80.0, 5, 0);
        assert!(matches!(
            detector.evaluate(10, &reading(90.0)),
            Decision::Accepted(_)
        ));
        assert_eq!(detector.evaluate(14, &reading(90.0)), Decision::Suppressed);

        let records = detector.into_records();
        assert_eq!(records.len(), 1);
        assert!(records.contains_key(&10));
    }

    #[test]
    fn test_events_at_radius_boundary_both_accepted() {
        let mut detector = Detector::new(80.0, 5, 0);
        assert!(matches!(
            detector.evaluate(10, &reading(90.0)),
            Decision::Accepted(_)
        ));
        // 15 - 10 == radius: the earlier unit falls outside [10, 15)
        assert!(matches!(
            detector.evaluate(15, &reading(90.0)),
            Decision::Accepted(_)
        ));
        assert_eq!(detector.accepted(), 2);
    }

    #[test]
    fn test_suppressed_unit_extends_the_window() {
        let mut detector = Detector::new(80.0, 3, 0);
        assert!(matches!(
            detector.evaluate(0, &reading(90.0)),
            Decision::Accepted(_)
        ));
        // Each suppressed echo re-arms the radius, so a sustained loud
        // stretch collapses into a single highlight.
        for unit in 1..10 {
            assert_eq!(
                detector.evaluate(unit, &reading(90.0)),
                Decision::Suppressed,
                "unit {unit}"
            );
        }
        assert_eq!(detector.accepted(), 1);
    }

    #[test]
    fn test_first_qualifying_sub_chunk_wins() {
        let mut detector = Detector::new(80.0, 5, 0);
        let readings = vec![
            Reading {
                sub_index: 3,
                value: 50.0,
            },
            Reading {
                sub_index: 7,
                value: 82.0,
            },
            Reading {
                sub_index: 9,
                value: 99.0,
            },
        ];

        match detector.evaluate(0, &readings) {
            Decision::Accepted(record) => {
                assert_eq!(record.sub_index, 7);
                assert_eq!(record.metric_value, 82.0);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn test_max_detections_counts_only_accepted() {
        let mut detector = Detector::new(80.0, 2, 2);

        assert!(matches!(
            detector.evaluate(0, &reading(90.0)),
            Decision::Accepted(_)
        ));
        // Suppressed echo must not consume the cap
        assert_eq!(detector.evaluate(1, &reading(90.0)), Decision::Suppressed);
        assert!(!detector.max_reached());

        assert!(matches!(
            detector.evaluate(10, &reading(90.0)),
            Decision::Accepted(_)
        ));
        assert!(detector.max_reached());
        assert_eq!(detector.evaluate(20, &reading(90.0)), Decision::MaxReached);
        assert_eq!(detector.accepted(), 2);
    }

    #[test]
    fn test_accepted_units_spaced_by_at_least_the_radius() {
        let mut detector = Detector::new(80.0, 4, 0);
        for unit in 0..50 {
            detector.evaluate(unit, &reading(90.0));
        }

        let units: Vec<u64> = detector.records().keys().copied().collect();
        for pair in units.windows(2) {
            assert!(pair[1] - pair[0] >= 4);
        }
    }

    #[test]
    fn test_records_iterate_in_ascending_time() {
        let mut detector = Detector::new(80.0, 1, 0);
        for unit in [3u64, 10, 25, 40] {
            detector.evaluate(unit, &reading(95.0));
        }

        let units: Vec<u64> = detector.into_records().into_keys().collect();
        assert_eq!(units, vec![3, 10, 25, 40]);
    }
}
