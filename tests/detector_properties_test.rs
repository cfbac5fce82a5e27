//! End-to-end properties of the detection engine on synthetic streams.

use reeler::audio::decibel_readings;
use reeler::clipper::ClipJob;
use reeler::detector::{Decision, Detector, Reading, ReferenceStats};
use std::path::Path;

/// One second of constant-amplitude samples at roughly the given decibel level.
#[allow(clippy::cast_possible_truncation)]
fn window_at_db(db: f64, len: usize) -> Vec<i16> {
    let amplitude = 10f64.powf(db / 20.0).round() as i16;
    vec![amplitude; len]
}

fn silent_window(len: usize) -> Vec<i16> {
    vec![0i16; len]
}

fn single_reading(value: f64) -> Vec<Reading> {
    vec![Reading {
        sub_index: 0,
        value,
    }]
}

#[test]
fn test_single_event_above_threshold_yields_one_record() {
    let threshold = 80.0;
    let mut detector = Detector::new(threshold, 10, 0);

    for unit in 0..200u64 {
        let value = if unit == 50 { threshold + 5.0 } else { 20.0 };
        detector.evaluate(unit, &single_reading(value));
    }

    let records = detector.into_records();
    assert_eq!(records.len(), 1);
    let record = &records[&50];
    assert_eq!(record.unit_index, 50);
    assert!((record.metric_value - 85.0).abs() < f64::EPSILON);
}

#[test]
fn test_events_inside_radius_collapse_to_the_earlier() {
    for radius in [1u64, 3, 10, 30] {
        let a = 100u64;
        let b = a + radius - 1; // b - a < radius

        let mut detector = Detector::new(80.0, radius, 0);
        for unit in 0..200u64 {
            let value = if unit == a || unit == b { 95.0 } else { 10.0 };
            detector.evaluate(unit, &single_reading(value));
        }

        let records = detector.into_records();
        assert_eq!(records.len(), 1, "radius {radius}");
        assert!(records.contains_key(&a), "radius {radius}");
    }
}

#[test]
fn test_events_at_or_beyond_radius_are_both_kept() {
    for radius in [1u64, 3, 10, 30] {
        let a = 100u64;
        let b = a + radius; // b - a == radius

        let mut detector = Detector::new(80.0, radius, 0);
        for unit in 0..200u64 {
            let value = if unit == a || unit == b { 95.0 } else { 10.0 };
            detector.evaluate(unit, &single_reading(value));
        }

        assert_eq!(detector.accepted(), 2, "radius {radius}");
    }
}

#[test]
fn test_max_detections_halts_the_scan_early() {
    let max = 3usize;
    let mut detector = Detector::new(80.0, 2, max);

    // Qualifying events every 10 units, far beyond the radius; far more
    // than the cap.
    let mut units_scanned = 0u64;
    for unit in 0..1000u64 {
        let value = if unit % 10 == 0 { 95.0 } else { 10.0 };
        detector.evaluate(unit, &single_reading(value));
        units_scanned += 1;
        if detector.max_reached() {
            break;
        }
    }

    assert_eq!(detector.accepted(), max);
    // The third event sits at unit 20; the scan must not have run on
    assert_eq!(units_scanned, 21);
}

#[test]
fn test_all_zero_window_never_reaches_a_comparison() {
    let readings = decibel_readings(&silent_window(44_100), 1000);
    assert!(readings.is_empty());

    // Consequently the detector sees a quiet unit, not a NaN comparison
    let mut detector = Detector::new(0.0, 5, 0);
    assert_eq!(detector.evaluate(0, &readings), Decision::Quiet);
}

#[test]
fn test_reference_tracks_one_extreme_peak() {
    let mut stats = ReferenceStats::new();

    for unit in 0..60 {
        let samples = if unit == 30 {
            window_at_db(88.0, 4000)
        } else {
            window_at_db(8.0, 4000)
        };
        stats.observe(&reeler::audio::chunk_decibels(&samples, 4));
    }

    let greatest = stats.greatest().unwrap();
    assert!((greatest - 88.0).abs() < 0.01);
    assert!(stats.unit_averages().iter().all(|v| v.is_finite()));
    assert_eq!(stats.suggested_threshold().unwrap(), 87.0);
}

#[test]
fn test_synthetic_stream_end_to_end() {
    // 10 seconds, silent except units 3 and 7 at ~90 dB; threshold 85,
    // cooldown 2 before / 2 after.
    let rate = 4000usize;
    let windows: Vec<Vec<i16>> = (0..10u64)
        .map(|unit| {
            if unit == 3 || unit == 7 {
                window_at_db(90.0, rate)
            } else {
                silent_window(rate)
            }
        })
        .collect();

    let mut detector = Detector::new(85.0, 2, 0);
    for (unit, samples) in windows.iter().enumerate() {
        let readings = decibel_readings(samples, 10);
        detector.evaluate(unit as u64, &readings);
    }

    let records = detector.into_records();
    assert_eq!(records.keys().copied().collect::<Vec<_>>(), vec![3, 7]);

    let jobs: Vec<ClipJob> = records
        .values()
        .map(|record| {
            ClipJob::plan(record, Path::new("in.mp4"), Path::new("highlights"), 2, 2)
        })
        .collect();

    assert_eq!((jobs[0].start, jobs[0].end), (1, 5));
    assert_eq!((jobs[1].start, jobs[1].end), (5, 9));
    assert_ne!(jobs[0].destination, jobs[1].destination);
}
