use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{GroupBy, Record};

/// Width of one sleep-hours bin.
pub const BIN_SIZE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One averaged bin: mean sleep (x) and mean stress (y) of its records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Records that fell into the bin; always at least one.
    pub count: usize,
}

/// A group's trend line, points ascending by `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub key: String,
    pub points: Vec<Point>,
}

/// Group key → series. Keyed by a `BTreeMap` so traversal is always
/// lexicographic by key.
pub type SeriesMap = BTreeMap<String, Series>;

// ---------------------------------------------------------------------------
// Bin accumulator
// ---------------------------------------------------------------------------

/// Running sums for one bin. Values are folded, never mutated in place.
#[derive(Debug, Clone, Copy, Default)]
struct Bin {
    sum_sleep: f64,
    sum_stress: f64,
    count: usize,
}

impl Bin {
    fn with(self, record: &Record) -> Self {
        Bin {
            sum_sleep: self.sum_sleep + record.sleep_hours(),
            sum_stress: self.sum_stress + record.stress_level(),
            count: self.count + 1,
        }
    }

    fn finish(self) -> Point {
        Point {
            x: self.sum_sleep / self.count as f64,
            y: self.sum_stress / self.count as f64,
            count: self.count,
        }
    }
}

/// `floor(sleep / BIN_SIZE)`; saturates for magnitudes beyond `i64`.
pub fn bin_index(sleep_hours: f64) -> i64 {
    (sleep_hours / BIN_SIZE).floor() as i64
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Group `records` by `by`, bin each group's sleep hours and average each bin.
///
/// Every record lands in exactly one bin of exactly one group, and a group or
/// bin only exists if some record created it. Points are ordered by their
/// averaged `x`, not by bin index. Empty input yields an empty map.
pub fn aggregate(records: &[Record], by: GroupBy) -> SeriesMap {
    let mut groups: BTreeMap<&str, BTreeMap<i64, Bin>> = BTreeMap::new();
    for record in records {
        let bins = groups.entry(by.key_of(record)).or_default();
        let bin = bins.entry(bin_index(record.sleep_hours())).or_default();
        *bin = bin.with(record);
    }

    let series: SeriesMap = groups
        .into_iter()
        .map(|(key, bins)| {
            let mut points: Vec<Point> = bins.into_values().map(Bin::finish).collect();
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
            let key = key.to_string();
            (key.clone(), Series { key, points })
        })
        .collect();

    log::info!(
        "Aggregated {} record(s) by {by} into {} series",
        records.len(),
        series.len()
    );
    series
}
