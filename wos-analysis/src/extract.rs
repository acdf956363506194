use crate::query::AnalysisQuery;
use std::collections::BTreeMap;
use wos_snapshot::record::Measure;
use wos_snapshot::store::{SnapshotStore, BUCKET_COUNT};
use wos_snapshot::week::WeekLabel;

/// One (snapshot week, measure) row of the reconstruction, scoped to a
/// single material/plant/site.
///
/// `values` keeps the record's projections restricted to the backtest
/// window; an absent week is an empty cell, not a zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub snapshot: WeekLabel,
    pub measure: Measure,
    pub inventory_on_hand: Option<f64>,
    pub values: BTreeMap<WeekLabel, f64>,
}

impl ExtractedRow {
    /// The value this snapshot recorded for a week, if any.
    pub fn value_for(&self, week: WeekLabel) -> Option<f64> {
        self.values.get(&week).copied()
    }
}

/// Flatten the relevant snapshot buckets into rows, oldest snapshot
/// first.
///
/// Visits the `horizon_weeks + 1` buckets ending at the query's start
/// week. Empty buckets contribute nothing. Within a bucket, records are
/// kept when they match the query's material/plant/site and carry a
/// reportable measure; each match becomes one row, so a bucket with
/// several measures yields several rows for the same snapshot week.
pub fn extract(
    store: &SnapshotStore,
    query: &AnalysisQuery,
    full_window: &[WeekLabel],
) -> Vec<ExtractedRow> {
    let start = i32::from(query.start_week.number());
    let mut rows = Vec::new();

    for i in -i32::from(query.horizon_weeks)..=0 {
        let bucket_index = (start + i - 1).rem_euclid(BUCKET_COUNT as i32) as usize;
        let snapshot = WeekLabel::from_offset(start + i);
        let Some(bucket) = store.bucket_at(bucket_index) else {
            continue;
        };
        if bucket.is_empty() {
            continue;
        }
        for record in bucket {
            if !query.matches(record) || !record.measure.is_reportable() {
                continue;
            }
            let values = full_window
                .iter()
                .filter_map(|week| record.value_for(*week).map(|value| (*week, value)))
                .collect();
            rows.push(ExtractedRow {
                snapshot,
                measure: record.measure,
                inventory_on_hand: record.inventory_on_hand,
                values,
            });
        }
    }
    rows
}
