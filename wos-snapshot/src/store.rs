use crate::record::{ExportLayout, MeasurementRecord};
use crate::week::WeekLabel;
use csv::ReaderBuilder;
use log::{info, warn};

/// Number of weekly buckets in a snapshot store.
pub const BUCKET_COUNT: usize = 52;

/// One year of weekly inventory snapshots.
///
/// Bucket *k* (0-indexed) holds every measurement record uploaded during
/// calendar week *k+1*. A bucket with no upload is simply empty. The
/// store is populated once at ingestion and read-only during analysis.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    buckets: Vec<Vec<MeasurementRecord>>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
        }
    }

    /// Add a record to the bucket of the week it was uploaded in.
    pub fn insert(&mut self, week: WeekLabel, record: MeasurementRecord) {
        self.buckets[week.bucket_index()].push(record);
    }

    /// The records uploaded during a calendar week.
    pub fn bucket(&self, week: WeekLabel) -> &[MeasurementRecord] {
        &self.buckets[week.bucket_index()]
    }

    /// The records at a zero-based bucket index, if the index is valid.
    pub fn bucket_at(&self, index: usize) -> Option<&[MeasurementRecord]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Total records across all buckets.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Load a snapshot export CSV into a store.
    ///
    /// The header row determines the column layout (see
    /// [`ExportLayout`]); a header with malformed week labels or missing
    /// fixed columns is an error. Individual data rows that fail to
    /// parse are skipped with a warning rather than failing the load.
    pub fn from_export_csv(data: &str) -> anyhow::Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());
        let layout = ExportLayout::from_headers(rdr.headers()?)?;

        let mut store = Self::new();
        let mut skipped = 0usize;
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("skipping unreadable export row: {e}");
                    skipped += 1;
                    continue;
                }
            };
            let week = match layout.snapshot_week(&row) {
                Ok(week) => week,
                Err(e) => {
                    warn!("skipping export row without usable snapshot week: {e}");
                    skipped += 1;
                    continue;
                }
            };
            match layout.parse_record(&row) {
                Ok(record) => store.insert(week, record),
                Err(e) => {
                    warn!("skipping malformed export row: {e}");
                    skipped += 1;
                }
            }
        }

        info!(
            "loaded {} snapshot records ({} rows skipped)",
            store.record_count(),
            skipped
        );
        Ok(store)
    }
}
