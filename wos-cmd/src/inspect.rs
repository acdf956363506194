//! Snapshot export inspection: which weekly uploads are present.

use log::info;
use std::collections::BTreeSet;
use wos_snapshot::store::{SnapshotStore, BUCKET_COUNT};
use wos_utils::weeks;

/// Print a per-week summary of a snapshot export.
///
/// Lists the record count of every non-empty weekly bucket and the
/// distinct material/plant/site combinations seen across the whole
/// export. Weeks without an upload are simply not listed.
pub fn run_inspect(snapshots_csv: &str) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(snapshots_csv)?;
    let store = SnapshotStore::from_export_csv(&data)?;

    let mut combinations: BTreeSet<(String, String, String)> = BTreeSet::new();
    let mut populated_weeks = 0usize;

    for index in 0..BUCKET_COUNT {
        let Some(bucket) = store.bucket_at(index) else {
            continue;
        };
        if bucket.is_empty() {
            continue;
        }
        populated_weeks += 1;
        println!(
            "{}: {} records",
            weeks::format_week((index + 1) as u8),
            bucket.len()
        );
        for record in bucket {
            combinations.insert((
                record.material_number.clone(),
                record.plant.clone(),
                record.site.clone(),
            ));
        }
    }

    println!(
        "{} records across {} populated weeks, {} material/plant/site combinations",
        store.record_count(),
        populated_weeks,
        combinations.len()
    );
    info!("inspect complete for {snapshots_csv}");
    Ok(())
}
