//! Backtest analysis over a snapshot export.

use log::info;
use wos_analysis::query::AnalysisQuery;
use wos_snapshot::store::SnapshotStore;
use wos_snapshot::week::WeekLabel;

/// Run one Weeks-of-Stock reconstruction and emit the JSON report.
///
/// Query validation failures (empty filter fields, horizon out of
/// range) surface as errors before any computation. A valid query that
/// matches nothing still produces a report; its table is empty and the
/// chart carries only fallback values.
pub fn run_analyze(
    snapshots_csv: &str,
    material: &str,
    plant: &str,
    site: &str,
    start_week: &str,
    horizon_weeks: u8,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let data = std::fs::read_to_string(snapshots_csv)?;
    let store = SnapshotStore::from_export_csv(&data)?;

    let start = WeekLabel::parse(start_week)?;
    let query = AnalysisQuery::new(material, plant, site, start, horizon_weeks)?;

    info!(
        "analyzing {material}/{plant}/{site} from {start} over {horizon_weeks} weeks"
    );
    let report = wos_analysis::analyze(&store, &query);
    if report.table.is_empty() {
        info!("no data found for {material}/{plant}/{site} in the scanned weeks");
    }

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("report written to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
