//! Weeks-of-Stock backtest reconstruction.
//!
//! Given a year of weekly inventory snapshots, this crate rebuilds how
//! the forecasted Weeks-of-Stock metric for one material/plant/site
//! evolved versus what actually happened: a rolling one-step-ahead
//! forecast-vs-actual series for charting, and a waterfall table in
//! which projections already superseded by a later snapshot are marked
//! suppressed.
//!
//! Pipeline: [`window::backtest_window`] -> [`extract::extract`] ->
//! [`waterfall::project`] for the chart and [`mask::is_suppressed`] for
//! the table. Every stage is a pure function over the immutable
//! [`SnapshotStore`](wos_snapshot::store::SnapshotStore); re-running a
//! query yields identical output.

pub mod extract;
pub mod mask;
pub mod query;
pub mod report;
pub mod waterfall;
pub mod window;

use query::AnalysisQuery;
use report::AnalysisReport;
use wos_snapshot::store::SnapshotStore;

/// Run the full reconstruction for one query and assemble the report
/// handed to the chart and table collaborators.
///
/// An empty store or a query matching no records yields a report with an
/// empty table and fallback-only chart series, not an error.
pub fn analyze(store: &SnapshotStore, query: &AnalysisQuery) -> AnalysisReport {
    let full_window = window::backtest_window(query.start_week, query.horizon_weeks);
    let rows = extract::extract(store, query, &full_window);
    log::info!(
        "analysis for {}/{}/{} at {}: {} rows over {} window weeks",
        query.material_number,
        query.plant,
        query.site,
        query.start_week,
        rows.len(),
        full_window.len()
    );
    let series = waterfall::project(&rows, &full_window, query.horizon_weeks);
    let chart = report::chart_series(&full_window, query.horizon_weeks, &series);
    let table = report::waterfall_table(&rows, &full_window);
    AnalysisReport {
        material_number: query.material_number.clone(),
        plant: query.plant.clone(),
        site: query.site.clone(),
        start_week: query.start_week,
        horizon_weeks: query.horizon_weeks,
        window: full_window,
        chart,
        table,
    }
}
