use wos_snapshot::week::WeekLabel;

/// Decide whether a waterfall table cell holds a stale, superseded
/// value.
///
/// Columns follow the backtest window order. The last column is never
/// suppressed. Any other cell is suppressed exactly when its row's
/// snapshot week is at or past the *next* column's week: a later
/// snapshot has already superseded the value for that week, so the row
/// shows only its own diagonal cell and the projection tail beyond it.
/// Stacking rows oldest to newest yields the waterfall staircase.
pub fn is_suppressed(snapshot: WeekLabel, column_index: usize, full_window: &[WeekLabel]) -> bool {
    if full_window.is_empty() || column_index >= full_window.len() - 1 {
        return false;
    }
    let cutoff = full_window[column_index + 1].number();
    snapshot.number() >= cutoff
}
