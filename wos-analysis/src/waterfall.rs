use crate::extract::ExtractedRow;
use wos_snapshot::record::Measure;
use wos_snapshot::week::WeekLabel;

/// Aligned actual and one-step-ahead projected Weeks-of-Stock series.
///
/// Both vectors are exactly `horizon_weeks + 1` long, index-aligned to
/// the historical portion of the backtest window, and never contain
/// gaps: the fallback rules below always resolve a value.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallSeries {
    pub actual: Vec<f64>,
    pub projected: Vec<f64>,
}

/// Reconstruct the forecast-vs-actual series from extracted rows.
///
/// Only the first `horizon_weeks + 1` window entries are charted (the
/// weeks up to and including the start week); the projection tail past
/// the start week is table-only. For each charted week:
///
/// - **actual** comes from the value the snapshot taken *in* that week
///   recorded for itself. Missing snapshot or value: week 0 seeds with
///   `0.0`, later weeks carry the previous actual forward.
/// - **projected** comes from the value the *previous* week's snapshot
///   recorded for the current week, the forecast made one week ahead.
///   Week 0 seeds from the actual; a missing forecast chains the
///   previous projection forward.
///
/// No snapshot is ever asked about a week after the one being charted,
/// so the series is an honest backtest over what was known at the time.
pub fn project(
    rows: &[ExtractedRow],
    full_window: &[WeekLabel],
    horizon_weeks: u8,
) -> WaterfallSeries {
    let chart_len = (usize::from(horizon_weeks) + 1).min(full_window.len());
    let chart_window = &full_window[..chart_len];
    let wos_rows: Vec<&ExtractedRow> = rows
        .iter()
        .filter(|row| row.measure == Measure::WeeksOfStock)
        .collect();
    let snapshot_row = |week: WeekLabel| wos_rows.iter().find(|row| row.snapshot == week);

    let mut actual: Vec<f64> = Vec::with_capacity(chart_len);
    let mut projected: Vec<f64> = Vec::with_capacity(chart_len);

    for (k, &week) in chart_window.iter().enumerate() {
        let measured = snapshot_row(week).and_then(|row| row.value_for(week));
        let actual_value = match measured {
            Some(value) => value,
            None if k == 0 => 0.0,
            None => actual[k - 1],
        };
        actual.push(actual_value);

        let projected_value = if k == 0 {
            actual[0]
        } else {
            let prev_week = chart_window[k - 1];
            let forecast = snapshot_row(prev_week).and_then(|row| row.value_for(week));
            match forecast {
                Some(value) => value,
                None => projected[k - 1],
            }
        };
        projected.push(projected_value);
    }

    WaterfallSeries { actual, projected }
}
