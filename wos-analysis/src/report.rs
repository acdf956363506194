//! Serializable report payloads for the chart and table collaborators.
//!
//! The renderers only style what they are given: the chart receives two
//! named parallel-array series, the table receives rows whose cells
//! already carry their suppression verdict. Neither payload may be
//! re-filtered downstream.

use crate::extract::ExtractedRow;
use crate::mask;
use crate::waterfall::WaterfallSeries;
use serde::Serialize;
use wos_snapshot::record::Measure;
use wos_snapshot::week::WeekLabel;

/// Series names surfaced to the chart collaborator.
pub const ACTUAL_SERIES_NAME: &str = "Actual Weeks of Stock";
pub const PREDICTED_SERIES_NAME: &str = "Predicted Weeks of Stock";

/// A named chart series as parallel x/y arrays of equal length.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub x: Vec<WeekLabel>,
    pub y: Vec<f64>,
}

/// One waterfall table cell: the recorded value (if any) and the
/// suppression verdict the renderer must honor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableCell {
    pub week: WeekLabel,
    pub value: Option<f64>,
    pub suppressed: bool,
}

/// One waterfall table row: a snapshot's values for one measure across
/// the backtest window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub snapshot: WeekLabel,
    pub measure: Measure,
    pub inventory_on_hand: Option<f64>,
    pub cells: Vec<TableCell>,
}

/// Complete payload of one analysis run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisReport {
    pub material_number: String,
    pub plant: String,
    pub site: String,
    pub start_week: WeekLabel,
    pub horizon_weeks: u8,
    pub window: Vec<WeekLabel>,
    pub chart: Vec<ChartSeries>,
    pub table: Vec<TableRow>,
}

/// Build the two named chart series over the charted (historical)
/// portion of the window.
pub fn chart_series(
    full_window: &[WeekLabel],
    horizon_weeks: u8,
    series: &WaterfallSeries,
) -> Vec<ChartSeries> {
    let chart_len = (usize::from(horizon_weeks) + 1).min(full_window.len());
    let chart_window = full_window[..chart_len].to_vec();
    vec![
        ChartSeries {
            name: ACTUAL_SERIES_NAME.to_string(),
            x: chart_window.clone(),
            y: series.actual.clone(),
        },
        ChartSeries {
            name: PREDICTED_SERIES_NAME.to_string(),
            x: chart_window,
            y: series.projected.clone(),
        },
    ]
}

/// Pair every extracted row with per-cell suppression verdicts across
/// the full window.
pub fn waterfall_table(rows: &[ExtractedRow], full_window: &[WeekLabel]) -> Vec<TableRow> {
    rows.iter()
        .map(|row| TableRow {
            snapshot: row.snapshot,
            measure: row.measure,
            inventory_on_hand: row.inventory_on_hand,
            cells: full_window
                .iter()
                .enumerate()
                .map(|(column_index, &week)| TableCell {
                    week,
                    value: row.value_for(week),
                    suppressed: mask::is_suppressed(row.snapshot, column_index, full_window),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{chart_series, waterfall_table, ACTUAL_SERIES_NAME, PREDICTED_SERIES_NAME};
    use crate::extract::ExtractedRow;
    use crate::waterfall::WaterfallSeries;
    use crate::window::backtest_window;
    use wos_snapshot::record::Measure;
    use wos_snapshot::week::WeekLabel;

    fn week(n: u8) -> WeekLabel {
        WeekLabel::new(n).unwrap()
    }

    fn wos_row(snapshot: u8, values: &[(u8, f64)]) -> ExtractedRow {
        ExtractedRow {
            snapshot: week(snapshot),
            measure: Measure::WeeksOfStock,
            inventory_on_hand: Some(100.0),
            values: values.iter().map(|(w, v)| (week(*w), *v)).collect(),
        }
    }

    #[test]
    fn test_chart_series_names_and_lengths() {
        let window = backtest_window(week(10), 2);
        let series = WaterfallSeries {
            actual: vec![5.0, 4.5, 5.0],
            projected: vec![5.0, 4.0, 4.0],
        };
        let chart = chart_series(&window, 2, &series);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].name, ACTUAL_SERIES_NAME);
        assert_eq!(chart[1].name, PREDICTED_SERIES_NAME);
        for s in &chart {
            assert_eq!(s.x.len(), 3);
            assert_eq!(s.x.len(), s.y.len());
        }
        // x axis stops at the start week; the projection tail is not charted
        assert_eq!(chart[0].x.last().unwrap(), &week(10));
    }

    #[test]
    fn test_table_cells_carry_mask_verdicts() {
        let window = backtest_window(week(10), 2); // WW08..WW12
        let rows = vec![wos_row(10, &[(10, 5.0), (11, 4.5), (12, 4.0)])];
        let table = waterfall_table(&rows, &window);
        assert_eq!(table.len(), 1);
        let cells = &table[0].cells;
        assert_eq!(cells.len(), window.len());

        let suppressed: Vec<bool> = cells.iter().map(|c| c.suppressed).collect();
        assert_eq!(suppressed, [true, true, false, false, false]);

        assert_eq!(cells[2].value, Some(5.0));
        // empty cells stay empty even when unsuppressed
        assert_eq!(cells[0].value, None);
    }

    #[test]
    fn test_report_serializes_weeks_as_labels() {
        let window = backtest_window(week(10), 1);
        let rows = vec![wos_row(10, &[(10, 5.0)])];
        let table = waterfall_table(&rows, &window);
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"snapshot\":\"WW10\""));
        assert!(json.contains("\"suppressed\""));
    }
}
