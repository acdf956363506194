use wos_snapshot::week::WeekLabel;

/// Generate the ordered week window for a backtest.
///
/// The window spans `horizon_weeks` before the start week through
/// `horizon_weeks` after it, up to `2H+1` labels. Raw offsets outside
/// 1-52 wrap via [`WeekLabel::from_offset`]. When the window would reach
/// before week 1 of the cycle, the wrapped labels from the previous
/// cycle carry numbers larger than `start + horizon` and would read out
/// of order, so they are dropped: the window comes back front-clipped
/// and shorter instead.
pub fn backtest_window(start_week: WeekLabel, horizon_weeks: u8) -> Vec<WeekLabel> {
    let start = i32::from(start_week.number());
    let horizon = i32::from(horizon_weeks);
    let clips_front = start - horizon < 1;
    let upper_bound = start + horizon;

    let mut window = Vec::with_capacity((2 * horizon + 1) as usize);
    for i in 0..=2 * horizon {
        let label = WeekLabel::from_offset(start + i - horizon);
        if clips_front && i32::from(label.number()) > upper_bound {
            continue;
        }
        window.push(label);
    }
    window
}
