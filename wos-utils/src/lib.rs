//! Shared utility functions for WOS crates.

/// Calendar week helpers
pub mod weeks {
    use chrono::{Datelike, NaiveDate};

    /// Number of calendar weeks in the snapshot cycle.
    pub const WEEKS_PER_CYCLE: u8 = 52;

    /// Format a calendar week number as "WWnn"
    pub fn format_week(week: u8) -> String {
        format!("WW{week:02}")
    }

    /// Parse a week string in "WWnn" format into a week number in 1-52.
    pub fn parse_week(s: &str) -> anyhow::Result<u8> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("WW")
            .or_else(|| trimmed.strip_prefix("ww"))
            .ok_or_else(|| anyhow::anyhow!("week label must start with WW: {trimmed:?}"))?;
        let number: u8 = digits
            .parse()
            .map_err(|_| anyhow::anyhow!("non-numeric week label: {trimmed:?}"))?;
        if !(1..=WEEKS_PER_CYCLE).contains(&number) {
            anyhow::bail!("week number out of range 1-52: {number}");
        }
        Ok(number)
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Get the calendar week (1-52) for a given date.
    /// ISO week 53 is folded into week 52 to preserve the fixed 52-week cycle.
    pub fn week_of_date(date: &NaiveDate) -> u8 {
        let iso = date.iso_week().week() as u8;
        iso.min(WEEKS_PER_CYCLE)
    }

}
