use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use wos_utils::weeks;

/// A calendar week in the fixed 1-52 snapshot cycle, formatted "WWnn".
///
/// There is no year component: two weeks twelve months apart with the
/// same number are indistinguishable. The snapshot log itself keys
/// uploads by week number alone, so the conflation is inherited here
/// rather than papered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekLabel(u8);

impl WeekLabel {
    /// Construct from a week number, rejecting anything outside 1-52.
    pub fn new(number: u8) -> Option<Self> {
        (1..=weeks::WEEKS_PER_CYCLE)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Map an arbitrary raw week offset into the 1-52 cycle.
    ///
    /// Values <= 0 wrap into the previous cycle and values > 52 into the
    /// next one: 0 -> 52, -1 -> 51, 53 -> 1, 104 -> 52.
    pub fn from_offset(raw: i32) -> Self {
        let wrapped = (raw - 1).rem_euclid(i32::from(weeks::WEEKS_PER_CYCLE)) + 1;
        Self(wrapped as u8)
    }

    /// Parse a "WWnn" label.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        weeks::parse_week(s).map(Self)
    }

    /// The week number, always in 1-52.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based bucket index of this week in a
    /// [`SnapshotStore`](crate::store::SnapshotStore), always in 0-51.
    pub fn bucket_index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WW{:02}", self.0)
    }
}

impl Serialize for WeekLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WeekLabel::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::WeekLabel;

    #[test]
    fn test_new_bounds() {
        assert!(WeekLabel::new(0).is_none());
        assert!(WeekLabel::new(53).is_none());
        assert_eq!(WeekLabel::new(1).unwrap().number(), 1);
        assert_eq!(WeekLabel::new(52).unwrap().number(), 52);
    }

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(WeekLabel::new(8).unwrap().to_string(), "WW08");
        assert_eq!(WeekLabel::new(52).unwrap().to_string(), "WW52");
    }

    #[test]
    fn test_parse_round_trip() {
        let week = WeekLabel::parse("WW31").unwrap();
        assert_eq!(week.number(), 31);
        assert_eq!(WeekLabel::parse(&week.to_string()).unwrap(), week);
    }

    #[test]
    fn test_from_offset_is_total() {
        // every raw offset lands in 1-52
        for raw in -120..=120 {
            let number = WeekLabel::from_offset(raw).number();
            assert!((1..=52).contains(&number), "raw {raw} gave {number}");
        }
    }

    #[test]
    fn test_from_offset_wraps_previous_cycle() {
        assert_eq!(WeekLabel::from_offset(0).number(), 52);
        assert_eq!(WeekLabel::from_offset(-1).number(), 51);
        assert_eq!(WeekLabel::from_offset(-51).number(), 1);
        assert_eq!(WeekLabel::from_offset(-52).number(), 52);
    }

    #[test]
    fn test_from_offset_wraps_next_cycle() {
        assert_eq!(WeekLabel::from_offset(53).number(), 1);
        assert_eq!(WeekLabel::from_offset(104).number(), 52);
        assert_eq!(WeekLabel::from_offset(105).number(), 1);
    }

    #[test]
    fn test_from_offset_identity_in_range() {
        for n in 1..=52 {
            assert_eq!(WeekLabel::from_offset(n).number(), n as u8);
        }
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(WeekLabel::new(1).unwrap().bucket_index(), 0);
        assert_eq!(WeekLabel::new(52).unwrap().bucket_index(), 51);
    }

    #[test]
    fn test_serde_as_label_string() {
        let week = WeekLabel::new(7).unwrap();
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(json, "\"WW07\"");
        let back: WeekLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, week);
    }
}
