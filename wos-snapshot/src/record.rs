use crate::week::WeekLabel;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wos_utils::weeks;

/// Fixed leading columns of a snapshot export. Either the week column or
/// the date column identifies the upload's calendar week; the remaining
/// headers are the "WWnn" projection columns.
pub const SNAPSHOT_WEEK_COLUMN: &str = "SNAPSHOT_WEEK";
pub const SNAPSHOT_DATE_COLUMN: &str = "SNAPSHOT_DATE";
pub const MATERIAL_COLUMN: &str = "MATERIAL_NUMBER";
pub const PLANT_COLUMN: &str = "PLANT";
pub const SITE_COLUMN: &str = "SITE";
pub const MEASURE_COLUMN: &str = "MEASURE";
pub const INVENTORY_COLUMN: &str = "INVENTORY_ON_HAND";

/// The category of quantity a measurement record reports.
///
/// `NotApplicable` stands in for absent or unrecognized measure labels;
/// such records never pass the extraction filter.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Measure {
    DemandWithoutBuffer,
    Supply,
    Expired,
    EndOfHandWithoutBuffer,
    EndOfHandWithBuffer,
    WeeksOfStock,
    NotApplicable,
}

impl Measure {
    /// Parse a measure label from a snapshot export. Anything outside the
    /// known set (including an empty cell) maps to `NotApplicable`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "DemandWithoutBuffer" => Measure::DemandWithoutBuffer,
            "Supply" => Measure::Supply,
            "Expired" => Measure::Expired,
            "EndOfHandWithoutBuffer" => Measure::EndOfHandWithoutBuffer,
            "EndOfHandWithBuffer" => Measure::EndOfHandWithBuffer,
            "WeeksOfStock" => Measure::WeeksOfStock,
            _ => Measure::NotApplicable,
        }
    }

    /// The export label for this measure.
    pub fn label(self) -> &'static str {
        match self {
            Measure::DemandWithoutBuffer => "DemandWithoutBuffer",
            Measure::Supply => "Supply",
            Measure::Expired => "Expired",
            Measure::EndOfHandWithoutBuffer => "EndOfHandWithoutBuffer",
            Measure::EndOfHandWithBuffer => "EndOfHandWithBuffer",
            Measure::WeeksOfStock => "WeeksOfStock",
            Measure::NotApplicable => "N/A",
        }
    }

    /// True for the measures that survive extraction.
    pub fn is_reportable(self) -> bool {
        self != Measure::NotApplicable
    }
}

/// One row of a weekly inventory snapshot: what a single upload recorded
/// for one material/plant/site and measure.
///
/// `values` is sparse: an absent week key means the record carried no
/// value for that week, which is distinct from a recorded `0.0`. The
/// record's own snapshot week (when present) holds the realized value as
/// of the upload; later weeks hold that upload's projections.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub material_number: String,
    pub plant: String,
    pub site: String,
    pub measure: Measure,
    pub inventory_on_hand: Option<f64>,
    pub values: BTreeMap<WeekLabel, f64>,
}

impl MeasurementRecord {
    /// The recorded value for a week, or `None` where the export cell
    /// was empty.
    pub fn value_for(&self, week: WeekLabel) -> Option<f64> {
        self.values.get(&week).copied()
    }
}

/// Column layout of a snapshot export, derived from its header row.
///
/// Week-labeled headers are validated up front so malformed "WWnn"
/// labels are rejected at the store boundary rather than surfacing as
/// silent gaps later. Unrecognized non-week headers are ignored.
#[derive(Debug, Clone)]
pub struct ExportLayout {
    snapshot_week: Option<usize>,
    snapshot_date: Option<usize>,
    material: usize,
    plant: usize,
    site: usize,
    measure: usize,
    inventory: Option<usize>,
    week_columns: Vec<(usize, WeekLabel)>,
}

impl ExportLayout {
    pub fn from_headers(headers: &StringRecord) -> anyhow::Result<Self> {
        let mut snapshot_week = None;
        let mut snapshot_date = None;
        let mut material = None;
        let mut plant = None;
        let mut site = None;
        let mut measure = None;
        let mut inventory = None;
        let mut week_columns = Vec::new();

        for (index, raw) in headers.iter().enumerate() {
            let header = raw.trim();
            match header {
                SNAPSHOT_WEEK_COLUMN => snapshot_week = Some(index),
                SNAPSHOT_DATE_COLUMN => snapshot_date = Some(index),
                MATERIAL_COLUMN => material = Some(index),
                PLANT_COLUMN => plant = Some(index),
                SITE_COLUMN => site = Some(index),
                MEASURE_COLUMN => measure = Some(index),
                INVENTORY_COLUMN => inventory = Some(index),
                _ if header.starts_with("WW") || header.starts_with("ww") => {
                    let week = WeekLabel::parse(header)
                        .map_err(|e| anyhow::anyhow!("bad week column {header:?}: {e}"))?;
                    week_columns.push((index, week));
                }
                _ => log::debug!("ignoring unrecognized export column {header:?}"),
            }
        }

        if snapshot_week.is_none() && snapshot_date.is_none() {
            anyhow::bail!(
                "export header needs a {SNAPSHOT_WEEK_COLUMN} or {SNAPSHOT_DATE_COLUMN} column"
            );
        }
        let missing_fixed = |name: &'static str| anyhow::anyhow!("export header missing {name}");
        Ok(Self {
            snapshot_week,
            snapshot_date,
            material: material.ok_or_else(|| missing_fixed(MATERIAL_COLUMN))?,
            plant: plant.ok_or_else(|| missing_fixed(PLANT_COLUMN))?,
            site: site.ok_or_else(|| missing_fixed(SITE_COLUMN))?,
            measure: measure.ok_or_else(|| missing_fixed(MEASURE_COLUMN))?,
            inventory,
            week_columns,
        })
    }

    /// The calendar week a data row belongs to, from the week column when
    /// present, otherwise derived from the upload date.
    pub fn snapshot_week(&self, row: &StringRecord) -> anyhow::Result<WeekLabel> {
        if let Some(index) = self.snapshot_week {
            if let Some(cell) = row.get(index).map(str::trim) {
                if !cell.is_empty() {
                    return WeekLabel::parse(cell);
                }
            }
        }
        if let Some(index) = self.snapshot_date {
            if let Some(cell) = row.get(index).map(str::trim) {
                if !cell.is_empty() {
                    let date = weeks::parse_date(cell)?;
                    let number = weeks::week_of_date(&date);
                    return WeekLabel::new(number)
                        .ok_or_else(|| anyhow::anyhow!("date {cell} maps outside 1-52"));
                }
            }
        }
        anyhow::bail!("row has neither a snapshot week nor a snapshot date")
    }

    /// Convert one data row into a [`MeasurementRecord`].
    ///
    /// Empty week cells stay absent; cells that do not parse as numbers
    /// are treated the same as empty.
    pub fn parse_record(&self, row: &StringRecord) -> anyhow::Result<MeasurementRecord> {
        let field = |index: usize, name: &'static str| -> anyhow::Result<String> {
            let cell = row
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("row too short, missing {name}"))?;
            Ok(cell.trim().to_string())
        };

        let material_number = field(self.material, MATERIAL_COLUMN)?;
        let plant = field(self.plant, PLANT_COLUMN)?;
        let site = field(self.site, SITE_COLUMN)?;
        let measure = Measure::from_label(&field(self.measure, MEASURE_COLUMN)?);
        let inventory_on_hand = self
            .inventory
            .and_then(|index| row.get(index))
            .and_then(parse_numeric_cell);

        let mut values = BTreeMap::new();
        for (index, week) in &self.week_columns {
            if let Some(value) = row.get(*index).and_then(parse_numeric_cell) {
                values.insert(*week, value);
            }
        }

        Ok(MeasurementRecord {
            material_number,
            plant,
            site,
            measure,
            inventory_on_hand,
            values,
        })
    }
}

fn parse_numeric_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{ExportLayout, Measure};
    use crate::week::WeekLabel;
    use csv::ReaderBuilder;

    const STR_EXPORT: &str = "\
SNAPSHOT_WEEK,MATERIAL_NUMBER,PLANT,SITE,MEASURE,INVENTORY_ON_HAND,WW08,WW09,WW10
WW08,M-1001,P01,S01,WeeksOfStock,120,5,4,3
WW08,M-1001,P01,S01,Supply,,40,,35
WW08,M-1001,P01,S01,SomethingElse,7,1,2,3
";

    fn week(n: u8) -> WeekLabel {
        WeekLabel::new(n).unwrap()
    }

    #[test]
    fn test_measure_labels() {
        assert_eq!(Measure::from_label("WeeksOfStock"), Measure::WeeksOfStock);
        assert_eq!(Measure::from_label(" Supply "), Measure::Supply);
        assert_eq!(Measure::from_label(""), Measure::NotApplicable);
        assert_eq!(Measure::from_label("Bogus"), Measure::NotApplicable);
        assert!(!Measure::NotApplicable.is_reportable());
        assert!(Measure::WeeksOfStock.is_reportable());
    }

    #[test]
    fn test_layout_and_record_parse() {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(STR_EXPORT.as_bytes());
        let layout = ExportLayout::from_headers(rdr.headers().unwrap()).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();

        let wos = layout.parse_record(&rows[0]).unwrap();
        assert_eq!(layout.snapshot_week(&rows[0]).unwrap(), week(8));
        assert_eq!(wos.material_number, "M-1001");
        assert_eq!(wos.measure, Measure::WeeksOfStock);
        assert_eq!(wos.inventory_on_hand, Some(120.0));
        assert_eq!(wos.value_for(week(8)), Some(5.0));
        assert_eq!(wos.value_for(week(10)), Some(3.0));
        assert_eq!(wos.value_for(week(11)), None);
    }

    #[test]
    fn test_empty_cells_stay_absent() {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(STR_EXPORT.as_bytes());
        let layout = ExportLayout::from_headers(rdr.headers().unwrap()).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();

        let supply = layout.parse_record(&rows[1]).unwrap();
        assert_eq!(supply.inventory_on_hand, None);
        assert_eq!(supply.value_for(week(9)), None);
        assert_eq!(supply.value_for(week(8)), Some(40.0));
    }

    #[test]
    fn test_unknown_measure_becomes_not_applicable() {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(STR_EXPORT.as_bytes());
        let layout = ExportLayout::from_headers(rdr.headers().unwrap()).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();

        let other = layout.parse_record(&rows[2]).unwrap();
        assert_eq!(other.measure, Measure::NotApplicable);
    }

    #[test]
    fn test_bad_week_header_rejected() {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader("SNAPSHOT_WEEK,MATERIAL_NUMBER,PLANT,SITE,MEASURE,WW99\n".as_bytes());
        assert!(ExportLayout::from_headers(rdr.headers().unwrap()).is_err());
    }

    #[test]
    fn test_missing_fixed_column_rejected() {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader("SNAPSHOT_WEEK,MATERIAL_NUMBER,PLANT,MEASURE,WW01\n".as_bytes());
        assert!(ExportLayout::from_headers(rdr.headers().unwrap()).is_err());
    }

    #[test]
    fn test_snapshot_date_fallback() {
        let data = "\
SNAPSHOT_DATE,MATERIAL_NUMBER,PLANT,SITE,MEASURE,WW03
2024-01-15,M-1001,P01,S01,Supply,12
";
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let layout = ExportLayout::from_headers(rdr.headers().unwrap()).unwrap();
        let row = rdr.records().next().unwrap().unwrap();
        // 2024-01-15 falls in ISO week 3
        assert_eq!(layout.snapshot_week(&row).unwrap(), week(3));
    }
}
