use thiserror::Error;
use wos_snapshot::record::MeasurementRecord;
use wos_snapshot::week::WeekLabel;
use wos_utils::weeks::WEEKS_PER_CYCLE;

/// Analysis-input validation errors.
///
/// A missing filter field is a caller mistake surfaced before any
/// computation; it is distinct from a valid query that matches no
/// records, which yields an empty result instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A required filter field was empty.
    #[error("missing filter criteria: {0}")]
    MissingFilter(&'static str),

    /// The horizon is outside the supported range.
    #[error("horizon of {0} weeks is outside the supported range 1-52")]
    HorizonOutOfRange(u8),
}

/// Immutable parameters of a single backtest reconstruction.
///
/// Constructed once per user-triggered analysis and passed into the
/// pure pipeline functions; there is no other query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery {
    pub material_number: String,
    pub plant: String,
    pub site: String,
    pub start_week: WeekLabel,
    pub horizon_weeks: u8,
}

impl AnalysisQuery {
    pub fn new(
        material_number: impl Into<String>,
        plant: impl Into<String>,
        site: impl Into<String>,
        start_week: WeekLabel,
        horizon_weeks: u8,
    ) -> Result<Self, AnalysisError> {
        let material_number = material_number.into();
        let plant = plant.into();
        let site = site.into();
        if material_number.trim().is_empty() {
            return Err(AnalysisError::MissingFilter("material number"));
        }
        if plant.trim().is_empty() {
            return Err(AnalysisError::MissingFilter("plant"));
        }
        if site.trim().is_empty() {
            return Err(AnalysisError::MissingFilter("site"));
        }
        if !(1..=WEEKS_PER_CYCLE).contains(&horizon_weeks) {
            return Err(AnalysisError::HorizonOutOfRange(horizon_weeks));
        }
        Ok(Self {
            material_number,
            plant,
            site,
            start_week,
            horizon_weeks,
        })
    }

    /// True when a record belongs to the queried material/plant/site.
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        record.material_number == self.material_number
            && record.plant == self.plant
            && record.site == self.site
    }
}
