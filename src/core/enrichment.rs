use crate::external_conditions::{MissingTemperatureDataError, MonthlyTemperatures};
use crate::input::MonthlyRawRecord;

/// A monthly record joined with its average outdoor temperature and occupancy intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnrichedRecord {
    pub month: u32,
    pub total_energy: f64,
    pub hot_water_energy: f64,
    pub stay_days: u32,
    pub occupancy: u32,
    pub avg_temp: f64,
    pub person_days: u64,
}

impl EnrichedRecord {
    pub fn new(
        record: &MonthlyRawRecord,
        temperatures: &MonthlyTemperatures,
    ) -> Result<Self, MissingTemperatureDataError> {
        let MonthlyRawRecord {
            month,
            total_energy,
            hot_water_energy,
            stay_days,
            occupancy,
        } = *record;

        Ok(Self {
            month,
            total_energy,
            hot_water_energy,
            stay_days,
            occupancy,
            avg_temp: temperatures.avg_temp(month)?,
            person_days: stay_days as u64 * occupancy as u64,
        })
    }
}

/// Joins every record with the temperature for its month, keeping the input order.
///
/// Fails on the first month that has no temperature; no partial result is returned.
pub fn enrich_monthly_records(
    records: &[MonthlyRawRecord],
    temperatures: &MonthlyTemperatures,
) -> Result<Vec<EnrichedRecord>, MissingTemperatureDataError> {
    records
        .iter()
        .map(|record| EnrichedRecord::new(record, temperatures))
        .collect()
}
