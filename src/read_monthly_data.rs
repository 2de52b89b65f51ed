use crate::external_conditions::MonthlyTemperatures;
use crate::input::MonthlyRawRecord;
use anyhow::{bail, Context};
use csv::ReaderBuilder as CsvReaderBuilder;
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::Read;

/// Reads monthly records from CSV with the header
/// `month,total_energy,hot_water_energy,stay_days,occupancy`.
pub fn monthly_records_from_csv(file: impl Read) -> anyhow::Result<Vec<MonthlyRawRecord>> {
    let mut reader = CsvReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    reader
        .deserialize::<MonthlyRawRecord>()
        .enumerate()
        .map(|(i, result)| {
            // header is line 1
            result.with_context(|| format!("Could not read monthly record on line {}", i + 2))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TemperatureRow {
    month: u32,
    avg_temp: f64,
}

/// Reads the month to average outdoor temperature lookup from CSV with the header
/// `month,avg_temp`.
pub fn monthly_temperatures_from_csv(file: impl Read) -> anyhow::Result<MonthlyTemperatures> {
    let mut reader = CsvReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut avg_temps: IndexMap<u32, f64> = IndexMap::new();

    for (i, result) in reader.deserialize::<TemperatureRow>().enumerate() {
        let TemperatureRow { month, avg_temp } = result
            .with_context(|| format!("Could not read temperature on line {}", i + 2))?;
        if avg_temps.insert(month, avg_temp).is_some() {
            bail!("Temperature for month {month} is given more than once");
        }
    }

    Ok(MonthlyTemperatures::new(avg_temps))
}
