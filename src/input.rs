use crate::core::units::max_days_in_month;
use crate::external_conditions::MonthlyTemperatures;
use anyhow::{anyhow, bail};
use itertools::Itertools;
use serde::Deserialize;
use serde_valid::Validate;
use std::io::{BufReader, Read};
use thiserror::Error;

pub fn ingest_for_processing(json: impl Read) -> Result<Input, anyhow::Error> {
    let input: Input = serde_json::from_reader(BufReader::new(json))?;
    Ok(input)
}

/// The input document: tunable parameters, the savings scenario and, optionally, the monthly data
/// itself. Monthly data supplied from outside the document (files or the reference dataset) takes
/// precedence over anything embedded here.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Input {
    #[serde(default)]
    #[validate]
    pub parameters: ModelParameters,
    #[serde(default)]
    #[validate]
    pub savings: SavingsScenario,
    pub monthly_records: Option<Vec<MonthlyRawRecord>>,
    pub monthly_temperatures: Option<MonthlyTemperatures>,
}

impl Input {
    /// Rejects parameters outside their documented domains. The engine itself trusts whatever
    /// it is given, so this has to happen before a run starts.
    pub fn validate_configuration(&self) -> Result<(), InvalidConfigurationError> {
        self.validate()
            .map_err(|errors| InvalidConfigurationError(errors.to_string()))
    }
}

/// Coefficients applied by the disaggregation engine.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(default, deny_unknown_fields)]
pub struct ModelParameters {
    /// Outdoor temperature above which air-conditioning load accrues, in deg C
    #[validate(minimum = 0.0)]
    #[validate(maximum = 50.0)]
    pub ac_base_temp: f64,
    /// Lighting and plug load per person-day, in kWh
    #[validate(minimum = 0.0)]
    pub lighting_weight: f64,
    /// Always-on consumption per month, in kWh
    #[validate(minimum = 0.0)]
    pub base_load: f64,
    /// Conversion from degree-person-days above the threshold to kWh of air-conditioning
    #[validate(minimum = 0.0)]
    pub cooling_coefficient: f64,
}

pub(crate) const REFERENCE_AC_BASE_TEMP: f64 = 23.0;
pub(crate) const REFERENCE_LIGHTING_WEIGHT: f64 = 1.15;
pub(crate) const REFERENCE_BASE_LOAD: f64 = 4164.0;
pub(crate) const REFERENCE_COOLING_COEFFICIENT: f64 = 0.29;

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            ac_base_temp: REFERENCE_AC_BASE_TEMP,
            lighting_weight: REFERENCE_LIGHTING_WEIGHT,
            base_load: REFERENCE_BASE_LOAD,
            cooling_coefficient: REFERENCE_COOLING_COEFFICIENT,
        }
    }
}

/// A proposed increase to the air-conditioning activation temperature.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(default, deny_unknown_fields)]
pub struct SavingsScenario {
    /// Increase applied to the activation temperature, in deg C
    #[validate(minimum = 0.0)]
    #[validate(maximum = 20.0)]
    pub delta: f64,
    /// Price per kWh used to value the saved energy
    #[validate(minimum = 0.0)]
    pub unit_price: f64,
}

impl Default for SavingsScenario {
    fn default() -> Self {
        Self {
            delta: 1.0,
            unit_price: 4.0,
        }
    }
}

/// Metered operational data for one calendar month.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Validate)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct MonthlyRawRecord {
    #[validate(minimum = 1)]
    #[validate(maximum = 12)]
    pub month: u32,
    /// kWh
    #[validate(minimum = 0.0)]
    pub total_energy: f64,
    /// kWh
    #[validate(minimum = 0.0)]
    pub hot_water_energy: f64,
    pub stay_days: u32,
    pub occupancy: u32,
}

/// Checks the data rules that hold for any monthly dataset: months within 1-12 and unique,
/// energies non-negative and stay days no more than the days in the month.
pub(crate) fn validate_monthly_records(records: &[MonthlyRawRecord]) -> anyhow::Result<()> {
    if records.is_empty() {
        bail!("At least one monthly record must be provided");
    }

    for record in records {
        record
            .validate()
            .map_err(|errors| anyhow!("Invalid record for month {}: {errors}", record.month))?;
        let max_days = max_days_in_month(record.month)
            .ok_or_else(|| anyhow!("Month {} is not a calendar month", record.month))?;
        if record.stay_days > max_days {
            bail!(
                "Month {} has {} stay days, but only {max_days} days are available",
                record.month,
                record.stay_days
            );
        }
    }

    if let Some(month) = records.iter().map(|record| record.month).duplicates().next() {
        bail!("Month {month} appears more than once in the monthly records");
    }

    Ok(())
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("Invalid configuration: {0}")]
pub struct InvalidConfigurationError(String);
