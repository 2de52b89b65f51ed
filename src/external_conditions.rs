use anyhow::bail;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Average outdoor air temperature for each calendar month, keyed by month number (1-12).
///
/// The lookup is read-only once built. Months are not required to be contiguous, but any month
/// present in the monthly records must have an entry here for the records to be enriched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct MonthlyTemperatures(IndexMap<u32, f64>);

impl MonthlyTemperatures {
    pub fn new(avg_temps_by_month: IndexMap<u32, f64>) -> Self {
        Self(avg_temps_by_month)
    }

    pub fn avg_temp(&self, month: u32) -> Result<f64, MissingTemperatureDataError> {
        self.0
            .get(&month)
            .copied()
            .ok_or(MissingTemperatureDataError { month })
    }

    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejects an empty lookup and any temperature that is not a finite number.
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.is_empty() {
            bail!("At least one monthly temperature must be provided");
        }
        if let Some((month, avg_temp)) = self.0.iter().find(|(_, avg_temp)| !avg_temp.is_finite()) {
            bail!("Average temperature for month {month} is not a finite number: {avg_temp}");
        }

        Ok(())
    }
}

impl FromIterator<(u32, f64)> for MonthlyTemperatures {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("No average outdoor temperature was provided for month {month}")]
pub struct MissingTemperatureDataError {
    month: u32,
}

impl MissingTemperatureDataError {
    pub fn month(&self) -> u32 {
        self.month
    }
}
