use crate::external_conditions::MonthlyTemperatures;
use crate::input::{Input, MonthlyRawRecord};
use anyhow::anyhow;

/// A source of the monthly operational data the engine works on.
pub trait DataProvider {
    fn monthly_records(&self) -> anyhow::Result<Vec<MonthlyRawRecord>>;
    fn monthly_temperatures(&self) -> anyhow::Result<MonthlyTemperatures>;
}

/// Monthly data that has already been loaded, e.g. from files or an input document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuppliedData {
    pub monthly_records: Vec<MonthlyRawRecord>,
    pub monthly_temperatures: MonthlyTemperatures,
}

impl DataProvider for SuppliedData {
    fn monthly_records(&self) -> anyhow::Result<Vec<MonthlyRawRecord>> {
        Ok(self.monthly_records.clone())
    }

    fn monthly_temperatures(&self) -> anyhow::Result<MonthlyTemperatures> {
        Ok(self.monthly_temperatures.clone())
    }
}

/// Monthly data given alongside an input document. Anything present here is used in preference
/// to the data embedded in the document.
#[derive(Clone, Debug, Default)]
pub struct ExternalData {
    pub monthly_records: Option<Vec<MonthlyRawRecord>>,
    pub monthly_temperatures: Option<MonthlyTemperatures>,
}

impl ExternalData {
    pub fn from_provider(provider: &impl DataProvider) -> anyhow::Result<Self> {
        Ok(Self {
            monthly_records: Some(provider.monthly_records()?),
            monthly_temperatures: Some(provider.monthly_temperatures()?),
        })
    }

    /// Resolves each kind of data from this external source first and the input document second.
    pub(crate) fn resolve_with(self, input: &Input) -> anyhow::Result<SuppliedData> {
        let monthly_records = self
            .monthly_records
            .or_else(|| input.monthly_records.clone())
            .ok_or_else(|| anyhow!("No monthly records were provided"))?;
        let monthly_temperatures = self
            .monthly_temperatures
            .or_else(|| input.monthly_temperatures.clone())
            .ok_or_else(|| anyhow!("No monthly temperatures were provided"))?;

        Ok(SuppliedData {
            monthly_records,
            monthly_temperatures,
        })
    }
}

const REFERENCE_OCCUPANCY: u32 = 653;

// month, total kWh, hot water kWh, stay days
const REFERENCE_RECORDS: [(u32, f64, f64, u32); 12] = [
    (1, 19521., 6192., 16),
    (2, 17634., 5885., 12),
    (3, 45606., 15274., 31),
    (4, 42192., 9843., 30),
    (5, 50989., 11635., 31),
    (6, 41913., 7142., 23),
    (7, 4682., 1123., 0),
    (8, 5681., 1084., 0),
    (9, 48200., 12650., 24),
    (10, 46000., 11500., 31),
    (11, 44000., 11000., 30),
    (12, 49000., 12000., 31),
];

const REFERENCE_AVG_TEMPS: [f64; 12] = [
    15.2, 15.6, 17.5, 21.2, 24.1, 27.2, 28.9, 28.7, 27.1, 24.1, 20.6, 16.9,
];

/// The 2024 operating year of the reference deployment: a residence hall with 653 occupants,
/// empty over July and August.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceData;

impl DataProvider for ReferenceData {
    fn monthly_records(&self) -> anyhow::Result<Vec<MonthlyRawRecord>> {
        Ok(REFERENCE_RECORDS
            .iter()
            .map(
                |&(month, total_energy, hot_water_energy, stay_days)| MonthlyRawRecord {
                    month,
                    total_energy,
                    hot_water_energy,
                    stay_days,
                    occupancy: REFERENCE_OCCUPANCY,
                },
            )
            .collect())
    }

    fn monthly_temperatures(&self) -> anyhow::Result<MonthlyTemperatures> {
        Ok((1..)
            .zip(REFERENCE_AVG_TEMPS)
            .collect::<MonthlyTemperatures>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validate_monthly_records;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_provide_a_full_valid_reference_year() {
        let records = ReferenceData.monthly_records().unwrap();
        let temperatures = ReferenceData.monthly_temperatures().unwrap();

        assert_eq!(records.len(), 12);
        assert!(validate_monthly_records(&records).is_ok());
        assert_eq!(temperatures.months().collect::<Vec<_>>(), (1..=12).collect::<Vec<_>>());
        assert_eq!(temperatures.avg_temp(6), Ok(27.2));
        assert_eq!(records[6].stay_days, 0);
        assert!(records.iter().all(|record| record.occupancy == 653));
    }

    #[fixture]
    fn embedded_input() -> Input {
        Input {
            monthly_records: Some(vec![MonthlyRawRecord {
                month: 3,
                total_energy: 100.,
                hot_water_energy: 10.,
                stay_days: 1,
                occupancy: 1,
            }]),
            monthly_temperatures: Some([(3, 17.5)].into_iter().collect()),
            ..Input::default()
        }
    }

    #[rstest]
    fn should_fall_back_to_data_in_input(embedded_input: Input) {
        let supplied = ExternalData::default().resolve_with(&embedded_input).unwrap();
        assert_eq!(supplied.monthly_records[0].month, 3);
        assert_eq!(supplied.monthly_temperatures.avg_temp(3), Ok(17.5));
    }

    #[rstest]
    fn should_prefer_external_data(embedded_input: Input) {
        let supplied = ExternalData::from_provider(&ReferenceData)
            .unwrap()
            .resolve_with(&embedded_input)
            .unwrap();
        assert_eq!(supplied.monthly_records.len(), 12);
        assert_eq!(supplied.monthly_temperatures.len(), 12);
    }

    #[rstest]
    fn should_mix_external_temperatures_with_embedded_records(embedded_input: Input) {
        let external = ExternalData {
            monthly_temperatures: Some([(3, 18.0)].into_iter().collect()),
            ..ExternalData::default()
        };
        let supplied = external.resolve_with(&embedded_input).unwrap();
        assert_eq!(supplied.monthly_records.len(), 1);
        assert_eq!(supplied.monthly_temperatures.avg_temp(3), Ok(18.0));
    }

    #[rstest]
    fn should_fail_without_any_records() {
        let err = ExternalData::default()
            .resolve_with(&Input::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "No monthly records were provided");
    }
}
