use crate::core::disaggregation::{annual_totals, disaggregate, AnnualTotals, DisaggregatedRecord};
use crate::core::enrichment::{enrich_monthly_records, EnrichedRecord};
use crate::core::savings::{simulate_ac_threshold_increase, SavingsResult};
use crate::core::units::MONTHS_PER_YEAR;
use crate::data_provider::DataProvider;
use crate::errors::DisaggregationError;
use crate::input::{validate_monthly_records, Input, ModelParameters, SavingsScenario};
use tracing::{debug, warn};

/// Everything the engine needs for a run, checked and joined up front so that running cannot fail.
#[derive(Clone, Debug)]
pub struct Corpus {
    pub(crate) parameters: ModelParameters,
    pub(crate) savings_scenario: SavingsScenario,
    pub(crate) enriched_records: Vec<EnrichedRecord>,
}

impl Corpus {
    pub fn from_inputs(
        input: &Input,
        data_provider: &impl DataProvider,
    ) -> Result<Self, DisaggregationError> {
        input.validate_configuration()?;

        let records = data_provider.monthly_records()?;
        validate_monthly_records(&records)?;
        if records.len() < MONTHS_PER_YEAR {
            warn!(
                months = records.len(),
                "Fewer than twelve monthly records were provided; annual totals cover a part year"
            );
        }

        let temperatures = data_provider.monthly_temperatures()?;
        temperatures.validate()?;
        let enriched_records = enrich_monthly_records(&records, &temperatures)?;

        Ok(Self {
            parameters: input.parameters,
            savings_scenario: input.savings,
            enriched_records,
        })
    }

    pub fn run(&self) -> RunResults {
        let records = disaggregate(&self.enriched_records, &self.parameters);

        for record in &records {
            debug!(
                month = record.month,
                lighting = record.lighting,
                ac = record.ac,
                hot_water = record.hot_water_energy,
                base_load = record.base_load,
                other = record.other,
                "Disaggregated month"
            );
            if !is_close!(record.over_attribution(), 0., rel_tol = 1e-09, abs_tol = 1e-10) {
                warn!(
                    month = record.month,
                    over_attribution = record.over_attribution(),
                    "Accounted end uses exceed metered total; residual floored at zero"
                );
            }
        }

        let annual_totals = annual_totals(&records);
        let savings = simulate_ac_threshold_increase(
            &records,
            &self.parameters,
            self.savings_scenario.delta,
        );

        RunResults {
            parameters: self.parameters,
            savings_scenario: self.savings_scenario,
            records,
            annual_totals,
            savings,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunResults {
    pub parameters: ModelParameters,
    pub savings_scenario: SavingsScenario,
    pub records: Vec<DisaggregatedRecord>,
    pub annual_totals: AnnualTotals,
    pub savings: SavingsResult,
}

impl RunResults {
    pub fn cost_saving(&self) -> f64 {
        self.savings.cost_saving(self.savings_scenario.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::{ReferenceData, SuppliedData};
    use crate::input::MonthlyRawRecord;
    use crate::tests::capture_warnings;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn should_build_from_reference_data() {
        let corpus = Corpus::from_inputs(&Input::default(), &ReferenceData).unwrap();
        assert_eq!(corpus.enriched_records.len(), 12);
        assert_eq!(corpus.enriched_records[5].person_days, 15019);
        assert_eq!(corpus.parameters, ModelParameters::default());
    }

    #[rstest]
    fn should_reject_invalid_configuration_before_touching_data() {
        let input = Input {
            parameters: ModelParameters {
                base_load: -1.,
                ..ModelParameters::default()
            },
            ..Input::default()
        };
        let err = Corpus::from_inputs(&input, &SuppliedData::default()).unwrap_err();
        assert!(matches!(err, DisaggregationError::InvalidConfiguration(_)));
    }

    #[rstest]
    fn should_fail_on_missing_temperature() {
        let data = SuppliedData {
            monthly_records: vec![MonthlyRawRecord {
                month: 2,
                total_energy: 17634.,
                hot_water_energy: 5885.,
                stay_days: 12,
                occupancy: 653,
            }],
            monthly_temperatures: [(1, 15.2)].into_iter().collect(),
        };
        let err = Corpus::from_inputs(&Input::default(), &data).unwrap_err();
        match err {
            DisaggregationError::MissingTemperatureData(err) => assert_eq!(err.month(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn should_reject_invalid_records_as_invalid_request() {
        let record = MonthlyRawRecord {
            month: 4,
            total_energy: 1.,
            hot_water_energy: 0.,
            stay_days: 1,
            occupancy: 1,
        };
        let data = SuppliedData {
            monthly_records: vec![record, record],
            monthly_temperatures: [(4, 21.2)].into_iter().collect(),
        };
        let err = Corpus::from_inputs(&Input::default(), &data).unwrap_err();
        assert!(matches!(err, DisaggregationError::InvalidRequest(_)));
    }

    #[rstest]
    fn should_give_identical_results_on_repeated_runs() {
        let corpus = Corpus::from_inputs(&Input::default(), &ReferenceData).unwrap();
        assert_eq!(corpus.run(), corpus.run());
    }

    #[rstest]
    fn should_warn_for_each_over_attributed_month() {
        let corpus = Corpus::from_inputs(&Input::default(), &ReferenceData).unwrap();
        let logs = capture_warnings(|| {
            corpus.run();
        });

        let warned_months = logs
            .lines()
            .filter(|line| line.contains("residual floored at zero"))
            .map(|line| {
                line.split_whitespace()
                    .find_map(|field| field.strip_prefix("month="))
                    .unwrap()
                    .to_string()
            })
            .collect::<Vec<_>>();
        assert_eq!(warned_months, vec!["1", "2", "6", "7", "9"]);
    }

    #[rstest]
    fn should_not_warn_when_residual_is_positive() {
        let data = SuppliedData {
            monthly_records: vec![MonthlyRawRecord {
                month: 4,
                total_energy: 42192.,
                hot_water_energy: 9843.,
                stay_days: 0,
                occupancy: 653,
            }],
            monthly_temperatures: [(4, 21.2)].into_iter().collect(),
        };
        let corpus = Corpus::from_inputs(&Input::default(), &data).unwrap();
        let logs = capture_warnings(|| {
            corpus.run();
        });
        assert!(!logs.contains("residual floored at zero"), "{logs}");
    }

    #[rstest]
    fn should_warn_about_part_year_data() {
        let data = SuppliedData {
            monthly_records: vec![MonthlyRawRecord {
                month: 6,
                total_energy: 41913.,
                hot_water_energy: 7142.,
                stay_days: 23,
                occupancy: 653,
            }],
            monthly_temperatures: [(6, 27.2)].into_iter().collect(),
        };
        let logs = capture_warnings(|| {
            Corpus::from_inputs(&Input::default(), &data).unwrap();
        });
        assert!(logs.contains("Fewer than twelve monthly records"), "{logs}");
        assert!(logs.contains("months=1"), "{logs}");
    }

    #[rstest]
    fn should_not_warn_about_a_full_year() {
        let logs = capture_warnings(|| {
            Corpus::from_inputs(&Input::default(), &ReferenceData).unwrap();
        });
        assert!(!logs.contains("Fewer than twelve"), "{logs}");
    }
}
