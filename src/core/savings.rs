use crate::core::disaggregation::{ac_factor, DisaggregatedRecord};
use crate::input::ModelParameters;

/// Air-conditioning energy for one month before and after raising the activation temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonthlyAcSaving {
    pub month: u32,
    pub old_ac: f64,
    pub new_ac: f64,
}

impl MonthlyAcSaving {
    pub fn saved_energy(&self) -> f64 {
        self.old_ac - self.new_ac
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SavingsResult {
    pub ac_base_temp: f64,
    pub delta: f64,
    pub old_ac_total: f64,
    pub new_ac_total: f64,
    pub monthly: Vec<MonthlyAcSaving>,
}

impl SavingsResult {
    /// Never negative for a non-negative delta, as no month's temperature excess can grow.
    pub fn saved_energy(&self) -> f64 {
        self.old_ac_total - self.new_ac_total
    }

    pub fn cost_saving(&self, unit_price: f64) -> f64 {
        self.saved_energy() * unit_price
    }
}

/// Recomputes each month's air-conditioning energy with the activation temperature raised by
/// `delta`, reusing the records' temperatures and person-days rather than rerunning the pipeline.
pub fn simulate_ac_threshold_increase(
    records: &[DisaggregatedRecord],
    parameters: &ModelParameters,
    delta: f64,
) -> SavingsResult {
    let raised_threshold = parameters.ac_base_temp + delta;

    let monthly: Vec<MonthlyAcSaving> = records
        .iter()
        .map(|record| MonthlyAcSaving {
            month: record.month,
            old_ac: record.ac,
            new_ac: ac_factor(record.avg_temp, raised_threshold, record.person_days)
                * parameters.cooling_coefficient,
        })
        .collect();

    SavingsResult {
        ac_base_temp: parameters.ac_base_temp,
        delta,
        old_ac_total: monthly.iter().map(|saving| saving.old_ac).sum(),
        new_ac_total: monthly.iter().map(|saving| saving.new_ac).sum(),
        monthly,
    }
}
