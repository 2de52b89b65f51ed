use crate::compare_floats::clamp_non_negative;
use crate::core::enrichment::EnrichedRecord;
use crate::input::ModelParameters;
use strum::{Display, EnumIter, IntoEnumIterator};

/// The end uses metered consumption is split into, in reporting order.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
pub enum EndUse {
    #[strum(serialize = "baseLoad")]
    BaseLoad,
    #[strum(serialize = "lighting")]
    Lighting,
    #[strum(serialize = "hotWaterEnergy")]
    HotWater,
    #[strum(serialize = "ac")]
    AirConditioning,
    #[strum(serialize = "other")]
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisaggregatedRecord {
    pub month: u32,
    pub total_energy: f64,
    pub avg_temp: f64,
    pub person_days: u64,
    pub lighting: f64,
    pub ac_factor: f64,
    pub ac: f64,
    pub hot_water_energy: f64,
    pub base_load: f64,
    /// Residual floored at zero
    pub other: f64,
    /// Residual before flooring; negative when the accounted end uses exceed the metered total
    pub unclipped_other: f64,
}

impl DisaggregatedRecord {
    pub fn end_use(&self, end_use: EndUse) -> f64 {
        match end_use {
            EndUse::BaseLoad => self.base_load,
            EndUse::Lighting => self.lighting,
            EndUse::HotWater => self.hot_water_energy,
            EndUse::AirConditioning => self.ac,
            EndUse::Other => self.other,
        }
    }

    /// Energy attributed to end uses beyond what was metered, hidden by flooring the residual.
    pub fn over_attribution(&self) -> f64 {
        self.other - self.unclipped_other
    }
}

/// Degree-person-days above the activation threshold. Months at or below the threshold, or with
/// nobody staying, contribute nothing.
pub(crate) fn ac_factor(avg_temp: f64, ac_base_temp: f64, person_days: u64) -> f64 {
    clamp_non_negative(avg_temp - ac_base_temp) * person_days as f64
}

pub fn disaggregate_month(
    record: &EnrichedRecord,
    parameters: &ModelParameters,
) -> DisaggregatedRecord {
    let person_days = record.person_days as f64;

    let lighting = person_days * parameters.lighting_weight;
    let ac_factor = ac_factor(record.avg_temp, parameters.ac_base_temp, record.person_days);
    let ac = ac_factor * parameters.cooling_coefficient;
    let base_load = parameters.base_load;
    let unclipped_other =
        record.total_energy - (lighting + ac + record.hot_water_energy + base_load);

    DisaggregatedRecord {
        month: record.month,
        total_energy: record.total_energy,
        avg_temp: record.avg_temp,
        person_days: record.person_days,
        lighting,
        ac_factor,
        ac,
        hot_water_energy: record.hot_water_energy,
        base_load,
        other: clamp_non_negative(unclipped_other),
        unclipped_other,
    }
}

pub fn disaggregate(
    records: &[EnrichedRecord],
    parameters: &ModelParameters,
) -> Vec<DisaggregatedRecord> {
    records
        .iter()
        .map(|record| disaggregate_month(record, parameters))
        .collect()
}

/// Sums of each end use and of metered consumption over all months.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnnualTotals {
    pub months: usize,
    pub total_energy: f64,
    pub lighting: f64,
    pub ac: f64,
    pub hot_water_energy: f64,
    pub base_load: f64,
    pub other: f64,
    pub over_attribution: f64,
}

impl AnnualTotals {
    pub fn end_use(&self, end_use: EndUse) -> f64 {
        match end_use {
            EndUse::BaseLoad => self.base_load,
            EndUse::Lighting => self.lighting,
            EndUse::HotWater => self.hot_water_energy,
            EndUse::AirConditioning => self.ac,
            EndUse::Other => self.other,
        }
    }

    /// Sum over all end uses. Equals `total_energy + over_attribution` up to rounding.
    pub fn end_use_sum(&self) -> f64 {
        EndUse::iter().map(|end_use| self.end_use(end_use)).sum()
    }

    /// Fraction of the end-use sum taken by one end use, or `None` when nothing was attributed.
    pub fn share(&self, end_use: EndUse) -> Option<f64> {
        let sum = self.end_use_sum();
        (sum > 0.).then(|| self.end_use(end_use) / sum)
    }
}

pub fn annual_totals(records: &[DisaggregatedRecord]) -> AnnualTotals {
    records
        .iter()
        .fold(AnnualTotals::default(), |totals, record| AnnualTotals {
            months: totals.months + 1,
            total_energy: totals.total_energy + record.total_energy,
            lighting: totals.lighting + record.lighting,
            ac: totals.ac + record.ac,
            hot_water_energy: totals.hot_water_energy + record.hot_water_energy,
            base_load: totals.base_load + record.base_load,
            other: totals.other + record.other,
            over_attribution: totals.over_attribution + record.over_attribution(),
        })
}
