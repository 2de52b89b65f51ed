mod compare_floats;
pub mod core;
pub mod corpus;
pub mod data_provider;
pub mod errors;
pub mod external_conditions;
pub mod input;
pub mod output;
pub mod read_monthly_data;

#[cfg(test)]
mod tests;

#[macro_use]
extern crate is_close;

pub use crate::corpus::RunResults;
use crate::core::disaggregation::EndUse;
use crate::corpus::Corpus;
use crate::data_provider::ExternalData;
use crate::errors::{DisaggregationError, OutputError};
use crate::input::ingest_for_processing;
use crate::output::Output;
use bitflags::bitflags;
use csv::WriterBuilder;
use std::io::{Read, Write};
use strum::IntoEnumIterator;
use tracing::info;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ProjectFlags: u8 {
        /// Also write the per-month residual before flooring and the over-attribution it hides.
        const DIAGNOSTICS = 0b1;
        /// Start every CSV file with a UTF-8 byte order mark so spreadsheet tools detect the encoding.
        const BYTE_ORDER_MARK = 0b10;
    }
}

pub fn run_project(
    input: impl Read,
    output: impl Output,
    external_data: ExternalData,
    flags: &ProjectFlags,
) -> Result<RunResults, DisaggregationError> {
    let input = ingest_for_processing(input)?;
    let data = external_data.resolve_with(&input)?;

    let corpus = Corpus::from_inputs(&input, &data)?;
    let results = corpus.run();

    info!(
        months = results.records.len(),
        total_energy = results.annual_totals.total_energy,
        ac = results.annual_totals.ac,
        saved_energy = results.savings.saved_energy(),
        "Disaggregation complete"
    );

    if !output.is_noop() {
        write_output_files(&output, &results, flags)
            .map_err(|err| DisaggregationError::ErrorInOutput(OutputError::new(err)))?;
    }

    Ok(results)
}

fn write_output_files(
    output: &impl Output,
    results: &RunResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    write_core_output_file(output, results, flags)?;
    write_summary_output_file(output, results, flags)?;
    write_savings_output_file(output, results, flags)?;
    if flags.contains(ProjectFlags::DIAGNOSTICS) {
        write_diagnostics_output_file(output, results, flags)?;
    }

    Ok(())
}

const UTF8_BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

fn csv_writer_for_location_key<'a>(
    output: &'a impl Output,
    location_key: &'a str,
    flags: &ProjectFlags,
) -> anyhow::Result<csv::Writer<impl Write + 'a>> {
    info!("writing out to {location_key}");
    let mut writer = output.writer_for_location_key(location_key, "csv")?;
    if flags.contains(ProjectFlags::BYTE_ORDER_MARK) {
        writer.write_all(UTF8_BYTE_ORDER_MARK)?;
    }

    Ok(WriterBuilder::new().from_writer(writer))
}

pub const CORE_OUTPUT_HEADINGS: [&str; 9] = [
    "month",
    "totalEnergy",
    "avgTemp",
    "personDays",
    "lighting",
    "ac",
    "hotWaterEnergy",
    "baseLoad",
    "other",
];

/// Writes the disaggregated table, one row per month in input order. Downstream tooling parses
/// this file, so headings and number formatting must stay stable.
fn write_core_output_file(
    output: &impl Output,
    results: &RunResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    let mut writer = csv_writer_for_location_key(output, "results", flags)?;

    writer.write_record(CORE_OUTPUT_HEADINGS)?;

    for record in &results.records {
        writer.write_record([
            record.month.to_string(),
            record.total_energy.to_string(),
            record.avg_temp.to_string(),
            record.person_days.to_string(),
            record.lighting.to_string(),
            record.ac.to_string(),
            record.hot_water_energy.to_string(),
            record.base_load.to_string(),
            record.other.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

fn write_summary_output_file(
    output: &impl Output,
    results: &RunResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    let totals = &results.annual_totals;
    let mut writer = csv_writer_for_location_key(output, "results_summary", flags)?;

    writer.write_record(["item", "annualEnergy", "share"])?;
    writer.write_record(["totalEnergy".to_string(), totals.total_energy.to_string(), String::new()])?;
    for end_use in EndUse::iter() {
        writer.write_record([
            end_use.to_string(),
            totals.end_use(end_use).to_string(),
            totals
                .share(end_use)
                .map(|share| share.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.write_record([
        "overAttribution".to_string(),
        totals.over_attribution.to_string(),
        String::new(),
    ])?;

    writer.flush()?;

    Ok(())
}

fn write_savings_output_file(
    output: &impl Output,
    results: &RunResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    let savings = &results.savings;
    let unit_price = results.savings_scenario.unit_price;
    let mut writer = csv_writer_for_location_key(output, "results_savings", flags)?;

    writer.write_record(["month", "oldAc", "newAc", "savedEnergy", "costSaving"])?;
    for saving in &savings.monthly {
        writer.write_record([
            saving.month.to_string(),
            saving.old_ac.to_string(),
            saving.new_ac.to_string(),
            saving.saved_energy().to_string(),
            (saving.saved_energy() * unit_price).to_string(),
        ])?;
    }
    writer.write_record([
        "total".to_string(),
        savings.old_ac_total.to_string(),
        savings.new_ac_total.to_string(),
        savings.saved_energy().to_string(),
        results.cost_saving().to_string(),
    ])?;

    writer.flush()?;

    Ok(())
}

fn write_diagnostics_output_file(
    output: &impl Output,
    results: &RunResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    let mut writer = csv_writer_for_location_key(output, "results_diagnostics", flags)?;

    writer.write_record([
        "month",
        "totalEnergy",
        "accountedEnergy",
        "unclippedOther",
        "other",
        "overAttribution",
    ])?;
    for record in &results.records {
        let accounted = record.lighting + record.ac + record.hot_water_energy + record.base_load;
        writer.write_record([
            record.month.to_string(),
            record.total_energy.to_string(),
            accounted.to_string(),
            record.unclipped_other.to_string(),
            record.other.to_string(),
            record.over_attribution().to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
