extern crate end_use_split;

use anyhow::Context;
use clap::{Args, Parser};
use end_use_split::data_provider::{ExternalData, ReferenceData};
use end_use_split::output::FileOutput;
use end_use_split::read_monthly_data::{monthly_records_from_csv, monthly_temperatures_from_csv};
use end_use_split::{run_project, ProjectFlags};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct DisaggregationArgs {
    input_file: String,
    #[command(flatten)]
    records_source: RecordsSource,
    #[arg(long, short)]
    temperature_file: Option<String>,
    #[clap(long, default_value_t = false)]
    diagnostics: bool,
    #[clap(long, default_value_t = false)]
    byte_order_mark: bool,
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Args, Clone, Default, Debug)]
#[group(required = false, multiple = false)]
struct RecordsSource {
    #[arg(long, short)]
    records_file: Option<String>,
    #[arg(long)]
    reference_data: bool,
}

fn main() -> anyhow::Result<()> {
    let args = DisaggregationArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input_file = args.input_file.as_str();
    let input_file_ext = Path::new(input_file).extension().and_then(OsStr::to_str);
    let input_file_stem = match input_file_ext {
        Some(ext) => &input_file[..(input_file.len() - ext.len() - 1)],
        None => input_file,
    };
    let input_file_name = Path::new(input_file_stem)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("results");

    let output_path = format!("{input_file_stem}__results");
    let output = FileOutput::new(output_path.into(), format!("{input_file_name}__{{}}.{{}}"));

    let mut external_data = if args.records_source.reference_data {
        ExternalData::from_provider(&ReferenceData)?
    } else {
        ExternalData::default()
    };
    if let Some(records_file) = args.records_source.records_file {
        external_data.monthly_records = Some(
            monthly_records_from_csv(BufReader::new(File::open(&records_file)?))
                .with_context(|| format!("Could not parse the records file {records_file}"))?,
        );
    }
    if let Some(temperature_file) = args.temperature_file {
        external_data.monthly_temperatures = Some(
            monthly_temperatures_from_csv(BufReader::new(File::open(&temperature_file)?))
                .with_context(|| {
                    format!("Could not parse the temperature file {temperature_file}")
                })?,
        );
    }

    let mut flags = ProjectFlags::empty();
    if args.diagnostics {
        flags.insert(ProjectFlags::DIAGNOSTICS);
    }
    if args.byte_order_mark {
        flags.insert(ProjectFlags::BYTE_ORDER_MARK);
    }

    let results = run_project(
        BufReader::new(File::open(Path::new(input_file))?),
        &output,
        external_data,
        &flags,
    )?;

    info!(
        "Raising the air-conditioning activation temperature by {} deg C would save {:.0} kWh a year, about {:.0} in cost",
        results.savings_scenario.delta,
        results.savings.saved_energy(),
        results.cost_saving()
    );

    Ok(())
}
