//! Command bodies for `run` and `grade`: resolve I/O settings, read the
//! table, load the contract, run the engine, and route the results to CSV,
//! terminal table, and report sinks.

use std::path::Path;

use anyhow::Result;
use log::{debug, info};

use crate::cli::{GradeArgs, RunArgs};
use crate::contract::ContractSpec;
use crate::engine::{self, ContractOutcome};
use crate::io_utils;
use crate::report::RunReport;
use crate::table;

pub fn execute_run(args: &RunArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let input_encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let output_path = args.output.as_deref();
    let writing_to_stdout = output_path.is_none_or(io_utils::is_dash);
    let output_delimiter =
        io_utils::resolve_output_delimiter(output_path, args.output_delimiter, delimiter);
    let output_encoding = io_utils::resolve_encoding(args.output_encoding.as_deref())?;
    info!(
        "Processing '{}' -> {} (delimiter '{}', output '{}')",
        args.input.display(),
        output_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".into()),
        crate::printable_delimiter(delimiter),
        crate::printable_delimiter(output_delimiter)
    );

    let outcome = run_pipeline(&args.input, args.contract.as_deref(), delimiter, input_encoding)?;
    for note in &outcome.notes {
        info!("{note}");
    }

    let use_table_output = args.table && writing_to_stdout;
    if args.table && !use_table_output {
        debug!("--table requested but output will remain CSV because a file path was provided");
    }
    if use_table_output {
        table::print_frame(&outcome.frame, args.table_rows);
    } else {
        io_utils::write_frame(&outcome.frame, output_path, output_delimiter, output_encoding)?;
    }

    maybe_write_report(&args.input, args.report.as_deref(), &outcome)?;
    info!(
        "Grade {}: {}",
        outcome.grade.level(),
        outcome.grade.describe()
    );
    Ok(())
}

pub fn execute_grade(args: &GradeArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let input_encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Grading '{}' (delimiter '{}')",
        args.input.display(),
        crate::printable_delimiter(delimiter)
    );

    let outcome = run_pipeline(&args.input, args.contract.as_deref(), delimiter, input_encoding)?;
    for note in &outcome.notes {
        println!("{note}");
    }
    println!("Grade: {}", outcome.grade.level());

    maybe_write_report(&args.input, args.report.as_deref(), &outcome)?;
    Ok(())
}

fn run_pipeline(
    input: &Path,
    contract: Option<&Path>,
    delimiter: u8,
    encoding: &'static encoding_rs::Encoding,
) -> Result<ContractOutcome> {
    let contract = load_contract(contract)?;
    let frame = io_utils::read_frame(input, delimiter, encoding)?;
    info!(
        "Read {} row(s) across {} column(s)",
        frame.row_count(),
        frame.column_count()
    );
    Ok(engine::run_contract(
        &frame,
        &contract.canonical_features,
        &contract.categorical_columns,
    ))
}

fn load_contract(path: Option<&Path>) -> Result<ContractSpec> {
    match path {
        Some(path) => {
            let contract = ContractSpec::load(path)?;
            info!(
                "Loaded contract from {:?} ({} canonical feature(s), {} categorical column(s))",
                path,
                contract.canonical_features.len(),
                contract.categorical_columns.len()
            );
            Ok(contract)
        }
        None => {
            debug!("No contract file supplied; using the starter contract defaults");
            Ok(ContractSpec::starter())
        }
    }
}

fn maybe_write_report(input: &Path, report: Option<&Path>, outcome: &ContractOutcome) -> Result<()> {
    if let Some(path) = report {
        RunReport::assemble(input, outcome)?.save(path)?;
        info!("Run report written to {path:?}");
    }
    Ok(())
}
