pub mod align;
pub mod cli;
pub mod contract;
pub mod data;
pub mod derive;
pub mod engine;
pub mod frame;
pub mod grade;
pub mod identifier;
pub mod io_utils;
pub mod normalize;
pub mod process;
pub mod report;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};
use crate::contract::ContractSpec;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("score_intake", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => process::execute_run(&args),
        Commands::Grade(args) => process::execute_grade(&args),
        Commands::InitContract(args) => handle_init_contract(&args),
    }
}

fn handle_init_contract(args: &cli::InitContractArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow!(
            "Contract file {:?} already exists (use --force to overwrite)",
            args.output
        ));
    }
    let contract = ContractSpec::starter();
    contract.save(&args.output)?;
    info!(
        "Starter contract with {} canonical feature(s) and {} categorical column(s) written to {:?}",
        contract.canonical_features.len(),
        contract.categorical_columns.len(),
        args.output
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
