use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Map small-business survey extracts onto a canonical scoring schema and grade their signal sufficiency",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full contract pipeline and write the transformed table
    Run(RunArgs),
    /// Run the pipeline in memory and report only the grade and notes
    Grade(GradeArgs),
    /// Write a starter contract file seeded with the default canonical schema
    InitContract(InitContractArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input CSV/TSV file ('-' reads from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Contract file naming canonical features and categorical columns
    /// (starter defaults are used when omitted)
    #[arg(short = 'c', long = "contract")]
    pub contract: Option<PathBuf>,
    /// Write a run report capturing grade, notes, and input digest
    /// (YAML, or JSON when the extension is .json)
    #[arg(long = "report")]
    pub report: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter to use for output (defaults to input delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Character encoding for the output file/stdout (defaults to utf-8)
    #[arg(long = "output-encoding")]
    pub output_encoding: Option<String>,
    /// Render the transformed table to stdout as an elastic table instead of CSV
    #[arg(long = "table")]
    pub table: bool,
    /// Number of rows the table rendering displays
    #[arg(long = "table-rows", default_value_t = 10)]
    pub table_rows: usize,
}

#[derive(Debug, Args)]
pub struct GradeArgs {
    /// Input CSV/TSV file ('-' reads from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Contract file naming canonical features and categorical columns
    /// (starter defaults are used when omitted)
    #[arg(short = 'c', long = "contract")]
    pub contract: Option<PathBuf>,
    /// Write a run report capturing grade, notes, and input digest
    /// (YAML, or JSON when the extension is .json)
    #[arg(long = "report")]
    pub report: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct InitContractArgs {
    /// Destination contract file
    #[arg(short = 'o', long = "output", default_value = "contract.yml")]
    pub output: PathBuf,
    /// Overwrite the destination if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
