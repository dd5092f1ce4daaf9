// crates/seedscan-cli/src/args.rs
//
// CLI argument parsing & validation for the seed search binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "seedscan", about = "Search the Balatro seed space for a query")]
pub struct Args {
    /// Path to the query JSON file describing must/must_not/should clauses.
    #[arg(long)]
    pub query: PathBuf,

    /// Worker thread count; defaults to the available parallelism.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Fixed minimum score a result must reach to be reported.
    #[arg(long, default_value_t = 0, conflicts_with = "auto_cutoff")]
    pub cutoff: u64,

    /// Raise the cutoff to the best score seen so far as the search runs.
    #[arg(long)]
    pub auto_cutoff: bool,

    /// First seed index to scan (inclusive).
    #[arg(long, default_value_t = 0)]
    pub seed_start: u64,

    /// Number of seeds to scan starting at `--seed-start`.
    #[arg(long)]
    pub seed_count: Option<u64>,

    /// Output file; stdout if omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Output record format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Suppress the summary line printed after a run completes.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug)]
pub enum CliError {
    NotFound(String),
    BadSeedRange(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
            CliError::BadSeedRange(s) => write!(f, "invalid seed range: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs: parse, then apply the checks clap's
/// declarative attributes can't express (file existence, range shape).
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();

    if !args.query.is_file() {
        return Err(CliError::NotFound(args.query.display().to_string()));
    }

    if let Some(count) = args.seed_count {
        if count == 0 {
            return Err(CliError::BadSeedRange("--seed-count must be at least 1".into()));
        }
        if args
            .seed_start
            .checked_add(count)
            .filter(|&end| end <= seedscan_core::SEED_SPACE_SIZE)
            .is_none()
        {
            return Err(CliError::BadSeedRange(
                "--seed-start + --seed-count overflows the seed space".into(),
            ));
        }
    }

    Ok(args)
}
