//! Command-line argument definitions.

use clap::Parser;
use roast_domain::InteractionStatus;
use std::path::PathBuf;

/// Roast - materialize companies, studies and interactions from raw records.
#[derive(Debug, Parser)]
#[command(name = "roast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the company, study and interaction rule files
    #[arg(short, long, env = "ROAST_RULES")]
    pub rules: PathBuf,

    /// JSON file containing an array of raw records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path (TOML)
    #[arg(short, long, env = "ROAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON lookup table mapping "City,State,Country" to coordinates
    #[arg(short, long)]
    pub locations: Option<PathBuf>,

    /// Assign this status to every interaction instead of a random one
    #[arg(short, long)]
    pub status: Option<InteractionStatus>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
