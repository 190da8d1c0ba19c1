//! Roast CLI - run a materialization pass over a record file.

use clap::Parser;
use roast_cli::{render, write_output, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays clean for JSON output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let output = roast_cli::execute(&cli)?;
    let json = render(&output, cli.pretty)?;
    write_output(cli.output.as_deref(), &json)?;

    eprintln!("{}", output.report.summary());
    Ok(())
}
