//! `tpa` binary entry point

use clap::Parser;
use std::process::ExitCode;
use tpa_cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.store_config()?;
    init_tracing(&config.log_filter, cli.log_json)?;

    let stdout = std::io::stdout();
    let status = run(cli, &config, &mut stdout.lock())?;
    Ok(status.into())
}
