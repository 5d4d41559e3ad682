// Agent Store - bearer token tool

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use agentstore_app::{create_gate, execute, Cli};
use agentstore_common::Config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.token_file {
        config.token_file = Some(path);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.rust_log))
        .with_writer(std::io::stderr)
        .init();

    let gate = create_gate(&config);

    let report = execute(&gate, cli.command).map_err(|e| {
        error!("Command failed: {}", e);
        e
    })?;

    match (report.output, report.success) {
        (Some(output), true) => println!("{}", output),
        (Some(output), false) => eprintln!("{}", output),
        (None, _) => {}
    }

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
