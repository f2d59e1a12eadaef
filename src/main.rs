use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use resizer::replay::{self, ReplayError, Script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "resizer", about = "Replay pointer gestures against the resize engine")]
struct Cli {
    /// JSON gesture script to replay.
    #[arg(long, env = "RESIZER_SCRIPT")]
    script: PathBuf,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, script = %cli.script.display(), "replay failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let script = Script::load(&cli.script)?;
    let report = replay::run(&script)?;
    tracing::info!(targets = report.targets.len(), steps = report.steps.len(), events = report.events.len(), "replay finished");
    let rendered = if cli.pretty { serde_json::to_string_pretty(&report)? } else { serde_json::to_string(&report)? };
    Ok(rendered)
}
