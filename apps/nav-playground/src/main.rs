//! # nav-playground
//!
//! Replays a navigation scenario and prints one JSON report per step.

use std::path::PathBuf;
use std::process::ExitCode;

use aura_shell::{init_tracing, ShellConfig};
use clap::Parser;
use nav_playground::{replay, PlaygroundResult, Scenario};

/// Replay store events through the navigation shell.
#[derive(Parser, Debug)]
#[command(name = "nav-playground", version, about)]
struct Args {
    /// Scenario file (JSON)
    #[arg(long)]
    scenario: PathBuf,

    /// Shell config (TOML). Defaults to $AURA_NAV_CONFIG or the platform path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print each report
    #[arg(long)]
    pretty: bool,
}

fn run(args: Args) -> PlaygroundResult<()> {
    let config = ShellConfig::load(args.config)?;
    init_tracing(&config.logging.filter);

    let scenario = Scenario::from_file(&args.scenario)?;
    for report in replay(&scenario, &config)? {
        let line = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", line);
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nav-playground: {}", e);
            ExitCode::FAILURE
        }
    }
}
