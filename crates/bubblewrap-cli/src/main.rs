//! bubblewrap CLI entry point.

mod cli;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use bubblewrap_core::logging::{init_tracing, init_tracing_with_default};
use bubblewrap_core::{BubblewrapConfig, ErrorCode, Pipeline};
use clap::Parser;

use cli::Cli;

/// Exit status when `--fail-on-flaky` trips.
const FLAKY_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing_with_default("bubblewrap=debug,bubblewrap_core=debug");
    } else {
        init_tracing();
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = BubblewrapConfig::load(&cli.path, Some(&cli.overrides()))
        .map_err(|e| anyhow::Error::msg(e.coded_string()))?;

    let pipeline = Pipeline::new(config);
    let executor = pipeline.default_executor();
    let report = pipeline
        .run(&cli.path, &executor)
        .map_err(|e| anyhow::Error::msg(e.coded_string()))?;

    if cli.json {
        println!("{}", report.to_json().context("serializing report")?);
    } else {
        print!("{}", render::render_text(&report).context("rendering report")?);
    }

    if let Some(threshold) = cli.fail_on_flaky {
        if report.exceeds_flake_rate(threshold) {
            tracing::warn!(
                max_flake_rate = ?report.max_flake_rate,
                threshold,
                "flake rate above threshold"
            );
            return Ok(ExitCode::from(FLAKY_EXIT_CODE));
        }
    }
    Ok(ExitCode::SUCCESS)
}
