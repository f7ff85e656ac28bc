//! purlbom CLI entrypoint.
//!
//! Resolves one package URL into a local POM file and prints its path.

use clap::Parser;
use purlbom_cli::cli::Cli;
use purlbom_cli::error::Result;
use purlbom_cli::resolve::{exit_code_for_run_result, run_resolve};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = cli.resolver_config()?;
    init_logging(config.debug);
    run_resolve(cli, &config, stdout, stderr)?;
    Ok(())
}

/// Installs a stderr subscriber; `log` records reach it through the
/// `tracing-log` bridge. Skipped ecosystems are reported by the resolve
/// command itself, so library warnings only surface with `--debug` or an
/// explicit `RUST_LOG`.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
