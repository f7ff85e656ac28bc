//! Resolve command implementation.

use purlbom::config::ResolverConfig;
use purlbom::metadata::{MetadataOutcome, generate_metadata_with};
use purlbom::purl::PackageUrl;
use purlbom::registry::{HttpFetcher, ManifestFetcher};
use std::io::Write;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::output::{Report, unsupported_message, write_stderr_line};

/// Resolves the package URL named on the command line.
///
/// The manifest path (or a JSON report with `--json`) goes to `stdout`;
/// notices for skipped ecosystems go to `stderr`.
///
/// # Errors
///
/// Returns an error if the package URL is malformed, resolution fails, or
/// output cannot be written.
pub fn run_resolve(
    cli: &Cli,
    config: &ResolverConfig,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<MetadataOutcome> {
    let fetcher = HttpFetcher::new(config.timeout());
    run_resolve_with(cli, config, &fetcher, stdout, stderr)
}

/// Internal implementation with an injectable fetcher for testability.
///
/// # Errors
///
/// See [`run_resolve`].
pub fn run_resolve_with(
    cli: &Cli,
    config: &ResolverConfig,
    fetcher: &dyn ManifestFetcher,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<MetadataOutcome> {
    let purl: PackageUrl = cli.purl.parse()?;
    let outcome = generate_metadata_with(&purl, config, fetcher)?;

    if cli.json {
        let json = Report::new(&purl, &outcome).to_json()?;
        writeln!(stdout, "{json}").map_err(|source| CliError::WriteFailed { source })?;
        return Ok(outcome);
    }

    match &outcome {
        MetadataOutcome::Generated { path } => {
            writeln!(stdout, "{path}").map_err(|source| CliError::WriteFailed { source })?;
        }
        MetadataOutcome::Unsupported { purl_type } => {
            write_stderr_line(stderr, unsupported_message(&purl, purl_type));
        }
    }
    Ok(outcome)
}

/// Map a run result to a process exit code, reporting any error.
pub fn exit_code_for_run_result<T>(result: Result<T>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
