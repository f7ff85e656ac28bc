//! Output formatting for resolution results.
//!
//! Human-readable mode prints the manifest path alone on stdout so that the
//! command composes with shell pipelines; JSON mode prints a single object.

use purlbom::metadata::MetadataOutcome;
use purlbom::purl::PackageUrl;
use serde::Serialize;
use std::io::Write;

/// A machine-readable summary of one resolution.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    /// A POM file was written.
    Generated {
        /// Canonical package URL.
        purl: String,
        /// Path to the written POM file.
        path: String,
    },
    /// The package URL's ecosystem is not handled.
    Unsupported {
        /// Canonical package URL.
        purl: String,
        /// The declined type tag.
        #[serde(rename = "type")]
        purl_type: String,
    },
}

impl Report {
    /// Summarises `outcome` for `purl`.
    #[must_use]
    pub fn new(purl: &PackageUrl, outcome: &MetadataOutcome) -> Self {
        match outcome {
            MetadataOutcome::Generated { path } => Self::Generated {
                purl: purl.to_string(),
                path: path.to_string(),
            },
            MetadataOutcome::Unsupported { purl_type } => Self::Unsupported {
                purl: purl.to_string(),
                purl_type: purl_type.clone(),
            },
        }
    }

    /// Renders the report as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Format the notice shown when an ecosystem is skipped.
#[must_use]
pub fn unsupported_message(purl: &PackageUrl, purl_type: &str) -> String {
    format!("Skipping {purl}: PURL type '{purl_type}' is not supported. Currently only 'maven' is supported.")
}

/// Write a line to a diagnostic stream, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
