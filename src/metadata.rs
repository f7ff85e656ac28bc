//! Metadata generation entry point.
//!
//! [`generate_metadata`] classifies an identifier by ecosystem. Maven
//! identifiers are validated, their POM is downloaded, and the POM is
//! written to a fresh temporary directory. Other ecosystems are reported as
//! [`MetadataOutcome::Unsupported`] so that callers can skip them without
//! treating the identifier as broken.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};

use crate::config::ResolverConfig;
use crate::error::{ManifestError, MetadataError, Result};
use crate::materialize::Materializer;
use crate::purl::{Ecosystem, PackageUrl};
use crate::registry::{HttpFetcher, ManifestFetcher, MavenCoordinates};

/// The outcome of a metadata request.
///
/// Unsupported ecosystems are deliberately not an error: callers skip them
/// and continue with the next identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetadataOutcome {
    /// A manifest was written to disk.
    Generated {
        /// Path to the materialized manifest.
        path: Utf8PathBuf,
    },
    /// The identifier's ecosystem is not handled.
    Unsupported {
        /// The type tag that was declined.
        purl_type: String,
    },
}

impl MetadataOutcome {
    /// Returns the manifest path for a generated outcome.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Generated { path } => Some(path),
            Self::Unsupported { .. } => None,
        }
    }
}

/// Generates a metadata file for `purl` using the production HTTP fetcher.
///
/// # Errors
///
/// Returns [`MetadataError::MissingType`] when the identifier has no type,
/// and [`MetadataError::Manifest`] when a Maven identifier is incomplete or
/// its POM cannot be fetched or written.
pub fn generate_metadata(purl: &PackageUrl, config: &ResolverConfig) -> Result<MetadataOutcome> {
    let fetcher = HttpFetcher::new(config.timeout());
    generate_metadata_with(purl, config, &fetcher)
}

/// Testable inner function with an injected fetcher.
///
/// The production entry point [`generate_metadata`] delegates here with a
/// real HTTP fetcher; tests inject stubs.
///
/// # Errors
///
/// See [`generate_metadata`].
pub fn generate_metadata_with(
    purl: &PackageUrl,
    config: &ResolverConfig,
    fetcher: &dyn ManifestFetcher,
) -> Result<MetadataOutcome> {
    if purl.purl_type.trim().is_empty() {
        return Err(MetadataError::MissingType);
    }

    if config.debug {
        debug!("Generating metadata for PURL: {purl}");
    }

    match purl.ecosystem() {
        Ecosystem::Maven => {
            let path = create_pom_file(purl, config, fetcher)?;
            Ok(MetadataOutcome::Generated { path })
        }
        Ecosystem::Unsupported(purl_type) => {
            warn!("PURL type '{purl_type}' is not supported. Currently only 'maven' is supported.");
            Ok(MetadataOutcome::Unsupported { purl_type })
        }
    }
}

/// Fetches the POM for a Maven identifier and writes it to disk.
///
/// Any failure is wrapped with the identifier's canonical string.
///
/// # Errors
///
/// Returns [`MetadataError::Manifest`] on validation, fetch, or write
/// failure.
pub fn create_pom_file(
    purl: &PackageUrl,
    config: &ResolverConfig,
    fetcher: &dyn ManifestFetcher,
) -> Result<Utf8PathBuf> {
    fetch_and_write(purl, config, fetcher).map_err(|source| MetadataError::Manifest {
        purl: purl.to_string(),
        source,
    })
}

fn fetch_and_write(
    purl: &PackageUrl,
    config: &ResolverConfig,
    fetcher: &dyn ManifestFetcher,
) -> std::result::Result<Utf8PathBuf, ManifestError> {
    let content = fetch_pom(purl, config, fetcher)?;
    let pom_path = Materializer::from_config(config).materialize(&content)?;

    if config.debug {
        debug!("POM file created at: {pom_path}");
        debug!("POM content size: {} bytes", content.len());
    }

    Ok(pom_path)
}

/// Validates the identifier and downloads its POM.
///
/// The body is returned as received, whatever encoding it declares.
///
/// # Errors
///
/// Returns [`ManifestError::InvalidIdentifier`] before any request when the
/// namespace, name, or version is missing, and [`ManifestError::Fetch`] when
/// the download fails.
pub fn fetch_pom(
    purl: &PackageUrl,
    config: &ResolverConfig,
    fetcher: &dyn ManifestFetcher,
) -> std::result::Result<Vec<u8>, ManifestError> {
    let coordinates = MavenCoordinates::try_from(purl)?;
    let url = coordinates.pom_url(&config.registry_url);

    if config.debug {
        debug!("Fetching POM from: {url}");
    }

    Ok(fetcher.fetch_bytes(&url)?)
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
