//! Resolve package URLs into locally materialized dependency manifests.
//!
//! Given a Maven package URL such as `pkg:maven/org.example/lib@1.0`, the
//! crate downloads the matching POM from Maven Central and writes it to
//! `pom.xml` inside a fresh temporary directory, for consumption by a
//! bill-of-materials or software-composition-analysis pipeline.
//!
//! # Modules
//!
//! - [`config`] - Resolver settings loaded from TOML and the environment
//! - [`error`] - Typed error chains for fetching and writing manifests
//! - [`materialize`] - Temporary directory allocation and POM writing
//! - [`metadata`] - Ecosystem dispatch and the public entry point
//! - [`purl`] - Package URL model and parser
//! - [`registry`] - Maven coordinates, URL construction, and HTTP fetching

pub mod config;
pub mod error;
pub mod materialize;
pub mod metadata;
pub mod purl;
pub mod registry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use config::ResolverConfig;
pub use error::{FetchError, ManifestError, MetadataError};
pub use metadata::{MetadataOutcome, generate_metadata, generate_metadata_with};
pub use purl::{Ecosystem, PackageUrl};
