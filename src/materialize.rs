//! Writes fetched manifests to disk.
//!
//! Each call allocates a fresh temporary directory and writes `pom.xml`
//! inside it. The directory is persisted: ownership passes to the caller,
//! and nothing here removes it afterwards.

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::ResolverConfig;
use crate::error::ManifestError;

/// File name of the materialized manifest.
pub const POM_FILE_NAME: &str = "pom.xml";

/// Creates per-call temporary directories holding a single manifest.
#[derive(Clone, Debug)]
pub struct Materializer {
    prefix: String,
    root: Option<Utf8PathBuf>,
}

impl Materializer {
    /// Creates a materializer writing under `root`, or the OS temp root when
    /// `None`.
    #[must_use]
    pub fn new(prefix: impl Into<String>, root: Option<Utf8PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            root,
        }
    }

    /// Creates a materializer from resolver settings.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.temp_prefix.clone(), config.temp_root.clone())
    }

    /// Writes `content` to `pom.xml` inside a new temporary directory and
    /// returns the file's path.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] when the directory or file cannot be
    /// created, and [`ManifestError::NonUtf8Path`] when the directory path is
    /// not valid UTF-8.
    pub fn materialize(&self, content: &[u8]) -> Result<Utf8PathBuf, ManifestError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.prefix);
        let temp_dir = match self.root.as_deref() {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|source| ManifestError::Io {
            action: "create temporary directory",
            source,
        })?;

        let dir = Utf8PathBuf::try_from(temp_dir.keep())
            .map_err(|e| ManifestError::NonUtf8Path { path: e.into_path_buf() })?;
        let pom_path = dir.join(POM_FILE_NAME);
        write_manifest(&pom_path, content)?;
        Ok(pom_path)
    }
}

impl Default for Materializer {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

fn write_manifest(path: &Utf8Path, content: &[u8]) -> Result<(), ManifestError> {
    std::fs::write(path, content).map_err(|source| ManifestError::Io {
        action: "write POM file",
        source,
    })
}
