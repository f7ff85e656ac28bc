//! Resolver configuration.
//!
//! Settings are read from a TOML file, then overridden by environment
//! variables, then by whatever the caller sets explicitly. The resulting
//! [`ResolverConfig`] is passed into the pipeline by reference; nothing in
//! the pipeline consults process-wide state on its own.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ConfigError;

/// Base URL of Maven Central.
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// Environment variable enabling verbose diagnostics (`debug` or `verbose`).
pub const DEBUG_MODE_ENV: &str = "PURLBOM_DEBUG_MODE";

/// Environment variable overriding the registry base URL.
pub const REGISTRY_URL_ENV: &str = "PURLBOM_REGISTRY_URL";

/// Settings for a resolution run.
///
/// # Examples
///
/// ```
/// use purlbom::config::{MAVEN_CENTRAL, ResolverConfig};
///
/// let config = ResolverConfig::from_toml_str("debug = true\n")?;
/// assert!(config.debug);
/// assert_eq!(config.registry_url, MAVEN_CENTRAL);
/// # Ok::<(), purlbom::error::ConfigError>(())
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Registry base URL onto which POM paths are appended.
    pub registry_url: String,
    /// Emit verbose diagnostics about URLs, paths, and sizes.
    pub debug: bool,
    /// Overall request timeout in seconds; the HTTP client default applies
    /// when unset.
    pub timeout_secs: Option<u64>,
    /// Name prefix for each generated temporary directory.
    pub temp_prefix: String,
    /// Parent directory for temporary directories; the OS temp root applies
    /// when unset.
    pub temp_root: Option<Utf8PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            registry_url: MAVEN_CENTRAL.to_owned(),
            debug: false,
            timeout_secs: None,
            temp_prefix: "pom-".to_owned(),
            temp_root: None,
        }
    }
}

impl ResolverConfig {
    /// Parses configuration from TOML text. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|source| ConfigError::Parse {
            path: Utf8PathBuf::from("<inline>"),
            source,
        })
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using the supplied variable lookup.
    ///
    /// Blank values are ignored. The debug variable only ever switches
    /// diagnostics on, so a configuration file enabling them is not undone by
    /// an unrelated environment value.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(DEBUG_MODE_ENV).is_some_and(|value| is_debug_mode(&value)) {
            self.debug = true;
        }
        if let Some(url) = lookup(REGISTRY_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.registry_url = url.trim().to_owned();
        }
        self
    }

    /// Returns the configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn is_debug_mode(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("debug") || value.eq_ignore_ascii_case("verbose")
}
