//! CLI argument definitions for the purlbom command.
//!
//! This module defines the command-line interface using clap and folds the
//! flags into a [`ResolverConfig`] on top of the configuration file and
//! environment.

use camino::Utf8PathBuf;
use clap::Parser;
use purlbom::config::ResolverConfig;

use crate::error::CliError;

/// Resolve a package URL into a local POM file.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "purlbom")]
#[command(version, about)]
#[command(long_about = concat!(
    "Resolve a package URL into a local POM file.\n\n",
    "The POM for a Maven package URL is downloaded from Maven Central and ",
    "written to pom.xml inside a new temporary directory. The path of that ",
    "file is printed on stdout. Package URLs for other ecosystems are ",
    "skipped with a notice on stderr.",
))]
#[command(after_help = concat!(
    "ENVIRONMENT:\n",
    "  PURLBOM_DEBUG_MODE      Set to 'debug' or 'verbose' for diagnostics\n",
    "  PURLBOM_REGISTRY_URL    Override the registry base URL\n\n",
    "EXAMPLES:\n",
    "  Fetch a POM:\n",
    "    $ purlbom pkg:maven/org.apache.commons/commons-lang3@3.12.0\n\n",
    "  Emit a JSON report:\n",
    "    $ purlbom --json pkg:maven/com.google.guava/guava@33.0.0-jre",
))]
pub struct Cli {
    /// Package URL to resolve, for example `pkg:maven/org.example/lib@1.0`.
    #[arg(value_name = "PURL")]
    pub purl: String,

    /// Read settings from a TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Registry base URL [default: Maven Central].
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Directory in which temporary POM directories are created.
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<Utf8PathBuf>,

    /// Overall request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log the registry URL, written path, and content size.
    #[arg(short, long)]
    pub debug: bool,

    /// Print a JSON report instead of a bare path.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the resolver configuration from the file, the process
    /// environment, and the command-line flags, in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the configuration file cannot be
    /// read or parsed.
    pub fn resolver_config(&self) -> Result<ResolverConfig, CliError> {
        self.resolver_config_with(|key| std::env::var(key).ok())
    }

    /// Builds the resolver configuration using the supplied environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// See [`Self::resolver_config`].
    pub fn resolver_config_with<F>(&self, lookup: F) -> Result<ResolverConfig, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match self.config.as_deref() {
            Some(path) => ResolverConfig::load(path)?,
            None => ResolverConfig::default(),
        };
        let mut config = base.with_overrides_from(lookup);

        if let Some(url) = &self.registry_url {
            config.registry_url.clone_from(url);
        }
        if let Some(dir) = &self.temp_dir {
            config.temp_root = Some(dir.clone());
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
        if self.debug {
            config.debug = true;
        }
        Ok(config)
    }
}
