//! Maven registry addressing and manifest download.
//!
//! [`MavenCoordinates`] validates an identifier and derives the POM URL.
//! [`ManifestFetcher`] abstracts the HTTP request so that the pipeline can
//! be exercised without network access; [`HttpFetcher`] is the production
//! implementation backed by `ureq`.

use std::time::Duration;

use crate::error::{FetchError, ManifestError};
use crate::purl::PackageUrl;

/// Validated Maven coordinates.
///
/// # Examples
///
/// ```
/// use purlbom::purl::PackageUrl;
/// use purlbom::registry::MavenCoordinates;
///
/// let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");
/// let coordinates = MavenCoordinates::try_from(&purl)?;
/// assert_eq!(
///     coordinates.pom_url("https://repo1.maven.org/maven2"),
///     "https://repo1.maven.org/maven2/org/example/lib/1.0/lib-1.0.pom",
/// );
/// # Ok::<(), purlbom::error::ManifestError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MavenCoordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl MavenCoordinates {
    /// The `groupId`, taken from the PURL namespace.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The `artifactId`, taken from the PURL name.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The artefact version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Builds the POM URL beneath `base`.
    ///
    /// Dots in the group and artifact become path separators; the file name
    /// keeps the artifact id verbatim.
    #[must_use]
    pub fn pom_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let group_path = self.group_id.replace('.', "/");
        let artifact_path = self.artifact_id.replace('.', "/");
        let Self {
            artifact_id,
            version,
            ..
        } = self;
        format!("{base}/{group_path}/{artifact_path}/{version}/{artifact_id}-{version}.pom")
    }
}

impl TryFrom<&PackageUrl> for MavenCoordinates {
    type Error = ManifestError;

    fn try_from(purl: &PackageUrl) -> Result<Self, Self::Error> {
        let namespace = non_empty(purl.namespace.as_deref());
        let name = non_empty(Some(purl.name.as_str()));
        let version = non_empty(purl.version.as_deref());

        match (namespace, name, version) {
            (Some(group_id), Some(artifact_id), Some(version)) => Ok(Self {
                group_id: group_id.to_owned(),
                artifact_id: artifact_id.to_owned(),
                version: version.to_owned(),
            }),
            _ => Err(ManifestError::InvalidIdentifier {
                reason: "missing required fields. Namespace, name, and version are required."
                    .to_owned(),
            }),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Retrieves a manifest body from a URL.
///
/// Bodies are raw bytes: POMs may declare any XML encoding and are written
/// out unchanged. Abstractions allow tests to mock HTTP behaviour without
/// network access.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestFetcher {
    /// Fetch the body at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for a non-success response and
    /// [`FetchError::Transport`] when no usable response arrives.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP fetcher using `ureq`.
#[derive(Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Creates a fetcher with an optional overall request timeout.
    ///
    /// Non-success statuses are returned as responses rather than errors so
    /// that the reason phrase can be reported alongside the code.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ManifestFetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(url, status.as_u16()));
        }

        response
            .into_body()
            .read_to_vec()
            .map_err(|e| transport_error(url, &e))
    }
}

/// Builds a [`FetchError::Status`] carrying the canonical reason phrase.
pub(crate) fn status_error(url: &str, status: u16) -> FetchError {
    let reason = ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    FetchError::Status {
        url: url.to_owned(),
        status,
        reason: reason.to_owned(),
    }
}

/// Map a ureq error to a [`FetchError`].
fn transport_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(code) => status_error(url, *code),
        other => FetchError::Transport {
            url: url.to_owned(),
            message: other.to_string(),
        },
    }
}
