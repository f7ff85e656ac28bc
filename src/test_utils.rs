//! Test doubles for exercising the pipeline without network access.

use crate::error::FetchError;
use crate::registry::{ManifestFetcher, status_error};
use std::cell::RefCell;
use std::collections::HashMap;

/// A canned response served by [`StubFetcher`].
#[derive(Clone, Debug)]
pub enum StubResponse {
    /// Respond with these body bytes.
    Body(Vec<u8>),
    /// Respond with this HTTP status.
    Status(u16),
    /// Fail before any response arrives.
    Transport(String),
}

impl StubResponse {
    /// Responds with `body`.
    #[must_use]
    pub fn body(body: impl Into<Vec<u8>>) -> Self {
        Self::Body(body.into())
    }
}

/// A stub implementation of [`ManifestFetcher`] for testing.
///
/// Responses are keyed by URL; unknown URLs answer 404. Every requested URL
/// is recorded so tests can assert how many requests were made.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: HashMap<String, StubResponse>,
    requests: RefCell<Vec<String>>,
}

impl StubFetcher {
    /// Creates a stub with no registered responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the response for `url`.
    #[must_use]
    pub fn with_response(mut self, url: &str, response: StubResponse) -> Self {
        self.responses.insert(url.to_owned(), response);
        self
    }

    /// Returns every URL requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ManifestFetcher for StubFetcher {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_owned());
        match self.responses.get(url) {
            Some(StubResponse::Body(body)) => Ok(body.clone()),
            Some(StubResponse::Status(status)) => Err(status_error(url, *status)),
            Some(StubResponse::Transport(message)) => Err(FetchError::Transport {
                url: url.to_owned(),
                message: message.clone(),
            }),
            None => Err(status_error(url, 404)),
        }
    }
}


/// Builds the Maven Central POM URL for `group:artifact:version`.
#[must_use]
pub fn central_pom_url(group: &str, artifact: &str, version: &str) -> String {
    format!(
        "{}/{}/{}/{version}/{artifact}-{version}.pom",
        crate::config::MAVEN_CENTRAL,
        group.replace('.', "/"),
        artifact.replace('.', "/"),
    )
}
