//! Package URL model and parser.
//!
//! A package URL ("PURL") names a package independently of where it is
//! hosted: `pkg:maven/org.example/lib@1.0`. The resolver only needs the
//! type, namespace, name, and version, but the parser keeps qualifiers and
//! subpath so that the canonical string shown in diagnostics matches what
//! the caller supplied.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SCHEME: &str = "pkg:";

/// Characters left unescaped when rendering a component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~')
    .remove(b':');

/// A package URL split into its components.
///
/// Fields are public so callers can construct identifiers directly; nothing
/// here guarantees the identifier is complete. Validation happens when the
/// identifier is turned into ecosystem-specific coordinates.
///
/// # Examples
///
/// ```
/// use purlbom::purl::{Ecosystem, PackageUrl};
///
/// let purl: PackageUrl = "pkg:maven/org.example/lib@1.0".parse()?;
/// assert_eq!(purl.ecosystem(), Ecosystem::Maven);
/// assert_eq!(purl.namespace.as_deref(), Some("org.example"));
/// assert_eq!(purl.to_string(), "pkg:maven/org.example/lib@1.0");
/// # Ok::<(), purlbom::purl::PurlParseError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageUrl {
    /// Ecosystem tag, for example `maven` or `npm`.
    pub purl_type: String,
    /// Grouping within the ecosystem (a Maven `groupId`).
    pub namespace: Option<String>,
    /// Package name (a Maven `artifactId`).
    pub name: String,
    /// Package version.
    pub version: Option<String>,
    /// Extra key/value qualifiers, sorted by key.
    pub qualifiers: BTreeMap<String, String>,
    /// Path inside the package.
    pub subpath: Option<String>,
}

impl PackageUrl {
    /// Build an identifier from its four core components.
    ///
    /// Empty strings are kept as given so that incomplete identifiers can be
    /// represented and rejected later.
    #[must_use]
    pub fn new(purl_type: &str, namespace: &str, name: &str, version: &str) -> Self {
        Self {
            purl_type: purl_type.to_owned(),
            namespace: Some(namespace.to_owned()),
            name: name.to_owned(),
            version: Some(version.to_owned()),
            qualifiers: BTreeMap::new(),
            subpath: None,
        }
    }

    /// Classify the identifier's type tag.
    #[must_use]
    pub fn ecosystem(&self) -> Ecosystem {
        Ecosystem::from(self.purl_type.as_str())
    }
}

/// Package ecosystems known to the resolver.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Ecosystem {
    /// Maven Central artefacts, resolved to a POM.
    Maven,
    /// Any other type tag, carried verbatim.
    Unsupported(String),
}

impl From<&str> for Ecosystem {
    fn from(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("maven") {
            Self::Maven
        } else {
            Self::Unsupported(tag.to_owned())
        }
    }
}

/// Errors raised while parsing a PURL string.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PurlParseError {
    /// The string does not begin with `pkg:`.
    #[error("package URL must start with `pkg:`: {input}")]
    MissingScheme {
        /// The rejected input.
        input: String,
    },

    /// No type segment follows the scheme.
    #[error("package URL has no type: {input}")]
    MissingType {
        /// The rejected input.
        input: String,
    },

    /// The name segment is empty.
    #[error("package URL has no name: {input}")]
    MissingName {
        /// The rejected input.
        input: String,
    },

    /// A qualifier is not of the form `key=value`.
    #[error("malformed qualifier `{qualifier}`")]
    MalformedQualifier {
        /// The offending qualifier text.
        qualifier: String,
    },

    /// A component decodes to bytes that are not valid UTF-8.
    #[error("component `{component}` is not valid percent-encoded UTF-8")]
    InvalidEncoding {
        /// The offending raw component.
        component: String,
    },
}

impl FromStr for PackageUrl {
    type Err = PurlParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rest = strip_scheme(input).ok_or_else(|| PurlParseError::MissingScheme {
            input: input.to_owned(),
        })?;
        let rest = rest.trim_start_matches('/');

        let (rest, subpath) = match rest.rsplit_once('#') {
            Some((head, raw)) => (head, parse_subpath(raw)?),
            None => (rest, None),
        };
        let (rest, qualifiers) = match rest.rsplit_once('?') {
            Some((head, raw)) => (head, parse_qualifiers(raw)?),
            None => (rest, BTreeMap::new()),
        };

        let (purl_type, rest) = rest.split_once('/').unwrap_or((rest, ""));
        if purl_type.is_empty() {
            return Err(PurlParseError::MissingType {
                input: input.to_owned(),
            });
        }

        let rest = rest.trim_end_matches('/');
        let (rest, version) = match rest.rsplit_once('@') {
            Some((head, raw)) => (head, Some(decode(raw)?)),
            None => (rest, None),
        };

        let (namespace_raw, name_raw) = rest.rsplit_once('/').unwrap_or(("", rest));
        let name = decode(name_raw)?;
        if name.is_empty() {
            return Err(PurlParseError::MissingName {
                input: input.to_owned(),
            });
        }

        Ok(Self {
            purl_type: purl_type.to_ascii_lowercase(),
            namespace: parse_namespace(namespace_raw)?,
            name,
            version,
            qualifiers,
            subpath,
        })
    }
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/", self.purl_type)?;
        if let Some(namespace) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            for segment in namespace.split('/').filter(|s| !s.is_empty()) {
                write!(f, "{}/", encode(segment))?;
            }
        }
        write!(f, "{}", encode(&self.name))?;
        if let Some(version) = self.version.as_deref().filter(|v| !v.is_empty()) {
            write!(f, "@{}", encode(version))?;
        }
        let mut separator = '?';
        for (key, value) in &self.qualifiers {
            write!(f, "{separator}{key}={}", encode(value))?;
            separator = '&';
        }
        if let Some(subpath) = self.subpath.as_deref().filter(|s| !s.is_empty()) {
            f.write_str("#")?;
            let segments: Vec<String> = subpath
                .split('/')
                .filter(|s| !s.is_empty())
                .map(|s| encode(s).to_string())
                .collect();
            f.write_str(&segments.join("/"))?;
        }
        Ok(())
    }
}

fn strip_scheme(input: &str) -> Option<&str> {
    let head = input.get(..SCHEME.len())?;
    if head.eq_ignore_ascii_case(SCHEME) {
        input.get(SCHEME.len()..)
    } else {
        None
    }
}

fn encode(component: &str) -> percent_encoding::PercentEncode<'_> {
    utf8_percent_encode(component, COMPONENT)
}

fn decode(component: &str) -> Result<String, PurlParseError> {
    percent_decode_str(component)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| PurlParseError::InvalidEncoding {
            component: component.to_owned(),
        })
}

fn parse_namespace(raw: &str) -> Result<Option<String>, PurlParseError> {
    let segments = raw
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode)
        .collect::<Result<Vec<_>, _>>()?;
    if segments.is_empty() {
        Ok(None)
    } else {
        Ok(Some(segments.join("/")))
    }
}

fn parse_qualifiers(raw: &str) -> Result<BTreeMap<String, String>, PurlParseError> {
    let mut qualifiers = BTreeMap::new();
    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) =
            pair.split_once('=')
                .ok_or_else(|| PurlParseError::MalformedQualifier {
                    qualifier: pair.to_owned(),
                })?;
        if key.is_empty() {
            return Err(PurlParseError::MalformedQualifier {
                qualifier: pair.to_owned(),
            });
        }
        let value = decode(value)?;
        if !value.is_empty() {
            qualifiers.insert(key.to_ascii_lowercase(), value);
        }
    }
    Ok(qualifiers)
}

fn parse_subpath(raw: &str) -> Result<Option<String>, PurlParseError> {
    let segments = raw
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(decode)
        .collect::<Result<Vec<_>, _>>()?;
    if segments.is_empty() {
        Ok(None)
    } else {
        Ok(Some(segments.join("/")))
    }
}
