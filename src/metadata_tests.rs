//! Unit tests for metadata dispatch and POM creation.

use super::*;
use crate::error::FetchError;
use crate::registry::MockManifestFetcher;
use crate::test_utils::{StubFetcher, StubResponse, central_pom_url};
use rstest::rstest;
use tempfile::TempDir;

const POM: &str = "<project/>";

fn config_in(temp: &TempDir) -> ResolverConfig {
    let root = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
    ResolverConfig {
        temp_root: Some(root),
        ..ResolverConfig::default()
    }
}

fn fetcher_returning(body: &'static str) -> MockManifestFetcher {
    let mut fetcher = MockManifestFetcher::new();
    fetcher
        .expect_fetch_bytes()
        .returning(move |_| Ok(body.as_bytes().to_vec()));
    fetcher
}

fn fetcher_never_called() -> MockManifestFetcher {
    let mut fetcher = MockManifestFetcher::new();
    fetcher.expect_fetch_bytes().never();
    fetcher
}

#[test]
fn maven_identifier_is_written_to_pom_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let config = config_in(&temp);
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");

    let mut fetcher = MockManifestFetcher::new();
    fetcher
        .expect_fetch_bytes()
        .withf(|url| url == "https://repo1.maven.org/maven2/org/example/lib/1.0/lib-1.0.pom")
        .times(1)
        .returning(|_| Ok(POM.as_bytes().to_vec()));

    let outcome = generate_metadata_with(&purl, &config, &fetcher).expect("generated");
    let path = outcome.path().expect("generated outcome has a path");

    assert_eq!(path.file_name(), Some("pom.xml"));
    assert_eq!(std::fs::read_to_string(path).expect("read back"), POM);
}

#[test]
fn registry_url_comes_from_configuration() {
    let temp = tempfile::tempdir().expect("temp dir");
    let config = ResolverConfig {
        registry_url: "http://mirror.test/maven2/".to_owned(),
        ..config_in(&temp)
    };
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");

    let mut fetcher = MockManifestFetcher::new();
    fetcher
        .expect_fetch_bytes()
        .withf(|url| url == "http://mirror.test/maven2/org/example/lib/1.0/lib-1.0.pom")
        .times(1)
        .returning(|_| Ok(POM.as_bytes().to_vec()));

    generate_metadata_with(&purl, &config, &fetcher).expect("generated");
}

#[rstest]
#[case::npm("npm")]
#[case::pypi("pypi")]
#[case::generic("generic")]
fn unsupported_types_return_soft_outcome(#[case] purl_type: &str) {
    let purl = PackageUrl::new(purl_type, "x", "y", "1.0");
    let fetcher = fetcher_never_called();

    let outcome =
        generate_metadata_with(&purl, &ResolverConfig::default(), &fetcher).expect("no error");

    assert_eq!(
        outcome,
        MetadataOutcome::Unsupported {
            purl_type: purl_type.to_owned()
        }
    );
    assert!(outcome.path().is_none());
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn missing_type_fails_fast(#[case] purl_type: &str) {
    let purl = PackageUrl::new(purl_type, "org.example", "lib", "1.0");
    let fetcher = fetcher_never_called();

    let err = generate_metadata_with(&purl, &ResolverConfig::default(), &fetcher)
        .expect_err("type is required");

    assert!(matches!(err, MetadataError::MissingType));
    assert!(err.is_invalid_identifier());
    assert_eq!(err.to_string(), "invalid PURL: missing type");
}

#[rstest]
#[case::namespace(PackageUrl::new("maven", "", "lib", "1.0"))]
#[case::name(PackageUrl::new("maven", "org.example", "", "1.0"))]
#[case::version(PackageUrl::new("maven", "org.example", "lib", ""))]
fn incomplete_identifier_is_rejected_before_fetching(#[case] purl: PackageUrl) {
    let temp = tempfile::tempdir().expect("temp dir");
    let fetcher = fetcher_never_called();

    let err = generate_metadata_with(&purl, &config_in(&temp), &fetcher)
        .expect_err("identifier is incomplete");

    assert!(err.is_invalid_identifier(), "got {err:?}");
    assert!(matches!(
        err.manifest_error(),
        Some(ManifestError::InvalidIdentifier { .. })
    ));
}

#[test]
fn http_status_failure_is_wrapped_with_identifier() {
    let temp = tempfile::tempdir().expect("temp dir");
    let purl = PackageUrl::new("maven", "org.example", "lib", "9.9");

    let mut fetcher = MockManifestFetcher::new();
    fetcher.expect_fetch_bytes().returning(|url| {
        Err(FetchError::Status {
            url: url.to_owned(),
            status: 404,
            reason: "Not Found".to_owned(),
        })
    });

    let err = generate_metadata_with(&purl, &config_in(&temp), &fetcher)
        .expect_err("registry returned 404");
    let message = err.to_string();

    assert!(message.contains("404"), "message: {message}");
    assert!(message.contains("Not Found"), "message: {message}");
    assert!(message.contains("pkg:maven/org.example/lib@9.9"), "message: {message}");
    assert!(!err.is_invalid_identifier());
    match err.manifest_error() {
        Some(ManifestError::Fetch(fetch)) => assert_eq!(fetch.status(), Some(404)),
        other => panic!("expected fetch failure, got {other:?}"),
    }
}

#[test]
fn transport_failure_carries_underlying_message() {
    let temp = tempfile::tempdir().expect("temp dir");
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");

    let mut fetcher = MockManifestFetcher::new();
    fetcher.expect_fetch_bytes().returning(|url| {
        Err(FetchError::Transport {
            url: url.to_owned(),
            message: "connection refused".to_owned(),
        })
    });

    let err = generate_metadata_with(&purl, &config_in(&temp), &fetcher)
        .expect_err("transport failed");

    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn write_failure_is_wrapped_with_identifier() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp.path().join("missing")).expect("UTF-8 path");
    let config = ResolverConfig {
        temp_root: Some(root),
        ..ResolverConfig::default()
    };
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");
    let fetcher = fetcher_returning(POM);

    let err = generate_metadata_with(&purl, &config, &fetcher).expect_err("root is missing");

    assert!(err.to_string().starts_with("failed to create POM file for pkg:maven/org.example/lib@1.0"));
    assert!(matches!(
        err.manifest_error(),
        Some(ManifestError::Io { .. })
    ));
}

#[test]
fn repeated_calls_produce_distinct_paths() {
    let temp = tempfile::tempdir().expect("temp dir");
    let config = config_in(&temp);
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");
    let fetcher = fetcher_returning(POM);

    let first = create_pom_file(&purl, &config, &fetcher).expect("first");
    let second = create_pom_file(&purl, &config, &fetcher).expect("second");

    assert_ne!(first, second);
    assert_eq!(std::fs::read_to_string(&first).expect("first"), POM);
    assert_eq!(std::fs::read_to_string(&second).expect("second"), POM);
}

#[test]
fn concurrent_calls_produce_distinct_paths() {
    let temp = tempfile::tempdir().expect("temp dir");
    let config = config_in(&temp);
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");
    let url = central_pom_url("org.example", "lib", "1.0");

    let run = |body: &'static str| {
        let fetcher = StubFetcher::new().with_response(&url, StubResponse::body(body));
        create_pom_file(&purl, &config, &fetcher)
    };
    let (first, second) = std::thread::scope(|scope| {
        let first = scope.spawn(|| run("<project>first</project>"));
        let second = scope.spawn(|| run("<project>second</project>"));
        (
            first.join().expect("first thread panicked"),
            second.join().expect("second thread panicked"),
        )
    });
    let first = first.expect("first call succeeds");
    let second = second.expect("second call succeeds");

    assert_ne!(first, second);
    assert_ne!(first.parent(), second.parent());
    assert_eq!(
        std::fs::read_to_string(&first).expect("first"),
        "<project>first</project>"
    );
    assert_eq!(
        std::fs::read_to_string(&second).expect("second"),
        "<project>second</project>"
    );
}

#[test]
fn fetch_pom_returns_body_unchanged() {
    let purl = PackageUrl::new("maven", "org.example", "lib", "1.0");
    let body: &'static [u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<project>\xe9</project>\n";
    let mut fetcher = MockManifestFetcher::new();
    fetcher
        .expect_fetch_bytes()
        .returning(move |_| Ok(body.to_vec()));

    let content =
        fetch_pom(&purl, &ResolverConfig::default(), &fetcher).expect("fetch succeeds");

    assert_eq!(content, body);
}
