//! ipapi.co provider against a mock server

mod common;

use common::{TEST_IP, mock_server, test_client};
use dnx_provider::{GeoProvider, GeoProviderError, IpapiCoProvider};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn success_maps_fields() {
    let server = mock_server().await;
    Mock::given(method("GET"))
        .and(path(format!("/{TEST_IP}/json/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": TEST_IP,
            "city": "Norwell",
            "country_name": "United States",
            "continent_code": "NA",
            "org": "EDGECAST"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = IpapiCoProvider::with_base_url(test_client(), server.uri());
    let loc = require_ok!(provider.lookup(TEST_IP).await);

    assert_eq!(loc.continent.as_deref(), Some("NA"));
    assert_eq!(loc.country.as_deref(), Some("United States"));
    assert_eq!(loc.city.as_deref(), Some("Norwell"));
    assert_eq!(loc.isp.as_deref(), Some("EDGECAST"));
    assert_eq!(loc.org.as_deref(), Some("EDGECAST"));
}

#[tokio::test]
async fn error_marker_with_ok_status_fails() {
    let server = mock_server().await;
    Mock::given(method("GET"))
        .and(path("/127.0.0.1/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "127.0.0.1",
            "error": true,
            "reason": "Reserved IP Address"
        })))
        .mount(&server)
        .await;

    let provider = IpapiCoProvider::with_base_url(test_client(), server.uri());
    let err = require_err!(provider.lookup("127.0.0.1").await);

    assert!(
        matches!(&err, GeoProviderError::LookupFailed { raw_message: Some(m), .. } if m == "Reserved IP Address"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn non_success_status_fails() {
    let server = mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": true,
            "reason": "Forbidden"
        })))
        .mount(&server)
        .await;

    let provider = IpapiCoProvider::with_base_url(test_client(), server.uri());
    let err = require_err!(provider.lookup(TEST_IP).await);

    assert!(
        matches!(&err, GeoProviderError::HttpStatus { status: 403, raw_message: Some(m), .. } if m == "Forbidden"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let provider = IpapiCoProvider::with_base_url(test_client(), server.uri());
    let err = require_err!(provider.lookup(TEST_IP).await);

    assert!(
        matches!(err, GeoProviderError::RateLimited { retry_after: Some(30), .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let server = mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let provider = IpapiCoProvider::with_base_url(test_client(), server.uri());
    let err = require_err!(provider.lookup(TEST_IP).await);

    assert!(matches!(err, GeoProviderError::ParseError { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let provider = IpapiCoProvider::with_base_url(test_client(), "http://127.0.0.1:9");
    let err = require_err!(provider.lookup(TEST_IP).await);

    assert!(
        matches!(err, GeoProviderError::NetworkError { .. } | GeoProviderError::Timeout { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
#[ignore = "requires network access"]
async fn real_lookup() {
    let provider = IpapiCoProvider::new(test_client());
    let loc = require_ok!(provider.lookup("8.8.8.8").await);
    assert!(loc.country.is_some());
}
