//! Shared test helpers: mock server setup and assertion macros

#![allow(dead_code)]

use reqwest::Client;
use wiremock::MockServer;

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Assert a `Result` is `Err` and unwrap the error (fails the test otherwise).
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

/// Plain client; the providers under test add no auth.
pub fn test_client() -> Client {
    Client::new()
}

/// Start a fresh mock server for one test.
pub async fn mock_server() -> MockServer {
    MockServer::start().await
}

/// A documentation-range address used throughout the tests.
pub const TEST_IP: &str = "93.184.216.34";
