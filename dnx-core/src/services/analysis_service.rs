//! Domain analysis client

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{CONNECT_FAILED, CoreError, CoreResult, MISSING_EXTENSION, UNKNOWN_ERROR};
use crate::types::{AnalysisOptions, DomainQueryResult};

/// Submits domains to the remote analysis API.
///
/// One POST per call, no retry. Apart from input validation, every failure
/// comes back as an error-shaped [`DomainQueryResult`] rather than an `Err`.
pub struct AnalysisService {
    client: Client,
    options: AnalysisOptions,
}

impl AnalysisService {
    /// Create the service with its own HTTP client
    pub fn new(options: AnalysisOptions) -> CoreResult<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("dnx/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::TransportError(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, options))
    }

    #[must_use]
    pub fn with_client(client: Client, options: AnalysisOptions) -> Self {
        Self { client, options }
    }

    /// Endpoint the analysis body is POSTed to
    pub fn endpoint(&self) -> &str {
        &self.options.endpoint
    }

    /// Check the superficial shape of a domain input and return it trimmed.
    pub fn validate_domain_input(input: &str) -> CoreResult<&str> {
        let domain = input.trim();
        if domain.is_empty() {
            return Err(CoreError::ValidationError(
                "Domain name is required".to_string(),
            ));
        }
        if !domain.contains('.') {
            return Err(CoreError::ValidationError(MISSING_EXTENSION.to_string()));
        }
        Ok(domain)
    }

    /// Analyze a domain.
    ///
    /// Returns `Err` only for [`CoreError::ValidationError`], before any request
    /// is made. Server and transport failures are folded into the result.
    pub async fn analyze(&self, input: &str) -> CoreResult<DomainQueryResult> {
        let domain = Self::validate_domain_input(input)?;

        match self.request(domain).await {
            Ok(result) => Ok(result),
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Analysis of {domain} failed: {e}");
                } else {
                    log::error!("Analysis of {domain} failed: {e}");
                }
                let message = match e {
                    CoreError::ServerError { message, .. } => message,
                    _ => CONNECT_FAILED.to_string(),
                };
                Ok(DomainQueryResult::failure(domain, message))
            }
        }
    }

    async fn request(&self, domain: &str) -> CoreResult<DomainQueryResult> {
        let endpoint = self.endpoint();
        log::debug!("POST {endpoint} domain={domain}");

        let response = self
            .client
            .post(endpoint)
            .json(&json!({ "domain": domain }))
            .send()
            .await
            .map_err(|e| CoreError::TransportError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::TransportError(format!("Failed to read response body: {e}")))?;
        log::debug!("Analysis API answered {status}");

        // The body is read as JSON whatever the status; a page that is not
        // JSON (proxy error, HTML 502) counts as a connection failure.
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| CoreError::TransportError(format!("Malformed analysis response: {e}")))?;

        if !status.is_success() {
            return Err(CoreError::ServerError {
                status: status.as_u16(),
                message: server_error_message(&body),
            });
        }

        match body {
            Value::Object(body) => Ok(DomainQueryResult::from_body(body)),
            other => Err(CoreError::TransportError(format!(
                "Analysis response is not an object: {other}"
            ))),
        }
    }
}

/// The `error` member of a failure body, or the generic fallback.
fn server_error_message(body: &Value) -> String {
    match body.get("error") {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        Some(value @ (Value::Object(_) | Value::Array(_))) => value.to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => UNKNOWN_ERROR.to_string(),
    }
}
