// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Single-attempt request execution
//!
//! One call to [`RequestExecutor::execute`] is one HTTP exchange bounded by the
//! configured timeout. The outcome is classified into exactly one of: decoded
//! value, [`ApiError::Timeout`], [`ApiError::Http`] or [`ApiError::Transport`].

use std::sync::Arc;

use api_client::{ApiError, HttpRequest, HttpTransport, Method};
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::debug;

use crate::config::BraidPoolConfig;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-request options supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Request method
    pub method: Method,
    /// Extra headers, applied before the JSON headers
    pub headers: Vec<(String, String)>,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    /// Plain GET without extra headers
    pub fn get() -> Self {
        Self::default()
    }

    /// Add a caller header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Performs one bounded HTTP exchange against the node API
#[derive(Debug, Clone)]
pub struct RequestExecutor<T> {
    config: Arc<BraidPoolConfig>,
    transport: T,
}

impl<T: HttpTransport> RequestExecutor<T> {
    /// Create an executor over a transport
    pub fn new(config: Arc<BraidPoolConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    /// Shared configuration
    pub fn config(&self) -> &BraidPoolConfig {
        &self.config
    }

    /// Resolve the outgoing request for an endpoint
    ///
    /// Caller headers go first; `Content-Type` and `Accept` are then forced to
    /// JSON, replacing any caller value under the same name.
    pub fn build_request(&self, endpoint: &str, options: &RequestOptions) -> HttpRequest {
        let mut request = HttpRequest::new(options.method, self.config.endpoint_url(endpoint));

        for (name, value) in &options.headers {
            request = request.with_header(name, value.clone());
        }
        if let Some(body) = &options.body {
            request = request.with_body(body.clone());
        }

        request
            .with_header("Content-Type", JSON_CONTENT_TYPE)
            .with_header("Accept", JSON_CONTENT_TYPE)
    }

    /// Perform one attempt and decode the JSON body
    ///
    /// # Errors
    ///
    /// - [`ApiError::Timeout`] when no response arrives within the timeout
    /// - [`ApiError::Transport`] when the transport fails or the body is not
    ///   the expected JSON
    /// - [`ApiError::Http`] for any non-2xx status
    pub async fn execute<R>(&self, endpoint: &str, options: &RequestOptions) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let request = self.build_request(endpoint, options);
        let window = self.config.timeout();

        debug!(method = %request.method, url = %request.url, "Sending request");

        let response = match timeout(window, self.transport.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(cause)) => return Err(ApiError::transport(cause)),
            Err(_) => return Err(ApiError::Timeout { timeout: window }),
        };

        if !response.is_success() {
            return Err(ApiError::http(
                response.status,
                &response.status_text,
                &response.text(),
            ));
        }

        serde_json::from_slice(&response.body).map_err(ApiError::transport)
    }
}

#[cfg(test)]
mod tests {
    use api_client::{BoxError, HttpResponse};
    use serde_json::{Value, json};

    use super::*;

    #[derive(Debug, Clone)]
    struct StaticTransport {
        response: HttpResponse,
    }

    impl HttpTransport for StaticTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
            Ok(self.response.clone())
        }
    }

    #[derive(Debug, Clone)]
    struct FailingTransport(&'static str);

    impl HttpTransport for FailingTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
            Err(self.0.into())
        }
    }

    fn executor<T: HttpTransport>(transport: T) -> RequestExecutor<T> {
        let config = BraidPoolConfig::new("http://localhost:3000/", 1000, 0).unwrap();
        RequestExecutor::new(Arc::new(config), transport)
    }

    fn responding(response: HttpResponse) -> RequestExecutor<StaticTransport> {
        executor(StaticTransport { response })
    }

    #[test]
    fn json_headers_override_caller_headers() {
        let executor = responding(HttpResponse::new(200, "OK"));
        let options = RequestOptions::get()
            .with_header("content-type", "text/plain")
            .with_header("ACCEPT", "text/html")
            .with_header("X-Request-Source", "dashboard");

        let request = executor.build_request("/transactions", &options);

        assert_eq!(request.url, "http://localhost:3000/transactions");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("x-request-source"), Some("dashboard"));
        assert_eq!(request.headers.len(), 3);
    }

    #[test]
    fn success_decodes_json() {
        let executor =
            responding(HttpResponse::new(200, "OK").with_body(br#"{"count": 3}"#.to_vec()));

        let value: Value =
            tokio_test::block_on(executor.execute("/mempool/info", &RequestOptions::get()))
                .unwrap();

        assert_eq!(value, json!({ "count": 3 }));
    }

    #[test]
    fn error_status_is_classified() {
        let executor = responding(
            HttpResponse::new(404, "Not Found").with_body(b"Resource not found".to_vec()),
        );

        let error = tokio_test::block_on(
            executor.execute::<Value>("/transactions", &RequestOptions::get()),
        )
        .unwrap_err();

        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.message(), "HTTP 404: Not Found - Resource not found");
    }

    #[test]
    fn malformed_body_is_transport_error() {
        let executor = responding(HttpResponse::new(200, "OK").with_body(b"not json".to_vec()));

        let error = tokio_test::block_on(
            executor.execute::<Value>("/transactions", &RequestOptions::get()),
        )
        .unwrap_err();

        assert!(matches!(error, ApiError::Transport { .. }));
        assert!(error.status_code().is_none());
        assert!(error.cause().is_some());
    }

    #[test]
    fn transport_failure_keeps_cause() {
        let error = tokio_test::block_on(
            executor(FailingTransport("Network error"))
                .execute::<Value>("/transactions", &RequestOptions::get()),
        )
        .unwrap_err();

        assert_eq!(error.message(), "Network error");
        assert_eq!(error.cause().unwrap().to_string(), "Network error");
    }

    #[test]
    fn empty_transport_message_falls_back() {
        let failing = executor(FailingTransport(""));
        let error =
            tokio_test::block_on(failing.execute::<Value>("/transactions", &RequestOptions::get()))
                .unwrap_err();

        assert_eq!(error.message(), "Unknown API error");
    }
}
