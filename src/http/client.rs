//! HTTP client for IOPaint API checks
//!
//! Thin wrapper over reqwest that classifies transport failures and
//! returns raw response bytes, so image bodies and JSON bodies go through
//! the same path.

use anyhow::{Context, Result};
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// HTTP client bound to one service base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create client with a default timeout for requests that set none
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: None,
            timeout_secs,
        })
    }

    /// Set base URL for requests
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build full URL
    fn build_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => {
                if path.starts_with("http://") || path.starts_with("https://") {
                    path.to_string()
                } else {
                    format!("{}{}", base.trim_end_matches('/'), path)
                }
            }
            None => path.to_string(),
        }
    }

    /// Send HTTP request
    ///
    /// Any response that arrives is returned as `Ok`, whatever its status.
    /// Only transport-level failures surface as [`HttpError`].
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.build_url(&request.url);
        debug!("Sending {} request to {}", request.method, url);

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(HttpError::InvalidUrl(url).into());
        }

        let method =
            Method::from_bytes(request.method.as_bytes()).context("Invalid HTTP method")?;

        let mut req_builder = self.client.request(method, &url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let timeout_secs = request.timeout_secs.unwrap_or(self.timeout_secs);
        req_builder = req_builder.timeout(Duration::from_secs(timeout_secs));

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(timeout_secs))
            } else if e.is_builder() {
                anyhow::anyhow!(HttpError::InvalidUrl(url.clone()))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionFailed {
                    url: url.clone(),
                    reason: root_cause(&e),
                })
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let status = response.status();

        let mut headers = HashMap::new();
        for (key, value) in response.headers().iter() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(timeout_secs))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(format!(
                    "Failed to read response body: {e}"
                )))
            }
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms ({} bytes)",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms,
            body.len()
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers,
            body: body.to_vec(),
            duration_ms,
        })
    }
}

/// Innermost error message, e.g. "Connection refused (os error 111)"
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout_secs: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// JSON body with matching content type
    pub fn json(self, body: impl Into<String>) -> Self {
        self.header("Content-Type", "application/json").body(body)
    }

    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    /// Header names are lowercase
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Body as text, lossy for non-UTF-8 bytes
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-seed".to_string(), "42".to_string());
        HttpResponse {
            status_code,
            headers,
            body: body.as_bytes().to_vec(),
            duration_ms: 5,
        }
    }

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::post("/api/v1/inpaint")
            .json("{}")
            .timeout(60);

        assert_eq!(req.method, "POST");
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
        assert_eq!(req.timeout_secs, Some(60));
    }

    #[test]
    fn test_build_url_joins_base() {
        let client = HttpClient::with_timeout(10)
            .unwrap()
            .base_url("http://localhost:8080/");
        assert_eq!(
            client.build_url("/api/v1/model"),
            "http://localhost:8080/api/v1/model"
        );
        assert_eq!(
            client.build_url("http://other:9000/x"),
            "http://other:9000/x"
        );
    }

    #[test]
    fn test_http_response() {
        let resp = response(200, "{\"name\":\"lama\"}");
        assert!(resp.is_ok());
        assert_eq!(resp.get_header("X-Seed").map(String::as_str), Some("42"));
        assert_eq!(resp.text(), "{\"name\":\"lama\"}");
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(!response(204, "").is_ok());
        assert!(!response(500, "").is_ok());
    }

    #[test]
    fn test_text_is_lossy() {
        let mut resp = response(500, "");
        resp.body = vec![b'o', b'k', 0xff];
        assert!(resp.text().starts_with("ok"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = HttpClient::with_timeout(5)
            .unwrap()
            .base_url(format!("http://127.0.0.1:{port}"));
        let err = client
            .send(HttpRequest::get("/api/v1/model"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HttpError>(),
            Some(HttpError::ConnectionFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_is_classified() {
        for base in ["not a url", "localhost:8080", "http://exa mple"] {
            let client = HttpClient::with_timeout(5).unwrap().base_url(base);
            let err = client
                .send(HttpRequest::get("/api/v1/model"))
                .await
                .unwrap_err();
            assert!(
                matches!(err.downcast_ref::<HttpError>(), Some(HttpError::InvalidUrl(_))),
                "{base}: {err}"
            );
        }
    }
}
