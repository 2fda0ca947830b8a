//! HTTP binding for the remote endpoint
//!
//! Operations are issued as `POST {base_url}/{endpoint}` with the JSON
//! parameters as the request body. No retries and no timeouts; failures
//! surface to the caller as [`TransportError`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::error::TransportError;
use crate::Transport;

/// Remote endpoint client speaking JSON over HTTP
pub struct HttpTransport {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a new client for the endpoint at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token sent with every call
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn create_headers(&self) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                TransportError::Internal {
                    message: format!("invalid authorization header: {}", e),
                }
            })?;
            headers.insert(AUTHORIZATION, auth);
        }
        Ok(headers)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, endpoint: &str, params: Value) -> Result<Value, TransportError> {
        let url = self.endpoint_url(endpoint);
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("remote call {} failed with status {}", endpoint, status);
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

// ==================== Tests ====================
