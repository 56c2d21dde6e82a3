//! Reqwest-backed standards backend client.
//!
//! This adapter owns transport details only: URL construction, credentials,
//! retry of network failures, HTTP status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use super::config::OntaraClientConfig;
use crate::domain::ports::{StandardsBackend, StandardsBackendError};
use crate::domain::standards::{
    BackendHealth, MatchExpressionParams, MatchExpressionResult, SchemaInfo,
    SearchStandardsParams, SearchStandardsResult, Standard, StandardId,
};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Status and body of a completed exchange.
struct Reply {
    status: StatusCode,
    body: Vec<u8>,
}

/// HTTP client for the standards backend REST API.
#[derive(Debug, Clone)]
pub struct OntaraHttpClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    retries: u32,
    retry_delay: Duration,
}

impl OntaraHttpClient {
    /// Build a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: OntaraClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            retries: config.retries,
            retry_delay: config.retry_delay,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StandardsBackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StandardsBackendError::unexpected(format!(
                    "backend URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn exchange(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Reply, StandardsBackendError> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(method.clone(), url.clone(), body).await {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.retry_delay, attempt);
                    warn!(
                        %url,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "retrying standards backend request"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// One attempt. A 404 is returned as a reply so lookups can treat it as
    /// absence; every other non-success status becomes an error.
    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Reply, StandardsBackendError> {
        debug!(%method, %url, "calling standards backend");
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(Reply {
                status,
                body: body.to_vec(),
            })
        } else {
            Err(map_status_error(status, body.as_ref()))
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<T, StandardsBackendError> {
        let url = self.endpoint(segments)?;
        let reply = self.exchange(method, url, body).await?;
        decode_reply(&reply)
    }
}

/// Linear backoff, saturating rather than overflowing for extreme settings.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(attempt)
}

fn decode_reply<T: DeserializeOwned>(reply: &Reply) -> Result<T, StandardsBackendError> {
    if !reply.status.is_success() {
        return Err(map_status_error(reply.status, &reply.body));
    }
    serde_json::from_slice(&reply.body).map_err(|err| {
        StandardsBackendError::unexpected(format!("invalid backend JSON payload: {err}"))
    })
}

fn to_body<B: serde::Serialize>(body: &B) -> Result<Value, StandardsBackendError> {
    serde_json::to_value(body).map_err(|err| StandardsBackendError::unexpected(err.to_string()))
}

#[async_trait]
impl StandardsBackend for OntaraHttpClient {
    async fn classify(&self, latex: &str) -> Result<MatchExpressionResult, StandardsBackendError> {
        let body = json!({ "latex": latex });
        self.call(Method::POST, &["classify"], Some(&body)).await
    }

    async fn match_expression(
        &self,
        params: &MatchExpressionParams,
    ) -> Result<MatchExpressionResult, StandardsBackendError> {
        let body = to_body(params)?;
        self.call(Method::POST, &["match"], Some(&body)).await
    }

    async fn search(
        &self,
        params: &SearchStandardsParams,
    ) -> Result<SearchStandardsResult, StandardsBackendError> {
        let body = to_body(params)?;
        self.call(Method::POST, &["standards", "search"], Some(&body)).await
    }

    async fn get_by_id(&self, id: &StandardId) -> Result<Option<Standard>, StandardsBackendError> {
        let url = self.endpoint(&["standards", id.as_str()])?;
        let reply = self.exchange(Method::GET, url, None).await?;
        if reply.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode_reply(&reply).map(Some)
    }

    async fn get_schema(&self) -> Result<SchemaInfo, StandardsBackendError> {
        self.call(Method::GET, &["schema"], None).await
    }

    async fn health(&self) -> Result<BackendHealth, StandardsBackendError> {
        self.call(Method::GET, &["health"], None).await
    }
}

fn map_transport_error(error: reqwest::Error) -> StandardsBackendError {
    if error.is_timeout() {
        StandardsBackendError::network(format!("request timed out: {error}"))
    } else {
        StandardsBackendError::network(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StandardsBackendError {
    let message = error_message(status, body);
    match status.as_u16() {
        400 | 422 => StandardsBackendError::validation(message),
        401 | 403 => StandardsBackendError::auth(message),
        408 | 429 | 502 | 503 | 504 => StandardsBackendError::network(message),
        _ => StandardsBackendError::backend(message),
    }
}

/// Prefer the backend's own `message`, then a preview of the body.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let reported = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(Value::String(message)) if !message.trim().is_empty() => Some(message.clone()),
            _ => None,
        });
    if let Some(message) = reported {
        return message;
    }

    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests;
