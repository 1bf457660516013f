// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! [`Connector`] implementation over the WAPI REST interface.
//!
//! | Verb            | HTTP                                                   |
//! |-----------------|--------------------------------------------------------|
//! | `get_object`    | `GET {type}?field=value&*EA=value&_return_fields=a,b`  |
//! | `create_object` | `POST {type}?_return_fields=a,b` with a JSON body      |
//! | `update_object` | `PUT {ref}` with a JSON body                           |
//! | `delete_object` | `DELETE {ref}`                                         |
//!
//! Transient failures (429, 5xx, connection errors) are retried with
//! exponential backoff, see [`retry`](super::retry).

use super::retry::{http_backoff, is_retryable_http_status, ExponentialBackoff};
use super::{Connector, ConnectorOptions};
use crate::constants::PARAM_RETURN_FIELDS;
use crate::errors::{InfobloxError, Result};
use crate::types::{record, Record};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::Url;

/// Failure of a single WAPI round trip, before it is mapped to a verb specific error.
#[derive(Debug)]
enum RequestFailure {
    /// WAPI answered with a non-success status
    Status { status: StatusCode, reason: String },
    /// The request never got an answer
    Transport(String),
}

impl RequestFailure {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => is_retryable_http_status(*status),
            Self::Transport(_) => true,
        }
    }
}

/// Error body returned by WAPI, e.g.
/// `{"Error": "AdmConDataNotFoundError: ...", "code": "Client.Ibap.Data.NotFound", "text": "..."}`
#[derive(Debug, Deserialize)]
struct WapiErrorBody {
    #[serde(rename = "Error")]
    error: Option<String>,
    text: Option<String>,
}

/// Extract a human readable reason from a WAPI error body.
pub(crate) fn error_reason(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<WapiErrorBody>(body) {
        if let Some(reason) = parsed.text.or(parsed.error) {
            return reason;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render a filter value as a query parameter value.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Grid master connector speaking WAPI over HTTPS.
///
/// # Examples
///
/// ```rust,no_run
/// use ibgrid::connector::{ConnectorOptions, WapiConnector};
///
/// let options = ConnectorOptions {
///     host: "gm.example.com".to_string(),
///     username: "admin".to_string(),
///     password: "infoblox".to_string(),
///     ..ConnectorOptions::default()
/// };
/// let connector = WapiConnector::new(options).expect("valid options");
/// ```
#[derive(Debug, Clone)]
pub struct WapiConnector {
    /// HTTP client for API requests
    client: Arc<HttpClient>,
    /// Connection settings and naming defaults
    options: Arc<ConnectorOptions>,
    /// `https://host/wapi/vX.Y/`
    base_url: String,
    /// Retry schedule template, restarted for every request
    backoff: ExponentialBackoff,
}

impl WapiConnector {
    /// Create a connector from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`InfobloxError::Config`] if the options are incomplete, the host
    /// does not form a valid URL, or the HTTP client cannot be built.
    pub fn new(options: ConnectorOptions) -> Result<Self> {
        options.validate()?;

        let base_url = options.base_url();
        Url::parse(&base_url)
            .map_err(|e| InfobloxError::Config(format!("invalid host '{}': {e}", options.host)))?;

        let client = HttpClient::builder()
            .timeout(options.request_timeout())
            .danger_accept_invalid_certs(!options.ssl_verify)
            .build()
            .map_err(|e| InfobloxError::Config(format!("cannot build HTTP client: {e}")))?;

        debug!(base_url = %base_url, ssl_verify = options.ssl_verify, "WAPI connector created");

        Ok(Self {
            client: Arc::new(client),
            options: Arc::new(options),
            base_url,
            backoff: http_backoff(),
        })
    }

    /// Replace the retry schedule.
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Options this connector was built from
    #[must_use]
    pub fn options(&self) -> &ConnectorOptions {
        &self.options
    }

    /// URL of an object type or an object reference.
    ///
    /// Built by concatenation: object types such as `member:dns` would be taken
    /// as a URL scheme by `Url::join`.
    pub(crate) fn object_url(&self, path: &str) -> Result<Url> {
        let full = format!("{}{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&full).map_err(|e| InfobloxError::Config(format!("invalid URL '{full}': {e}")))
    }

    /// URL of a search request.
    pub(crate) fn search_url(
        &self,
        obj_type: &str,
        filter: Option<&Record>,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Url> {
        let mut url = self.object_url(obj_type)?;
        {
            let mut query = url.query_pairs_mut();
            for (field, value) in filter.into_iter().flatten() {
                query.append_pair(field, &query_value(value));
            }
            for (name, attr) in extattrs.into_iter().flatten() {
                let value = attr.get("value").unwrap_or(attr);
                query.append_pair(&format!("*{name}"), &query_value(value));
            }
            if let Some(fields) = return_fields.filter(|f| !f.is_empty()) {
                query.append_pair(PARAM_RETURN_FIELDS, &fields.join(","));
            }
        }
        Ok(strip_empty_query(url))
    }

    /// Execute a request with automatic retry of transient failures.
    async fn request(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Record>,
    ) -> std::result::Result<String, RequestFailure> {
        let mut backoff = self.backoff.clone();
        backoff.reset();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match self.request_once(method.clone(), url, body).await {
                Ok(text) => {
                    if attempt > 1 {
                        debug!(
                            method = %method,
                            url = %url,
                            attempt = attempt,
                            elapsed = ?backoff.elapsed(),
                            "WAPI call succeeded after retries"
                        );
                    }
                    return Ok(text);
                }
                Err(failure) => failure,
            };

            if !failure.is_retryable() {
                return Err(failure);
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    warn!(
                        method = %method,
                        url = %url,
                        attempt = attempt,
                        retry_after = ?duration,
                        error = ?failure,
                        "Retryable WAPI error, will retry"
                    );
                    tokio::time::sleep(duration).await;
                }
                None => {
                    error!(
                        method = %method,
                        url = %url,
                        attempt = attempt,
                        elapsed = ?backoff.elapsed(),
                        error = ?failure,
                        "Backoff exhausted, giving up"
                    );
                    return Err(failure);
                }
            }
        }
    }

    /// Single WAPI round trip without retry.
    async fn request_once(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Record>,
    ) -> std::result::Result<String, RequestFailure> {
        debug!(method = %method, url = %url, body = ?body, "WAPI request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(&self.options.username, Some(&self.options.password));
        if let Some(body_data) = body {
            request = request.json(body_data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let reason = error_reason(status, &text);
            debug!(
                method = %method,
                url = %url,
                status = %status,
                error = %reason,
                "WAPI request failed"
            );
            return Err(RequestFailure::Status { status, reason });
        }

        debug!(
            method = %method,
            url = %url,
            status = %status,
            response_len = text.len(),
            "WAPI request successful"
        );
        Ok(text)
    }
}

/// `query_pairs_mut` leaves a dangling `?` when nothing was appended.
fn strip_empty_query(mut url: Url) -> Url {
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

#[async_trait]
impl Connector for WapiConnector {
    async fn get_object(
        &self,
        obj_type: &str,
        filter: Option<&Record>,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>> {
        let url = self.search_url(obj_type, filter, return_fields, extattrs)?;

        let text = match self.request(Method::GET, &url, None).await {
            Ok(text) => text,
            Err(RequestFailure::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                return Ok(Vec::new());
            }
            Err(RequestFailure::Status { reason, .. }) => {
                return Err(InfobloxError::SearchError {
                    obj_type: obj_type.to_string(),
                    reason,
                });
            }
            Err(RequestFailure::Transport(reason)) => {
                return Err(InfobloxError::ConnectionError {
                    url: url.to_string(),
                    reason,
                });
            }
        };

        // Every element must be an object
        serde_json::from_str::<Vec<Record>>(&text).map_err(|e| InfobloxError::MalformedResponse {
            reason: format!("expected a JSON array of {obj_type} objects: {e}"),
        })
    }

    async fn create_object(
        &self,
        obj_type: &str,
        payload: &Record,
        return_fields: Option<&[&str]>,
    ) -> Result<Record> {
        let url = self.search_url(obj_type, None, return_fields, None)?;

        let text = self
            .request(Method::POST, &url, Some(payload))
            .await
            .map_err(|failure| match failure {
                RequestFailure::Status { reason, .. } => InfobloxError::CannotCreateObject {
                    obj_type: obj_type.to_string(),
                    reason,
                },
                RequestFailure::Transport(reason) => InfobloxError::ConnectionError {
                    url: url.to_string(),
                    reason,
                },
            })?;

        // Without return fields WAPI answers with the bare reference string
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::String(reference)) => Ok(record(serde_json::json!({ "_ref": reference }))),
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(InfobloxError::MalformedResponse {
                reason: format!("unexpected create response for {obj_type}: {other}"),
            }),
            Err(e) => Err(InfobloxError::MalformedResponse {
                reason: format!("invalid create response for {obj_type}: {e}"),
            }),
        }
    }

    async fn update_object(&self, reference: &str, payload: &Record) -> Result<()> {
        let url = self.object_url(reference)?;

        self.request(Method::PUT, &url, Some(payload))
            .await
            .map(|_| ())
            .map_err(|failure| match failure {
                RequestFailure::Status { reason, .. } => InfobloxError::CannotUpdateObject {
                    reference: reference.to_string(),
                    reason,
                },
                RequestFailure::Transport(reason) => InfobloxError::ConnectionError {
                    url: url.to_string(),
                    reason,
                },
            })
    }

    async fn delete_object(&self, reference: &str) -> Result<()> {
        let url = self.object_url(reference)?;

        self.request(Method::DELETE, &url, None)
            .await
            .map(|_| ())
            .map_err(|failure| match failure {
                RequestFailure::Status { reason, .. } => InfobloxError::CannotRemoveObject {
                    reference: reference.to_string(),
                    reason,
                },
                RequestFailure::Transport(reason) => InfobloxError::ConnectionError {
                    url: url.to_string(),
                    reason,
                },
            })
    }

    fn network_view(&self) -> &str {
        &self.options.network_view
    }

    fn dns_view(&self) -> &str {
        &self.options.dns_view
    }

    fn multi_tenant(&self) -> bool {
        self.options.multi_tenant
    }

    fn ns_group(&self) -> Option<&str> {
        self.options.ns_group.as_deref()
    }
}

#[cfg(test)]
#[path = "wapi_tests.rs"]
mod wapi_tests;
