//! Request assembly and dispatch.
//!
//! This module turns a bound element's descriptor into an actual HTTP
//! request: no response caching, raw text body, caller overrides applied last
//! so they win over the assembled configuration.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, LOCATION};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;

use crate::binding::RequestDescriptor;
use crate::error_handling::TransportError;
use crate::navigation::resolve_target;

/// Caller-supplied overrides for the assembled request configuration.
///
/// Overrides are applied after the defaults, so they can tune anything the
/// transport set up, e.g. attach a request body. Deserializable so embedding
/// applications can keep override blobs in their own configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestOverrides {
    /// Extra request headers as (name, value) pairs. Malformed pairs are
    /// skipped with a warning.
    pub headers: Vec<(String, String)>,

    /// Query parameters appended to the request URL.
    pub query: Vec<(String, String)>,

    /// Request body.
    pub body: Option<String>,

    /// Per-request timeout, overriding the client-wide one.
    pub timeout_seconds: Option<u64>,
}

/// An HTTP reply as the response handlers see it.
///
/// The body is raw text; nothing is cached or parsed.
pub struct TransportReply {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TransportReply {
    /// Builds a reply from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        TransportReply {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// All response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A response header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The `Location` response header, if present.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The raw text body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether this reply routes to the success handler (2xx or 304).
    pub fn is_success(&self) -> bool {
        self.status.is_success() || self.status == StatusCode::NOT_MODIFIED
    }
}

/// Sends the request a descriptor describes.
///
/// The target is resolved against `base` (absolute targets win), the method
/// comes from the descriptor, and caching is disabled. Overrides, when
/// present, are applied last.
///
/// Returns a [`TransportReply`] for any HTTP response, whatever its status;
/// errors mean no response exists at all.
///
/// # Errors
///
/// - [`TransportError::MissingTarget`] when the descriptor has no target
/// - [`TransportError::InvalidTarget`] when the target can't become a URL
/// - [`TransportError::InvalidMethod`] when the method isn't a valid token
/// - [`TransportError::RequestFailed`] when the request dies below HTTP
pub async fn send_request(
    client: &reqwest::Client,
    descriptor: &RequestDescriptor,
    base: &Url,
) -> Result<TransportReply, TransportError> {
    let target = descriptor.target().ok_or(TransportError::MissingTarget)?;
    let url = resolve_target(base, target).map_err(|source| TransportError::InvalidTarget {
        target: target.to_string(),
        source,
    })?;
    let method = Method::from_bytes(descriptor.method().to_ascii_uppercase().as_bytes())
        .map_err(|_| TransportError::InvalidMethod(descriptor.method().to_string()))?;

    log::debug!("sending {method} {url}");

    let mut builder = client
        .request(method, url)
        .header(ACCEPT, "text/plain, */*")
        .header(CACHE_CONTROL, "no-cache");

    if let Some(overrides) = descriptor.overrides() {
        builder = apply_overrides(builder, overrides);
    }

    let response = builder.send().await?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            log::debug!("failed to read reply body: {e}");
            String::new()
        }
    };

    Ok(TransportReply::new(status, headers, body))
}

fn apply_overrides(
    mut builder: reqwest::RequestBuilder,
    overrides: &RequestOverrides,
) -> reqwest::RequestBuilder {
    for (name, value) in &overrides.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => log::warn!("skipping malformed override header {name:?}"),
        }
    }
    if !overrides.query.is_empty() {
        builder = builder.query(&overrides.query);
    }
    if let Some(body) = &overrides.body {
        builder = builder.body(body.clone());
    }
    if let Some(secs) = overrides.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16) -> TransportReply {
        TransportReply::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            String::new(),
        )
    }

    #[test]
    fn test_is_success_classification() {
        assert!(reply(200).is_success());
        assert!(reply(201).is_success());
        assert!(reply(204).is_success());
        assert!(reply(304).is_success());
        assert!(!reply(301).is_success());
        assert!(!reply(404).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn test_header_access() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("/next"));
        let reply = TransportReply::new(StatusCode::OK, headers, "hello".to_string());

        assert_eq!(reply.location(), Some("/next"));
        assert_eq!(reply.header("location"), Some("/next"));
        assert_eq!(reply.header("x-missing"), None);
        assert_eq!(reply.body(), "hello");
    }

    #[test]
    fn test_overrides_default_is_empty() {
        let overrides = RequestOverrides::default();
        assert!(overrides.headers.is_empty());
        assert!(overrides.query.is_empty());
        assert!(overrides.body.is_none());
        assert!(overrides.timeout_seconds.is_none());
    }

    #[test]
    fn test_overrides_deserialize() {
        let overrides: RequestOverrides = serde_json::from_str(
            r#"{"body": "a=1", "headers": [["x-requested-with", "actionlink"]]}"#,
        )
        .expect("overrides should deserialize");

        assert_eq!(overrides.body.as_deref(), Some("a=1"));
        assert_eq!(overrides.headers.len(), 1);
        assert!(overrides.query.is_empty());
    }
}
