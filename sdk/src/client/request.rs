//! Signed request construction.
//!
//! `RequestBuilder` turns an operation's method, path and body into a
//! `RequestEnvelope` carrying everything the dispatcher needs: the absolute
//! URL, the raw body and the authentication headers.

use std::fmt;

use super::config::ClientConfig;
use super::signer::{canonical_message, new_request_id, sign};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Authentication headers attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Milliseconds since the Unix epoch, as a decimal string.
    pub timestamp: String,
    /// Opaque per-request id.
    pub request_id: String,
    /// Upper-cased market code.
    pub market: String,
    /// `hmac {api_key}:{timestamp}:{signature}`.
    pub authorization: String,
}

impl SignedHeaders {
    /// Returns all request headers in the order they are sent.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Content-Type", "application/json"),
            ("Accept", "application/json"),
            ("Request-ID", &self.request_id),
            ("Market", &self.market),
            ("Authorization", &self.authorization),
        ]
    }
}

/// A fully built, signed request. Constructed fresh for every call.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    /// HTTP method.
    pub method: HttpMethod,
    /// Versioned path, e.g. `/v3/orders`.
    pub path: String,
    /// Absolute URL (base URL + path).
    pub url: String,
    /// Raw JSON body; empty when the operation sends none.
    pub body: Vec<u8>,
    /// Authentication headers.
    pub headers: SignedHeaders,
}

/// Builds signed requests from a client configuration.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
}

impl<'a> RequestBuilder<'a> {
    /// Creates a builder for the given configuration.
    #[must_use]
    pub const fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Builds a request stamped with the current time and a fresh request id.
    #[must_use]
    pub fn build(&self, method: HttpMethod, path: &str, body: Vec<u8>) -> RequestEnvelope {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        self.build_at(method, path, body, timestamp_ms, new_request_id())
    }

    /// Builds a request with an explicit timestamp and request id.
    #[must_use]
    pub fn build_at(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
        timestamp_ms: i64,
        request_id: String,
    ) -> RequestEnvelope {
        let message = canonical_message(timestamp_ms, method, path, &body);
        let signature = sign(&self.config.api_secret, &message);
        let timestamp = timestamp_ms.to_string();

        let headers = SignedHeaders {
            authorization: format!("hmac {}:{}:{}", self.config.api_key, timestamp, signature),
            market: self.config.country.to_uppercase(),
            request_id,
            timestamp,
        };

        RequestEnvelope {
            method,
            path: path.to_string(),
            url: format!("{}{}", self.config.base_url(), path),
            body,
            headers,
        }
    }
}
