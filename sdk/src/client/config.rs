//! Client configuration.
//!
//! Provides configuration options for the HTTP client.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ClientError;

/// Production API endpoint.
pub const PRODUCTION_BASE_URL: &str = "https://rest.lalamove.com";

/// Sandbox API endpoint.
pub const SANDBOX_BASE_URL: &str = "https://rest.sandbox.lalamove.com";

/// API version prefix for every path.
pub const API_VERSION: &str = "v3";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Returns true unless both credentials are production credentials.
///
/// Production keys contain `pk_prod` and production secrets `sk_prod`;
/// anything else is treated as a sandbox pair.
#[must_use]
pub fn is_sandbox_credentials(api_key: &str, api_secret: &str) -> bool {
    !(api_key.contains("pk_prod") && api_secret.contains("sk_prod"))
}

/// Client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// API key (`pk_…`).
    pub api_key: String,

    /// API secret (`sk_…`), used to sign requests.
    pub api_secret: String,

    /// Market code; case-insensitive, sent upper-cased.
    pub country: String,

    /// Use the sandbox endpoint.
    pub sandbox: bool,

    /// Emit debug events for every request and response.
    pub debug: bool,

    /// Request timeout.
    pub timeout: Duration,

    /// Endpoint override; takes precedence over the sandbox flag.
    pub base_url_override: Option<String>,

    /// File that failed calls are logged to.
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("country", &self.country)
            .field("sandbox", &self.sandbox)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("base_url_override", &self.base_url_override)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a production configuration for the given credentials and market.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            country: country.into(),
            sandbox: false,
            debug: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url_override: None,
            log_file: None,
        }
    }

    /// Selects the sandbox endpoint.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Enables debug events.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the endpoint, e.g. to point at a local test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Sets the log file for failed calls.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self.base_url_override.as_deref() {
            Some(url) => url,
            None if self.sandbox => SANDBOX_BASE_URL,
            None => PRODUCTION_BASE_URL,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint override is malformed or the timeout
    /// is zero.
    pub fn validate(&self) -> Result<(), ClientError> {
        if let Some(url) = &self.base_url_override {
            if url.is_empty() {
                return Err(ClientError::InvalidConfig(
                    "base_url cannot be empty".to_string(),
                ));
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::InvalidConfig(
                    "base_url must start with http:// or https://".to_string(),
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builds a versioned API path from its segments.
#[must_use]
pub fn api_path(segments: &[&str]) -> String {
    let mut path = format!("/{API_VERSION}");
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}
