//! HTTP dispatch.
//!
//! Sends a signed [`RequestEnvelope`] and buffers the whole response. Every
//! status code is returned as an [`ApiResult`]; only transport failures are
//! errors. There is no retry.

use std::time::Duration;

use reqwest::redirect::Policy;

use super::error::ClientError;
use super::request::RequestEnvelope;
use super::response::ApiResult;

/// Executes signed requests with a fixed timeout.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: reqwest::Client,
}

impl Dispatcher {
    /// Creates a dispatcher whose requests time out after `timeout`.
    ///
    /// Redirects are not followed so 3xx statuses reach the classifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(format!("lalamove-sdk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self { http })
    }

    /// Sends the request and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Timeout` when the timeout elapses and
    /// `ClientError::Transport` for any other failure to obtain a response.
    pub async fn send(&self, request: RequestEnvelope) -> Result<ApiResult, ClientError> {
        let mut builder = self
            .http
            .request(request.method.into(), &request.url)
            .body(request.body.clone());
        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // `bytes()` consumes the response, releasing the connection.
        let body = response.bytes().await?.to_vec();

        Ok(ApiResult {
            request_id: request.headers.request_id.clone(),
            request,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_new() {
        assert!(Dispatcher::new(Duration::from_secs(30)).is_ok());
    }
}
