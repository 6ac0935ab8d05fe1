//! Response classification and parsing.
//!
//! Responses are classified by status code:
//!
//! | Status | Handling |
//! |--------|----------|
//! | 200–299 | body decoded into the target type |
//! | 400–499 | body decoded as `{"errors": [...]}`; the **last** entry is surfaced |
//! | 500+ | body decoded as `{"message": "..."}` |
//! | anything else | no-op, parsed as `None` |
//!
//! Both error tiers write the full call context to the log sink before the
//! error is returned. Successful calls are never logged.

use std::fmt;
use std::io;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{ApiErrorEntry, ClientError};
use super::request::RequestEnvelope;
use crate::logger::{FileLogger, LogLevel};

/// Destination for call diagnostics.
pub trait LogSink: fmt::Debug + Send + Sync {
    /// Writes one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry could not be recorded.
    fn write(&self, level: LogLevel, message: &str) -> io::Result<()>;
}

impl LogSink for FileLogger {
    fn write(&self, level: LogLevel, message: &str) -> io::Result<()> {
        FileLogger::write(self, level, message)
    }
}

/// Status code tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200–299.
    Success,
    /// 400–499.
    ClientError,
    /// 500 and above.
    ServerError,
    /// Informational and redirect statuses; neither success nor error.
    Unhandled,
}

impl StatusClass {
    /// Classifies a status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400..=499 => Self::ClientError,
            500.. => Self::ServerError,
            _ => Self::Unhandled,
        }
    }
}

/// 4xx error body.
#[derive(Debug, Deserialize)]
struct ErrorsEnvelope {
    errors: Vec<ApiErrorEntry>,
}

/// 5xx error body.
#[derive(Debug, Deserialize)]
struct ServerErrorEnvelope {
    message: String,
}

/// Raw outcome of a dispatched call. Consumed by [`ApiResult::parse`].
#[derive(Debug)]
pub struct ApiResult {
    /// Id sent in the `Request-ID` header.
    pub request_id: String,
    /// The request that produced this response.
    pub request: RequestEnvelope,
    /// HTTP status code.
    pub status: u16,
    /// Fully buffered response body.
    pub body: Vec<u8>,
}

impl ApiResult {
    /// Returns the status tier of this result.
    #[must_use]
    pub const fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    /// Classifies the response and decodes its body.
    ///
    /// Returns `Ok(None)` for statuses outside the success and error tiers.
    ///
    /// # Errors
    ///
    /// - `ClientError::Decode` if the body does not match the expected shape
    /// - `ClientError::Api` for 4xx responses
    /// - `ClientError::Server` for 5xx responses
    pub fn parse<T: DeserializeOwned>(
        self,
        sink: Option<&dyn LogSink>,
    ) -> Result<Option<T>, ClientError> {
        match self.class() {
            StatusClass::Success => Ok(Some(serde_json::from_slice(&self.body)?)),
            StatusClass::ClientError => {
                self.log_call_context(sink);
                let envelope: ErrorsEnvelope = serde_json::from_slice(&self.body)?;
                // Only the last entry is reported.
                let entry = envelope.errors.into_iter().last().ok_or_else(|| {
                    ClientError::Decode("error response contained no entries".to_string())
                })?;
                Err(ClientError::from_entry(self.status, entry))
            }
            StatusClass::ServerError => {
                self.log_call_context(sink);
                let envelope: ServerErrorEnvelope = serde_json::from_slice(&self.body)?;
                Err(ClientError::Server {
                    status: self.status,
                    message: envelope.message,
                })
            }
            StatusClass::Unhandled => Ok(None),
        }
    }

    fn call_context(&self) -> String {
        let headers: serde_json::Map<String, serde_json::Value> = self
            .request
            .headers
            .pairs()
            .iter()
            .map(|(name, value)| ((*name).to_string(), serde_json::Value::from(*value)))
            .collect();

        format!(
            "API call failed\n\
             ------------------------------\n\
             Req-ID: {}\n\
             Req-URL: {}\n\
             Req-Method: {}\n\
             Req-Header: {}\n\
             Resp-StatusCode: {}\n\
             Resp-Body: {}\n\
             ------------------------------",
            self.request_id,
            self.request.url,
            self.request.method,
            serde_json::Value::Object(headers),
            self.status,
            String::from_utf8_lossy(&self.body),
        )
    }

    fn log_call_context(&self, sink: Option<&dyn LogSink>) {
        tracing::error!(
            request_id = %self.request_id,
            method = %self.request.method,
            url = %self.request.url,
            status = self.status,
            "API call failed"
        );

        if let Some(sink) = sink {
            if let Err(e) = sink.write(LogLevel::Error, &self.call_context()) {
                tracing::warn!("failed to write call context to log sink: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde::de::IgnoredAny;

    use super::*;
    use crate::client::config::ClientConfig;
    use crate::client::request::{HttpMethod, RequestBuilder};

    #[derive(Debug, Default)]
    struct RecordingSink {
        entries: Mutex<Vec<(LogLevel, String)>>,
    }

    impl LogSink for RecordingSink {
        fn write(&self, level: LogLevel, message: &str) -> io::Result<()> {
            self.entries
                .lock()
                .unwrap()
                .push((level, message.to_string()));
            Ok(())
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    fn result(status: u16, body: &str) -> ApiResult {
        let config = ClientConfig::new("pk_test", "sk_test", "hk");
        let request = RequestBuilder::new(&config).build_at(
            HttpMethod::Get,
            "/v3/cities",
            Vec::new(),
            1_700_000_000_000,
            "req-1".to_string(),
        );
        ApiResult {
            request_id: request.headers.request_id.clone(),
            request,
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_status_class_boundaries() {
        assert_eq!(StatusClass::of(199), StatusClass::Unhandled);
        assert_eq!(StatusClass::of(200), StatusClass::Success);
        assert_eq!(StatusClass::of(299), StatusClass::Success);
        assert_eq!(StatusClass::of(300), StatusClass::Unhandled);
        assert_eq!(StatusClass::of(399), StatusClass::Unhandled);
        assert_eq!(StatusClass::of(400), StatusClass::ClientError);
        assert_eq!(StatusClass::of(499), StatusClass::ClientError);
        assert_eq!(StatusClass::of(500), StatusClass::ServerError);
        assert_eq!(StatusClass::of(599), StatusClass::ServerError);
    }

    #[test]
    fn test_parse_success() {
        let sink = RecordingSink::default();
        let parsed: Option<Payload> = result(200, r#"{"value":7}"#).parse(Some(&sink)).unwrap();
        assert_eq!(parsed, Some(Payload { value: 7 }));

        let parsed: Option<Payload> = result(299, r#"{"value":8}"#).parse(Some(&sink)).unwrap();
        assert_eq!(parsed, Some(Payload { value: 8 }));
        assert!(sink.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_success_bad_json() {
        let err = result(200, "not json").parse::<Payload>(None).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_parse_redirect_is_noop() {
        let sink = RecordingSink::default();
        let parsed: Option<Payload> = result(300, "garbage").parse(Some(&sink)).unwrap();
        assert!(parsed.is_none());
        assert!(sink.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_parse_client_error_surfaces_last_entry() {
        let sink = RecordingSink::default();
        let body = r#"{"errors":[{"id":"A","message":"first"},{"id":"B","message":"second","detail":"d"}]}"#;
        let err = result(422, body).parse::<IgnoredAny>(Some(&sink)).unwrap_err();
        assert_eq!(err.to_string(), "[B] second (detail: d)");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_parse_client_error_boundaries() {
        let body = r#"{"errors":[{"id":"ERR_UNAUTHORIZED","message":"unauthorized"}]}"#;
        for status in [400, 499] {
            let err = result(status, body).parse::<IgnoredAny>(None).unwrap_err();
            assert_eq!(err.to_string(), "[ERR_UNAUTHORIZED] unauthorized");
        }
    }

    #[test]
    fn test_parse_client_error_logs_call_context() {
        let sink = RecordingSink::default();
        let body = r#"{"errors":[{"id":"ERR_INVALID_FIELD","message":"bad"}]}"#;
        let _ = result(400, body).parse::<IgnoredAny>(Some(&sink));

        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let (level, message) = &entries[0];
        assert_eq!(*level, LogLevel::Error);
        assert!(message.contains("Req-ID: req-1"));
        assert!(message.contains("Req-URL: https://rest.lalamove.com/v3/cities"));
        assert!(message.contains("Req-Method: GET"));
        assert!(message.contains("\"Market\":\"HK\""));
        assert!(message.contains("Resp-StatusCode: 400"));
        assert!(message.contains("ERR_INVALID_FIELD"));
    }

    #[test]
    fn test_parse_client_error_bad_body() {
        let sink = RecordingSink::default();
        let err = result(404, "<html>").parse::<IgnoredAny>(Some(&sink)).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert_eq!(sink.entries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_client_error_empty_entries() {
        let err = result(400, r#"{"errors":[]}"#).parse::<IgnoredAny>(None).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_parse_client_error_null_detail() {
        let body = r#"{"errors":[{"id":"ERR_INVALID_FIELD","message":"bad","detail":null}]}"#;
        let err = result(422, body).parse::<IgnoredAny>(None).unwrap_err();
        assert_eq!(err.to_string(), "[ERR_INVALID_FIELD] bad");
        assert!(matches!(
            err,
            ClientError::Api {
                status: 422,
                detail: None,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_server_error() {
        let sink = RecordingSink::default();
        let err = result(500, r#"{"message":"Internal Server Error"}"#)
            .parse::<IgnoredAny>(Some(&sink))
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, .. }));
        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(sink.entries.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_server_error_ignores_id_fields() {
        let body = r#"{"id":"X","message":"upstream down","detail":"ignored"}"#;
        let err = result(503, body).parse::<IgnoredAny>(None).unwrap_err();
        assert_eq!(err.to_string(), "upstream down");
    }

    #[test]
    fn test_parse_server_error_bad_body() {
        let err = result(502, "Bad Gateway").parse::<IgnoredAny>(None).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
