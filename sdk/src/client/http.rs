//! HTTP client implementation.
//!
//! Provides the main client for the Lalamove v3 REST API. Every operation
//! runs build → dispatch → parse in sequence and resolves when the response
//! has been classified or the timeout elapses.

use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use super::config::{api_path, ClientConfig};
use super::dispatcher::Dispatcher;
use super::error::ClientError;
use super::request::{HttpMethod, RequestBuilder};
use super::response::{ApiResult, LogSink};
use crate::logger::{FileLogger, LogLevel};
use crate::types::{
    City, DeliveryStop, DriverDetail, Order, OrderDetail, Quotation, QuotationDetail,
};

/// `{"data": ...}` wrapper used by request and response bodies.
#[derive(Debug, Serialize, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriorityFeePayload<'a> {
    priority_fee: &'a str,
}

#[derive(Debug, Serialize)]
struct EditOrderPayload<'a> {
    stops: &'a [DeliveryStop],
}

#[derive(Debug, Serialize)]
struct ChangeDriverPayload {
    reason: String,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    url: &'a str,
}

/// Status returned by delete-style operations on success.
const NO_CONTENT: u16 = 204;

/// Status returned by the webhook operation on success.
const OK: u16 = 200;

/// HTTP client for the Lalamove v3 REST API.
#[derive(Debug, Clone)]
pub struct LalamoveClient {
    config: ClientConfig,
    dispatcher: Dispatcher,
    log_sink: Option<Arc<dyn LogSink>>,
}

impl LalamoveClient {
    /// Creates a new client with the given configuration.
    ///
    /// Opens the configured log file, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be created, or the log file cannot be opened.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let dispatcher = Dispatcher::new(config.timeout)?;

        let log_sink = match &config.log_file {
            Some(path) => {
                let logger = FileLogger::open(path, LogLevel::Debug).map_err(|e| {
                    ClientError::InvalidConfig(format!(
                        "cannot open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Some(Arc::new(logger) as Arc<dyn LogSink>)
            }
            None => None,
        };

        Ok(Self {
            config,
            dispatcher,
            log_sink,
        })
    }

    /// Replaces the log sink that failed calls are written to.
    #[must_use]
    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Switches to the sandbox endpoint.
    pub fn sandbox(&mut self) -> &mut Self {
        self.config.sandbox = true;
        self
    }

    /// Returns true if requests go to the sandbox endpoint.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.config.sandbox
    }

    /// Turns debug events on or off.
    pub fn debug(&mut self, enabled: bool) -> &mut Self {
        self.config.debug = enabled;
        self
    }

    /// Returns true if debug events are enabled.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    /// Changes the market.
    pub fn set_country(&mut self, country: impl Into<String>) -> &mut Self {
        self.config.country = country.into();
        self
    }

    /// Returns the market code as configured.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.config.country
    }

    fn sink(&self) -> Option<&dyn LogSink> {
        self.log_sink.as_deref()
    }

    fn encode<T: Serialize>(data: T) -> Result<Vec<u8>, ClientError> {
        serde_json::to_vec(&DataEnvelope { data })
            .map_err(|e| ClientError::Decode(format!("failed to encode request payload: {e}")))
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
    ) -> Result<ApiResult, ClientError> {
        let request = RequestBuilder::new(&self.config).build(method, path, body);

        if self.config.debug {
            tracing::debug!(
                request_id = %request.headers.request_id,
                method = %request.method,
                url = %request.url,
                body = %String::from_utf8_lossy(&request.body),
                "sending request"
            );
        }

        let result = self.dispatcher.send(request).await?;

        if self.config.debug {
            tracing::debug!(
                request_id = %result.request_id,
                status = result.status,
                body = %String::from_utf8_lossy(&result.body),
                "received response"
            );
        }

        Ok(result)
    }

    /// Runs a call whose success body is `{"data": T}`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, ClientError> {
        let result = self.execute(method, path, body).await?;
        let status = result.status;
        let envelope: Option<DataEnvelope<T>> = result.parse(self.sink())?;
        envelope
            .map(|envelope| envelope.data)
            .ok_or(ClientError::UnexpectedStatus(status))
    }

    /// Runs a call whose success is signalled by `success_status` alone.
    async fn call_for_status(
        &self,
        method: HttpMethod,
        path: &str,
        body: Vec<u8>,
        success_status: u16,
    ) -> Result<bool, ClientError> {
        let result = self.execute(method, path, body).await?;
        if result.status == success_status {
            return Ok(true);
        }

        result.parse::<IgnoredAny>(self.sink())?;
        Ok(false)
    }

    /// Requests a quotation.
    ///
    /// `POST /v3/quotations`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn get_quotations(&self, quotation: &Quotation) -> Result<QuotationDetail, ClientError> {
        let body = Self::encode(quotation)?;
        self.call(HttpMethod::Post, &api_path(&["quotations"]), body)
            .await
    }

    /// Gets a quotation by id.
    ///
    /// `GET /v3/quotations/{quotationId}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the quotation is not found.
    pub async fn get_quotation_detail(
        &self,
        quotation_id: &str,
    ) -> Result<QuotationDetail, ClientError> {
        self.call(
            HttpMethod::Get,
            &api_path(&["quotations", quotation_id]),
            Vec::new(),
        )
        .await
    }

    /// Places an order against a quotation.
    ///
    /// `POST /v3/orders`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the order.
    pub async fn place_order(&self, order: &Order) -> Result<OrderDetail, ClientError> {
        let body = Self::encode(order)?;
        self.call(HttpMethod::Post, &api_path(&["orders"]), body)
            .await
    }

    /// Gets an order by id.
    ///
    /// `GET /v3/orders/{orderId}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order is not found.
    pub async fn get_order_detail(&self, order_id: &str) -> Result<OrderDetail, ClientError> {
        self.call(HttpMethod::Get, &api_path(&["orders", order_id]), Vec::new())
            .await
    }

    /// Gets the driver assigned to an order.
    ///
    /// `GET /v3/orders/{orderId}/drivers/{driverId}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the driver is not found.
    pub async fn get_driver_detail(
        &self,
        order_id: &str,
        driver_id: &str,
    ) -> Result<DriverDetail, ClientError> {
        self.call(
            HttpMethod::Get,
            &api_path(&["orders", order_id, "drivers", driver_id]),
            Vec::new(),
        )
        .await
    }

    /// Adds a priority fee to an order.
    ///
    /// `POST /v3/orders/{orderId}/priority-fee`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the fee.
    pub async fn add_priority_fee(
        &self,
        order_id: &str,
        fee: &str,
    ) -> Result<OrderDetail, ClientError> {
        let body = Self::encode(PriorityFeePayload { priority_fee: fee })?;
        self.call(
            HttpMethod::Post,
            &api_path(&["orders", order_id, "priority-fee"]),
            body,
        )
        .await
    }

    /// Replaces the stops of an order.
    ///
    /// `PATCH /v3/orders/{orderId}`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the edit.
    pub async fn edit_order(
        &self,
        order_id: &str,
        stops: &[DeliveryStop],
    ) -> Result<OrderDetail, ClientError> {
        let body = Self::encode(EditOrderPayload { stops })?;
        self.call(HttpMethod::Patch, &api_path(&["orders", order_id]), body)
            .await
    }

    /// Cancels an order.
    ///
    /// `DELETE /v3/orders/{orderId}`. Returns `true` on `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the cancellation.
    pub async fn cancel_order(&self, order_id: &str) -> Result<bool, ClientError> {
        self.call_for_status(
            HttpMethod::Delete,
            &api_path(&["orders", order_id]),
            Vec::new(),
            NO_CONTENT,
        )
        .await
    }

    /// Asks for a different driver.
    ///
    /// `DELETE /v3/orders/{orderId}/drivers/{driverId}`. Returns `true` on
    /// `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the change.
    pub async fn change_driver(
        &self,
        order_id: &str,
        driver_id: &str,
        reason: impl Into<String>,
    ) -> Result<bool, ClientError> {
        let body = Self::encode(ChangeDriverPayload {
            reason: reason.into(),
        })?;
        self.call_for_status(
            HttpMethod::Delete,
            &api_path(&["orders", order_id, "drivers", driver_id]),
            body,
            NO_CONTENT,
        )
        .await
    }

    /// Lists the cities, services and special requests of the market.
    ///
    /// `GET /v3/cities`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_city_info(&self) -> Result<Vec<City>, ClientError> {
        self.call(HttpMethod::Get, &api_path(&["cities"]), Vec::new())
            .await
    }

    /// Registers the webhook URL for order events.
    ///
    /// `PATCH /v3/webhook`. Returns `true` on `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the URL.
    pub async fn set_webhook(&self, url: &str) -> Result<bool, ClientError> {
        let body = Self::encode(WebhookPayload { url })?;
        self.call_for_status(HttpMethod::Patch, &api_path(&["webhook"]), body, OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("pk_test_key", "sk_test_secret", "hk")
    }

    #[test]
    fn test_client_new() {
        assert!(LalamoveClient::new(config()).is_ok());
    }

    #[test]
    fn test_client_invalid_config() {
        let client = LalamoveClient::new(config().with_base_url(""));
        assert!(matches!(client, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_client_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("lalamove.log");
        let client = LalamoveClient::new(config().with_log_file(path));
        assert!(matches!(client, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_client_mutators_chain() {
        let mut client = LalamoveClient::new(config()).unwrap();
        assert!(!client.is_sandbox());

        client.sandbox().debug(true).set_country("tw");

        assert!(client.is_sandbox());
        assert!(client.is_debug());
        assert_eq!(client.country(), "tw");
        assert_eq!(client.config().base_url(), super::super::config::SANDBOX_BASE_URL);
    }

    #[test]
    fn test_encode_wraps_in_data() {
        let body = LalamoveClient::encode(PriorityFeePayload { priority_fee: "10.0" }).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"data": {"priorityFee": "10.0"}}));
    }

    #[test]
    fn test_encode_change_driver_reason() {
        let body = LalamoveClient::encode(ChangeDriverPayload {
            reason: crate::types::ChangeDriverReason::Late.into(),
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["reason"], "DRIVER_LATE");
    }
}
