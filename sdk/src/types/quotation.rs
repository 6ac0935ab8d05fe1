//! Quotation types.
//!
//! A quotation prices a delivery over an ordered list of stops and must be
//! obtained before an order can be placed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{MAX_STOPS, MIN_STOPS};
use super::primitives::{null_as_default, DeliveryStop, Distance, PriceBreakdown};
use crate::error::SdkError;

/// Pickup time format expected by the API (UTC, ISO 8601).
const SCHEDULE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Details about the goods being delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuotationItem {
    /// Number of pieces.
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: String,
    /// Weight bracket, e.g. `LESS_THAN_3_KG`.
    #[serde(deserialize_with = "null_as_default")]
    pub weight: String,
    /// Item categories, e.g. `FOOD_DELIVERY`.
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// Handling instructions, e.g. `KEEP_UPRIGHT`.
    #[serde(deserialize_with = "null_as_default")]
    pub handling_instructions: Vec<String>,
}

/// Quotation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// Vehicle type (see [`ServiceType`](super::ServiceType)).
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_type: String,
    /// Stops; index 0 is the sender.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stops: Vec<DeliveryStop>,
    /// Response language (see [`Language`](super::Language)).
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    /// Scheduled pickup time; omit for immediate orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<String>,
    /// Special requests, e.g. `TOLL_FEE_10`.
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub special_requests: Vec<String>,
    /// Whether the API may reorder recipient stops.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_route_optimized: bool,
    /// Goods description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<QuotationItem>,
}

impl Quotation {
    /// Creates a quotation for the given vehicle type and language.
    #[must_use]
    pub fn new(service_type: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    /// Sets the pickup time. Leave unset for immediate orders.
    pub fn set_schedule_at(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.schedule_at = Some(at.format(SCHEDULE_FORMAT).to_string());
        self
    }

    /// Sets the goods description.
    pub fn set_item(&mut self, item: QuotationItem) -> &mut Self {
        self.item = Some(item);
        self
    }

    /// Appends special requests.
    pub fn add_special_request<I, S>(&mut self, requests: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.special_requests
            .extend(requests.into_iter().map(Into::into));
        self
    }

    /// Appends a stop. Stops beyond [`MAX_STOPS`] are ignored.
    pub fn add_stop(&mut self, stop: DeliveryStop) -> &mut Self {
        if self.stops.len() < MAX_STOPS {
            self.stops.push(stop);
        }
        self
    }

    /// Enables or disables route optimisation.
    pub fn set_route_optimized(&mut self, optimized: bool) -> &mut Self {
        self.is_route_optimized = optimized;
        self
    }

    /// Returns the sender stop (index 0).
    #[must_use]
    pub fn sender_stop(&self) -> Option<&DeliveryStop> {
        self.stops.first()
    }

    /// Returns the recipient stops (index 1 onwards).
    #[must_use]
    pub fn recipient_stops(&self) -> &[DeliveryStop] {
        self.stops.get(1..).unwrap_or_default()
    }

    /// Checks the stop count against the API bounds.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::InvalidStopCount` when there are fewer than
    /// [`MIN_STOPS`] or more than [`MAX_STOPS`] stops.
    pub fn validate(&self) -> Result<(), SdkError> {
        let count = self.stops.len();
        if !(MIN_STOPS..=MAX_STOPS).contains(&count) {
            return Err(SdkError::InvalidStopCount {
                count,
                min: MIN_STOPS,
                max: MAX_STOPS,
            });
        }
        Ok(())
    }
}

/// Priced quotation returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDetail {
    /// Quotation id, used when placing an order.
    #[serde(rename = "quotationId", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Expiry timestamp (ISO 8601).
    #[serde(default, deserialize_with = "null_as_default")]
    pub expires_at: String,
    /// Price breakdown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_breakdown: PriceBreakdown,
    /// Total route distance.
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: Distance,
    /// Echo of the quoted request, with stop ids filled in.
    #[serde(flatten)]
    pub quotation: Quotation,
}

impl QuotationDetail {
    /// Returns the sender stop (index 0).
    #[must_use]
    pub fn sender_stop(&self) -> Option<&DeliveryStop> {
        self.quotation.sender_stop()
    }

    /// Returns the recipient stops (index 1 onwards).
    #[must_use]
    pub fn recipient_stops(&self) -> &[DeliveryStop] {
        self.quotation.recipient_stops()
    }
}
