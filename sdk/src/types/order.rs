//! Order types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::OrderStatus;
use super::primitives::{null_as_default, DeliveryStop, Distance, PriceBreakdown};

/// Sender contact, bound to the sender stop of a quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stop id from the quotation.
    pub stop_id: String,
    /// Contact name.
    pub name: String,
    /// Contact phone (E.164).
    pub phone: String,
}

/// Recipient contact, bound to a recipient stop of a quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetail {
    /// Stop id from the quotation.
    pub stop_id: String,
    /// Recipient name.
    pub name: String,
    /// Recipient phone (E.164).
    pub phone: String,
    /// Remarks for the driver.
    #[serde(default)]
    pub remarks: String,
}

/// Order request, placed against an existing quotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Quotation being ordered.
    pub quotation_id: String,
    /// Sender contact.
    pub sender: Contact,
    /// One entry per recipient stop.
    pub recipients: Vec<DeliveryDetail>,
    /// Send tracking SMS to recipients.
    #[serde(rename = "isRecipientSMSEnabled")]
    pub is_recipient_sms_enabled: bool,
    /// Require proof of delivery.
    #[serde(rename = "isPODEnabled")]
    pub is_pod_enabled: bool,
    /// Partner name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    /// Free-form metadata echoed back on the order.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl Order {
    /// Creates an order for a quotation with the given sender.
    #[must_use]
    pub fn new(quotation_id: impl Into<String>, sender: Contact) -> Self {
        Self {
            quotation_id: quotation_id.into(),
            sender,
            ..Default::default()
        }
    }

    /// Adds a recipient.
    pub fn add_recipient(&mut self, recipient: DeliveryDetail) -> &mut Self {
        self.recipients.push(recipient);
        self
    }

    /// Enables proof of delivery.
    pub fn enable_pod(&mut self) -> &mut Self {
        self.is_pod_enabled = true;
        self
    }

    /// Disables proof of delivery.
    pub fn disable_pod(&mut self) -> &mut Self {
        self.is_pod_enabled = false;
        self
    }

    /// Enables recipient SMS.
    pub fn enable_recipient_sms(&mut self) -> &mut Self {
        self.is_recipient_sms_enabled = true;
        self
    }

    /// Disables recipient SMS.
    pub fn disable_recipient_sms(&mut self) -> &mut Self {
        self.is_recipient_sms_enabled = false;
        self
    }

    /// Sets the partner name.
    pub fn set_partner(&mut self, partner: impl Into<String>) -> &mut Self {
        self.partner = Some(partner.into());
        self
    }

    /// Adds a metadata entry.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Order as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDetail {
    /// Order id.
    #[serde(rename = "orderId", deserialize_with = "null_as_default")]
    pub id: String,
    /// Quotation the order was placed from.
    #[serde(deserialize_with = "null_as_default")]
    pub quotation_id: String,
    /// Assigned driver, empty until matched.
    #[serde(deserialize_with = "null_as_default")]
    pub driver_id: String,
    /// Status string (see [`OrderStatus`]).
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Priority fee added so far.
    #[serde(deserialize_with = "null_as_default")]
    pub priority_fee: String,
    /// Public tracking link.
    #[serde(deserialize_with = "null_as_default")]
    pub share_link: String,
    /// Metadata supplied when placing the order.
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, String>,
    /// Total route distance.
    #[serde(deserialize_with = "null_as_default")]
    pub distance: Distance,
    /// Stops of the order.
    #[serde(deserialize_with = "null_as_default")]
    pub stops: Vec<DeliveryStop>,
    /// Price breakdown.
    #[serde(deserialize_with = "null_as_default")]
    pub price_breakdown: PriceBreakdown,
}

impl OrderDetail {
    /// Returns the typed status, if it is a known value.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}
