//! Primitive types shared by quotations, orders and drivers.
//!
//! The API encodes coordinates and amounts as decimal strings; they are kept
//! as strings here so values round-trip exactly.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SdkError;

static E164: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\+[1-9]\d{1,14}$"));

/// Returns true if `phone` is an E.164 number such as `+85238485765`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    match E164.as_ref() {
        Ok(re) => re.is_match(phone),
        Err(_) => false,
    }
}

/// Validates a phone number.
///
/// # Errors
///
/// Returns `SdkError::InvalidPhone` if the number is not in E.164 format.
pub fn validate_phone(phone: &str) -> Result<(), SdkError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(SdkError::InvalidPhone(phone.to_string()))
    }
}

/// Deserializes JSON `null` as the field's default value.
///
/// The API sends `null` for fields it has no value for yet, such as the
/// driver of an unassigned order. Missing keys are covered by
/// `#[serde(default)]`; this covers explicit nulls.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    /// Latitude as a decimal string.
    #[serde(deserialize_with = "null_as_default")]
    pub lat: String,
    /// Longitude as a decimal string.
    #[serde(deserialize_with = "null_as_default")]
    pub lng: String,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

/// Distance with its unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distance {
    /// Numeric value as a string.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Unit, e.g. `m`.
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
}

/// Itemised price of a quotation or order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Base fare.
    #[serde(deserialize_with = "null_as_default")]
    pub base: String,
    /// Extra mileage charge.
    #[serde(deserialize_with = "null_as_default")]
    pub extra_mileage: String,
    /// Surcharge.
    #[serde(deserialize_with = "null_as_default")]
    pub surcharge: String,
    /// Total before route optimisation was applied.
    #[serde(deserialize_with = "null_as_default")]
    pub total_before_optimization: String,
    /// Total excluding the priority fee.
    #[serde(deserialize_with = "null_as_default")]
    pub total_exclude_priority_fee: String,
    /// Grand total.
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
    /// ISO currency code.
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    /// Priority fee, if any.
    #[serde(deserialize_with = "null_as_default")]
    pub priority_fee: String,
    /// Charge for special requests.
    #[serde(deserialize_with = "null_as_default")]
    pub special_requests: String,
    /// Value added tax.
    #[serde(deserialize_with = "null_as_default")]
    pub vat: String,
}

/// A pickup or drop-off location.
///
/// Index 0 of a stop list is always the sender; the rest are recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    /// Stop id assigned by the API; empty when building a quotation.
    #[serde(
        rename = "stopId",
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Location of the stop.
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
    /// Human readable address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Contact name.
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub name: String,
    /// Contact phone (E.164).
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub phone: String,
    /// Remarks for the driver.
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub remarks: String,
}

impl DeliveryStop {
    /// Creates a stop at the given address.
    #[must_use]
    pub fn new(address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            address: address.into(),
            coordinates,
            ..Default::default()
        }
    }

    /// Sets the contact for this stop.
    pub fn set_contact(&mut self, name: impl Into<String>, phone: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self.phone = phone.into();
        self
    }

    /// Sets remarks for the driver.
    pub fn set_remarks(&mut self, remarks: impl Into<String>) -> &mut Self {
        self.remarks = remarks.into();
        self
    }
}
