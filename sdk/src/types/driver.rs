//! Driver types.

use serde::{Deserialize, Serialize};

use super::primitives::{null_as_default, Coordinates};

/// Driver assigned to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverDetail {
    /// Driver id.
    #[serde(rename = "driverId", deserialize_with = "null_as_default")]
    pub id: String,
    /// Driver name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Driver phone.
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    /// Vehicle plate number.
    #[serde(rename = "plateNumber", deserialize_with = "null_as_default")]
    pub plate_no: String,
    /// Last known position.
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
}
