//! City and service catalog types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::primitives::null_as_default;

/// Vehicle dimension entry, e.g. `{"value": "0.4", "unit": "m"}`.
pub type Dimension = HashMap<String, serde_json::Value>;

/// Load capacity of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Load {
    /// Capacity value.
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
    /// Capacity unit.
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
}

/// Special request supported by a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialRequest {
    /// Request key, e.g. `TOLL_FEE_10`.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Human readable description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// A vehicle service offered in a city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CityService {
    /// Service type key (see [`ServiceType`](super::ServiceType)).
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    /// Human readable description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Vehicle dimensions keyed by axis.
    #[serde(deserialize_with = "null_as_default")]
    pub dimensions: HashMap<String, Dimension>,
    /// Load capacity.
    #[serde(deserialize_with = "null_as_default")]
    pub load: Load,
    /// Supported special requests.
    #[serde(deserialize_with = "null_as_default")]
    pub special_requests: Vec<SpecialRequest>,
    /// Item specification; schema varies by market.
    #[serde(deserialize_with = "null_as_default")]
    pub delivery_item_specification: HashMap<String, serde_json::Value>,
}

/// A city within the selected market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    /// UN/LOCODE of the city.
    #[serde(deserialize_with = "null_as_default")]
    pub locode: String,
    /// City name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Services available in the city.
    #[serde(deserialize_with = "null_as_default")]
    pub services: Vec<CityService>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_deserialize() {
        let city: City = serde_json::from_str(
            r#"{
                "locode": "HK HKG",
                "name": "Hong Kong",
                "services": [{
                    "key": "MOTORCYCLE",
                    "description": "Motorcycle",
                    "dimensions": {"length": {"value": "0.4", "unit": "m"}},
                    "load": {"value": "10", "unit": "kg"},
                    "specialRequests": [{"name": "TOLL_FEE_10", "description": "Tunnel"}],
                    "deliveryItemSpecification": {"weight": ["LESS_THAN_3_KG"]}
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(city.locode, "HK HKG");
        let service = &city.services[0];
        assert_eq!(service.key, "MOTORCYCLE");
        assert_eq!(service.dimensions["length"]["unit"], "m");
        assert_eq!(service.load.unit, "kg");
        assert_eq!(service.special_requests[0].name, "TOLL_FEE_10");
        assert!(service.delivery_item_specification.contains_key("weight"));
    }

    #[test]
    fn test_city_accepts_nulls() {
        let json = r#"{
            "locode": "SG SIN",
            "name": null,
            "services": [{
                "key": "VAN",
                "description": null,
                "dimensions": null,
                "load": {"value": null, "unit": "kg"},
                "specialRequests": null,
                "deliveryItemSpecification": null
            }]
        }"#;
        let city: City = serde_json::from_str(json).unwrap();
        assert!(city.name.is_empty());
        let service = &city.services[0];
        assert_eq!(service.key, "VAN");
        assert!(service.dimensions.is_empty());
        assert_eq!(service.load.unit, "kg");
        assert!(service.load.value.is_empty());
        assert!(service.special_requests.is_empty());
    }
}
