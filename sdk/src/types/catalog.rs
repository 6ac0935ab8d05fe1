//! Catalog values accepted by the Lalamove API.
//!
//! The API transports all of these as plain strings. The enums here give
//! callers a typed way to produce and inspect them; wire structs keep
//! `String` fields so values added upstream still decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Minimum number of stops in a quotation (sender plus one recipient).
pub const MIN_STOPS: usize = 2;

/// Maximum number of stops in a quotation.
pub const MAX_STOPS: usize = 16;

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All known values, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SdkError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(SdkError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

catalog! {
    /// Operating market, sent upper-cased in the `Market` header.
    Market, "market" {
        /// Brazil.
        Brazil => "BR",
        /// Hong Kong.
        HongKong => "HK",
        /// Indonesia.
        Indonesia => "ID",
        /// Malaysia.
        Malaysia => "MY",
        /// Mexico.
        Mexico => "MX",
        /// Philippines.
        Philippines => "PH",
        /// Singapore.
        Singapore => "SG",
        /// Taiwan.
        Taiwan => "TW",
        /// Thailand.
        Thailand => "TH",
        /// Vietnam.
        Vietnam => "VN",
    }
}

impl Market {
    /// Parses a market code case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `SdkError::UnknownValue` for codes outside the catalog.
    pub fn parse_code(code: &str) -> Result<Self, SdkError> {
        code.trim().to_ascii_uppercase().parse()
    }
}

catalog! {
    /// Response language for a quotation.
    Language, "language" {
        /// English (Brazil).
        EnBr => "en_BR",
        /// Portuguese (Brazil).
        PtBr => "pt_BR",
        /// English (Hong Kong).
        EnHk => "en_HK",
        /// Chinese (Hong Kong).
        ZhHk => "zh_HK",
        /// English (Indonesia).
        EnId => "en_ID",
        /// Indonesian.
        IdId => "id_ID",
        /// English (Malaysia).
        EnMy => "en_MY",
        /// Malay.
        MsMy => "ms_MY",
        /// English (Mexico).
        EnMx => "en_MX",
        /// Spanish (Mexico).
        EsMx => "es_MX",
        /// English (Philippines).
        EnPh => "en_PH",
        /// English (Singapore).
        EnSg => "en_SG",
        /// Chinese (Taiwan).
        ZhTw => "zh_TW",
        /// Thai.
        ThTh => "th_TH",
        /// English (Thailand).
        EnTh => "en_TH",
        /// English (Vietnam).
        EnVn => "en_VN",
        /// Vietnamese.
        ViVn => "vi_VN",
    }
}

catalog! {
    /// Vehicle type used for a delivery.
    ServiceType, "service type" {
        /// Courier on foot.
        Walker => "WALKER",
        /// Motorcycle.
        Motorcycle => "MOTORCYCLE",
        /// Car.
        Car => "CAR",
        /// Sedan.
        Sedan => "SEDAN",
        /// Van.
        Van => "VAN",
        /// 1.75 tonne truck.
        Truck175 => "TRUCK175",
        /// 3.3 tonne truck.
        Truck330 => "TRUCK330",
        /// 5.5 tonne truck.
        Truck550 => "TRUCK550",
    }
}

catalog! {
    /// Lifecycle status of an order.
    OrderStatus, "order status" {
        /// Looking for a driver.
        AssigningDriver => "ASSIGNING_DRIVER",
        /// Driver accepted and is heading to pickup.
        OnGoing => "ON_GOING",
        /// Goods picked up.
        PickedUp => "PICKED_UP",
        /// Delivered.
        Completed => "COMPLETED",
        /// Cancelled by the user.
        Canceled => "CANCELED",
        /// Rejected by the driver.
        Rejected => "REJECTED",
        /// No driver matched in time.
        Expired => "EXPIRED",
    }
}

impl OrderStatus {
    /// Returns true if the order can no longer change state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Canceled | Self::Rejected | Self::Expired
        )
    }
}

catalog! {
    /// Proof-of-delivery status of a stop.
    PodStatus, "pod status" {
        /// The driver has not completed the delivery to the stop yet.
        Pending => "PENDING",
        /// Delivered and photographed at the stop.
        Delivered => "DELIVERED",
        /// Delivered and signed by the recipient.
        Signed => "SIGNED",
        /// The driver could not complete the delivery.
        Failed => "FAILED",
    }
}

catalog! {
    /// Reason given when asking for a different driver.
    ChangeDriverReason, "change driver reason" {
        /// Driver is late for delivery.
        Late => "DRIVER_LATE",
        /// Driver asked the user to change.
        AskedChange => "DRIVER_ASKED_CHANGE",
        /// Driver is not responding.
        Unresponsive => "DRIVER_UNRESPONSIVE",
        /// Driver is rude.
        Rude => "DRIVER_RUDE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parse_code_case_insensitive() {
        assert_eq!(Market::parse_code("hk"), Ok(Market::HongKong));
        assert_eq!(Market::parse_code(" Sg "), Ok(Market::Singapore));
    }

    #[test]
    fn test_market_unknown() {
        let err = Market::parse_code("CN").unwrap_err();
        assert_eq!(err.to_string(), "unknown market: CN");
    }

    #[test]
    fn test_service_type_wire_names() {
        assert_eq!(ServiceType::Truck175.as_str(), "TRUCK175");
        assert_eq!("MOTORCYCLE".parse::<ServiceType>(), Ok(ServiceType::Motorcycle));
        let json = serde_json::to_string(&ServiceType::Van).unwrap();
        assert_eq!(json, "\"VAN\"");
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::ZhHk.to_string(), "zh_HK");
        assert_eq!(Language::ALL.len(), 17);
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(!OrderStatus::OnGoing.is_terminal());
        assert!(!OrderStatus::AssigningDriver.is_terminal());
    }

    #[test]
    fn test_change_driver_reason_into_string() {
        let reason: String = ChangeDriverReason::Late.into();
        assert_eq!(reason, "DRIVER_LATE");
    }

    #[test]
    fn test_pod_status_deserialize() {
        let status: PodStatus = serde_json::from_str("\"SIGNED\"").unwrap();
        assert_eq!(status, PodStatus::Signed);
    }
}
