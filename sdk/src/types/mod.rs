//! Data model for the Lalamove SDK.
//!
//! Request types expose `&mut Self`-returning setters so they can be built
//! up fluently; response types default any field the API omits.

pub mod catalog;
pub mod city;
pub mod driver;
pub mod order;
pub mod primitives;
pub mod quotation;

pub use catalog::{
    ChangeDriverReason, Language, Market, OrderStatus, PodStatus, ServiceType, MAX_STOPS,
    MIN_STOPS,
};
pub use city::{City, CityService, Dimension, Load, SpecialRequest};
pub use driver::DriverDetail;
pub use order::{Contact, DeliveryDetail, Order, OrderDetail};
pub use primitives::{
    is_valid_phone, validate_phone, Coordinates, DeliveryStop, Distance, PriceBreakdown,
};
pub use quotation::{Quotation, QuotationDetail, QuotationItem};
