//! Lalamove SDK - Rust client library for the Lalamove v3 delivery API.
//!
//! This crate signs and sends requests for quotations, orders, drivers,
//! cities and webhooks, and turns responses into typed results or
//! classified errors.
//!
//! # Modules
//!
//! - [`client`] — request signing, dispatch, response classification and the
//!   [`LalamoveClient`] façade
//! - [`types`] — quotation, order, driver and city models plus catalogs
//! - [`logger`] — daily-rotated log file for failed calls
//!
//! # Example
//!
//! ```rust
//! use lalamove_sdk::{Coordinates, DeliveryStop, Language, Quotation, ServiceType};
//!
//! let mut quotation = Quotation::new(ServiceType::Motorcycle, Language::EnHk);
//! quotation
//!     .add_stop(DeliveryStop::new("Innocentre, Kowloon Tong", Coordinates::new("22.3354", "114.1761")))
//!     .add_stop(DeliveryStop::new("Canton Rd, Tsim Sha Tsui", Coordinates::new("22.2955", "114.1688")));
//! assert!(quotation.validate().is_ok());
//! ```

pub mod client;
pub mod error;
pub mod logger;
pub mod types;

pub use client::{is_sandbox_credentials, ClientConfig, ClientError, LalamoveClient};
pub use error::SdkError;
pub use logger::{FileLogger, LogLevel};
pub use types::{
    ChangeDriverReason, City, Contact, Coordinates, DeliveryDetail, DeliveryStop, DriverDetail,
    Language, Market, Order, OrderDetail, OrderStatus, PodStatus, Quotation, QuotationDetail,
    QuotationItem, ServiceType,
};
