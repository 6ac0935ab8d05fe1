//! HTTP client for the Lalamove v3 REST API.
//!
//! A call flows through four stages:
//!
//! 1. [`RequestBuilder`] signs the request ([`signer`])
//! 2. [`Dispatcher`] sends it with a fixed timeout
//! 3. [`ApiResult::parse`] classifies the status and decodes the body
//! 4. [`LalamoveClient`] unwraps the `{"data": ...}` envelope
//!
//! # Example
//!
//! ```rust,ignore
//! use lalamove_sdk::client::{ClientConfig, LalamoveClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = LalamoveClient::new(ClientConfig::new("pk_test_…", "sk_test_…", "HK"))?;
//!     client.sandbox();
//!
//!     let cities = client.get_city_info().await?;
//!     println!("Found {} cities", cities.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod signer;

pub use config::{is_sandbox_credentials, ClientConfig};
pub use dispatcher::Dispatcher;
pub use error::{ApiErrorEntry, ClientError};
pub use http::LalamoveClient;
pub use request::{HttpMethod, RequestBuilder, RequestEnvelope, SignedHeaders};
pub use response::{ApiResult, LogSink, StatusClass};
