//! SDK error types.
//!
//! Provides error types for local model validation.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// A quotation has fewer or more stops than the API accepts.
    #[error("invalid stop count: {count} (expected {min}..={max})")]
    InvalidStopCount {
        /// Number of stops present.
        count: usize,
        /// Minimum accepted stops.
        min: usize,
        /// Maximum accepted stops.
        max: usize,
    },

    /// Phone number is not in E.164 format.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// A catalog string did not match any known value.
    #[error("unknown {kind}: {value}")]
    UnknownValue {
        /// Catalog name (e.g. "market").
        kind: &'static str,
        /// Offending value.
        value: String,
    },
}
