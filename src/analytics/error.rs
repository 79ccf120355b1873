//! Error types for the edges of the risk analytics engine.
//!
//! The numeric core never fails; degenerate inputs produce zero-valued
//! results. These errors cover strict parsing, leg-count checks, trade
//! sources and report serialization.

use std::fmt;

/// Errors raised outside the numeric core.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// An option type string was neither a call nor a put.
    InvalidOptionType {
        /// The rejected value.
        value: String,
    },

    /// A trade side string was neither buy nor sell.
    InvalidSide {
        /// The rejected value.
        value: String,
    },

    /// An aggregation received a number of legs it cannot handle.
    LegCount {
        /// Number of legs required.
        expected: usize,
        /// Number of legs received.
        actual: usize,
    },

    /// A trade source failed to deliver records.
    Source {
        /// Description of the failure.
        message: String,
    },

    /// A value could not be serialized or deserialized.
    Serialization {
        /// Description of the failure.
        message: String,
    },
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsError::InvalidOptionType { value } => {
                write!(f, "invalid option type: {value:?}")
            }
            AnalyticsError::InvalidSide { value } => {
                write!(f, "invalid trade side: {value:?}")
            }
            AnalyticsError::LegCount { expected, actual } => {
                write!(f, "expected exactly {expected} legs, got {actual}")
            }
            AnalyticsError::Source { message } => {
                write!(f, "trade source error: {message}")
            }
            AnalyticsError::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
        }
    }
}

impl std::error::Error for AnalyticsError {}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization {
            message: err.to_string(),
        }
    }
}
