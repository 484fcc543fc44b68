//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for the few operations that can fail
//! - [`ErrorClass`]: Classification the caller maps to a user-facing response
//!
//! Most of the crate never fails: malformed or missing fields are resolved by
//! fallback chains and defaults, and an empty markets aggregate is a count,
//! not an error.

mod class;

pub use class::ErrorClass;

use thiserror::Error;

/// Errors that can occur while normalizing upstream documents.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The stock document has no summary section.
    /// Nothing can be assembled without it.
    #[error("Missing required data: summary")]
    MissingSummary,

    /// The upstream search metadata reports a non-success status.
    #[error("Upstream search failed with status: {status}")]
    UpstreamStatus {
        /// The status string reported by the upstream
        status: String,
    },

    /// The raw document is not valid JSON or has the wrong top-level shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl MarketDataError {
    /// Returns the classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerboard_market_data::errors::{ErrorClass, MarketDataError};
    ///
    /// assert_eq!(MarketDataError::MissingSummary.class(), ErrorClass::NotFound);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingSummary => ErrorClass::NotFound,
            Self::UpstreamStatus { .. } => ErrorClass::Upstream,
            Self::InvalidDocument(_) => ErrorClass::BadInput,
        }
    }

    /// Shorthand for `class() == ErrorClass::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }
}
