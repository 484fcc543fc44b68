//! Field extraction from loosely-typed summary documents.
//!
//! The upstream moves the same logical value between flat fields, nested
//! price objects and stringified numbers depending on the API version. The
//! [`chain`] module encodes where each value may live, in priority order;
//! [`summary`] assembles the canonical [`StockSummary`](crate::models::StockSummary).

mod chain;
mod summary;

pub use chain::{
    extract_number, extract_text, find_number, lookup, NumericField, TextField, DEFAULT_CURRENCY,
    DEFAULT_STATUS,
};
pub use summary::extract_summary;
