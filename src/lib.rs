//! Per-code price statistics over negotiated-rate records from
//! price-transparency machine-readable files.
//!
//! [`summarize`] is the single implementation of the aggregation; the
//! filtering, sorting and export helpers operate on its inputs and outputs.

pub mod catalog;
pub mod collate;
pub mod error;
pub mod export;
pub mod filter;
pub mod record;
pub mod sort;
pub mod summary;

pub use error::SummaryError;
pub use record::{RateRecord, records_from_json, records_from_str};
pub use summary::{CodeSummary, TopProvider, summarize, summarize_codes};
