//! Error types for the txhistory library.
//!
//! This module provides strongly-typed errors for all public APIs in txhistory.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling (`TransportError`,
//!   `FetchError`, etc.)
//! - **Unified error type** (`TxHistoryError`) for convenience when you don't need
//!   to distinguish between error sources
//!
//! # Architecture
//!
//! - [`TransportError`] - HTTP-layer failures, retryable per policy
//! - [`FetchError`] - Category fetch failures (transport, remote rejection, decoding)
//! - [`ParseError`] / [`ConversionError`] - Record-level failures, never fatal to a fetch
//! - [`AggregationError`] - Failures that end a whole-range or batch run
//! - [`ExportError`] - Failures writing CSV output
//!
//! # Examples
//!
//! ```rust,ignore
//! use txhistory::{BlockRange, ExplorerClient, FetchError};
//!
//! match client.erc20_transfers(address, BlockRange::new(0, 99_999_999)).await {
//!     Ok(records) => println!("Fetched {} transfers", records.len()),
//!     Err(FetchError::Remote { message }) => eprintln!("Explorer refused: {message}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod aggregation;
mod conversion;
mod export;
mod fetch;
mod transport;

pub use aggregation::AggregationError;
pub use conversion::{ConversionError, ParseError};
pub use export::ExportError;
pub use fetch::FetchError;
pub use transport::TransportError;

/// Unified error type for all txhistory operations.
///
/// All module-specific error types automatically convert to `TxHistoryError` via
/// `From` implementations, so you can use `?` to propagate errors naturally.
/// Each variant displays as the error it wraps.
#[derive(Debug, thiserror::Error)]
pub enum TxHistoryError {
    /// Error from the HTTP transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Error from fetching a transaction category.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Error converting a raw record.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Error from an aggregation run.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Error exporting transactions.
    #[error(transparent)]
    Export(#[from] ExportError),
}
