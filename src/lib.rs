//! Account transaction history from Etherscan-style explorer APIs.
//!
//! txhistory pages through four explorer categories (normal, internal,
//! ERC-20 and ERC-721 transfers), normalizes every record into a
//! [`CanonicalTransaction`] with exact decimal amounts and writes the result
//! as CSV, either in one concurrent pass ([`fetch_whole_range`]) or in
//! sequential block chunks ([`RangeBatcher`]).

pub mod aggregate;
pub mod bootstrap;
pub mod config;
pub mod conversion;
pub mod errors;
pub mod explorer;
pub mod export;
mod spans;
pub mod transport;
pub mod types;

pub use aggregate::{fetch_whole_range, BatchSummary, ChunkFailure, RangeBatcher};
pub use config::{ExplorerConfig, ExplorerConfigBuilder};
pub use errors::{
    AggregationError, ConversionError, ExportError, FetchError, ParseError, TransportError,
    TxHistoryError,
};
pub use explorer::{CategoryRecord, ExplorerClient};
pub use export::{CsvExporter, TransactionSink};
pub use transport::RetryConfig;
pub use types::amount::{gas_fee_eth, scale_integer_string, wei_to_eth, ScaledAmount, TokenDecimals};
pub use types::block_range::{BatchSize, BlockChunk, BlockRange, ChunkIterator, FetchWindow};
pub use types::transaction::{CanonicalTransaction, TransactionCategory, CSV_HEADERS};
