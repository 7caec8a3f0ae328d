//! Span creation helpers for txhistory operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here, and async
//! work is attached to it with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::types::block_range::{BlockChunk, BlockRange};

/// Create span for fetching every page of one category.
///
/// Parent: fetch_whole_range or process_chunk span
/// Children: fetch_page spans
#[inline]
pub(crate) fn fetch_category(action: &str, address: &str, range: BlockRange) -> Span {
    tracing::span!(
        Level::INFO,
        "txhistory.fetch_category",
        action = action,
        address = address,
        start_block = range.start_block(),
        end_block = range.end_block(),
    )
}

/// Create span for a single page request.
///
/// Parent: fetch_category span
/// Children: HTTP attempts from the transport layers
#[inline]
pub(crate) fn fetch_page(action: &str, page: u32) -> Span {
    tracing::debug_span!("txhistory.fetch_page", action = action, page = page)
}

/// Create span for a concurrent whole-range run.
///
/// Parent: None (root span for this operation)
/// Children: four fetch_category spans
#[inline]
pub(crate) fn fetch_whole_range(address: &str, range: BlockRange) -> Span {
    tracing::span!(
        Level::INFO,
        "txhistory.fetch_whole_range",
        address = address,
        start_block = range.start_block(),
        end_block = range.end_block(),
    )
}

/// Create span for a sequential batch run.
///
/// Parent: None (root span for this operation)
/// Children: process_chunk spans
#[inline]
pub(crate) fn batch_run(address: &str, range: BlockRange, batch_size: u64) -> Span {
    tracing::span!(
        Level::INFO,
        "txhistory.batch_run",
        address = address,
        start_block = range.start_block(),
        end_block = range.end_block(),
        batch_size = batch_size,
    )
}

/// Create span for one chunk of a batch run.
///
/// Parent: batch_run span
/// Children: fetch_category spans, export span
#[inline]
pub(crate) fn process_chunk(chunk: BlockChunk, index: usize, total: usize) -> Span {
    tracing::debug_span!(
        "txhistory.process_chunk",
        chunk_start = chunk.start(),
        chunk_end = chunk.end(),
        index = index,
        total = total,
    )
}

/// Create span for writing one output file.
#[inline]
pub(crate) fn export(path: &std::path::Path, records: usize) -> Span {
    tracing::debug_span!(
        "txhistory.export",
        path = %path.display(),
        records = records,
    )
}
