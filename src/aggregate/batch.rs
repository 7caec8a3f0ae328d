//! Batch mode: sequential block chunks, each persisted on its own
//!
//! A category that fails for one chunk contributes nothing to that chunk and
//! the run carries on. Each chunk is written to an intermediate file before
//! the next one starts, so progress already made survives a later crash.

use std::path::{Path, PathBuf};

use tower::Service;
use tracing::{info, warn, Instrument};
use url::Url;

use crate::conversion::convert_all;
use crate::errors::{AggregationError, TransportError};
use crate::explorer::records::{
    CategoryRecord, Erc20Transfer, Erc721Transfer, InternalTransaction, NormalTransaction,
};
use crate::explorer::ExplorerClient;
use crate::export::{chunk_path, combined_path, TransactionSink};
use crate::spans;
use crate::types::block_range::{BatchSize, BlockChunk, BlockRange};
use crate::types::transaction::{CanonicalTransaction, TransactionCategory};

/// One category that could not be fetched for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    /// The chunk being processed
    pub chunk: BlockChunk,
    /// The category that failed
    pub category: TransactionCategory,
    /// Rendered fetch error
    pub message: String,
}

/// Outcome of a completed batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Every converted transaction, in chunk order then category order
    pub transactions: Vec<CanonicalTransaction>,
    /// Number of chunks processed
    pub chunks_processed: usize,
    /// Category fetches that failed and were skipped
    pub failures: Vec<ChunkFailure>,
    /// The combined output file
    pub output_path: PathBuf,
}

impl BatchSummary {
    /// Whether every category of every chunk was fetched
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives batch mode over an explorer client and a transaction sink
///
/// # Example
///
/// ```rust,ignore
/// use txhistory::{BatchSize, BlockRange, CsvExporter, ExplorerClient, RangeBatcher};
///
/// let batcher = RangeBatcher::new(client, CsvExporter::new(), "./output");
/// let summary = batcher
///     .run(address, BlockRange::new(17_000_000, 18_000_000), BatchSize::new(100_000))
///     .await?;
/// println!("{} transactions, {} failures", summary.transactions.len(), summary.failures.len());
/// ```
#[derive(Debug, Clone)]
pub struct RangeBatcher<S, W> {
    client: ExplorerClient<S>,
    sink: W,
    output_dir: PathBuf,
}

impl<S, W> RangeBatcher<S, W>
where
    S: Service<Url, Response = Vec<u8>, Error = TransportError> + Clone + Send + Sync + 'static,
    S::Future: Send,
    W: TransactionSink,
{
    pub fn new(client: ExplorerClient<S>, sink: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            sink,
            output_dir: output_dir.into(),
        }
    }

    /// Directory receiving the intermediate and combined files
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process `[start, end)` in chunks of `batch_size` blocks.
    ///
    /// Fails only for a zero batch size or when the combined file cannot be
    /// written. Failed intermediate writes are logged and skipped.
    pub async fn run(
        &self,
        address: &str,
        range: BlockRange,
        batch_size: BatchSize,
    ) -> Result<BatchSummary, AggregationError> {
        if batch_size.as_u64() == 0 {
            return Err(AggregationError::InvalidBatchSize);
        }

        let span = spans::batch_run(address, range, batch_size.as_u64());

        async move {
            let chunks = batch_size.chunk_range(range);
            let total = chunks.len();
            info!(chunks = total, "Starting batch run");

            let mut transactions = Vec::new();
            let mut failures = Vec::new();

            for (index, chunk) in chunks.enumerate() {
                let chunk_transactions = self
                    .process_chunk(address, chunk, &mut failures)
                    .instrument(spans::process_chunk(chunk, index, total))
                    .await;

                let path = chunk_path(&self.output_dir, address, chunk.start(), chunk.end());
                if let Err(e) = self.sink.write(&chunk_transactions, &path) {
                    warn!(chunk = %chunk, error = %e, "Failed to write chunk output");
                }

                transactions.extend(chunk_transactions);

                let progress = (index + 1) as f64 / total as f64 * 100.0;
                info!(
                    chunk = %chunk,
                    progress = %format!("{progress:.1}%"),
                    transactions = transactions.len(),
                    "Processed chunk"
                );
            }

            let output_path = combined_path(&self.output_dir, address);
            self.sink.write(&transactions, &output_path)?;

            if !failures.is_empty() {
                warn!(
                    failures = failures.len(),
                    "Batch run finished with skipped categories"
                );
            }

            Ok(BatchSummary {
                transactions,
                chunks_processed: total,
                failures,
                output_path,
            })
        }
        .instrument(span)
        .await
    }

    /// Fetch the four categories of one chunk, one after another.
    async fn process_chunk(
        &self,
        address: &str,
        chunk: BlockChunk,
        failures: &mut Vec<ChunkFailure>,
    ) -> Vec<CanonicalTransaction> {
        let mut transactions = self
            .fetch_category::<NormalTransaction>(address, chunk, failures)
            .await;
        transactions.extend(
            self.fetch_category::<InternalTransaction>(address, chunk, failures)
                .await,
        );
        transactions.extend(
            self.fetch_category::<Erc20Transfer>(address, chunk, failures)
                .await,
        );
        transactions.extend(
            self.fetch_category::<Erc721Transfer>(address, chunk, failures)
                .await,
        );
        transactions
    }

    async fn fetch_category<R: CategoryRecord>(
        &self,
        address: &str,
        chunk: BlockChunk,
        failures: &mut Vec<ChunkFailure>,
    ) -> Vec<CanonicalTransaction> {
        match self.client.fetch_all::<R>(address, chunk.fetch_range()).await {
            Ok(records) => convert_all(&records),
            Err(e) => {
                warn!(
                    chunk = %chunk,
                    category = %R::CATEGORY,
                    error = %e,
                    "Category fetch failed, skipping for this chunk"
                );
                failures.push(ChunkFailure {
                    chunk,
                    category: R::CATEGORY,
                    message: e.to_string(),
                });
                Vec::new()
            }
        }
    }
}
