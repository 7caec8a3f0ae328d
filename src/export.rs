//! Writing canonical transactions to disk
//!
//! The aggregation modes only depend on [`TransactionSink`]; [`CsvExporter`] is
//! the implementation the binary uses.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::ExportError;
use crate::spans;
use crate::types::transaction::{CanonicalTransaction, CSV_HEADERS};

/// Destination for a list of canonical transactions
pub trait TransactionSink {
    /// Write `transactions` to `path`, replacing any previous content.
    fn write(&self, transactions: &[CanonicalTransaction], path: &Path)
        -> Result<(), ExportError>;
}

/// Writes a header row followed by one row per transaction
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use txhistory::{CsvExporter, TransactionSink};
///
/// CsvExporter::new()
///     .write(&[], Path::new("output/0xabc_tx_history.csv"))
///     .unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl TransactionSink for CsvExporter {
    fn write(
        &self,
        transactions: &[CanonicalTransaction],
        path: &Path,
    ) -> Result<(), ExportError> {
        let _guard = spans::export(path, transactions.len()).entered();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| ExportError::csv(path, e))?;
        writer
            .write_record(CSV_HEADERS)
            .map_err(|e| ExportError::csv(path, e))?;
        for tx in transactions {
            writer
                .write_record(tx.csv_record())
                .map_err(|e| ExportError::csv(path, e))?;
        }
        writer.flush().map_err(|e| ExportError::io(path, e))?;

        info!(
            path = %path.display(),
            records = transactions.len(),
            "Wrote transactions"
        );
        Ok(())
    }
}

/// `{output_dir}/{address}_tx_history.csv`, the whole-range output
pub fn whole_range_path(output_dir: &Path, address: &str) -> PathBuf {
    output_dir.join(format!("{address}_tx_history.csv"))
}

/// `{output_dir}/{address}_tx_history_blocks_{start}_{end}.csv`, one batch chunk
pub fn chunk_path(output_dir: &Path, address: &str, start: u64, end: u64) -> PathBuf {
    output_dir.join(format!("{address}_tx_history_blocks_{start}_{end}.csv"))
}

/// `{output_dir}/{address}_tx_history_full.csv`, the combined batch output
pub fn combined_path(output_dir: &Path, address: &str) -> PathBuf {
    output_dir.join(format!("{address}_tx_history_full.csv"))
}
