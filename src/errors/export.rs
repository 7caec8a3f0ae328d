//! Error types for exporting canonical transactions to disk.

use std::path::{Path, PathBuf};

/// Errors that can occur while writing transactions to an output file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Creating the output directory or file failed.
    #[error("Failed to create {}", path.display())]
    Io {
        /// The path being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing or flushing a CSV row failed.
    #[error("Failed to write CSV to {}", path.display())]
    Csv {
        /// The path being written
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    /// Create an `Io` error for a path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a `Csv` error for a path.
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        ExportError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}
