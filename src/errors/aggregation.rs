// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the aggregation modes.

use super::{ExportError, FetchError};
use crate::TransactionCategory;

/// Errors that can end a whole-range or batch run.
///
/// # Examples
///
/// ```rust,ignore
/// use txhistory::{fetch_whole_range, AggregationError};
///
/// match fetch_whole_range(&client, address, range).await {
///     Ok(transactions) => println!("Fetched {} transactions", transactions.len()),
///     Err(AggregationError::CategoryFetch { category, source }) => {
///         eprintln!("{category} failed: {source}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// One category could not be fetched.
    ///
    /// In whole-range mode this is fatal for the whole run.
    #[error("Error fetching {category} records")]
    CategoryFetch {
        /// The category whose fetch failed
        category: TransactionCategory,
        /// The underlying fetch failure
        #[source]
        source: FetchError,
    },

    /// Batch mode was requested with a batch size of zero.
    #[error("Batch size must be greater than 0")]
    InvalidBatchSize,

    /// Writing the final output failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AggregationError {
    /// Create a `CategoryFetch` error.
    pub fn category_fetch(category: TransactionCategory, source: FetchError) -> Self {
        AggregationError::CategoryFetch { category, source }
    }
}
