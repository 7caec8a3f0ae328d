// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Whole-range mode: all four categories fetched concurrently, all or nothing

use tower::Service;
use tracing::{info, warn, Instrument};
use url::Url;

use crate::conversion::convert_all;
use crate::errors::{AggregationError, FetchError, TransportError};
use crate::explorer::ExplorerClient;
use crate::spans;
use crate::types::block_range::BlockRange;
use crate::types::transaction::{CanonicalTransaction, TransactionCategory};

/// Fetch and convert every category over `range`.
///
/// The four fetches run concurrently on the calling task and are all awaited
/// before any outcome is inspected; none is cancelled when a sibling fails.
/// If any category failed, the first failure in category order (ETH,
/// internal, ERC-20, ERC-721) is returned and everything fetched is
/// discarded. Otherwise the converted records are concatenated in that same
/// order. Records failing conversion are dropped with a warning.
///
/// # Example
///
/// ```rust,ignore
/// use txhistory::{fetch_whole_range, BlockRange, ExplorerClient, ExplorerConfig};
///
/// let client = ExplorerClient::from_config(ExplorerConfig::new(api_key))?;
/// let transactions = fetch_whole_range(&client, address, BlockRange::new(0, 999_999_999)).await?;
/// ```
pub async fn fetch_whole_range<S>(
    client: &ExplorerClient<S>,
    address: &str,
    range: BlockRange,
) -> Result<Vec<CanonicalTransaction>, AggregationError>
where
    S: Service<Url, Response = Vec<u8>, Error = TransportError> + Clone + Send + Sync + 'static,
    S::Future: Send,
{
    let span = spans::fetch_whole_range(address, range);

    async move {
        let (normal, internal, erc20, erc721) = tokio::join!(
            client.normal_transfers(address, range),
            client.internal_transfers(address, range),
            client.erc20_transfers(address, range),
            client.erc721_transfers(address, range),
        );

        let mut failures = Vec::with_capacity(TransactionCategory::FETCHED.len());
        let normal = collect(TransactionCategory::EthTransfer, normal, &mut failures);
        let internal = collect(TransactionCategory::InternalTransfer, internal, &mut failures);
        let erc20 = collect(TransactionCategory::Erc20Transfer, erc20, &mut failures);
        let erc721 = collect(TransactionCategory::Erc721Transfer, erc721, &mut failures);

        let mut failures = failures.into_iter();
        if let Some(first) = failures.next() {
            for other in failures {
                warn!(
                    error = &other as &dyn std::error::Error,
                    "Additional category failure"
                );
            }
            return Err(first);
        }

        let mut transactions = convert_all(&normal.unwrap_or_default());
        transactions.extend(convert_all(&internal.unwrap_or_default()));
        transactions.extend(convert_all(&erc20.unwrap_or_default()));
        transactions.extend(convert_all(&erc721.unwrap_or_default()));

        info!(transactions = transactions.len(), "Whole-range fetch complete");
        Ok(transactions)
    }
    .instrument(span)
    .await
}

/// Keep a successful result, or record the failure under its category.
fn collect<T>(
    category: TransactionCategory,
    result: Result<T, FetchError>,
    failures: &mut Vec<AggregationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            failures.push(AggregationError::category_fetch(category, e));
            None
        }
    }
}
