//! Paginated category fetching against an Etherscan-style explorer
//!
//! [`ExplorerClient`] is generic over its transport so tests can substitute a
//! scripted tower service for the real HTTP stack.

use std::sync::Arc;

use tower::{Service, ServiceExt};
use tracing::{debug, info, Instrument};
use url::Url;

use super::records::{
    CategoryRecord, Erc20Transfer, Erc721Transfer, InternalTransaction, NormalTransaction,
    ResponseEnvelope,
};
use super::request::ExplorerRequest;
use crate::config::constants::MAX_PAGE_SIZE;
use crate::config::ExplorerConfig;
use crate::errors::{FetchError, TransportError};
use crate::spans;
use crate::transport::{build_transport, ExplorerTransport};
use crate::types::block_range::{BlockRange, FetchWindow};

/// Client for the explorer's `account` module
///
/// # Example
///
/// ```rust,ignore
/// use txhistory::{BlockRange, ExplorerClient, ExplorerConfig};
///
/// let client = ExplorerClient::from_config(ExplorerConfig::new(api_key))?;
/// let transfers = client
///     .erc20_transfers("0x742d35Cc6634C0532925a3b844Bc454e4438f44e", BlockRange::new(0, 99_999_999))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct ExplorerClient<S = ExplorerTransport> {
    config: Arc<ExplorerConfig>,
    service: S,
}

impl ExplorerClient<ExplorerTransport> {
    /// Build a client on the production retry + logging + HTTP stack.
    pub fn from_config(config: ExplorerConfig) -> Result<Self, TransportError> {
        let service = build_transport(&config)?;
        Ok(Self::new(config, service))
    }
}

impl<S> ExplorerClient<S>
where
    S: Service<Url, Response = Vec<u8>, Error = TransportError> + Clone + Send + Sync + 'static,
    S::Future: Send,
{
    /// Create a client over any transport yielding response bodies.
    pub fn new(config: ExplorerConfig, service: S) -> Self {
        Self {
            config: Arc::new(config),
            service,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Request a single page of records.
    pub async fn fetch_page<R: CategoryRecord>(
        &self,
        address: &str,
        window: FetchWindow,
    ) -> Result<Vec<R>, FetchError> {
        let span = spans::fetch_page(R::ACTION.as_str(), window.page);
        let url = ExplorerRequest::new(R::ACTION, address, window)
            .to_url(&self.config.base_url, &self.config.api_key)
            .map_err(|e| FetchError::invalid_url(self.config.base_url.as_str(), e))?;

        async move {
            let body = self.service.clone().oneshot(url).await?;
            let records: Vec<R> = ResponseEnvelope::from_slice(&body)?.into_records()?;
            debug!(records = records.len(), "Fetched page");
            Ok(records)
        }
        .instrument(span)
        .await
    }

    /// Request every page of one category over `range`.
    ///
    /// Pages are requested in order until one holds fewer records than the
    /// page size. The configured page delay is slept after each full page. The
    /// first failing page fails the whole call and earlier pages are dropped.
    pub async fn fetch_all<R: CategoryRecord>(
        &self,
        address: &str,
        range: BlockRange,
    ) -> Result<Vec<R>, FetchError> {
        let span = spans::fetch_category(R::ACTION.as_str(), address, range);

        async move {
            let page_size = self.config.page_size.clamp(1, MAX_PAGE_SIZE);
            let mut window = FetchWindow::first_page(range, page_size);
            let mut records = Vec::new();

            loop {
                let page = self.fetch_page::<R>(address, window).await?;
                let full_page = page.len() >= page_size as usize;
                records.extend(page);

                if !full_page {
                    break;
                }

                window = window.next_page();
                if !self.config.page_delay.is_zero() {
                    tokio::time::sleep(self.config.page_delay).await;
                }
            }

            info!(
                category = %R::CATEGORY,
                records = records.len(),
                pages = window.page,
                "Fetched all records"
            );
            Ok(records)
        }
        .instrument(span)
        .await
    }

    /// All top-level transactions of `address`
    pub async fn normal_transfers(
        &self,
        address: &str,
        range: BlockRange,
    ) -> Result<Vec<NormalTransaction>, FetchError> {
        self.fetch_all(address, range).await
    }

    /// All internal transactions of `address`
    pub async fn internal_transfers(
        &self,
        address: &str,
        range: BlockRange,
    ) -> Result<Vec<InternalTransaction>, FetchError> {
        self.fetch_all(address, range).await
    }

    /// All ERC-20 transfers to or from `address`
    pub async fn erc20_transfers(
        &self,
        address: &str,
        range: BlockRange,
    ) -> Result<Vec<Erc20Transfer>, FetchError> {
        self.fetch_all(address, range).await
    }

    /// All ERC-721 transfers to or from `address`
    pub async fn erc721_transfers(
        &self,
        address: &str,
        range: BlockRange,
    ) -> Result<Vec<Erc721Transfer>, FetchError> {
        self.fetch_all(address, range).await
    }
}
