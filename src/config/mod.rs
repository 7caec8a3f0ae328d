//! Configuration for explorer access
//!
//! This module provides the settings that control how txhistory talks to an
//! Etherscan-style explorer: endpoint, API key, page size, inter-page delay,
//! per-call timeout and retry policy.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use txhistory::ExplorerConfig;
//!
//! // Etherscan mainnet, 1000 records per page, 200ms between pages
//! let config = ExplorerConfig::new("MY_API_KEY");
//! assert_eq!(config.page_size, 1000);
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use txhistory::ExplorerConfigBuilder;
//! use std::time::Duration;
//!
//! let config = ExplorerConfigBuilder::new("MY_API_KEY")
//!     .base_url("https://api-sepolia.etherscan.io/api")
//!     .page_delay(Duration::from_millis(500))
//!     .max_retries(5)
//!     .build();
//! assert_eq!(config.retry.max_retries, 5);
//! ```

use std::time::Duration;

use crate::transport::RetryConfig;

pub mod constants;

use constants::{
    DEFAULT_BASE_URL, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT,
    MAX_PAGE_SIZE,
};

/// Configuration for explorer access
///
/// Use [`ExplorerConfigBuilder`] for a fluent API to construct instances.
#[derive(Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Explorer endpoint, query parameters are appended to it
    /// Default: `https://api.etherscan.io/api`
    pub base_url: String,

    /// API key sent as the `apikey` parameter
    pub api_key: String,

    /// Records requested per page, the explorer's `offset`
    /// Default: 1000 (the explorer's maximum)
    pub page_size: u32,

    /// Pause after each full page before requesting the next
    /// Default: 200ms
    pub page_delay: Duration,

    /// Timeout for each HTTP call
    /// Default: 10 seconds
    pub request_timeout: Duration,

    /// Retry policy for failed HTTP calls
    /// Default: 3 retries, 1s initial delay
    pub retry: RetryConfig,
}

impl ExplorerConfig {
    /// Create a config for Etherscan mainnet with default paging and retries
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

// The API key never reaches logs.
impl std::fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("page_size", &self.page_size)
            .field("page_delay", &self.page_delay)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Builder for [`ExplorerConfig`]
#[derive(Debug, Clone)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Start from the defaults of [`ExplorerConfig::new`]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ExplorerConfig::new(api_key),
        }
    }

    /// Set the explorer endpoint
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the page size, clamped to `1..=1000`
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set the delay between full pages
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.config.page_delay = delay;
        self
    }

    /// Set the per-call HTTP timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry.base_delay = delay;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExplorerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::new("key");

        assert_eq!(config.base_url, "https://api.etherscan.io/api");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.page_delay, Duration::from_millis(200));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ExplorerConfigBuilder::new("key")
            .base_url("http://localhost:8080/api")
            .page_delay(Duration::ZERO)
            .request_timeout(Duration::from_secs(2))
            .max_retries(1)
            .retry_delay(Duration::from_millis(10))
            .build();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.page_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.base_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(ExplorerConfigBuilder::new("k").page_size(0).build().page_size, 1);
        assert_eq!(ExplorerConfigBuilder::new("k").page_size(50).build().page_size, 50);
        assert_eq!(
            ExplorerConfigBuilder::new("k").page_size(5000).build().page_size,
            1000
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", ExplorerConfig::new("SECRET123"));
        assert!(!rendered.contains("SECRET123"));
        assert!(rendered.contains("***"));
    }
}
