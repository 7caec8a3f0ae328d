//! Well-known defaults and constants
//!
//! This module centralizes the explorer endpoint, paging limits and retry
//! timings used throughout the txhistory crate.

use std::time::Duration;

/// Etherscan's account API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/api";

/// Environment variable holding the explorer API key
pub const API_KEY_ENV: &str = "ETHERSCAN_API_KEY";

/// Largest `offset` the explorer accepts for a single page
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Pause between two successful page requests of one category
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(200);

/// Timeout applied to every HTTP call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Retries after the first attempt of an HTTP call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the first retry
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default last block when none is given; well past the chain head
pub const DEFAULT_END_BLOCK: u64 = 999_999_999;

/// Default directory for CSV output
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_within_explorer_limit() {
        assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
        assert!(DEFAULT_PAGE_SIZE > 0);
    }

    #[test]
    fn test_base_url_parses() {
        assert!(url::Url::parse(DEFAULT_BASE_URL).is_ok());
    }
}
