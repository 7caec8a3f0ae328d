//! Query-string construction for the explorer's `account` module

use url::Url;

use crate::types::block_range::FetchWindow;
use crate::types::transaction::TransactionCategory;

/// Explorer `action` values this crate requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `txlist`
    NormalTransactions,
    /// `txlistinternal`
    InternalTransactions,
    /// `tokentx`
    Erc20Transfers,
    /// `tokennfttx`
    Erc721Transfers,
}

impl Action {
    /// Wire value of the `action` parameter
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NormalTransactions => "txlist",
            Self::InternalTransactions => "txlistinternal",
            Self::Erc20Transfers => "tokentx",
            Self::Erc721Transfers => "tokennfttx",
        }
    }

    /// Category of the records this action lists
    pub const fn category(&self) -> TransactionCategory {
        match self {
            Self::NormalTransactions => TransactionCategory::EthTransfer,
            Self::InternalTransactions => TransactionCategory::InternalTransfer,
            Self::Erc20Transfers => TransactionCategory::Erc20Transfer,
            Self::Erc721Transfers => TransactionCategory::Erc721Transfer,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One paginated `account` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerRequest<'a> {
    pub action: Action,
    pub address: &'a str,
    pub window: FetchWindow,
}

impl<'a> ExplorerRequest<'a> {
    pub fn new(action: Action, address: &'a str, window: FetchWindow) -> Self {
        Self {
            action,
            address,
            window,
        }
    }

    /// Query parameters in the order the explorer documents them
    pub fn query_pairs(&self, api_key: &str) -> [(&'static str, String); 9] {
        [
            ("module", "account".to_string()),
            ("action", self.action.as_str().to_string()),
            ("address", self.address.to_string()),
            ("startblock", self.window.start_block.to_string()),
            ("endblock", self.window.end_block.to_string()),
            ("page", self.window.page.to_string()),
            ("offset", self.window.page_size.to_string()),
            ("sort", "asc".to_string()),
            ("apikey", api_key.to_string()),
        ]
    }

    /// Full request URL: `base_url` with the URL-encoded query appended
    pub fn to_url(&self, base_url: &str, api_key: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(base_url, self.query_pairs(api_key))
    }
}
