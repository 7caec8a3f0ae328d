// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The canonical transaction shape shared by every category

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Kind of on-chain activity a canonical transaction represents
///
/// Only the first four variants are produced by the explorer categories;
/// `Erc1155Transfer` and `ContractCall` exist so downstream consumers share one
/// vocabulary.
///
/// # Examples
///
/// ```
/// use txhistory::TransactionCategory;
///
/// assert_eq!(TransactionCategory::Erc20Transfer.as_str(), "ERC20_TRANSFER");
/// assert_eq!(TransactionCategory::InternalTransfer.to_string(), "INTERNAL_TRANSFER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    /// Top-level ETH transfer or call (`txlist`)
    #[serde(rename = "ETH_TRANSFER")]
    EthTransfer,
    /// Value moved by a contract during execution (`txlistinternal`)
    #[serde(rename = "INTERNAL_TRANSFER")]
    InternalTransfer,
    /// ERC-20 token transfer (`tokentx`)
    #[serde(rename = "ERC20_TRANSFER")]
    Erc20Transfer,
    /// ERC-721 NFT transfer (`tokennfttx`)
    #[serde(rename = "ERC721_TRANSFER")]
    Erc721Transfer,
    /// ERC-1155 transfer (never produced)
    #[serde(rename = "ERC1155_TRANSFER")]
    Erc1155Transfer,
    /// Contract interaction without value (never produced)
    #[serde(rename = "CONTRACT_CALL")]
    ContractCall,
}

impl TransactionCategory {
    /// The four categories fetched from the explorer, in export order
    pub const FETCHED: [Self; 4] = [
        Self::EthTransfer,
        Self::InternalTransfer,
        Self::Erc20Transfer,
        Self::Erc721Transfer,
    ];

    /// Wire name used in CSV output
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EthTransfer => "ETH_TRANSFER",
            Self::InternalTransfer => "INTERNAL_TRANSFER",
            Self::Erc20Transfer => "ERC20_TRANSFER",
            Self::Erc721Transfer => "ERC721_TRANSFER",
            Self::Erc1155Transfer => "ERC1155_TRANSFER",
            Self::ContractCall => "CONTRACT_CALL",
        }
    }
}

impl std::fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSV header row, one label per [`CanonicalTransaction::csv_record`] column
pub const CSV_HEADERS: [&str; 10] = [
    "Transaction Hash",
    "Date & Time",
    "From Address",
    "To Address",
    "Transaction Type",
    "Asset Contract Address",
    "Asset Symbol / Name",
    "Token ID",
    "Value / Amount",
    "Gas Fee (ETH)",
];

/// A transaction normalized from any explorer category
///
/// `value` and `gas_fee` are exact base-10 decimal strings: 18 fractional
/// digits for ETH amounts and every gas fee, the token's own decimals for
/// ERC-20 values, the literal `"1"` for ERC-721 transfers, and the literal
/// `"0"` gas fee for internal transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    /// Transaction hash
    pub hash: String,
    /// Block timestamp
    pub timestamp: DateTime<Utc>,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Category of activity
    pub category: TransactionCategory,
    /// Token contract, for token transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_contract_address: Option<String>,
    /// Token symbol, for token transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_symbol: Option<String>,
    /// Token id, for NFT transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    /// Transferred amount as a decimal string
    pub value: String,
    /// Gas fee in ETH as a decimal string
    pub gas_fee: String,
}

impl CanonicalTransaction {
    /// The row written to CSV, in [`CSV_HEADERS`] order
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use txhistory::{CanonicalTransaction, TransactionCategory};
    ///
    /// let tx = CanonicalTransaction {
    ///     hash: "0xdef456".into(),
    ///     timestamp: Utc.with_ymd_and_hms(2023, 3, 16, 0, 0, 0).unwrap(),
    ///     from: "0xa".into(),
    ///     to: "0xb".into(),
    ///     category: TransactionCategory::InternalTransfer,
    ///     asset_contract_address: None,
    ///     asset_symbol: None,
    ///     token_id: None,
    ///     value: "0.1".into(),
    ///     gas_fee: "0".into(),
    /// };
    /// let record = tx.csv_record();
    /// assert_eq!(record[1], "2023-03-16T00:00:00Z");
    /// assert_eq!(record[5], "");
    /// ```
    pub fn csv_record(&self) -> [String; 10] {
        [
            self.hash.clone(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.from.clone(),
            self.to.clone(),
            self.category.as_str().to_string(),
            self.asset_contract_address.clone().unwrap_or_default(),
            self.asset_symbol.clone().unwrap_or_default(),
            self.token_id.clone().unwrap_or_default(),
            self.value.clone(),
            self.gas_fee.clone(),
        ]
    }
}
