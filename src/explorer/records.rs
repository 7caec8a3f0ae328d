// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw explorer records and the response envelope that carries them
//!
//! Every numeric field arrives as text. Records are decoded with
//! `#[serde(default)]` so a missing field becomes an empty string and is then
//! handled by the lenient number parsing of the conversion step.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::request::Action;
use crate::conversion;
use crate::errors::{ConversionError, FetchError};
use crate::types::transaction::{CanonicalTransaction, TransactionCategory};

/// A raw record type that one explorer action returns
///
/// Ties together the action to request, the category it produces and the
/// conversion into a [`CanonicalTransaction`].
pub trait CategoryRecord: DeserializeOwned + Send + Sync + 'static {
    /// The explorer action listing these records
    const ACTION: Action;

    /// Category assigned to converted records
    const CATEGORY: TransactionCategory = Self::ACTION.category();

    /// Transaction hash, used to identify the record in logs
    fn hash(&self) -> &str;

    /// Convert into the canonical shape
    fn convert(&self) -> Result<CanonicalTransaction, ConversionError>;
}

/// A top-level transaction (`txlist`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalTransaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas_price: String,
    pub gas_used: String,
    pub is_error: String,
    pub contract_address: String,
    pub cumulative_gas_used: String,
}

/// A value transfer made by a contract during execution (`txlistinternal`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalTransaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_error: String,
}

/// An ERC-20 `Transfer` (`tokentx`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Erc20Transfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub token_decimal: String,
    pub gas_price: String,
    pub gas_used: String,
}

/// An ERC-721 `Transfer` (`tokennfttx`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Erc721Transfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub contract_address: String,
    pub token_name: String,
    pub token_symbol: String,
    pub gas_price: String,
    pub gas_used: String,
}

impl CategoryRecord for NormalTransaction {
    const ACTION: Action = Action::NormalTransactions;

    fn hash(&self) -> &str {
        &self.hash
    }

    fn convert(&self) -> Result<CanonicalTransaction, ConversionError> {
        conversion::convert_normal(self)
    }
}

impl CategoryRecord for InternalTransaction {
    const ACTION: Action = Action::InternalTransactions;

    fn hash(&self) -> &str {
        &self.hash
    }

    fn convert(&self) -> Result<CanonicalTransaction, ConversionError> {
        conversion::convert_internal(self)
    }
}

impl CategoryRecord for Erc20Transfer {
    const ACTION: Action = Action::Erc20Transfers;

    fn hash(&self) -> &str {
        &self.hash
    }

    fn convert(&self) -> Result<CanonicalTransaction, ConversionError> {
        conversion::convert_erc20(self)
    }
}

impl CategoryRecord for Erc721Transfer {
    const ACTION: Action = Action::Erc721Transfers;

    fn hash(&self) -> &str {
        &self.hash
    }

    fn convert(&self) -> Result<CanonicalTransaction, ConversionError> {
        conversion::convert_erc721(self)
    }
}

/// Status flag of a successful explorer response
const STATUS_OK: &str = "1";

/// The `{status, message, result}` wrapper around every explorer response
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl ResponseEnvelope {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(body)
            .map_err(|e| FetchError::decode(format!("invalid response envelope: {e}")))
    }

    /// Extract the page of records.
    ///
    /// A status other than `"1"` is a [`FetchError::Remote`] carrying the
    /// envelope message, except when `result` is an empty array: the explorer
    /// reports an empty window as `status: "0"`, `"No transactions found"`.
    pub fn into_records<R: DeserializeOwned>(self) -> Result<Vec<R>, FetchError> {
        if self.status != STATUS_OK {
            let empty_page = self
                .result
                .as_array()
                .is_some_and(|records| records.is_empty());
            if empty_page {
                return Ok(Vec::new());
            }
            return Err(FetchError::remote(self.message));
        }

        serde_json::from_value(self.result)
            .map_err(|e| FetchError::decode(format!("invalid record list: {e}")))
    }
}
