//! Conversion of raw explorer records into [`CanonicalTransaction`]s
//!
//! Each function is pure. Timestamps are parsed strictly and a bad one fails
//! the record; amounts are parsed leniently by the unit converter.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::errors::{ConversionError, ParseError};
use crate::explorer::records::{
    CategoryRecord, Erc20Transfer, Erc721Transfer, InternalTransaction, NormalTransaction,
};
use crate::types::amount::{gas_fee_eth, scale_integer_string, wei_to_eth, TokenDecimals};
use crate::types::transaction::{CanonicalTransaction, TransactionCategory};

/// Gas fee of an internal transfer; the enclosing transaction pays it
const INTERNAL_GAS_FEE: &str = "0";

/// Quantity moved by one ERC-721 transfer
const NFT_QUANTITY: &str = "1";

/// Parse a Unix timestamp in seconds.
///
/// # Examples
///
/// ```
/// use txhistory::conversion::parse_timestamp;
///
/// let ts = parse_timestamp("1678883445").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2023-03-15T12:30:45+00:00");
/// assert!(parse_timestamp("not-a-number").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let seconds: i64 = raw
        .parse()
        .map_err(|_| ParseError::invalid_timestamp(raw))?;
    DateTime::from_timestamp(seconds, 0).ok_or(ParseError::TimestampOutOfRange { value: seconds })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn timestamp_of(hash: &str, raw: &str) -> Result<DateTime<Utc>, ConversionError> {
    parse_timestamp(raw).map_err(|e| ConversionError::parse(hash, e))
}

/// A top-level transaction: ETH value and its gas fee.
pub fn convert_normal(tx: &NormalTransaction) -> Result<CanonicalTransaction, ConversionError> {
    Ok(CanonicalTransaction {
        hash: tx.hash.clone(),
        timestamp: timestamp_of(&tx.hash, &tx.time_stamp)?,
        from: tx.from.clone(),
        to: tx.to.clone(),
        category: TransactionCategory::EthTransfer,
        asset_contract_address: None,
        asset_symbol: None,
        token_id: None,
        value: wei_to_eth(&tx.value),
        gas_fee: gas_fee_eth(&tx.gas_price, &tx.gas_used),
    })
}

/// An internal transfer: ETH value, gas fee always `"0"`.
pub fn convert_internal(
    tx: &InternalTransaction,
) -> Result<CanonicalTransaction, ConversionError> {
    Ok(CanonicalTransaction {
        hash: tx.hash.clone(),
        timestamp: timestamp_of(&tx.hash, &tx.time_stamp)?,
        from: tx.from.clone(),
        to: tx.to.clone(),
        category: TransactionCategory::InternalTransfer,
        asset_contract_address: None,
        asset_symbol: None,
        token_id: None,
        value: wei_to_eth(&tx.value),
        gas_fee: INTERNAL_GAS_FEE.to_string(),
    })
}

/// An ERC-20 transfer, scaled by the token's own decimals.
pub fn convert_erc20(tx: &Erc20Transfer) -> Result<CanonicalTransaction, ConversionError> {
    let decimals = TokenDecimals::parse_lenient(&tx.token_decimal);
    Ok(CanonicalTransaction {
        hash: tx.hash.clone(),
        timestamp: timestamp_of(&tx.hash, &tx.time_stamp)?,
        from: tx.from.clone(),
        to: tx.to.clone(),
        category: TransactionCategory::Erc20Transfer,
        asset_contract_address: non_empty(&tx.contract_address),
        asset_symbol: non_empty(&tx.token_symbol),
        token_id: None,
        value: scale_integer_string(&tx.value, decimals),
        gas_fee: gas_fee_eth(&tx.gas_price, &tx.gas_used),
    })
}

/// An ERC-721 transfer: value is always `"1"`.
pub fn convert_erc721(tx: &Erc721Transfer) -> Result<CanonicalTransaction, ConversionError> {
    Ok(CanonicalTransaction {
        hash: tx.hash.clone(),
        timestamp: timestamp_of(&tx.hash, &tx.time_stamp)?,
        from: tx.from.clone(),
        to: tx.to.clone(),
        category: TransactionCategory::Erc721Transfer,
        asset_contract_address: non_empty(&tx.contract_address),
        asset_symbol: non_empty(&tx.token_symbol),
        token_id: non_empty(&tx.token_id),
        value: NFT_QUANTITY.to_string(),
        gas_fee: gas_fee_eth(&tx.gas_price, &tx.gas_used),
    })
}

/// Convert a category's records, dropping each one that fails with a warning.
pub fn convert_all<R: CategoryRecord>(records: &[R]) -> Vec<CanonicalTransaction> {
    records
        .iter()
        .filter_map(|record| match record.convert() {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!(
                    category = %R::CATEGORY,
                    hash = record.hash(),
                    error = &e as &dyn std::error::Error,
                    "Skipping record that failed conversion"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal() -> NormalTransaction {
        NormalTransaction {
            time_stamp: "1678883445".to_string(),
            hash: "0xabc123".to_string(),
            from: "0xsender".to_string(),
            to: "0xreceiver".to_string(),
            value: "1000000000000000000".to_string(),
            gas_price: "20000000000".to_string(),
            gas_used: "21000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_convert_normal() {
        let tx = convert_normal(&normal()).unwrap();
        assert_eq!(tx.category, TransactionCategory::EthTransfer);
        assert_eq!(tx.value, "1.000000000000000000");
        assert_eq!(tx.gas_fee, "0.000420000000000000");
        assert_eq!(tx.timestamp.timestamp(), 1_678_883_445);
        assert_eq!(tx.asset_contract_address, None);
    }

    #[test]
    fn test_convert_normal_invalid_timestamp() {
        let record = NormalTransaction {
            time_stamp: "invalid".to_string(),
            ..normal()
        };
        let error = convert_normal(&record).unwrap_err();
        assert_eq!(
            error,
            ConversionError::parse("0xabc123", ParseError::invalid_timestamp("invalid"))
        );
    }

    #[test]
    fn test_timestamp_out_of_range() {
        assert_eq!(
            parse_timestamp(&i64::MAX.to_string()),
            Err(ParseError::TimestampOutOfRange { value: i64::MAX })
        );
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("12.5").is_err());
    }

    #[test]
    fn test_convert_internal_has_zero_gas_fee() {
        let record = InternalTransaction {
            time_stamp: "1678883445".to_string(),
            hash: "0xdef456".to_string(),
            value: "500000000000000000".to_string(),
            ..Default::default()
        };
        let tx = convert_internal(&record).unwrap();
        assert_eq!(tx.category, TransactionCategory::InternalTransfer);
        assert_eq!(tx.value, "0.500000000000000000");
        assert_eq!(tx.gas_fee, "0");
    }

    #[test]
    fn test_convert_erc20_uses_token_decimals() {
        let record = Erc20Transfer {
            time_stamp: "1678883445".to_string(),
            hash: "0xghi789".to_string(),
            value: "1000000".to_string(),
            contract_address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            token_symbol: "USDC".to_string(),
            token_decimal: "6".to_string(),
            gas_price: "20000000000".to_string(),
            gas_used: "65000".to_string(),
            ..Default::default()
        };
        let tx = convert_erc20(&record).unwrap();
        assert_eq!(tx.value, "1.000000");
        assert_eq!(tx.asset_symbol.as_deref(), Some("USDC"));
        assert_eq!(
            tx.asset_contract_address.as_deref(),
            Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
        );
        assert_eq!(tx.gas_fee, "0.001300000000000000");
        assert_eq!(tx.token_id, None);
    }

    #[test]
    fn test_convert_erc20_missing_decimals_leaves_value_unscaled() {
        let record = Erc20Transfer {
            time_stamp: "1678883445".to_string(),
            value: "12345".to_string(),
            ..Default::default()
        };
        let tx = convert_erc20(&record).unwrap();
        assert_eq!(tx.value, "12345");
        assert_eq!(tx.asset_symbol, None);
        assert_eq!(tx.asset_contract_address, None);
    }

    #[test]
    fn test_convert_erc721() {
        let record = Erc721Transfer {
            time_stamp: "1678883445".to_string(),
            hash: "0xjkl012".to_string(),
            token_id: "1234".to_string(),
            contract_address: "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d".to_string(),
            token_symbol: "BAYC".to_string(),
            gas_price: "20000000000".to_string(),
            gas_used: "120000".to_string(),
            ..Default::default()
        };
        let tx = convert_erc721(&record).unwrap();
        assert_eq!(tx.category, TransactionCategory::Erc721Transfer);
        assert_eq!(tx.value, "1");
        assert_eq!(tx.token_id.as_deref(), Some("1234"));
        assert_eq!(tx.gas_fee, "0.002400000000000000");
    }

    #[test]
    fn test_convert_all_drops_bad_records() {
        let records = vec![
            normal(),
            NormalTransaction {
                time_stamp: "yesterday".to_string(),
                hash: "0xbad".to_string(),
                ..normal()
            },
            NormalTransaction {
                hash: "0xlast".to_string(),
                ..normal()
            },
        ];
        let converted = convert_all(&records);
        let hashes: Vec<&str> = converted.iter().map(|tx| tx.hash.as_str()).collect();
        assert_eq!(hashes, vec!["0xabc123", "0xlast"]);
    }
}
