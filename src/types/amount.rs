// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact conversion of raw integer amounts into scaled decimal strings
//!
//! Explorer APIs report every amount as a base-10 integer string in the
//! smallest unit (wei for ETH, raw units for tokens). This module scales those
//! strings by `10^decimals` using arbitrary-precision integers, so values far
//! beyond `u64` keep every digit.

use bigdecimal::num_bigint::{BigInt, BigUint};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Token decimal precision
///
/// Native ETH and gas fees use 18 decimals. ERC-20 tokens report their own
/// precision (USDC uses 6, WBTC uses 8).
///
/// # Examples
///
/// ```
/// use txhistory::TokenDecimals;
///
/// assert_eq!(TokenDecimals::ETHER.as_u8(), 18);
/// assert_eq!(TokenDecimals::parse_lenient("6"), TokenDecimals::new(6));
/// assert_eq!(TokenDecimals::parse_lenient(""), TokenDecimals::new(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Decimals of ETH and of every gas fee (18)
    pub const ETHER: Self = Self(18);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Parse the explorer's `tokenDecimal` text.
    ///
    /// Anything that is not a plain unsigned integer in `0..=255` becomes 0,
    /// which leaves the raw value unscaled.
    pub fn parse_lenient(text: &str) -> Self {
        Self(text.parse().unwrap_or(0))
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

/// A raw integer amount paired with the precision used to display it
///
/// The `Display` output always has exactly `decimals` fractional digits (no
/// decimal point when `decimals` is 0), never uses scientific notation and
/// never rounds.
///
/// # Examples
///
/// ```
/// use txhistory::{ScaledAmount, TokenDecimals};
///
/// let one_eth = ScaledAmount::parse_lenient("1000000000000000000", TokenDecimals::ETHER);
/// assert_eq!(one_eth.to_string(), "1.000000000000000000");
///
/// let usdc = ScaledAmount::parse_lenient("2500000", TokenDecimals::new(6));
/// assert_eq!(usdc.to_string(), "2.500000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledAmount {
    raw: BigUint,
    decimals: TokenDecimals,
}

impl ScaledAmount {
    /// Create a scaled amount from an already parsed integer
    pub fn new(raw: BigUint, decimals: TokenDecimals) -> Self {
        Self { raw, decimals }
    }

    /// Parse an integer string, treating malformed input as zero.
    pub fn parse_lenient(raw: &str, decimals: TokenDecimals) -> Self {
        Self::new(parse_unsigned_lenient(raw), decimals)
    }

    /// The unscaled integer value
    pub fn raw(&self) -> &BigUint {
        &self.raw
    }

    /// The precision used for display
    pub fn decimals(&self) -> TokenDecimals {
        self.decimals
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.raw == BigUint::default()
    }

    /// The exact value as a `BigDecimal` (`raw / 10^decimals`).
    pub fn to_bigdecimal(&self) -> BigDecimal {
        BigDecimal::new(BigInt::from(self.raw.clone()), i64::from(self.decimals.as_u8()))
    }
}

impl std::fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.raw.to_str_radix(10);
        let scale = usize::from(self.decimals.as_u8());
        if scale == 0 {
            return f.write_str(&digits);
        }

        // Left-pad so there is at least one integer digit.
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fractional) = padded.split_at(padded.len() - scale);
        write!(f, "{whole}.{fractional}")
    }
}

/// Parse an unsigned base-10 integer of any length.
///
/// Empty strings, signs, separators and any non-digit character yield zero.
/// The explorer never sends such values for well-formed records; the
/// coercion keeps a single odd field from discarding an otherwise valid record.
pub fn parse_unsigned_lenient(raw: &str) -> BigUint {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return BigUint::default();
    }
    BigUint::parse_bytes(raw.as_bytes(), 10).unwrap_or_default()
}

/// Scale an integer string by `10^decimals` into a fixed-width decimal string.
///
/// # Examples
///
/// ```
/// use txhistory::{scale_integer_string, TokenDecimals};
///
/// assert_eq!(scale_integer_string("1", TokenDecimals::ETHER), "0.000000000000000001");
/// assert_eq!(scale_integer_string("42", TokenDecimals::new(0)), "42");
/// assert_eq!(scale_integer_string("oops", TokenDecimals::new(2)), "0.00");
/// ```
pub fn scale_integer_string(raw: &str, decimals: TokenDecimals) -> String {
    ScaledAmount::parse_lenient(raw, decimals).to_string()
}

/// Convert a wei string to ETH with 18 fractional digits.
pub fn wei_to_eth(raw: &str) -> String {
    scale_integer_string(raw, TokenDecimals::ETHER)
}

/// Gas fee in ETH: `gas_price * gas_used`, scaled by `10^18`.
///
/// # Examples
///
/// ```
/// use txhistory::gas_fee_eth;
///
/// // 21,000 gas at 20 gwei
/// assert_eq!(gas_fee_eth("20000000000", "21000"), "0.000420000000000000");
/// ```
pub fn gas_fee_eth(gas_price: &str, gas_used: &str) -> String {
    let fee = parse_unsigned_lenient(gas_price) * parse_unsigned_lenient(gas_used);
    ScaledAmount::new(fee, TokenDecimals::ETHER).to_string()
}
