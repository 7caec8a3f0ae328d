//! Error types for raw record conversion.
//!
//! Conversion failures are always record-local: the offending record is
//! dropped with a warning and the rest of the batch is kept.

/// A malformed field inside a single raw record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The timestamp is not a base-10 integer.
    #[error("Invalid timestamp: {value:?}")]
    InvalidTimestamp {
        /// The raw timestamp text
        value: String,
    },

    /// The timestamp parses but cannot be represented as a UTC instant.
    #[error("Timestamp out of range: {value}")]
    TimestampOutOfRange {
        /// The parsed seconds since the Unix epoch
        value: i64,
    },
}

impl ParseError {
    /// Create an `InvalidTimestamp` error for the raw text.
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        ParseError::InvalidTimestamp {
            value: value.into(),
        }
    }
}

/// Errors that can occur while converting a raw record to a canonical transaction.
///
/// # Examples
///
/// ```rust
/// use txhistory::{ConversionError, ParseError};
///
/// let error = ConversionError::parse("0xabc", ParseError::invalid_timestamp("soon"));
/// assert!(error.to_string().contains("0xabc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A field of the record could not be parsed.
    #[error("Failed to convert transaction {hash}")]
    Parse {
        /// Hash of the record that failed
        hash: String,
        /// The field-level failure
        #[source]
        source: ParseError,
    },
}

impl ConversionError {
    /// Wrap a field-level parse failure with the record's hash.
    pub fn parse(hash: impl Into<String>, source: ParseError) -> Self {
        ConversionError::Parse {
            hash: hash.into(),
            source,
        }
    }
}
