//! Error types for category fetching.
//!
//! A fetch fails either because the transport gave up, because the explorer
//! rejected the request inside an HTTP 200 response, or because the response
//! could not be decoded.

use super::TransportError;

/// Errors that can occur while fetching one transaction category.
///
/// Callers treat every variant the same way: the category produced no data
/// for the requested window. None of these are retried at this level; the
/// transport has already exhausted its retry budget for [`FetchError::Transport`].
///
/// # Examples
///
/// ```rust
/// use txhistory::FetchError;
///
/// let error = FetchError::remote("Invalid API Key");
/// assert_eq!(error.to_string(), "API returned error: Invalid API Key");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP call failed after exhausting its retries.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The explorer answered but reported a non-success status.
    ///
    /// Typical causes are an invalid API key or a malformed query. This is an
    /// application-level rejection, not a transient fault.
    #[error("API returned error: {message}")]
    Remote {
        /// The `message` field of the response envelope
        message: String,
    },

    /// The response body was not a valid explorer envelope or record list.
    #[error("Failed to decode API response: {details}")]
    Decode {
        /// Details about the decode failure
        details: String,
    },

    /// The configured base URL cannot carry a query string.
    #[error("Invalid explorer URL: {base_url}")]
    InvalidUrl {
        /// The configured base URL
        base_url: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    /// Create a `Remote` error from the envelope message.
    pub fn remote(message: impl Into<String>) -> Self {
        FetchError::Remote {
            message: message.into(),
        }
    }

    /// Create a `Decode` error with details.
    pub fn decode(details: impl Into<String>) -> Self {
        FetchError::Decode {
            details: details.into(),
        }
    }

    /// Create an `InvalidUrl` error for a base URL.
    pub fn invalid_url(base_url: impl Into<String>, source: url::ParseError) -> Self {
        FetchError::InvalidUrl {
            base_url: base_url.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_conversion() {
        let error: FetchError = TransportError::status(500).into();
        assert!(matches!(error, FetchError::Transport(_)));
        assert_eq!(
            error.to_string(),
            "API request failed with status code: 500"
        );
    }

    #[test]
    fn test_decode_display() {
        let error = FetchError::decode("unexpected token");
        assert_eq!(
            error.to_string(),
            "Failed to decode API response: unexpected token"
        );
    }
}
