//! Errors raised by the HTTP transport stack.
//!
//! These cover everything below the explorer's JSON envelope: connection
//! failures, non-success HTTP statuses and unreadable response bodies.

/// Errors that can occur while issuing a single explorer HTTP call.
///
/// The retry layer consults [`TransportError::is_retryable`] to decide
/// whether a failed attempt should be repeated after a backoff delay.
///
/// # Examples
///
/// ```rust
/// use txhistory::TransportError;
///
/// let error = TransportError::status(429);
/// assert!(error.is_retryable());
///
/// let error = TransportError::status(404);
/// assert!(!error.is_retryable());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    ///
    /// Covers DNS failures, refused connections, TLS errors and the
    /// per-request timeout.
    #[error("Connection failed")]
    Connection {
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success HTTP status.
    #[error("API request failed with status code: {status_code}")]
    Status {
        /// The HTTP status code returned by the server
        status_code: u16,
    },

    /// The response arrived but its body could not be read.
    #[error("Failed to read response body")]
    Body {
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TransportError {
    /// Helper to create a `Connection` error from any error type.
    pub fn connection(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        TransportError::Connection {
            source: Box::new(source),
        }
    }

    /// Create a `Status` error for an HTTP status code.
    pub fn status(status_code: u16) -> Self {
        TransportError::Status { status_code }
    }

    /// Helper to create a `Body` error from any error type.
    pub fn body(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        TransportError::Body {
            source: Box::new(source),
        }
    }

    /// Whether a retry may succeed where this attempt failed.
    ///
    /// Connection failures, HTTP 429 and every 5xx status are transient.
    /// Everything else fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Connection { .. } => true,
            TransportError::Status { status_code } => is_retryable_status(*status_code),
            TransportError::Body { .. } => false,
        }
    }

    /// The HTTP status code, if this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

/// Rate limiting (429) and server errors (5xx) are worth retrying.
fn is_retryable_status(status_code: u16) -> bool {
    status_code == 429 || (500..=599).contains(&status_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(599));

        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(600));
    }

    #[test]
    fn test_connection_errors_are_retryable() {
        let error =
            TransportError::connection(std::io::Error::from(std::io::ErrorKind::ConnectionReset));
        assert!(error.is_retryable());
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_body_errors_are_not_retryable() {
        let error = TransportError::body(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_status_display() {
        let error = TransportError::status(403);
        assert_eq!(
            error.to_string(),
            "API request failed with status code: 403"
        );
        assert_eq!(error.status_code(), Some(403));
    }
}
