// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based retry layer with exponential backoff for explorer HTTP calls.
//!
//! This module implements a retry layer that repeats failed HTTP calls after a
//! delay that doubles on every retry. It wraps any service that resolves a
//! [`Url`] into an [`HttpResponse`] and yields the body of the first 2xx
//! response.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tower::{Layer, ServiceExt};
use tracing::{debug, warn};
use url::Url;

use super::HttpResponse;
use crate::config::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
use crate::errors::TransportError;

/// A Tower layer that adds retry logic with exponential backoff to HTTP calls.
///
/// Connection failures, HTTP 429 and 5xx responses are retried. Any other
/// non-2xx status fails at once. The delay before retry `n` (1-based) is:
///
/// ```text
/// delay = base_delay * 2^(n - 1)
/// ```
///
/// There is no cap and no jitter.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use txhistory::transport::RetryLayer;
///
/// // 3 retries starting at 1s
/// let layer = RetryLayer::new();
///
/// let layer = RetryLayer::builder()
///     .max_retries(5)
///     .base_delay(Duration::from_millis(200))
///     .build();
/// assert_eq!(layer.config().max_retries, 5);
/// ```
#[derive(Clone, Debug)]
pub struct RetryLayer {
    config: Arc<RetryConfig>,
}

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial request).
    pub max_retries: u32,
    /// Delay before the first retry; doubled after every retry.
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryLayer {
    /// Creates a new retry layer with default settings (3 retries, 1s base delay).
    pub fn new() -> Self {
        Self::from_config(RetryConfig::default())
    }

    /// Creates a retry layer from an explicit configuration.
    pub fn from_config(config: RetryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a builder for customizing retry configuration.
    pub fn builder() -> RetryLayerBuilder {
        RetryLayerBuilder::new()
    }

    /// The configuration this layer applies.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl Default for RetryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            config: self.config.clone(),
        }
    }
}

/// Builder for configuring a [`RetryLayer`].
#[derive(Clone, Debug, Default)]
pub struct RetryLayerBuilder {
    config: RetryConfig,
}

impl RetryLayerBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of retry attempts.
    ///
    /// # Arguments
    ///
    /// * `max_retries` - Maximum retries (not including the initial request)
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Builds the configured [`RetryLayer`].
    pub fn build(self) -> RetryLayer {
        RetryLayer::from_config(self.config)
    }
}

/// A Tower service that adds retry logic with exponential backoff.
///
/// The inner service is cloned for every attempt, so the delay state lives in
/// the future of a single call and no two calls share it.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    config: Arc<RetryConfig>,
}

impl<S> tower::Service<Url> for RetryService<S>
where
    S: tower::Service<Url, Response = HttpResponse, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = Vec<u8>;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Each attempt drives readiness on its own clone.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, url: Url) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            let mut delay = config.base_delay;
            loop {
                let outcome = service
                    .clone()
                    .oneshot(url.clone())
                    .await
                    .and_then(HttpResponse::into_success_body);

                let error = match outcome {
                    Ok(body) => {
                        if attempt > 0 {
                            debug!(attempt = attempt, "Request succeeded after retry");
                        }
                        return Ok(body);
                    }
                    Err(error) => error,
                };

                if !error.is_retryable() {
                    debug!(error = %error, "Non-retryable error, not retrying");
                    return Err(error);
                }

                if attempt >= config.max_retries {
                    warn!(
                        error = %error,
                        attempts = attempt + 1,
                        "Max retries exceeded"
                    );
                    return Err(error);
                }

                attempt += 1;
                warn!(
                    error = %error,
                    attempt = attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Retryable error, backing off"
                );

                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
        })
    }
}

/// Total time spent sleeping when every retry in `config` is used.
///
/// `base * (2^retries - 1)`, saturating.
pub fn total_backoff(config: &RetryConfig) -> Duration {
    let mut total = Duration::ZERO;
    let mut delay = config.base_delay;
    for _ in 0..config.max_retries {
        total = total.saturating_add(delay);
        delay = delay.saturating_mul(2);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_layer_default() {
        let layer = RetryLayer::new();
        assert_eq!(layer.config.max_retries, 3);
        assert_eq!(layer.config.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_retry_layer_builder() {
        let layer = RetryLayer::builder()
            .max_retries(5)
            .base_delay(Duration::from_millis(200))
            .build();

        assert_eq!(layer.config.max_retries, 5);
        assert_eq!(layer.config.base_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_total_backoff() {
        let config = RetryConfig::default();
        // 1s + 2s + 4s
        assert_eq!(total_backoff(&config), Duration::from_secs(7));

        let config = RetryConfig {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
        };
        assert_eq!(total_backoff(&config), Duration::ZERO);
    }

    #[test]
    fn test_total_backoff_overflow_protection() {
        let config = RetryConfig {
            max_retries: 200,
            base_delay: Duration::from_secs(1),
        };
        assert_eq!(total_backoff(&config), Duration::MAX);
    }
}
