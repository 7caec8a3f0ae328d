// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for explorer HTTP calls.
//!
//! This module implements a logging layer that uses `tracing` to record each
//! HTTP attempt: the request URL (with the API key redacted), the response
//! status and the elapsed time.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use tower::Layer;
use tracing::{debug, trace, warn, Instrument};
use url::Url;

use super::HttpResponse;
use crate::errors::TransportError;

/// Query parameter carrying the explorer API key.
const API_KEY_PARAM: &str = "apikey";
/// Replacement text for the API key in logs.
const REDACTED: &str = "***";

/// A Tower layer that adds logging/tracing to HTTP calls.
///
/// Placed below the retry layer, it logs every attempt separately.
///
/// # Example
///
/// ```rust,ignore
/// use tower::ServiceBuilder;
/// use txhistory::transport::{HttpTransport, LoggingLayer, RetryLayer};
///
/// let service = ServiceBuilder::new()
///     .layer(RetryLayer::new())
///     .layer(LoggingLayer::new())
///     .service(HttpTransport::new(timeout)?);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Whether to log response bodies (can be verbose)
    log_responses: bool,
}

impl LoggingLayer {
    /// Creates a new logging layer with default settings.
    ///
    /// By default, only the URL, status and timing are logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables logging of response bodies at `trace` level.
    ///
    /// Warning: explorer pages can hold a thousand records.
    pub fn with_response_logging(mut self) -> Self {
        self.log_responses = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_responses: self.log_responses,
        }
    }
}

/// A Tower service that logs HTTP requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_responses: bool,
}

impl<S> tower::Service<Url> for LoggingService<S>
where
    S: tower::Service<Url, Response = HttpResponse, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, url: Url) -> Self::Future {
        let log_responses = self.log_responses;
        let target = redact_api_key(&url);
        let action = query_value(&url, "action").unwrap_or_default();
        let future = self.service.call(url);

        let span = tracing::debug_span!(
            "explorer_http_call",
            action = %action,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();
                debug!(url = %target, "HTTP request");

                let result = future.await;
                let duration = start.elapsed();
                tracing::Span::current().record("duration_ms", duration.as_millis() as u64);

                match &result {
                    Ok(response) => {
                        if log_responses {
                            trace!(
                                status = response.status,
                                body = %String::from_utf8_lossy(&response.body),
                                duration_ms = %duration.as_millis(),
                                "HTTP response"
                            );
                        } else {
                            debug!(
                                status = response.status,
                                bytes = response.body.len(),
                                duration_ms = %duration.as_millis(),
                                "HTTP response"
                            );
                        }
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            duration_ms = %duration.as_millis(),
                            "HTTP error: {target}"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Render a URL with the API key replaced by `***`.
pub(crate) fn redact_api_key(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == API_KEY_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
