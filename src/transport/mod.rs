// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer for explorer HTTP calls.
//!
//! This module provides a `reqwest`-backed [`HttpTransport`] and Tower
//! middleware layers stacked on top of it:
//!
//! - [`RetryLayer`] retries connection failures, HTTP 429 and 5xx responses
//!   with exponential backoff, and turns the first 2xx response into its body.
//! - [`LoggingLayer`] records every attempt with the API key redacted.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//! use txhistory::transport::{HttpTransport, LoggingLayer, RetryLayer};
//! use std::time::Duration;
//!
//! let service = ServiceBuilder::new()
//!     .layer(RetryLayer::new())
//!     .layer(LoggingLayer::new())
//!     .service(HttpTransport::new(Duration::from_secs(10))?);
//! ```
//!
//! [`build_transport`] assembles exactly this stack from an
//! [`ExplorerConfig`](crate::ExplorerConfig).

mod http;
mod logging;
mod retry;

pub use http::{HttpResponse, HttpTransport};
pub use logging::{LoggingLayer, LoggingService};
pub use retry::{total_backoff, RetryConfig, RetryLayer, RetryLayerBuilder, RetryService};

use tower::Layer;

use crate::config::ExplorerConfig;
use crate::errors::TransportError;

/// The production transport stack: retry, then logging, then HTTP.
pub type ExplorerTransport = RetryService<LoggingService<HttpTransport>>;

/// Build the production transport stack from a configuration.
pub fn build_transport(config: &ExplorerConfig) -> Result<ExplorerTransport, TransportError> {
    let http = HttpTransport::new(config.request_timeout)?;
    let logged = LoggingLayer::new().layer(http);
    Ok(RetryLayer::from_config(config.retry.clone()).layer(logged))
}
