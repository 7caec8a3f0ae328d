// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The innermost transport service: one HTTP GET per call.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use url::Url;

use crate::errors::TransportError;

/// Raw outcome of a single HTTP call
///
/// Every status is returned as `Ok`; deciding what a status means is left to
/// the layers above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status code and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body for a 2xx response, a `Status` error otherwise
    pub fn into_success_body(self) -> Result<Vec<u8>, TransportError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(TransportError::status(self.status))
        }
    }
}

/// A tower service issuing GET requests with a fixed per-call timeout
///
/// Client errors are stripped of their URL, which carries the API key.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use txhistory::transport::HttpTransport;
///
/// let transport = HttpTransport::new(Duration::from_secs(10))?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose every request times out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::connection)?;
        Ok(Self { client })
    }
}

impl tower::Service<Url> for HttpTransport {
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, url: Url) -> Self::Future {
        let client = self.client.clone();

        Box::pin(async move {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| TransportError::connection(e.without_url()))?;
            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::body(e.without_url()))?;

            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}
