// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for txhistory integration tests
//!
//! Provides a scripted tower service standing in for the explorer's HTTP
//! endpoint, an in-memory transaction sink and raw record fixtures, so tests
//! run without network access or a real API key.

#![allow(dead_code)]

use std::future::{ready, Ready};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use serde_json::{json, Value};
use tower::Layer;
use txhistory::transport::{HttpResponse, RetryLayer, RetryService};
use txhistory::{
    CanonicalTransaction, ExplorerClient, ExplorerConfig, ExplorerConfigBuilder, ExportError,
    TransactionSink, TransportError,
};
use url::Url;

pub const ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc454e4438f44e";
pub const API_KEY: &str = "TEST_KEY";
pub const BASE_URL: &str = "https://explorer.test/api";

type Responder = dyn Fn(&Url) -> Result<HttpResponse, TransportError> + Send + Sync;

/// Mock explorer endpoint for testing the transport and client logic
///
/// Every request is recorded; the response comes from a caller-supplied
/// function of the request URL.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockExplorer::new(|url| match query(url, "action").as_deref() {
///     Some("tokentx") => Ok(remote_error("NOTOK")),
///     _ => Ok(ok_page(vec![])),
/// });
/// ```
#[derive(Clone)]
pub struct MockExplorer {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl MockExplorer {
    /// Create a mock answering every request with `responder`
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Url) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock replaying `responses` in order; the last one repeats
    pub fn scripted(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        let responses = Arc::new(responses);
        let calls = Arc::new(Mutex::new(0usize));
        Self::new(move |_| {
            let mut calls = calls.lock().unwrap();
            let index = (*calls).min(responses.len() - 1);
            *calls += 1;
            match &responses[index] {
                Ok(response) => Ok(response.clone()),
                Err(TransportError::Status { status_code }) => {
                    Err(TransportError::status(*status_code))
                }
                Err(_) => Err(connection_error()),
            }
        })
    }

    /// Every URL requested so far
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests whose `action` parameter equals `action`
    pub fn requests_for(&self, action: &str) -> Vec<Url> {
        self.requests()
            .into_iter()
            .filter(|url| query(url, "action").as_deref() == Some(action))
            .collect()
    }
}

impl tower::Service<Url> for MockExplorer {
    type Response = HttpResponse;
    type Error = TransportError;
    type Future = Ready<Result<HttpResponse, TransportError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, url: Url) -> Self::Future {
        self.requests.lock().unwrap().push(url.clone());
        ready((self.responder)(&url))
    }
}

/// The client under test: mock endpoint behind the real retry layer
pub type TestClient = ExplorerClient<RetryService<MockExplorer>>;

/// Build a client with no page delay and no retries
pub fn test_client(mock: &MockExplorer, page_size: u32) -> TestClient {
    let config = ExplorerConfigBuilder::new(API_KEY)
        .base_url(BASE_URL)
        .page_size(page_size)
        .page_delay(Duration::ZERO)
        .max_retries(0)
        .build();
    client_with_config(mock, config)
}

/// Build a client over `mock` with an explicit configuration
pub fn client_with_config(mock: &MockExplorer, config: ExplorerConfig) -> TestClient {
    let service = RetryLayer::from_config(config.retry.clone()).layer(mock.clone());
    ExplorerClient::new(config, service)
}

/// A query parameter of a request URL
pub fn query(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// A numeric query parameter of a request URL
pub fn query_u64(url: &Url, name: &str) -> u64 {
    query(url, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// A connection-level failure
pub fn connection_error() -> TransportError {
    TransportError::connection(std::io::Error::from(std::io::ErrorKind::ConnectionRefused))
}

/// HTTP 200 carrying a successful envelope around `records`
pub fn ok_page(records: Vec<Value>) -> HttpResponse {
    let body = json!({ "status": "1", "message": "OK", "result": records });
    HttpResponse::new(200, body.to_string())
}

/// HTTP 200 carrying Etherscan's empty-window envelope
pub fn no_transactions() -> HttpResponse {
    let body = json!({ "status": "0", "message": "No transactions found", "result": [] });
    HttpResponse::new(200, body.to_string())
}

/// HTTP 200 carrying an application-level rejection
pub fn remote_error(message: &str) -> HttpResponse {
    let body = json!({ "status": "0", "message": message, "result": "Invalid API Key" });
    HttpResponse::new(200, body.to_string())
}

/// A bare HTTP status with an empty body
pub fn status(code: u16) -> HttpResponse {
    HttpResponse::new(code, Vec::new())
}

/// `txlist` record: 1 ETH, 21000 gas at 20 gwei
pub fn normal_record(hash: &str, timestamp: &str) -> Value {
    json!({
        "blockNumber": "17000000",
        "timeStamp": timestamp,
        "hash": hash,
        "from": ADDRESS,
        "to": "0x0000000000000000000000000000000000000001",
        "value": "1000000000000000000",
        "gasPrice": "20000000000",
        "gasUsed": "21000",
        "isError": "0",
        "contractAddress": "",
        "cumulativeGasUsed": "21000"
    })
}

/// `txlistinternal` record: 0.5 ETH
pub fn internal_record(hash: &str, timestamp: &str) -> Value {
    json!({
        "blockNumber": "17000001",
        "timeStamp": timestamp,
        "hash": hash,
        "from": "0x0000000000000000000000000000000000000002",
        "to": ADDRESS,
        "value": "500000000000000000",
        "contractAddress": "",
        "type": "call",
        "isError": "0"
    })
}

/// `tokentx` record: 1 USDC
pub fn erc20_record(hash: &str, timestamp: &str) -> Value {
    json!({
        "blockNumber": "17000002",
        "timeStamp": timestamp,
        "hash": hash,
        "from": ADDRESS,
        "to": "0x0000000000000000000000000000000000000003",
        "value": "1000000",
        "contractAddress": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "tokenName": "USD Coin",
        "tokenSymbol": "USDC",
        "tokenDecimal": "6",
        "gasPrice": "20000000000",
        "gasUsed": "65000"
    })
}

/// `tokennfttx` record: token 1234
pub fn erc721_record(hash: &str, timestamp: &str) -> Value {
    json!({
        "blockNumber": "17000003",
        "timeStamp": timestamp,
        "hash": hash,
        "from": "0x0000000000000000000000000000000000000004",
        "to": ADDRESS,
        "tokenID": "1234",
        "contractAddress": "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d",
        "tokenName": "BoredApeYachtClub",
        "tokenSymbol": "BAYC",
        "gasPrice": "20000000000",
        "gasUsed": "120000"
    })
}

/// Sink keeping every write in memory
///
/// Writes to paths matching the failure predicate return an I/O error.
#[derive(Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<(PathBuf, Vec<CanonicalTransaction>)>>>,
    fail_when: Option<Arc<dyn Fn(&Path) -> bool + Send + Sync>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write whose path satisfies `predicate`
    pub fn failing_when<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self {
            writes: Arc::default(),
            fail_when: Some(Arc::new(predicate)),
        }
    }

    /// Successful writes, in order
    pub fn writes(&self) -> Vec<(PathBuf, Vec<CanonicalTransaction>)> {
        self.writes.lock().unwrap().clone()
    }

    /// File names of successful writes, in order
    pub fn file_names(&self) -> Vec<String> {
        self.writes()
            .iter()
            .filter_map(|(path, _)| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }
}

impl TransactionSink for MemorySink {
    fn write(
        &self,
        transactions: &[CanonicalTransaction],
        path: &Path,
    ) -> Result<(), ExportError> {
        if self.fail_when.as_ref().is_some_and(|fail| fail(path)) {
            return Err(ExportError::io(
                path,
                std::io::Error::other("disk full"),
            ));
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), transactions.to_vec()));
        Ok(())
    }
}
