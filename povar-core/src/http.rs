//! JSON POST transport trait and implementations.
//!
//! Both outbound calls this system makes (generation endpoint, delivery
//! webhook) are single JSON POSTs, so one narrow trait covers them and keeps
//! the clients mockable in tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A request never reached the server.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Raw response from a JSON POST. The body is kept as text because the
/// webhook may answer with plain text on success.
#[derive(Debug, Clone)]
pub struct PostResponse {
    pub status: u16,
    pub body: String,
}

impl PostResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for JSON POST transports, enabling mockability in tests.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<PostResponse, TransportError>;
}

/// Production transport backed by reqwest.
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("povar/1.0")
            .build()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<PostResponse, TransportError> {
        let response = self
            .inner
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(PostResponse { status, body })
    }
}

/// Canned response for the mock transport.
#[derive(Clone)]
pub enum MockReply {
    Response(u16, String),
    Error(String),
}

/// Mock transport for tests: URL-keyed canned replies plus a log of every
/// request that was issued.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to POSTs to `url` with the given status and body.
    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Response(status, body.to_string()));
        self
    }

    /// Fail POSTs to `url` at the network level.
    pub fn with_network_error(mut self, url: &str, error: &str) -> Self {
        self.replies
            .insert(url.to_string(), MockReply::Error(error.to_string()));
        self
    }

    /// Requests issued so far, in order.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl JsonTransport for MockTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<PostResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));

        match self.replies.get(url) {
            Some(MockReply::Response(status, body)) => Ok(PostResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::Error(e)) => Err(TransportError(e.clone())),
            None => Err(TransportError(format!("No mock reply for URL: {}", url))),
        }
    }
}
