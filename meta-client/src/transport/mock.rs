//! Mock transport for testing.
//!
//! Allows queueing responses and capturing sent requests for verification.

use super::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport for testing.
///
/// Responses are returned in the order they were queued. An exhausted queue
/// answers `404` so a test that sends more requests than it scripted fails
/// loudly.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    sent_requests: Vec<HttpRequest>,
    response_queue: VecDeque<Result<HttpResponse, TransportError>>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn queue_response(&self, response: HttpResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner.response_queue.push_back(Ok(response));
    }

    /// Queue a response with a JSON body.
    pub fn queue_json<T: Serialize>(&self, status: u16, body: &T) {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.queue_response(HttpResponse::new(status, body));
    }

    /// Queue an empty response with the given status.
    pub fn queue_status(&self, status: u16) {
        self.queue_response(HttpResponse::new(status, Vec::new()));
    }

    /// Cause the next queued exchange to fail with a connection error.
    pub fn fail_next(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .response_queue
            .push_back(Err(TransportError::ConnectionFailed(error.to_string())));
    }

    /// Get all requests that were sent.
    pub fn sent_requests(&self) -> Vec<HttpRequest> {
        let inner = self.inner.lock().unwrap();
        inner.sent_requests.clone()
    }

    /// Get the last request that was sent.
    pub fn last_request(&self) -> Option<HttpRequest> {
        let inner = self.inner.lock().unwrap();
        inner.sent_requests.last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.sent_requests.len()
    }

    /// Clear all state (requests and queue).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.sent_requests.push(request);
        inner
            .response_queue
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(404, Vec::new())))
    }
}
