//! A recording transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use http::StatusCode;

use crate::error::{Error, Result};
use crate::http::request::FrozenRequest;
use crate::http::response::RawResponse;
use crate::transport::Transport;

/// Records every request and answers from a queue of canned replies.
///
/// Once the queue is empty every exchange answers `200 OK` with an empty body.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<FrozenRequest>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        MockTransport::default()
    }

    /// Queue a response.
    #[must_use]
    pub fn reply(self, response: RawResponse) -> Self {
        self.push_reply(Ok(response));
        self
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn fail(self, error: Error) -> Self {
        self.push_reply(Err(error));
        self
    }

    pub fn push_reply(&self, reply: Result<RawResponse>) {
        lock(&self.replies).push_back(reply);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<FrozenRequest> {
        lock(&self.requests).clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<FrozenRequest> {
        lock(&self.requests).last().cloned()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Transport for MockTransport {
    fn exchange(&self, request: &FrozenRequest) -> Result<RawResponse> {
        lock(&self.requests).push(request.clone());
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(StatusCode::OK)))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
