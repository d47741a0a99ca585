//! The seam between a chain and whatever performs the network exchange.
//!
//! A [`Transport`] receives a [`FrozenRequest`] and blocks until it has a
//! [`RawResponse`] or an error. Retries, pooling, TLS and timeouts all live
//! behind this trait; the chain neither adds nor interprets any of them.

pub mod mock;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::http::request::FrozenRequest;
use crate::http::response::{RawResponse, ResponseResult};

pub use mock::MockTransport;

/// Performs one synchronous HTTP exchange.
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the answer.
    ///
    /// # Errors
    ///
    /// Connectivity, timeout and protocol failures, reported however the
    /// implementation sees fit; they reach the caller of the chain unchanged.
    fn exchange(&self, request: &FrozenRequest) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn exchange(&self, request: &FrozenRequest) -> Result<RawResponse> {
        (**self).exchange(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn exchange(&self, request: &FrozenRequest) -> Result<RawResponse> {
        (**self).exchange(request)
    }
}

/// A transport backed by a closure.
#[derive(Clone)]
pub struct FnTransport<F> {
    f: F,
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&FrozenRequest) -> Result<RawResponse> + Send + Sync,
{
    fn exchange(&self, request: &FrozenRequest) -> Result<RawResponse> {
        (self.f)(request)
    }
}

/// Build a [`Transport`] from a closure.
pub fn from_fn<F>(f: F) -> FnTransport<F>
where
    F: Fn(&FrozenRequest) -> Result<RawResponse> + Send + Sync,
{
    FnTransport { f }
}

/// Hand `request` to `transport` and wrap a successful answer.
///
/// Transport errors are returned exactly as the transport produced them.
pub fn dispatch(transport: &dyn Transport, request: FrozenRequest) -> Result<ResponseResult> {
    let span = tracing::debug_span!("exchange", method = %request.method(), url = %request.url());
    let _guard = span.enter();

    match transport.exchange(&request) {
        Ok(raw) => {
            tracing::debug!(status = %raw.status(), bytes = raw.body().len(), "response received");
            Ok(ResponseResult::new(
                request.method().clone(),
                request.url().clone(),
                raw,
            ))
        }
        Err(err) => {
            tracing::debug!(error = %err, "transport failed");
            Err(err)
        }
    }
}
