//! # restchain client
//!
//! The request/response model behind the `restchain` fluent API.
//!
//! - [`RequestSpec`] accumulates method, target, headers and body while a
//!   chain is being built, and [`RequestSpec::freeze`] turns it into the
//!   immutable [`FrozenRequest`] a [`Transport`] receives.
//! - [`HeaderSet`] wraps `http::HeaderMap` with typed setters.
//! - [`ResponseResult`] holds status, headers and body and decodes on demand.
//! - [`Transport`] is the only I/O boundary. [`MockTransport`] records what it
//!   is sent, for tests.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod http;
pub mod prelude;
pub mod transport;

pub use config::ClientConfig;
pub use error::{Error, HttpError, Result};
pub use crate::http::{
    AcceptValue, BaseUrl, ContentType, FrozenRequest, HeaderSet, RawResponse, RequestBody,
    RequestSpec, ResponseResult,
};
pub use transport::{MockTransport, Transport};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
pub use url::Url;
