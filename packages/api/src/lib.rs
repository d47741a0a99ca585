//! Fluent, type-checked HTTP request chains
//!
//! A chain starts at [`HttpMethodBuilder`], picks a verb, names a target,
//! optionally sets headers and a body, and ends in a terminal operation that
//! sends the request through a [`Transport`](restchain_client::Transport).
//! Sequences that make no sense, such as a body on a GET or a second body on
//! a POST, are rejected by the compiler.
//!
//! ```
//! use restchain::prelude::*;
//!
//! let transport = std::sync::Arc::new(
//!     MockTransport::new().reply(RawResponse::new(StatusCode::CREATED).with_header(
//!         HeaderName::from_static("location"),
//!         HeaderValue::from_static("/users/7"),
//!     )),
//! );
//! let methods = HttpMethodBuilder::new("http://users.svc", transport.clone()).unwrap();
//!
//! let created = methods
//!     .post()
//!     .with_target("/users")
//!     .with_headers()
//!     .accept([ContentType::ApplicationJson])
//!     .and_execute_for()
//!     .with_body(&serde_json::json!({ "name": "ada" }))
//!     .for_location()
//!     .unwrap();
//!
//! assert_eq!(created.as_str(), "http://users.svc/users/7");
//! assert_eq!(transport.calls(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod builder;
pub mod prelude;

pub use builder::*;

pub use restchain_client::{
    ContentType, Error, HttpError, MockTransport, RawResponse, ResponseResult, Result, Transport,
};
