//! Request body stage
//!
//! Only verbs implementing [`CarriesBody`] get these methods, and only before
//! a body has been set. Setting one moves the chain to `Request<V, BodySet>`,
//! which can still take headers or execute but cannot take a second body.
//!
//! ```compile_fail,E0599
//! use restchain::prelude::*;
//!
//! let methods = HttpMethodBuilder::new("http://svc.test", MockTransport::new()).unwrap();
//! let _ = methods.get().with_target("/users").with_body(&"payload");
//! ```
//!
//! ```compile_fail,E0599
//! use restchain::prelude::*;
//!
//! let methods = HttpMethodBuilder::new("http://svc.test", MockTransport::new()).unwrap();
//! let _ = methods.options().with_target("/users").with_text_body("payload");
//! ```
//!
//! ```compile_fail,E0599
//! use restchain::prelude::*;
//!
//! let methods = HttpMethodBuilder::new("http://svc.test", MockTransport::new()).unwrap();
//! let _ = methods
//!     .post()
//!     .with_target("/users")
//!     .with_text_body("one")
//!     .with_text_body("two");
//! ```

use bytes::Bytes;
use restchain_client::{ContentType, RequestBody, Result};
use serde::Serialize;

use crate::builder::core::{BodyNotSet, BodySet, CarriesBody, Request};

impl<V: CarriesBody> Request<V, BodyNotSet> {
    /// Set the request body with automatic serialization
    ///
    /// Sent form-urlencoded when the chain's final `Content-Type` is
    /// `application/x-www-form-urlencoded`, as JSON otherwise; the header may
    /// be set before or after the body. A value that fails to serialize is
    /// reported by `execute()`.
    ///
    /// ```
    /// use restchain::prelude::*;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct NewUser {
    ///     name: String,
    /// }
    ///
    /// let transport = std::sync::Arc::new(MockTransport::new());
    /// let methods = HttpMethodBuilder::new("http://svc.test", transport.clone()).unwrap();
    /// methods
    ///     .post()
    ///     .with_target("/users")
    ///     .with_body(&NewUser { name: "ada".into() })
    ///     .ignoring_response()
    ///     .unwrap();
    ///
    /// let sent = transport.last_request().unwrap();
    /// assert_eq!(sent.body().unwrap().as_ref(), br#"{"name":"ada"}"#);
    /// assert_eq!(sent.headers()["content-type"], "application/json");
    /// ```
    #[must_use]
    pub fn with_body<T: Serialize + ?Sized>(self, body: &T) -> Request<V, BodySet> {
        self.set_body(RequestBody::object(body))
    }

    /// Set the body as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn with_form_body<T: Serialize + ?Sized>(self, body: &T) -> Request<V, BodySet> {
        self.set_body(RequestBody::form(body))
    }

    /// Set raw bytes as request body
    ///
    /// No content type is implied; set one on the header stage if needed.
    #[must_use]
    pub fn with_raw_body(self, bytes: impl Into<Bytes>) -> Request<V, BodySet> {
        self.set_body(Ok(RequestBody::raw(bytes)))
    }

    /// Set text content as request body
    ///
    /// Sent as `text/plain` unless a content type was set explicitly.
    #[must_use]
    pub fn with_text_body(self, text: impl Into<String>) -> Request<V, BodySet> {
        self.set_body(Ok(RequestBody::text(text)))
    }

    fn set_body(mut self, body: Result<RequestBody>) -> Request<V, BodySet> {
        let debug_enabled = self.exchange.debug_enabled();
        let spec = self.exchange.spec_mut();
        match body {
            Ok(body) => {
                if debug_enabled {
                    log::debug!(
                        "restchain: set request body ({} bytes, content-type: {})",
                        body.len(),
                        body.content_type().map_or("unspecified", ContentType::as_str)
                    );
                }
                spec.set_body(body);
            }
            Err(err) => spec.record_error(err),
        }
        self.transition()
    }
}
