//! Point of entry of the fluent API
//!
//! [`HttpMethodBuilder`] holds the base URL and transport and starts one chain
//! per call. It keeps no per-request state, so one instance can start any
//! number of independent chains.

use std::fmt;
use std::sync::Arc;

use restchain_client::config::Validator;
use restchain_client::{BaseUrl, ClientConfig, HeaderSet, RequestSpec, Result, Transport};
use url::Url;

use crate::builder::core::{Delete, Exchange, Get, Head, HttpVerb, Options, Post, Put, Request};

/// Starts a chain for each HTTP verb.
///
/// ```
/// use restchain::prelude::*;
///
/// let transport = std::sync::Arc::new(MockTransport::new().reply(RawResponse::json(
///     StatusCode::OK,
///     r#"{"id":42}"#,
/// )));
/// let methods = HttpMethodBuilder::new("http://users.svc", transport.clone()).unwrap();
///
/// let user: serde_json::Value = methods
///     .get()
///     .with_target("/users/{id}")
///     .with_variable("id", 42)
///     .an_object()
///     .unwrap();
///
/// assert_eq!(user["id"], 42);
/// assert_eq!(transport.last_request().unwrap().url().as_str(), "http://users.svc/users/42");
/// ```
#[derive(Clone)]
pub struct HttpMethodBuilder {
    base_url: BaseUrl,
    transport: Arc<dyn Transport>,
    default_headers: HeaderSet,
    debug_enabled: bool,
}

impl HttpMethodBuilder {
    /// Entry point sending relative targets to `base_url`.
    ///
    /// Pass `""` to require absolute targets.
    ///
    /// # Errors
    ///
    /// Returns a builder error when `base_url` is neither empty nor an
    /// absolute http(s) URL.
    pub fn new<T: Transport + 'static>(base_url: &str, transport: T) -> Result<Self> {
        Ok(HttpMethodBuilder {
            base_url: BaseUrl::parse(base_url)?,
            transport: Arc::new(transport),
            default_headers: HeaderSet::new(),
            debug_enabled: false,
        })
    }

    /// Entry point for absolute targets only.
    #[must_use]
    pub fn without_base_url<T: Transport + 'static>(transport: T) -> Self {
        HttpMethodBuilder {
            base_url: BaseUrl::default(),
            transport: Arc::new(transport),
            default_headers: HeaderSet::new(),
            debug_enabled: false,
        }
    }

    /// Entry point built from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a builder error when the configuration does not validate.
    pub fn from_config<T: Transport + 'static>(config: &ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(HttpMethodBuilder {
            base_url: config.base()?,
            transport: Arc::new(transport),
            default_headers: config.header_set()?,
            debug_enabled: config.debug,
        })
    }

    /// Log each chain's request line, body size and status at debug level.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_url()
    }

    #[must_use]
    pub fn delete(&self) -> Request<Delete> {
        self.start()
    }

    #[must_use]
    pub fn get(&self) -> Request<Get> {
        self.start()
    }

    #[must_use]
    pub fn head(&self) -> Request<Head> {
        self.start()
    }

    #[must_use]
    pub fn options(&self) -> Request<Options> {
        self.start()
    }

    #[must_use]
    pub fn post(&self) -> Request<Post> {
        self.start()
    }

    #[must_use]
    pub fn put(&self) -> Request<Put> {
        self.start()
    }

    fn start<V: HttpVerb>(&self) -> Request<V> {
        let spec = RequestSpec::with_headers(V::method(), self.default_headers.clone());
        Request::new(Exchange::new(
            spec,
            self.base_url.clone(),
            Arc::clone(&self.transport),
            self.debug_enabled,
        ))
    }
}

impl fmt::Debug for HttpMethodBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMethodBuilder")
            .field("base_url", &self.base_url.as_url().map(Url::as_str))
            .field("default_headers", &self.default_headers)
            .field("debug_enabled", &self.debug_enabled)
            .finish_non_exhaustive()
    }
}
