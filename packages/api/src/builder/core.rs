//! Core type-state machinery shared by every verb
//!
//! A chain is a value that moves from stage to stage. Each stage type only
//! has the methods that are legal at that point, so an illegal sequence such
//! as putting a body on a HEAD request does not compile:
//!
//! ```compile_fail,E0599
//! use restchain::prelude::*;
//!
//! let methods = HttpMethodBuilder::new("http://svc.test", MockTransport::new()).unwrap();
//! let _ = methods.head().with_target("/ping").with_body(&"payload");
//! ```
//!
//! ```text
//!  HttpMethodBuilder ──get()/post()/…──▶ Request<V, BodyNotSet>
//!                                          │  ▲        │
//!                          with_headers()  │  │        │ with_body()  (POST, PUT)
//!                                          ▼  │        ▼
//!                          HeaderStage<P> ─and_execute_for()─▶ Request<V, BodySet>
//!                                          │
//!                    content_type_str()    │      receive()
//!                                          ▼         │
//!                          HeaderStage<ResponseStage<V>> ◀──┘
//!                                          │
//!                                  execute()/an_object()/…
//!                                          ▼
//!                                    ResponseResult
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use http::Method;
use restchain_client::transport::{self, Transport};
use restchain_client::{BaseUrl, RequestSpec, ResponseResult, Result};
use url::Url;

use crate::builder::headers::HeaderStage;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// An HTTP method usable as a chain's type parameter.
pub trait HttpVerb: sealed::Sealed {
    fn method() -> Method;
}

/// Verbs whose request may carry a body.
pub trait CarriesBody: HttpVerb {}

/// Verbs whose response body is worth decoding.
pub trait ReturnsBody: HttpVerb {}

macro_rules! verb {
    ($(#[$meta:meta])* $name:ident => $method:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(());

        impl sealed::Sealed for $name {}

        impl HttpVerb for $name {
            fn method() -> Method {
                Method::$method
            }
        }
    };
}

verb!(
    /// GET: no request body.
    Get => GET
);
verb!(
    /// POST: may carry a body; `for_location()` reads the created resource's URL.
    Post => POST
);
verb!(
    /// PUT: may carry a body.
    Put => PUT
);
verb!(
    /// DELETE: no request body.
    Delete => DELETE
);
verb!(
    /// HEAD: no request body and no response body; `headers_only()` returns the headers.
    Head => HEAD
);
verb!(
    /// OPTIONS: no request body; `allow()` reads the permitted methods.
    Options => OPTIONS
);

impl CarriesBody for Post {}
impl CarriesBody for Put {}

impl ReturnsBody for Get {}
impl ReturnsBody for Post {}
impl ReturnsBody for Put {}
impl ReturnsBody for Delete {}
impl ReturnsBody for Options {}

/// State marker indicating no body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodyNotSet;

/// State marker indicating a body has been set
#[derive(Debug, Clone, Copy)]
pub struct BodySet;

/// The request under construction plus everything needed to send it.
///
/// Exactly one stage owns it at any time; moving to the next stage moves it.
pub struct Exchange {
    spec: RequestSpec,
    base_url: BaseUrl,
    transport: Arc<dyn Transport>,
    debug_enabled: bool,
}

impl Exchange {
    pub(crate) fn new(
        spec: RequestSpec,
        base_url: BaseUrl,
        transport: Arc<dyn Transport>,
        debug_enabled: bool,
    ) -> Self {
        Exchange {
            spec,
            base_url,
            transport,
            debug_enabled,
        }
    }

    pub(crate) fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub(crate) fn spec_mut(&mut self) -> &mut RequestSpec {
        &mut self.spec
    }

    pub(crate) fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// Freeze the spec and send it.
    ///
    /// Validation happens first, so an invalid spec never reaches the transport.
    pub(crate) fn run(self) -> Result<ResponseResult> {
        let request = self.spec.freeze(&self.base_url)?;

        if self.debug_enabled {
            log::debug!("restchain: {} {}", request.method(), request.url());
            if let Some(body) = request.body() {
                log::debug!("restchain: request body size: {} bytes", body.len());
            }
        }

        let response = transport::dispatch(self.transport.as_ref(), request)?;

        if self.debug_enabled {
            log::debug!(
                "restchain: {} {} -> {}",
                response.method(),
                response.url(),
                response.status()
            );
        }

        Ok(response)
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("spec", &self.spec)
            .field("base_url", &self.base_url.as_url().map(Url::as_str))
            .field("debug_enabled", &self.debug_enabled)
            .finish_non_exhaustive()
    }
}

/// Verb builder: the start of a chain for verb `V`.
///
/// `B` records whether a body has been set; only [`CarriesBody`] verbs ever
/// reach [`BodySet`].
pub struct Request<V, B = BodyNotSet> {
    pub(crate) exchange: Exchange,
    _state: PhantomData<(V, B)>,
}

impl<V: HttpVerb> Request<V, BodyNotSet> {
    pub(crate) fn new(exchange: Exchange) -> Self {
        Request {
            exchange,
            _state: PhantomData,
        }
    }
}

impl<V: HttpVerb, B> Request<V, B> {
    /// Set the target: a path appended to the base URL, or an absolute URL.
    ///
    /// `{name}` placeholders are filled from [`with_variable`](Self::with_variable)
    /// and [`with_variables`](Self::with_variables) when the chain executes.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.exchange.spec_mut().set_target(target);
        self
    }

    /// Target an already parsed absolute URL.
    #[must_use]
    pub fn on_url(self, url: &Url) -> Self {
        self.with_target(url.as_str())
    }

    /// Value for the `{name}` placeholder in the target.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.exchange
            .spec_mut()
            .set_variable(name, value.to_string());
        self
    }

    /// Values for placeholders without a named value, in order of appearance.
    #[must_use]
    pub fn with_variables<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self.exchange.spec_mut().push_variable(value.to_string());
        }
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.exchange.spec_mut().add_query(name, value.to_string());
        self
    }

    /// Enter the header stage; `and_execute_for()` comes back here.
    #[must_use]
    pub fn with_headers(self) -> HeaderStage<Self> {
        HeaderStage::new(self)
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        self.exchange.spec().method()
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.exchange.spec().target()
    }

    pub(crate) fn transition<B2>(self) -> Request<V, B2> {
        Request {
            exchange: self.exchange,
            _state: PhantomData,
        }
    }
}

impl<V, B> sealed::Sealed for Request<V, B> {}

impl<V, B> fmt::Debug for Request<V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("exchange", &self.exchange)
            .field("state", &std::any::type_name::<B>())
            .finish()
    }
}
