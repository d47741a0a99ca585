//! Header stage
//!
//! Entered from any stage that can execute. Every setter writes straight into
//! the chain's request spec, so there is one copy of the headers and the stage
//! never has to be synchronized with anything. `and_execute_for()` hands back
//! the exact stage the header stage was entered from.

use std::time::SystemTime;

use http::HeaderMap;
use restchain_client::{AcceptValue, ContentType, HeaderSet, Result};
use url::Url;

use crate::builder::response::{ResponseReceiving, ResponseStage};

/// Accumulates headers for the chain owned by `P`.
#[derive(Debug)]
pub struct HeaderStage<P> {
    parent: P,
}

impl<P: ResponseReceiving> HeaderStage<P> {
    pub(crate) fn new(parent: P) -> Self {
        HeaderStage { parent }
    }

    /// Run `f` against the spec's headers, recording a failure for `execute()`.
    pub(crate) fn apply<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut HeaderSet) -> Result<()>,
    {
        let spec = self.parent.exchange_mut().spec_mut();
        if let Err(err) = f(spec.headers_mut()) {
            spec.record_error(err);
        }
        self
    }

    /// Set `Accept` to one or more media ranges.
    ///
    /// ```
    /// use restchain::prelude::*;
    ///
    /// let transport = std::sync::Arc::new(MockTransport::new());
    /// let methods = HttpMethodBuilder::new("http://svc.test", transport.clone()).unwrap();
    /// methods
    ///     .get()
    ///     .with_target("/users")
    ///     .with_headers()
    ///     .accept([ContentType::ApplicationJson, ContentType::ApplicationXml])
    ///     .and_execute_for()
    ///     .ignoring_response()
    ///     .unwrap();
    ///
    /// let sent = transport.last_request().unwrap();
    /// assert_eq!(sent.headers()["accept"], "application/json, application/xml");
    /// ```
    #[must_use]
    pub fn accept<I, A>(self, media_types: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AcceptValue>,
    {
        self.apply(|h| h.set_accept(media_types))
    }

    #[must_use]
    pub fn content_type(self, content_type: ContentType) -> Self {
        self.apply(|h| {
            h.set_content_type(content_type);
            Ok(())
        })
    }

    /// Set `Content-Type` from a raw string.
    ///
    /// The chain is committed to sending from here: `and_execute_for()` returns
    /// a [`ResponseStage`] instead of the stage this header stage came from.
    #[must_use]
    pub fn content_type_str(self, content_type: &str) -> HeaderStage<ResponseStage<P::Verb>> {
        let stage = self.apply(|h| h.set_content_type_str(content_type));
        HeaderStage::new(stage.parent.receive())
    }

    #[must_use]
    pub fn content_type_json(self) -> Self {
        self.content_type(ContentType::ApplicationJson)
    }

    #[must_use]
    pub fn content_type_xml(self) -> Self {
        self.content_type(ContentType::ApplicationXml)
    }

    #[must_use]
    pub fn cache_control(self, directive: &str) -> Self {
        self.apply(|h| h.set_cache_control(directive))
    }

    /// `Cache-Control: max-age=<seconds>`
    #[must_use]
    pub fn max_age(self, seconds: u64) -> Self {
        self.cache_control(&format!("max-age={seconds}"))
    }

    #[must_use]
    pub fn expires(self, expires: SystemTime) -> Self {
        self.apply(|h| h.set_expires(expires))
    }

    #[must_use]
    pub fn last_modified(self, last_modified: SystemTime) -> Self {
        self.apply(|h| h.set_last_modified(last_modified))
    }

    #[must_use]
    pub fn location(self, location: &Url) -> Self {
        self.apply(|h| h.set_location(location))
    }

    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        self.apply(|h| h.set_user_agent(user_agent))
    }

    /// Add a header value, keeping any values already set under `name`.
    #[must_use]
    pub fn header(self, name: &str, value: &str) -> Self {
        self.apply(|h| h.append(name, value))
    }

    /// Overwrite each given header; headers not mentioned are left alone.
    #[must_use]
    pub fn headers<I, K, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.apply(|h| h.set_all(values))
    }

    /// Replace every header set so far with `headers`.
    #[must_use]
    pub fn header_map(self, headers: HeaderMap) -> Self {
        self.apply(|h| {
            h.replace_all(headers);
            Ok(())
        })
    }

    /// Headers accumulated so far, defaults included.
    #[must_use]
    pub fn current(&self) -> &HeaderSet {
        self.parent.exchange().spec().headers()
    }

    /// Leave the header stage, returning to the stage it was entered from.
    #[must_use]
    pub fn and_execute_for(self) -> P {
        self.parent
    }
}
