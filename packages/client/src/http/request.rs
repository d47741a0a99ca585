//! The request accumulated by one fluent chain.
//!
//! [`RequestSpec`] stays mutable while the chain is being built and is turned
//! into a [`FrozenRequest`] by [`RequestSpec::freeze`]. Freezing consumes the
//! spec, so nothing can change a request once it has been handed to a
//! transport.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, header};
use serde::Serialize;
use url::Url;

use crate::error::{self, Error, Result};
use crate::http::content_type::ContentType;
use crate::http::headers::HeaderSet;
use crate::http::url::{BaseUrl, append_query, expand_template};

/// Outgoing payload plus the media type it was encoded as, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    bytes: Bytes,
    content_type: Option<ContentType>,
    /// Form encoding of an [`object`](Self::object) body, sent instead of
    /// `bytes` when the final `Content-Type` is form-urlencoded.
    form: Option<std::result::Result<Bytes, String>>,
}

impl RequestBody {
    /// Serialize `value` as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value).map_err(error::serialization_error)?;
        Ok(RequestBody {
            bytes: Bytes::from(bytes),
            content_type: Some(ContentType::ApplicationJson),
            form: None,
        })
    }

    /// Serialize `value` for whichever encoding the request ends up declaring.
    ///
    /// JSON unless the `Content-Type` at freeze time is
    /// `application/x-www-form-urlencoded`. A form encoding failure is only
    /// reported when the form encoding is the one sent.
    pub fn object<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let mut body = RequestBody::json(value)?;
        body.form = Some(
            serde_urlencoded::to_string(value)
                .map(Bytes::from)
                .map_err(|err| err.to_string()),
        );
        Ok(body)
    }

    /// Serialize `value` as `application/x-www-form-urlencoded`.
    pub fn form<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(value).map_err(error::serialization_error)?;
        Ok(RequestBody {
            bytes: Bytes::from(encoded),
            content_type: Some(ContentType::ApplicationFormUrlEncoded),
            form: None,
        })
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        RequestBody {
            bytes: Bytes::from(text.into()),
            content_type: Some(ContentType::TextPlain),
            form: None,
        }
    }

    /// Bytes sent as-is, with no implied content type.
    #[must_use]
    pub fn raw(bytes: impl Into<Bytes>) -> Self {
        RequestBody {
            bytes: bytes.into(),
            content_type: None,
            form: None,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes and implied media type to send under the declared `Content-Type`.
    fn encode(self, declared: Option<ContentType>) -> Result<(Bytes, Option<ContentType>)> {
        match self.form {
            Some(form) if declared == Some(ContentType::ApplicationFormUrlEncoded) => {
                let bytes = form.map_err(error::serialization_error)?;
                Ok((bytes, declared))
            }
            _ => Ok((self.bytes, self.content_type)),
        }
    }
}

/// Mutable accumulator for one in-flight request.
#[derive(Debug)]
pub struct RequestSpec {
    method: Method,
    target: Option<String>,
    named: hashbrown::HashMap<String, String>,
    positional: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderSet,
    body: Option<RequestBody>,
    /// First error hit while building; reported when the spec is frozen.
    error: Option<Error>,
}

impl RequestSpec {
    #[must_use]
    pub fn new(method: Method) -> Self {
        RequestSpec::with_headers(method, HeaderSet::new())
    }

    /// Start a spec whose headers are seeded with `defaults`.
    #[must_use]
    pub fn with_headers(method: Method, defaults: HeaderSet) -> Self {
        RequestSpec {
            method,
            target: None,
            named: hashbrown::HashMap::new(),
            positional: Vec::new(),
            query: Vec::new(),
            headers: defaults,
            body: None,
            error: None,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.named.insert(name.into(), value.into());
    }

    pub fn push_variable(&mut self, value: impl Into<String>) {
        self.positional.push(value.into());
    }

    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderSet {
        &mut self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Store the payload, replacing any earlier one.
    pub fn set_body(&mut self, body: RequestBody) {
        self.body = Some(body);
    }

    /// Remember a build-time failure. Only the first one is kept.
    pub fn record_error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Validate the spec and produce the request a transport will see.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error, before anything is sent, when a
    /// build-time error was recorded, the target is missing or blank, a
    /// template variable has no value, the resolved URL does not parse, or
    /// the body cannot be encoded as the declared `Content-Type`.
    pub fn freeze(self, base_url: &BaseUrl) -> Result<FrozenRequest> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let target = match self.target.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => target,
            _ => return Err(error::missing_target()),
        };

        let expanded = expand_template(target, &self.named, &self.positional)?;
        let mut url = base_url.resolve(&expanded)?;
        append_query(&mut url, &self.query);

        let mut headers = self.headers.into_map();
        let body = match self.body {
            Some(body) => {
                let declared = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .and_then(ContentType::from_mime);
                let (bytes, implied) = body.encode(declared)?;
                if let Some(content_type) = implied {
                    headers
                        .entry(header::CONTENT_TYPE)
                        .or_insert_with(|| HeaderValue::from_static(content_type.as_str()));
                }
                Some(bytes)
            }
            None => None,
        };

        Ok(FrozenRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

/// Immutable request handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl FrozenRequest {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
