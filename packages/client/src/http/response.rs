//! Responses: what a transport returns and what a chain hands back.

use std::time::SystemTime;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{self, Result};
use crate::http::http_date::parse_http_date;

/// Status, headers and body exactly as a transport produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// A response carrying `body` with `Content-Type: application/json`.
    #[must_use]
    pub fn json(status: StatusCode, body: impl Into<Bytes>) -> Self {
        RawResponse::new(status)
            .with_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )
            .with_body(body)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl From<http::Response<Bytes>> for RawResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

/// Immutable result of one executed chain.
///
/// Status and headers are always available; decoding the body is attempted
/// only when one of the decoding accessors is called, so a body that does not
/// fit the requested shape never hides the rest of the response.
#[derive(Debug, Clone)]
pub struct ResponseResult {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ResponseResult {
    /// Wrap the transport's answer to the request sent with `method` to `url`.
    #[must_use]
    pub fn new(method: Method, url: Url, raw: RawResponse) -> Self {
        ResponseResult {
            method,
            url,
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
        }
    }

    /// Method of the request this result answers.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL the request was sent to.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    /// First value of header `name` as a string, if present and valid ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(header::CONTENT_TYPE.as_str())
    }

    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// The body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).map_err(|e| self.decode_error(e))
    }

    /// Deserialize the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not JSON shaped like `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| self.decode_error(e))
    }

    /// Deserialize the JSON body without a target type.
    pub fn json_value(&self) -> Result<serde_json::Value> {
        self.json()
    }

    /// The `Location` header, resolved against the request URL when relative.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the header is present but unusable.
    pub fn location(&self) -> Result<Option<Url>> {
        let Some(value) = self.headers.get(header::LOCATION) else {
            return Ok(None);
        };
        let value = value.to_str().map_err(|e| self.decode_error(e))?;
        self.url
            .join(value)
            .map(Some)
            .map_err(|e| self.decode_error(e))
    }

    /// Methods listed in every `Allow` header, in order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns a decode error for a token that is not a valid method.
    pub fn allow(&self) -> Result<Vec<Method>> {
        let mut methods: Vec<Method> = Vec::new();
        for value in self.headers.get_all(header::ALLOW) {
            let value = value.to_str().map_err(|e| self.decode_error(e))?;
            for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let method = Method::from_bytes(token.to_ascii_uppercase().as_bytes())
                    .map_err(|e| self.decode_error(e))?;
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
        }
        Ok(methods)
    }

    /// The `Last-Modified` header, if present and a valid HTTP date.
    #[must_use]
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.header(header::LAST_MODIFIED.as_str())
            .and_then(parse_http_date)
    }

    /// The `Expires` header, if present and a valid HTTP date.
    #[must_use]
    pub fn expires(&self) -> Option<SystemTime> {
        self.header(header::EXPIRES.as_str()).and_then(parse_http_date)
    }

    /// Turn a 4xx or 5xx status into an error, passing anything else through.
    ///
    /// # Errors
    ///
    /// Returns a status error carrying the code and request URL.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(error::status_code(self.url, self.status))
        } else {
            Ok(self)
        }
    }

    fn decode_error<E>(&self, err: E) -> error::Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        error::decode(err).with_url(self.url.clone())
    }
}
