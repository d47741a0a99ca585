//! Types most code touching the client crate needs.

pub use crate::config::{ClientConfig, Validator};
pub use crate::error::{Error, Result};
pub use crate::http::{
    AcceptValue, BaseUrl, ContentType, FrozenRequest, HeaderSet, RawResponse, RequestBody,
    RequestSpec, ResponseResult,
};
pub use crate::transport::{MockTransport, Transport};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
pub use url::Url;
