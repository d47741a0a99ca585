use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for an unusable entry point or configuration.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a request that must not reach the transport.
pub fn invalid_request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidRequest).with(e.into())
}

/// Wraps an error raised by a transport implementation.
pub fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Transport).with(e.into())
}

/// Creates an `Error` for a decode error.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

pub fn status_code(url: url::Url, status: http::StatusCode) -> Error {
    Error::new(Kind::Status(status)).with_url(url)
}

pub fn missing_target() -> Error {
    invalid_request("missing target")
}

pub fn invalid_header<E: Into<BoxError>>(e: E) -> Error {
    invalid_request(e)
}

pub fn serialization_error<E: Into<BoxError>>(e: E) -> Error {
    invalid_request(e)
}
