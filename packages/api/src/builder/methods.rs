//! Terminal operations that exist for a single verb only

use http::{HeaderMap, Method};
use restchain_client::{Result, error};
use url::Url;

use crate::builder::core::{Head, Options, Post};
use crate::builder::response::ResponseReceiving;

/// POST chains can ask for the URL of the resource they created.
pub trait LocationReceiving: ResponseReceiving<Verb = Post> {
    /// Execute and return the response's `Location` header.
    ///
    /// # Errors
    ///
    /// As [`ResponseReceiving::execute`], plus a decode error when the
    /// response has no usable `Location` header.
    fn for_location(self) -> Result<Url> {
        let response = self.execute()?;
        response.location()?.ok_or_else(|| {
            error::decode("response has no Location header").with_url(response.url().clone())
        })
    }
}

impl<S> LocationReceiving for S where S: ResponseReceiving<Verb = Post> {}

/// HEAD chains return headers only.
pub trait HeadersReceiving: ResponseReceiving<Verb = Head> {
    /// Execute and return the response headers.
    fn headers_only(self) -> Result<HeaderMap> {
        self.execute().map(restchain_client::ResponseResult::into_headers)
    }
}

impl<S> HeadersReceiving for S where S: ResponseReceiving<Verb = Head> {}

/// OPTIONS chains can read which methods the target supports.
pub trait AllowReceiving: ResponseReceiving<Verb = Options> {
    /// Execute and return the methods listed in the `Allow` header.
    ///
    /// A response without `Allow` yields an empty list.
    fn allow(self) -> Result<Vec<Method>> {
        self.execute()?.allow()
    }
}

impl<S> AllowReceiving for S where S: ResponseReceiving<Verb = Options> {}
