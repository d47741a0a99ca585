//! Authentication headers for the header stage

use crate::builder::headers::HeaderStage;
use crate::builder::response::ResponseReceiving;

impl<P: ResponseReceiving> HeaderStage<P> {
    /// Set basic authentication header
    ///
    /// The credentials are base64 encoded as required by RFC 7617.
    #[must_use]
    pub fn basic_auth(self, user: &str, password: Option<&str>) -> Self {
        self.apply(|h| h.set_basic_auth(user, password))
    }

    /// Set bearer token authentication header
    #[must_use]
    pub fn bearer_auth(self, token: &str) -> Self {
        self.apply(|h| h.set_bearer_auth(token))
    }
}
