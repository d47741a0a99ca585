//! Settings shared by every chain started from one entry point.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};
use crate::error::{self, Result};
use crate::http::headers::HeaderSet;
use crate::http::url::BaseUrl;

/// Entry point settings.
///
/// Deserializable so it can sit inside whatever configuration file the
/// application already loads.
///
/// ```
/// use restchain_client::config::{ClientConfig, Validator};
///
/// let config: ClientConfig = serde_json::from_str(
///     r#"{"base_url": "http://users.svc", "default_headers": {"x-team": "core"}}"#,
/// ).unwrap();
/// assert!(config.validate().is_ok());
/// assert!(!config.debug);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for relative targets; empty means every target is absolute.
    pub base_url: String,
    /// Headers every new request starts with.
    pub default_headers: HashMap<String, String>,
    /// Log each chain's request line and status through the `log` facade.
    pub debug: bool,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        }
    }

    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns a builder error when the configured URL is unusable.
    pub fn base(&self) -> Result<BaseUrl> {
        BaseUrl::parse(&self.base_url)
    }

    /// The default headers as a [`HeaderSet`].
    ///
    /// # Errors
    ///
    /// Returns a builder error for an invalid header name or value.
    pub fn header_set(&self) -> Result<HeaderSet> {
        let mut headers = HeaderSet::new();
        headers
            .set_all(&self.default_headers)
            .map_err(error::builder)?;
        Ok(headers)
    }
}

impl Validator for ClientConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_base_url(&self.base_url)?;
        for (name, value) in &self.default_headers {
            ConfigValidator::validate_header(name, value)?;
        }
        Ok(())
    }
}

impl From<ConfigurationError> for error::Error {
    fn from(err: ConfigurationError) -> Self {
        error::builder(err)
    }
}
