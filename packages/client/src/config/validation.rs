//! Configuration validation

use url::Url;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid default header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found.
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a base URL; empty means "absolute targets only" and is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBaseUrl` if the URL does not parse,
    /// does not use http/https, or carries a query or fragment.
    pub fn validate_base_url(url: &str) -> ConfigResult<()> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let invalid = |reason: String| ConfigurationError::InvalidBaseUrl {
            url: url.to_string(),
            reason,
        };
        let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".to_string()));
        }
        Ok(())
    }

    /// Validate one header name/value pair.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidHeader` if either half is not
    /// acceptable to `http`.
    pub fn validate_header(name: &str, value: &str) -> ConfigResult<()> {
        let invalid = |reason: String| ConfigurationError::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        http::HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        http::HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}
