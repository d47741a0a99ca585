//! Request header accumulation over `http::HeaderMap`.
//!
//! Typed setters overwrite whatever was stored under their header name,
//! [`HeaderSet::append`] keeps earlier values so a name can carry several.
//! Names are compared case-insensitively because `HeaderMap` normalizes them.

use std::time::SystemTime;

use base64::{Engine as _, engine::general_purpose};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{self, Result};
use crate::http::content_type::{AcceptValue, ContentType};
use crate::http::http_date::format_http_date;

/// Headers of one in-flight request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSet {
    headers: HeaderMap,
}

impl HeaderSet {
    #[must_use]
    pub fn new() -> Self {
        HeaderSet {
            headers: HeaderMap::new(),
        }
    }

    #[must_use]
    pub fn from_map(headers: HeaderMap) -> Self {
        HeaderSet { headers }
    }

    #[must_use]
    pub fn as_map(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn into_map(self) -> HeaderMap {
        self.headers
    }

    /// First value stored for `name`, if it is valid visible ASCII.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value stored for `name`, in insertion order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Number of stored values, counting each value of a multi-valued header.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Overwrite `name` with a single already-validated value.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Overwrite `name` with a single value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let (name, value) = parse_pair(name, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Add a value for `name`, keeping the ones already there.
    pub fn append(&mut self, name: &str, value: &str) -> Result<()> {
        let (name, value) = parse_pair(name, value)?;
        self.headers.append(name, value);
        Ok(())
    }

    /// Overwrite each given name with its value; names not mentioned are kept.
    ///
    /// Every pair is validated before anything is written, so a bad pair
    /// leaves the set untouched.
    pub fn set_all<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = values
            .into_iter()
            .map(|(k, v)| parse_pair(k.as_ref(), v.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for (name, value) in parsed {
            self.headers.insert(name, value);
        }
        Ok(())
    }

    /// Replace the whole set.
    pub fn replace_all(&mut self, headers: HeaderMap) {
        self.headers = headers;
    }

    /// Set `Accept` to the given media ranges, comma separated.
    ///
    /// No media ranges removes `Accept`.
    pub fn set_accept<I, A>(&mut self, media_types: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<AcceptValue>,
    {
        let joined = media_types
            .into_iter()
            .map(|a| Into::<AcceptValue>::into(a).as_str().to_owned())
            .collect::<Vec<_>>()
            .join(", ");
        if joined.is_empty() {
            self.headers.remove(header::ACCEPT);
            return Ok(());
        }
        let value = HeaderValue::from_str(&joined).map_err(error::invalid_header)?;
        self.headers.insert(header::ACCEPT, value);
        Ok(())
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type.as_str()),
        );
    }

    /// Set `Content-Type` from a raw string such as `application/json; charset=utf-8`.
    pub fn set_content_type_str(&mut self, content_type: &str) -> Result<()> {
        let value = HeaderValue::from_str(content_type).map_err(error::invalid_header)?;
        self.headers.insert(header::CONTENT_TYPE, value);
        Ok(())
    }

    pub fn set_cache_control(&mut self, directive: &str) -> Result<()> {
        let value = HeaderValue::from_str(directive).map_err(error::invalid_header)?;
        self.headers.insert(header::CACHE_CONTROL, value);
        Ok(())
    }

    pub fn set_expires(&mut self, expires: SystemTime) -> Result<()> {
        self.set_date(header::EXPIRES, expires)
    }

    pub fn set_last_modified(&mut self, last_modified: SystemTime) -> Result<()> {
        self.set_date(header::LAST_MODIFIED, last_modified)
    }

    pub fn set_location(&mut self, location: &Url) -> Result<()> {
        let value = HeaderValue::from_str(location.as_str()).map_err(error::invalid_header)?;
        self.headers.insert(header::LOCATION, value);
        Ok(())
    }

    pub fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        let value = HeaderValue::from_str(user_agent).map_err(error::invalid_header)?;
        self.headers.insert(header::USER_AGENT, value);
        Ok(())
    }

    /// Sets basic authentication.
    pub fn set_basic_auth(&mut self, user: &str, pass: Option<&str>) -> Result<()> {
        let credentials = format!("{}:{}", user, pass.unwrap_or_default());
        let encoded = general_purpose::STANDARD.encode(credentials);
        self.set_authorization(&format!("Basic {encoded}"))
    }

    /// Sets the Authorization header with a bearer token.
    pub fn set_bearer_auth(&mut self, token: &str) -> Result<()> {
        self.set_authorization(&format!("Bearer {token}"))
    }

    fn set_authorization(&mut self, credentials: &str) -> Result<()> {
        let mut value = HeaderValue::from_str(credentials).map_err(error::invalid_header)?;
        value.set_sensitive(true);
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(())
    }

    fn set_date(&mut self, name: HeaderName, time: SystemTime) -> Result<()> {
        let formatted = format_http_date(time)
            .ok_or_else(|| error::invalid_header(format!("{name}: date out of HTTP-date range")))?;
        let value = HeaderValue::try_from(formatted).map_err(error::invalid_header)?;
        self.headers.insert(name, value);
        Ok(())
    }
}

impl From<HeaderMap> for HeaderSet {
    fn from(headers: HeaderMap) -> Self {
        HeaderSet::from_map(headers)
    }
}

fn parse_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(error::invalid_header)?;
    let value = HeaderValue::from_str(value).map_err(error::invalid_header)?;
    Ok((name, value))
}
