//! Media types understood by the typed header setters.

use std::fmt;

/// Content type enumeration for the typed header setters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/xml content type
    ApplicationXml,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
    /// text/html content type
    TextHtml,
    /// multipart/form-data content type
    MultipartFormData,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationXml => "application/xml",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
            ContentType::MultipartFormData => "multipart/form-data",
        }
    }

    /// Match a header value such as `application/json; charset=utf-8`.
    ///
    /// Parameters are ignored and the comparison is case-insensitive. Unknown
    /// media types yield `None` rather than a guess.
    #[must_use]
    pub fn from_mime(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        [
            ContentType::ApplicationJson,
            ContentType::ApplicationXml,
            ContentType::ApplicationFormUrlEncoded,
            ContentType::ApplicationOctetStream,
            ContentType::TextPlain,
            ContentType::TextHtml,
            ContentType::MultipartFormData,
        ]
        .into_iter()
        .find(|ct| ct.as_str().eq_ignore_ascii_case(essence))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Helper type for accept setters that can handle both strings and `ContentType` enums
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptValue {
    /// String representation of a media range, e.g. `*/*` or `application/vnd.api+json`
    String(String),
    /// ContentType enum variant
    ContentType(ContentType),
}

impl AcceptValue {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            AcceptValue::String(s) => s,
            AcceptValue::ContentType(ct) => ct.as_str(),
        }
    }
}

impl From<&str> for AcceptValue {
    fn from(s: &str) -> Self {
        AcceptValue::String(s.to_string())
    }
}

impl From<String> for AcceptValue {
    fn from(s: String) -> Self {
        AcceptValue::String(s)
    }
}

impl From<ContentType> for AcceptValue {
    fn from(ct: ContentType) -> Self {
        AcceptValue::ContentType(ct)
    }
}
