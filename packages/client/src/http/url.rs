//! Target resolution: base URL joining, `{variable}` expansion and query pairs.

use url::Url;

use crate::error::{self, Result};

/// Base URL that relative targets are appended to.
///
/// An empty base means every target must be absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUrl {
    url: Option<Url>,
}

impl BaseUrl {
    /// Parse a base URL; the empty string yields an empty base.
    ///
    /// # Errors
    ///
    /// Returns a builder error when `base` is not an absolute http(s) URL, or
    /// has a query or fragment that targets would be appended after.
    pub fn parse(base: &str) -> Result<Self> {
        let base = base.trim();
        if base.is_empty() {
            return Ok(BaseUrl::default());
        }
        let url = Url::parse(base).map_err(error::builder)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(error::builder(format!(
                "base url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(error::builder(format!(
                "base url '{base}' must not carry a query or fragment"
            )));
        }
        Ok(BaseUrl { url: Some(url) })
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
    }

    /// Turn an expanded target into the URL that will be sent.
    ///
    /// Absolute targets are used as they are. Anything else is appended to
    /// the base with exactly one `/` between them.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        let target = target.trim();
        if target.is_empty() {
            return Err(error::missing_target());
        }

        if is_absolute(target) {
            return Url::parse(target).map_err(error::invalid_request);
        }

        let Some(base) = &self.url else {
            return Err(error::invalid_request(format!(
                "relative target '{target}' needs a base url"
            )));
        };

        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            target.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(error::invalid_request)
    }
}

fn is_absolute(target: &str) -> bool {
    target.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Replace every `{name}` in `template`.
///
/// Named values are tried first; a placeholder with no named value takes the
/// next positional value. Values are percent-encoded as a single path segment.
///
/// # Errors
///
/// An unterminated `{` or a placeholder left without a value is an invalid request.
pub fn expand_template(
    template: &str,
    named: &hashbrown::HashMap<String, String>,
    positional: &[String],
) -> Result<String> {
    let mut expanded = String::with_capacity(template.len());
    let mut positional = positional.iter();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(error::invalid_request(format!(
                "unterminated variable in target '{template}'"
            )));
        };
        let name = &after[..close];
        let value = named
            .get(name)
            .or_else(|| positional.next())
            .ok_or_else(|| {
                error::invalid_request(format!(
                    "no value for variable '{{{name}}}' in target '{template}'"
                ))
            })?;
        expanded.push_str(&urlencoding::encode(value));
        rest = &after[close + 1..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Append `pairs` to the query of `url`, keeping any query already there.
pub fn append_query(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (name, value) in pairs {
        query.append_pair(name, value);
    }
}
