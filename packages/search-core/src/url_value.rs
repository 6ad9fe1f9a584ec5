//! `Url` value object: validated http(s) URLs.

use crate::errors::ValidationError;

/// A validated `http(s)://host/path` URL. Equality is by original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlValue {
    original: String,
    scheme: String,
    host: String,
    path: String,
}

impl UrlValue {
    /// Parses `^(https?)://([^/]+)(/.*)?$`, defaulting an absent path to
    /// `/`.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let (scheme, rest) = if let Some(rest) = url.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            ("http", rest)
        } else {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        };

        if rest.is_empty() {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }

        let (host, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        if host.is_empty() {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            original: url.to_string(),
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for UrlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scheme_host_and_path() {
        let u = UrlValue::parse("https://example.com/a/b").unwrap();
        assert_eq!(u.scheme(), "https");
        assert_eq!(u.host(), "example.com");
        assert_eq!(u.path(), "/a/b");
    }

    #[test]
    fn defaults_missing_path_to_root() {
        let u = UrlValue::parse("http://example.com").unwrap();
        assert_eq!(u.path(), "/");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(UrlValue::parse("ftp://example.com").is_err());
        assert!(UrlValue::parse("not a url").is_err());
    }

    #[test]
    fn equality_is_by_original_string() {
        let a = UrlValue::parse("https://example.com").unwrap();
        let b = UrlValue::parse("https://example.com").unwrap();
        assert_eq!(a, b);
    }
}
