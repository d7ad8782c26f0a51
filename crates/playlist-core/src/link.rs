//! # Web URLs
//!
//! URL-typed fields keep the exact text of the data file. The text is
//! checked with the WHATWG parser in the `url` crate when the value is
//! built, and written back unchanged on serialization.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PlaylistError;

/// An absolute URL that remembers its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl {
    raw: String,
    parsed: Url,
}

impl WebUrl {
    /// Parse `raw`, keeping it verbatim.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlaylistError> {
        Self::for_field("url", raw)
    }

    /// Parse `raw`, naming `field` in the error on failure.
    pub fn for_field(field: &'static str, raw: impl Into<String>) -> Result<Self, PlaylistError> {
        let raw = raw.into();
        let parsed = Url::parse(&raw).map_err(|e| PlaylistError::InvalidUrl {
            field,
            reason: e.to_string(),
        })?;
        Ok(Self { raw, parsed })
    }

    /// Whether `raw` would be accepted by [`WebUrl::new`].
    pub fn is_valid(raw: &str) -> bool {
        Url::parse(raw).is_ok()
    }

    /// The source text, unchanged.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed, normalized form.
    pub fn as_url(&self) -> &Url {
        &self.parsed
    }
}

impl TryFrom<String> for WebUrl {
    type Error = PlaylistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WebUrl> for String {
    fn from(url: WebUrl) -> Self {
        url.raw
    }
}

impl std::fmt::Display for WebUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_text() {
        for raw in ["https://X.com", "HTTPS://i.scdn.co/image/x", "https://x.com/a b.png"] {
            let url = WebUrl::new(raw).unwrap();
            assert_eq!(url.as_str(), raw);
            assert_eq!(url.to_string(), raw);
        }
    }

    #[test]
    fn exposes_normalized_form() {
        let url = WebUrl::new("HTTPS://X.com").unwrap();
        assert_eq!(url.as_url().as_str(), "https://x.com/");
    }

    #[test]
    fn rejects_relative_and_hostless() {
        for raw in ["not-a-url", "/embed/123", "https://", "http:"] {
            assert!(!WebUrl::is_valid(raw), "{raw} should be rejected");
            assert!(WebUrl::new(raw).is_err());
        }
    }

    #[test]
    fn for_field_names_the_field() {
        let err = WebUrl::for_field("embedUrl", "https://").unwrap_err();
        assert!(matches!(err, PlaylistError::InvalidUrl { field: "embedUrl", .. }));
    }

    #[test]
    fn serde_round_trips_verbatim() {
        let url: WebUrl = serde_json::from_str(r#""HTTPS://X.com""#).unwrap();
        assert_eq!(serde_json::to_string(&url).unwrap(), r#""HTTPS://X.com""#);
        assert!(serde_json::from_str::<WebUrl>(r#""not-a-url""#).is_err());
    }
}
