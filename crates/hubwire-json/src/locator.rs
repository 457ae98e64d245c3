//! Lenient URI field type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

/// A URI as received from the API.
///
/// Decoding never fails on a malformed string: anything that is neither an
/// absolute URL nor a plausible relative reference is kept verbatim in
/// [`Locator::Raw`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// An absolute URL.
    Absolute(Url),
    /// A reference without a scheme, e.g. `/notifications`.
    Relative(String),
    /// A string that could not be parsed as either.
    Raw(String),
}

impl Locator {
    /// Classify `input`.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) => Self::Absolute(url),
            Err(url::ParseError::RelativeUrlWithoutBase) if is_relative_reference(input) => {
                Self::Relative(input.to_owned())
            }
            Err(_) => Self::Raw(input.to_owned()),
        }
    }

    /// The string form.
    ///
    /// Absolute URLs come back in the normalized form `url` produces, so
    /// `https://GitHub.com` reads as `https://github.com/`. Relative and raw
    /// strings are returned as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Absolute(url) => url.as_str(),
            Self::Relative(s) | Self::Raw(s) => s,
        }
    }

    /// The parsed URL, when absolute.
    #[must_use]
    pub const fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Absolute(url) => Some(url),
            Self::Relative(_) | Self::Raw(_) => None,
        }
    }

    /// Whether the input parsed as an absolute or relative reference.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        !matches!(self, Self::Raw(_))
    }
}

fn is_relative_reference(input: &str) -> bool {
    !input
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '`'))
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self::Absolute(url)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Locator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute() {
        let locator = Locator::parse("https://api.github.com/notifications/threads/1");
        assert!(matches!(locator, Locator::Absolute(_)));
        assert_eq!(
            locator.as_str(),
            "https://api.github.com/notifications/threads/1"
        );
        assert_eq!(
            locator.as_url().map(Url::host_str),
            Some(Some("api.github.com"))
        );
    }

    #[test]
    fn test_relative() {
        let locator = Locator::parse("/repos/octocat/hello/notifications");
        assert_eq!(
            locator,
            Locator::Relative("/repos/octocat/hello/notifications".into())
        );
        assert!(locator.is_parsed());
        assert!(locator.as_url().is_none());
    }

    #[test]
    fn test_absolute_is_normalized() {
        let locator = Locator::parse("https://GitHub.com");
        assert!(matches!(locator, Locator::Absolute(_)));
        assert_eq!(locator.as_str(), "https://github.com/");
        assert_eq!(locator.to_string(), "https://github.com/");

        let locator = Locator::parse("HTTPS://api.github.com/repos/../notifications");
        assert_eq!(locator.as_str(), "https://api.github.com/notifications");
    }

    #[test]
    fn test_unparsable_is_kept() {
        for input in ["not a url", "http://[::1", "https://exa mple.com"] {
            let locator = Locator::parse(input);
            assert_eq!(locator, Locator::Raw(input.into()), "{input}");
            assert!(!locator.is_parsed());
            assert_eq!(locator.to_string(), input);
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_serde_with_plain_json() {
        let locator: Locator = serde_json::from_str("\"https://github.com/octocat\"").unwrap();
        assert_eq!(locator.as_str(), "https://github.com/octocat");
        assert_eq!(
            serde_json::to_string(&locator).unwrap(),
            "\"https://github.com/octocat\""
        );

        assert!(serde_json::from_str::<Locator>("42").is_err());
    }
}
