//! Absolute URLs used as the identity of published plugins.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::Url;

use crate::error::{Error, Result};

/// An absolute URL identifying a plugin.
///
/// The URL is never dereferenced. Identity is the text exactly as written:
/// `https://example.com` and `https://example.com/` are different plugins,
/// and case is kept. The text must still parse as a URL with a host.
#[derive(Debug, Clone)]
pub struct AbsoluteUrl {
    text: String,
    url: Url,
}

impl AbsoluteUrl {
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidUrl {
            text: text.to_string(),
            reason,
        };
        let url = Url::parse(text).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(invalid("cannot be a base".to_string()));
        }
        if url.host().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            url,
        })
    }

    /// The text as it was given.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed form, normalized by the `url` crate.
    pub fn as_url(&self) -> &Url {
        &self.url
    }
}

impl PartialEq for AbsoluteUrl {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for AbsoluteUrl {}

impl PartialOrd for AbsoluteUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbsoluteUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for AbsoluteUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for AbsoluteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for AbsoluteUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for AbsoluteUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for AbsoluteUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
