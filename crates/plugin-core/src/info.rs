//! The published identity of a plugin: a URL and a name.

use std::cmp::Ordering;
use std::fmt;

use crate::absolute_url::AbsoluteUrl;
use crate::error::{Error, Result};
use crate::name::Name;
use crate::parser::PluginExpressionParser;

/// `(url, name)` of a published plugin.
///
/// Infos order by name, then url, which keeps serialized sets stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginInfo<N: Name> {
    url: AbsoluteUrl,
    name: N,
}

impl<N: Name> PluginInfo<N> {
    pub fn new(url: AbsoluteUrl, name: N) -> Self {
        Self { url, name }
    }

    pub fn url(&self) -> &AbsoluteUrl {
        &self.url
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    /// Same url with a different name.
    pub fn set_name(&self, name: N) -> Self {
        if self.name == name {
            return self.clone();
        }
        Self {
            url: self.url.clone(),
            name,
        }
    }

    /// Parses `URL SPACE Name`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = PluginExpressionParser::new(text);
        let info = Self::parse_with(&mut parser)?;
        parser.cursor().expect_empty()?;
        Ok(info)
    }

    /// Parses one `URL SPACE Name` at the parser's cursor.
    ///
    /// Errors are reported against the parser's full text.
    pub(crate) fn parse_with(parser: &mut PluginExpressionParser<'_>) -> Result<Self> {
        if parser.is_empty() {
            return Err(parser.end_of_text("url"));
        }
        let url = parser.url().ok_or_else(|| url_error(parser))?;

        if !parser.spaces() {
            return Err(parser.invalid_character());
        }
        let name = parser
            .name::<N>()?
            .ok_or_else(|| parser.invalid_character())?;

        Ok(Self { url, name })
    }
}

/// A token that is not a URL is reported at its first character.
fn url_error(parser: &PluginExpressionParser<'_>) -> Error {
    let remaining = parser.cursor().remaining();
    let token = remaining.split_whitespace().next().unwrap_or(remaining);
    match AbsoluteUrl::parse(token) {
        Err(Error::InvalidUrl { reason, .. }) => Error::InvalidUrl {
            text: parser.cursor().text().to_string(),
            reason: format!("{reason} at {}", parser.cursor().position()),
        },
        _ => parser.invalid_character(),
    }
}

impl<N: Name> PartialOrd for PluginInfo<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Name> Ord for PluginInfo<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.url.cmp(&other.url))
    }
}

impl<N: Name> fmt::Display for PluginInfo<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.url, self.name)
    }
}
