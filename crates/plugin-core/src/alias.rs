//! A single alias declaration.

use std::fmt;
use std::str::FromStr;

use crate::absolute_url::AbsoluteUrl;
use crate::error::{Error, Result};
use crate::name::Name;
use crate::parser::{PluginExpressionParser, SEPARATOR};
use crate::selector::PluginSelector;

/// One declaration from alias text:
///
/// * `name` - a plain name, kept as is
/// * `name selector` - an alias for a published plugin
/// * `name selector url` - an alias that introduces a new plugin at `url`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PluginAlias<N: Name> {
    name: N,
    selector: Option<PluginSelector<N>>,
    url: Option<AbsoluteUrl>,
}

impl<N: Name> PluginAlias<N> {
    /// A url requires a selector.
    pub fn new(
        name: N,
        selector: Option<PluginSelector<N>>,
        url: Option<AbsoluteUrl>,
    ) -> Result<Self> {
        if url.is_some() && selector.is_none() {
            return Err(Error::InvalidAlias {
                name: name.to_string(),
                reason: "url without selector".to_string(),
            });
        }
        Ok(Self {
            name,
            selector,
            url,
        })
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    pub fn selector(&self) -> Option<&PluginSelector<N>> {
        self.selector.as_ref()
    }

    pub fn url(&self) -> Option<&AbsoluteUrl> {
        self.url.as_ref()
    }

    /// True for a plain name without selector.
    pub fn is_name(&self) -> bool {
        self.selector.is_none()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = PluginExpressionParser::new(text);
        parser.spaces();
        let alias = Self::parse_with(&mut parser)?;
        parser.spaces();
        parser.cursor().expect_empty()?;
        Ok(alias)
    }

    /// Parses one declaration, stopping before a separator or the end of text.
    pub(crate) fn parse_with(parser: &mut PluginExpressionParser<'_>) -> Result<Self> {
        let name = expect_name::<N>(parser)?;

        let spaced = parser.spaces();
        if at_declaration_end(parser) {
            return Ok(Self {
                name,
                selector: None,
                url: None,
            });
        }
        if !spaced {
            return Err(parser.invalid_character());
        }

        let selector_name = expect_name::<N>(parser)?;
        let save = parser.cursor().save();
        parser.spaces();
        let text = match parser.parenthesised()? {
            Some(text) => text.to_string(),
            None => {
                parser.cursor_mut().restore(save);
                String::new()
            }
        };
        let selector = PluginSelector::new(selector_name, text);

        let save = parser.cursor().save();
        let spaced = parser.spaces();
        if at_declaration_end(parser) {
            parser.cursor_mut().restore(save);
            return Self::new(name, Some(selector), None);
        }
        if !spaced {
            return Err(parser.invalid_character());
        }
        let url = parser.url().ok_or_else(|| parser.invalid_character())?;

        Self::new(name, Some(selector), Some(url))
    }
}

fn expect_name<N: Name>(parser: &mut PluginExpressionParser<'_>) -> Result<N> {
    match parser.name::<N>()? {
        Some(name) => Ok(name),
        None if parser.is_empty() => Err(parser.end_of_text(N::KIND)),
        None => Err(parser.invalid_character()),
    }
}

fn at_declaration_end(parser: &PluginExpressionParser<'_>) -> bool {
    matches!(parser.cursor().peek(), None | Some(SEPARATOR))
}

impl<N: Name> fmt::Display for PluginAlias<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(selector) = &self.selector {
            write!(f, " {selector}")?;
        }
        if let Some(url) = &self.url {
            write!(f, " {url}")?;
        }
        Ok(())
    }
}

impl<N: Name> FromStr for PluginAlias<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::PluginName;

    type Alias = PluginAlias<PluginName>;

    #[test]
    fn test_parse_plain_name() {
        let alias = Alias::parse("alpha").unwrap();
        assert!(alias.is_name());
        assert_eq!(alias.to_string(), "alpha");
    }

    #[test]
    fn test_parse_alias_to_selector() {
        let alias = Alias::parse("short long-name").unwrap();
        assert_eq!(alias.selector().unwrap().name().value(), "long-name");
        assert_eq!(alias.url(), None);
        assert_eq!(alias.to_string(), "short long-name");
    }

    #[test]
    fn test_parse_alias_with_parameters_and_url() {
        let text = r#"custom collection (a, b("x, y")) https://example.com/custom"#;
        let alias = Alias::parse(text).unwrap();
        let selector = alias.selector().unwrap();
        assert_eq!(selector.name().value(), "collection");
        assert_eq!(selector.text(), r#"(a, b("x, y"))"#);
        assert_eq!(alias.url().unwrap().as_str(), "https://example.com/custom");
        assert_eq!(alias.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_non_url_tail() {
        let text = "a b c";
        assert_eq!(Alias::parse(text).unwrap_err(), Error::invalid_character(text, 4));
    }

    #[test]
    fn test_parse_rejects_url_without_host() {
        let text = "x a b:c";
        assert_eq!(Alias::parse(text).unwrap_err(), Error::invalid_character(text, 4));
    }

    #[test]
    fn test_parse_requires_space_before_selector() {
        let text = "a(b)";
        assert_eq!(Alias::parse(text).unwrap_err(), Error::invalid_character(text, 1));
    }

    #[test]
    fn test_new_url_requires_selector() {
        let result = Alias::new(
            PluginName::new("a").unwrap(),
            None,
            Some(AbsoluteUrl::parse("https://example.com/a").unwrap()),
        );
        assert!(matches!(result, Err(Error::InvalidAlias { .. })));
    }
}
