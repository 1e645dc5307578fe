//! Selectors: a plugin name plus its unparsed parameter text.
//!
//! ```text
//! provided  := name [ '(' parameter (',' parameter)* ')' ]
//! parameter := '$' name | provided | number | quoted-string
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::environment::EnvironmentContext;
use crate::error::{Error, Result};
use crate::name::{EnvironmentValueName, Name};
use crate::parser::{
    DOUBLE_QUOTE, ENVIRONMENT_VALUE_PREFIX, PARAMETERS_BEGIN, PARAMETERS_END,
    PluginExpressionParser,
};

/// A materialised selector parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorValue<T> {
    /// Value of a `$name` reference.
    Environment(Value),
    /// Value returned by the provider for a nested selector.
    Provided(T),
    Number(f64),
    String(String),
}

impl<T> SelectorValue<T> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_provided(&self) -> Option<&T> {
        match self {
            Self::Provided(t) => Some(t),
            _ => None,
        }
    }
}

/// A parameter written back into selector text by [`PluginSelector::set_values`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorParameter<N: Name> {
    Number(f64),
    String(String),
    Selector(PluginSelector<N>),
    Environment(EnvironmentValueName),
}

impl<N: Name> From<f64> for SelectorParameter<N> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<N: Name> From<&str> for SelectorParameter<N> {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<N: Name> From<String> for SelectorParameter<N> {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<N: Name> From<PluginSelector<N>> for SelectorParameter<N> {
    fn from(value: PluginSelector<N>) -> Self {
        Self::Selector(value)
    }
}

/// A name and the raw text that follows it, e.g. `collection (a, b("x"))`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PluginSelector<N: Name> {
    name: N,
    text: String,
}

impl<N: Name> PluginSelector<N> {
    pub fn new(name: N, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_name(&self, name: N) -> Self {
        Self {
            name,
            text: self.text.clone(),
        }
    }

    pub fn set_text(&self, text: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            text: text.into(),
        }
    }

    /// Parses `name` or `name SPACE text`, the inverse of `to_string`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = PluginExpressionParser::new(text);
        let name = match parser.name::<N>()? {
            Some(name) => name,
            None => return Err(parser.invalid_character()),
        };

        let cursor = parser.cursor_mut();
        if !cursor.is_empty() && !cursor.eat(' ') && cursor.peek() != Some(PARAMETERS_BEGIN) {
            return Err(cursor.invalid_character());
        }

        Ok(Self {
            name,
            text: cursor.remaining().to_string(),
        })
    }

    /// Replaces the text with the serialized parameter list.
    ///
    /// An empty list clears the text.
    pub fn set_values(&self, values: &[SelectorParameter<N>]) -> Result<Self> {
        if values.is_empty() {
            return Ok(self.set_text(""));
        }

        let mut text = String::new();
        text.push(PARAMETERS_BEGIN);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                text.push_str(", ");
            }
            write_parameter(&mut text, value)?;
        }
        text.push(PARAMETERS_END);

        Ok(self.set_text(text))
    }

    /// Evaluates the text as a parameter list.
    ///
    /// Nested selectors are materialised by `provider`, innermost first.
    /// Positions in syntax errors are relative to `self.to_string()`.
    pub fn evaluate_text<T, F>(
        &self,
        provider: &mut F,
        context: &dyn EnvironmentContext,
    ) -> Result<Vec<SelectorValue<T>>>
    where
        F: FnMut(&N, Vec<SelectorValue<T>>, &dyn EnvironmentContext) -> Result<T>,
    {
        N::parse(self.name.value())?;

        let mut parser = PluginExpressionParser::new(&self.text);
        self.evaluate_with(&mut parser, provider, context)
            .map_err(|e| self.relocate(e))
    }

    fn evaluate_with<T, F>(
        &self,
        parser: &mut PluginExpressionParser<'_>,
        provider: &mut F,
        context: &dyn EnvironmentContext,
    ) -> Result<Vec<SelectorValue<T>>>
    where
        F: FnMut(&N, Vec<SelectorValue<T>>, &dyn EnvironmentContext) -> Result<T>,
    {
        parser.spaces();
        if parser.is_empty() {
            return Ok(Vec::new());
        }
        if !parser.parameters_begin() {
            return Err(parser.invalid_character());
        }
        let values = parameters::<N, T, F>(parser, provider, context)?;
        parser.spaces();
        parser.cursor().expect_empty()?;
        Ok(values)
    }

    /// Moves syntax errors from the text into the coordinates of the whole selector.
    fn relocate(&self, error: Error) -> Error {
        let ours = match &error {
            Error::InvalidCharacter { text, .. } | Error::EndOfText { text, .. } => {
                text == &self.text
            }
            _ => false,
        };
        if !ours {
            return error;
        }
        let offset = self.name.value().chars().count() + 1;
        error.relocate(&self.to_string(), offset)
    }
}

/// Parameters after the opening parenthesis, up to and including the closing one.
fn parameters<N, T, F>(
    parser: &mut PluginExpressionParser<'_>,
    provider: &mut F,
    context: &dyn EnvironmentContext,
) -> Result<Vec<SelectorValue<T>>>
where
    N: Name,
    F: FnMut(&N, Vec<SelectorValue<T>>, &dyn EnvironmentContext) -> Result<T>,
{
    let mut values = Vec::new();
    parser.spaces();
    if parser.parameters_end() {
        return Ok(values);
    }

    loop {
        parser.spaces();
        values.push(parameter::<N, T, F>(parser, provider, context)?);
        parser.spaces();
        if parser.parameters_end() {
            return Ok(values);
        }
        if parser.is_empty() {
            return Err(parser.end_of_text("')'"));
        }
        if !parser.parameter_separator() {
            return Err(parser.invalid_character());
        }
    }
}

fn parameter<N, T, F>(
    parser: &mut PluginExpressionParser<'_>,
    provider: &mut F,
    context: &dyn EnvironmentContext,
) -> Result<SelectorValue<T>>
where
    N: Name,
    F: FnMut(&N, Vec<SelectorValue<T>>, &dyn EnvironmentContext) -> Result<T>,
{
    if let Some(value) = parser.environment_value(context)? {
        return Ok(SelectorValue::Environment(value));
    }

    if let Some(name) = parser.name::<N>()? {
        let save = parser.cursor().save();
        parser.spaces();
        let nested = if parser.parameters_begin() {
            parameters::<N, T, F>(parser, provider, context)?
        } else {
            parser.cursor_mut().restore(save);
            Vec::new()
        };
        return provider(&name, nested, context).map(SelectorValue::Provided);
    }

    if let Some(number) = parser.number() {
        return Ok(SelectorValue::Number(number));
    }

    if let Some(string) = parser.double_quoted_string()? {
        return Ok(SelectorValue::String(string));
    }

    if parser.is_empty() {
        return Err(parser.end_of_text("parameter"));
    }
    Err(parser.invalid_character())
}

fn write_parameter<N: Name>(text: &mut String, value: &SelectorParameter<N>) -> Result<()> {
    match value {
        SelectorParameter::Number(number) => {
            if !number.is_finite() {
                return Err(Error::UnsupportedValue {
                    value: number.to_string(),
                });
            }
            text.push_str(&number.to_string());
        }
        SelectorParameter::String(string) => {
            text.push(DOUBLE_QUOTE);
            for c in string.chars() {
                match c {
                    '"' => text.push_str("\\\""),
                    '\\' => text.push_str("\\\\"),
                    '\n' => text.push_str("\\n"),
                    '\r' => text.push_str("\\r"),
                    '\t' => text.push_str("\\t"),
                    '\0' => text.push_str("\\0"),
                    c => text.push(c),
                }
            }
            text.push(DOUBLE_QUOTE);
        }
        SelectorParameter::Selector(selector) => {
            text.push_str(selector.name.value());
            text.push_str(&selector.text);
        }
        SelectorParameter::Environment(name) => {
            text.push(ENVIRONMENT_VALUE_PREFIX);
            text.push_str(name.value());
        }
    }
    Ok(())
}

impl<N: Name> fmt::Display for PluginSelector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.text)
        }
    }
}

impl<N: Name> FromStr for PluginSelector<N> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<N: Name> Serialize for PluginSelector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, N: Name> Deserialize<'de> for PluginSelector<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
