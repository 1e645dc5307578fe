//! Token level parser for selector and alias text.
//!
//! Each token method either consumes its token or leaves the cursor exactly
//! where it was and reports the token as absent, so grammars can be written
//! as ordered alternatives. Malformed tokens (an unterminated string, a `$`
//! without a name) and unresolvable environment values are errors.

use serde_json::Value;

use crate::absolute_url::AbsoluteUrl;
use crate::cursor::TextCursor;
use crate::environment::EnvironmentContext;
use crate::error::{Error, Result};
use crate::name::{EnvironmentValueName, Name};

pub const PARAMETERS_BEGIN: char = '(';
pub const PARAMETERS_END: char = ')';
pub const SEPARATOR: char = ',';
pub const ENVIRONMENT_VALUE_PREFIX: char = '$';
pub const DOUBLE_QUOTE: char = '"';
const BACKSLASH: char = '\\';

/// Parser over a single [`TextCursor`].
#[derive(Debug, Clone)]
pub struct PluginExpressionParser<'a> {
    cursor: TextCursor<'a>,
}

impl<'a> PluginExpressionParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            cursor: TextCursor::new(text),
        }
    }

    pub fn cursor(&self) -> &TextCursor<'a> {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut TextCursor<'a> {
        &mut self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_empty()
    }

    /// A name of kind `N`, recognized by that kind's grammar.
    pub fn name<N: Name>(&mut self) -> Result<Option<N>> {
        N::scan(&mut self.cursor)
    }

    /// Skips whitespace, returning whether any was consumed.
    pub fn spaces(&mut self) -> bool {
        !self.cursor.take_while(char::is_whitespace).is_empty()
    }

    pub fn parameters_begin(&mut self) -> bool {
        self.cursor.eat(PARAMETERS_BEGIN)
    }

    pub fn parameters_end(&mut self) -> bool {
        self.cursor.eat(PARAMETERS_END)
    }

    pub fn parameter_separator(&mut self) -> bool {
        self.cursor.eat(SEPARATOR)
    }

    /// A decimal number such as `1`, `-2.5` or `1e3`.
    pub fn number(&mut self) -> Option<f64> {
        let save = self.cursor.save();
        self.cursor.next_if(|c| c == '-' || c == '+');
        if self.cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
            self.cursor.restore(save);
            return None;
        }

        let fraction = self.cursor.save();
        if self.cursor.eat('.') && self.cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
            self.cursor.restore(fraction);
        }

        let exponent = self.cursor.save();
        if self.cursor.next_if(|c| c == 'e' || c == 'E').is_some() {
            self.cursor.next_if(|c| c == '-' || c == '+');
            if self.cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
                self.cursor.restore(exponent);
            }
        }

        match self.cursor.since(save).parse::<f64>() {
            Ok(number) => Some(number),
            Err(_) => {
                self.cursor.restore(save);
                None
            }
        }
    }

    /// A double quoted string with backslash escapes.
    pub fn double_quoted_string(&mut self) -> Result<Option<String>> {
        if !self.cursor.eat(DOUBLE_QUOTE) {
            return Ok(None);
        }

        let mut value = String::new();
        loop {
            match self.cursor.next_char() {
                None => return Err(self.end_of_text("closing '\"'")),
                Some(DOUBLE_QUOTE) => return Ok(Some(value)),
                Some(BACKSLASH) => {
                    let escaped = match self.cursor.peek() {
                        None => return Err(self.end_of_text("escaped character")),
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('0') => '\0',
                        Some(_) => return Err(self.cursor.invalid_character()),
                    };
                    self.cursor.next_char();
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// An absolute URL made of every character up to the next whitespace.
    ///
    /// Text that does not parse as a URL is left unconsumed.
    pub fn url(&mut self) -> Option<AbsoluteUrl> {
        let save = self.cursor.save();
        let token = self.cursor.take_while(|c| !c.is_whitespace());
        if token.is_empty() {
            return None;
        }
        match AbsoluteUrl::parse(token) {
            Ok(url) => Some(url),
            Err(_) => {
                self.cursor.restore(save);
                None
            }
        }
    }

    /// `$name`, which is resolved immediately.
    ///
    /// A name that the context cannot resolve is an error.
    pub fn environment_value(
        &mut self,
        context: &dyn EnvironmentContext,
    ) -> Result<Option<Value>> {
        match self.environment_value_name()? {
            Some(name) => context.environment_value_or_fail(&name).map(Some),
            None => Ok(None),
        }
    }

    /// `$name` without resolving it.
    pub fn environment_value_name(&mut self) -> Result<Option<EnvironmentValueName>> {
        if !self.cursor.eat(ENVIRONMENT_VALUE_PREFIX) {
            return Ok(None);
        }
        match self.name::<EnvironmentValueName>()? {
            Some(name) => Ok(Some(name)),
            None => Err(self.cursor.invalid_character()),
        }
    }

    /// A parenthesised group such as `(a, b("x)"))`, returned verbatim.
    ///
    /// Nested parentheses and quoted strings are skipped over.
    pub fn parenthesised(&mut self) -> Result<Option<&'a str>> {
        let save = self.cursor.save();
        if !self.parameters_begin() {
            return Ok(None);
        }

        let mut depth = 1;
        while depth > 0 {
            match self.cursor.peek() {
                None => return Err(self.end_of_text("')'")),
                Some(DOUBLE_QUOTE) => {
                    self.double_quoted_string()?;
                }
                Some(PARAMETERS_BEGIN) => {
                    self.cursor.next_char();
                    depth += 1;
                }
                Some(PARAMETERS_END) => {
                    self.cursor.next_char();
                    depth -= 1;
                }
                Some(_) => {
                    self.cursor.next_char();
                }
            }
        }
        Ok(Some(self.cursor.since(save)))
    }

    /// Error for the character under the cursor, in coordinates of the full text.
    pub fn invalid_character(&self) -> Error {
        self.cursor.invalid_character()
    }

    pub fn end_of_text(&self, expected: &str) -> Error {
        Error::end_of_text(self.cursor.text(), expected)
    }
}
