//! Name value types and their character grammar.
//!
//! Every plugin kind has its own name type, all sharing the [`Name`]
//! capability so that infos, selectors and alias sets can be written once.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cursor::TextCursor;
use crate::error::{Error, Result};

/// Character grammar and length limits for one kind of name.
#[derive(Debug, Clone, Copy)]
pub struct NameRules {
    /// Accepts the first character.
    pub initial: fn(char) -> bool,
    /// Accepts every following character.
    pub part: fn(char) -> bool,
    pub min_length: usize,
    pub max_length: usize,
}

impl NameRules {
    /// Validates a complete name, reporting the exact offending character.
    pub fn validate(&self, kind: &'static str, text: &str) -> Result<()> {
        let mut length = 0;
        for (i, c) in text.chars().enumerate() {
            let accepted = if i == 0 {
                (self.initial)(c)
            } else {
                (self.part)(c)
            };
            if !accepted {
                return Err(Error::invalid_character(text, i));
            }
            length += 1;
        }
        self.check_length(kind, text, length)
    }

    /// Consumes the longest name at the cursor.
    ///
    /// Returns `None` without moving when the next character cannot start a name.
    pub fn scan<'a>(
        &self,
        kind: &'static str,
        cursor: &mut TextCursor<'a>,
    ) -> Result<Option<&'a str>> {
        let save = cursor.save();
        if cursor.next_if(self.initial).is_none() {
            return Ok(None);
        }
        cursor.take_while(self.part);
        let text = cursor.since(save);
        self.check_length(kind, text, text.chars().count())?;
        Ok(Some(text))
    }

    fn check_length(&self, kind: &'static str, text: &str, length: usize) -> Result<()> {
        if length < self.min_length || length > self.max_length {
            return Err(Error::InvalidNameLength {
                kind,
                text: text.to_string(),
                length,
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

/// Capability shared by all name kinds.
///
/// Names compare by exact, case-sensitive ordinal order of their text.
pub trait Name: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    /// Human readable kind, used in diagnostics.
    const KIND: &'static str;

    fn rules() -> &'static NameRules;

    /// Wraps text already accepted by [`Name::rules`].
    fn from_validated(value: String) -> Self;

    fn value(&self) -> &str;

    /// Parses a complete name.
    fn parse(text: &str) -> Result<Self> {
        Self::rules().validate(Self::KIND, text)?;
        Ok(Self::from_validated(text.to_string()))
    }

    /// Recognizes a name prefix at the cursor, see [`NameRules::scan`].
    fn scan(cursor: &mut TextCursor<'_>) -> Result<Option<Self>> {
        Ok(Self::rules()
            .scan(Self::KIND, cursor)?
            .map(|text| Self::from_validated(text.to_string())))
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_plugin_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn is_environment_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

pub static PLUGIN_NAME_RULES: NameRules = NameRules {
    initial: is_letter,
    part: is_plugin_part,
    min_length: 1,
    max_length: 255,
};

pub static ENVIRONMENT_VALUE_NAME_RULES: NameRules = NameRules {
    initial: is_letter,
    part: is_environment_part,
    min_length: 1,
    max_length: 255,
};

macro_rules! name_type {
    ($(#[$meta:meta])* $ty:ident, $kind:literal, $rules:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $ty(String);

        impl $ty {
            pub fn new(text: impl AsRef<str>) -> Result<Self> {
                <Self as Name>::parse(text.as_ref())
            }
        }

        impl Name for $ty {
            const KIND: &'static str = $kind;

            fn rules() -> &'static NameRules {
                &$rules
            }

            fn from_validated(value: String) -> Self {
                Self(value)
            }

            fn value(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                <Self as Name>::parse(s)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                <Self as Name>::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

name_type!(
    /// Name of a plugin published by a provider, e.g. `number-to-boolean`.
    PluginName,
    "plugin",
    PLUGIN_NAME_RULES
);

name_type!(
    /// Name of a provider.
    ProviderName,
    "provider",
    PLUGIN_NAME_RULES
);

name_type!(
    /// Name of a value held by an environment, referenced as `$name`.
    EnvironmentValueName,
    "environment value",
    ENVIRONMENT_VALUE_NAME_RULES
);
