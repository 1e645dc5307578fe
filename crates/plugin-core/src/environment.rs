//! Environment values referenced from selector text as `$name`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::name::{EnvironmentValueName, Name};

/// Source of named environment values.
pub trait EnvironmentContext {
    fn environment_value(&self, name: &EnvironmentValueName) -> Option<Value>;

    /// Like [`EnvironmentContext::environment_value`] but a missing value is an error.
    fn environment_value_or_fail(&self, name: &EnvironmentValueName) -> Result<Value> {
        self.environment_value(name)
            .ok_or_else(|| Error::UnknownEnvironmentValue {
                name: name.value().to_string(),
            })
    }
}

/// An [`EnvironmentContext`] backed by a sorted map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapEnvironmentContext {
    values: BTreeMap<EnvironmentValueName, Value>,
}

impl MapEnvironmentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style [`MapEnvironmentContext::set`].
    pub fn with(mut self, name: EnvironmentValueName, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a value, replacing any previous value with the same name.
    pub fn set(&mut self, name: EnvironmentValueName, value: impl Into<Value>) {
        self.values.insert(name, value.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &EnvironmentValueName> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl EnvironmentContext for MapEnvironmentContext {
    fn environment_value(&self, name: &EnvironmentValueName) -> Option<Value> {
        self.values.get(name).cloned()
    }
}

impl FromIterator<(EnvironmentValueName, Value)> for MapEnvironmentContext {
    fn from_iter<I: IntoIterator<Item = (EnvironmentValueName, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> EnvironmentValueName {
        EnvironmentValueName::new(text).unwrap()
    }

    #[test]
    fn test_lookup_present() {
        let context = MapEnvironmentContext::new().with(name("locale"), "en-AU");
        assert_eq!(
            context.environment_value(&name("locale")),
            Some(Value::from("en-AU"))
        );
    }

    #[test]
    fn test_or_fail_missing() {
        let context = MapEnvironmentContext::new();
        assert_eq!(
            context.environment_value_or_fail(&name("missing")),
            Err(Error::UnknownEnvironmentValue {
                name: "missing".into()
            })
        );
    }

    #[test]
    fn test_set_replaces() {
        let mut context = MapEnvironmentContext::new();
        context.set(name("x"), 1);
        context.set(name("x"), 2);
        assert_eq!(context.len(), 1);
        assert_eq!(context.environment_value(&name("x")), Some(Value::from(2)));
    }
}
