//! A provider that records what it was asked for.

use std::cell::RefCell;
use std::rc::Rc;

use plugin_core::{
    AbsoluteUrl, EnvironmentContext, PluginInfoSet, PluginName, PluginProvider, ProviderName,
    Result, SelectorValue, unknown_name,
};

use crate::fixtures;

/// The plugin handed out by [`RecordingProvider`]: its name and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub provider: ProviderName,
    pub name: PluginName,
    pub values: Vec<SelectorValue<Built>>,
}

/// One call to [`PluginProvider::plugin`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: PluginName,
    pub values: Vec<SelectorValue<Built>>,
}

/// Handle on the calls of a [`RecordingProvider`].
///
/// Stays usable after the provider itself was boxed into a collection.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Names of the recorded calls, in call order.
    pub fn names(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .map(|call| call.name.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Builds a [`Built`] for every name in its infos and records each call in order.
///
/// Names outside the infos fail with the default unknown-name error.
#[derive(Debug)]
pub struct RecordingProvider {
    name: ProviderName,
    url: AbsoluteUrl,
    infos: PluginInfoSet<PluginName>,
    calls: CallLog,
}

impl RecordingProvider {
    pub fn new(name: &str, infos: PluginInfoSet<PluginName>) -> Self {
        Self {
            name: ProviderName::new(name)
                .unwrap_or_else(|e| panic!("RecordingProvider::new({name:?}): {e}")),
            url: fixtures::url(&format!("https://example.com/providers/{name}")),
            infos,
            calls: CallLog::default(),
        }
    }

    /// A provider publishing `https://example.com/<name>/<plugin> <plugin>` for each plugin.
    pub fn publishing(name: &str, plugins: &[&str]) -> Self {
        Self::new(name, fixtures::published(name, plugins))
    }

    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }
}

impl PluginProvider<PluginName> for RecordingProvider {
    type Plugin = Built;

    fn name(&self) -> &ProviderName {
        &self.name
    }

    fn url(&self) -> &AbsoluteUrl {
        &self.url
    }

    fn infos(&self) -> &PluginInfoSet<PluginName> {
        &self.infos
    }

    fn plugin(
        &self,
        name: &PluginName,
        values: Vec<SelectorValue<Built>>,
        _context: &dyn EnvironmentContext,
    ) -> Result<Built> {
        if !self.infos.contains_name(name) {
            return Err(unknown_name(name));
        }
        self.calls.push(Call {
            name: name.clone(),
            values: values.clone(),
        });
        Ok(Built {
            provider: self.name.clone(),
            name: name.clone(),
            values,
        })
    }
}
