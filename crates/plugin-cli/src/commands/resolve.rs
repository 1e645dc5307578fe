//! Resolve command: materialise a selector through a catalog

use std::path::Path;

use plugin_catalog::{Catalog, PluginInstance};
use plugin_core::SelectorValue;

use super::helper;
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(path: &Path, selector: &str) -> Result<()> {
    let catalog = Catalog::load(path)?;
    let collection = catalog.collection()?;
    let selector = helper().parse_selector(selector)?;

    let instance = collection.get(&selector, &catalog.environment())?;
    print!("{}", render_tree(&instance));
    Ok(())
}

/// One line per plugin (`name [provider] url`), parameters indented below it.
pub fn render_tree(instance: &PluginInstance) -> String {
    let mut out = String::new();
    render(instance, 0, &mut out);
    out
}

fn render(instance: &PluginInstance, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!(
        "{indent}{} [{}] {}\n",
        instance.info.name(),
        instance.provider,
        instance.info.url()
    ));
    for value in &instance.values {
        match value {
            SelectorValue::Provided(nested) => render(nested, depth + 1, out),
            SelectorValue::Number(n) => out.push_str(&format!("{indent}  {n}\n")),
            SelectorValue::String(s) => out.push_str(&format!("{indent}  {s:?}\n")),
            SelectorValue::Environment(v) => out.push_str(&format!("{indent}  {v}\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_core::{PluginInfo, ProviderName};

    fn instance(name: &str, values: Vec<SelectorValue<PluginInstance>>) -> PluginInstance {
        PluginInstance {
            provider: ProviderName::new("core").unwrap(),
            info: PluginInfo::parse(&format!("https://example.com/core/{name} {name}")).unwrap(),
            values,
        }
    }

    #[test]
    fn test_render_tree() {
        let tree = instance(
            "collection",
            vec![
                SelectorValue::Provided(instance(
                    "to-date",
                    vec![SelectorValue::String("yyyy-mm-dd".into())],
                )),
                SelectorValue::Number(2.0),
            ],
        );
        assert_eq!(
            render_tree(&tree),
            "collection [core] https://example.com/core/collection\n  \
             to-date [core] https://example.com/core/to-date\n    \
             \"yyyy-mm-dd\"\n  \
             2\n"
        );
    }
}
