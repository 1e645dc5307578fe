//! End-to-end catalog scenarios over the files in `test-fixtures/catalogs`
//!
//! Each scenario loads a real catalog file and drives the full flow:
//! catalog -> providers (with aliases) -> collection -> selector resolution.

use std::path::PathBuf;

use plugin_catalog::{Catalog, ConfigStore, PluginInstance};
use plugin_core::{
    AbsoluteUrl, MapEnvironmentContext, Name, NameMapper, PluginHelper, PluginInfo, PluginName,
    PluginProvider, ProviderName, SelectorValue,
};
use plugin_test_utils::catalog::TestCatalog;
use plugin_test_utils::fixtures::{infos, name, selector};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/catalogs")
        .join(file_name)
}

fn string(value: &str) -> SelectorValue<PluginInstance> {
    SelectorValue::String(value.to_string())
}

#[test]
fn test_toml_and_yaml_catalogs_agree() {
    let toml = Catalog::load(&fixture("converters.toml")).unwrap();
    let yaml = Catalog::load(&fixture("converters.yaml")).unwrap();
    assert_eq!(toml.file(), yaml.file());
}

#[test]
fn test_alias_with_url_removes_ambiguity() {
    let catalog = Catalog::load(&fixture("converters.toml")).unwrap();
    let collection = catalog.collection().unwrap();

    assert!(collection.ambiguous_names().is_empty());
    let owner = collection.provider_for(&name("string-to-local-date")).unwrap();
    assert_eq!(owner.name().value(), "basic");

    let locale = collection.provider_for(&name("local-date")).unwrap();
    assert_eq!(
        locale.infos(),
        &infos(
            "https://example.com/locale/local-date local-date, https://example.com/locale/text-to-number text-to-number"
        )
    );
}

#[test]
fn test_alias_parameters_are_applied() {
    let catalog = Catalog::load(&fixture("converters.toml")).unwrap();
    let collection = catalog.collection().unwrap();

    let instance = collection
        .get(
            &selector("collection(local-date, string-to-local-date(\"yyyy-mm-dd\"), $precision)"),
            &catalog.environment(),
        )
        .unwrap();

    let expected = |provider: &str, values| {
        SelectorValue::Provided(PluginInstance {
            provider: ProviderName::new(provider).unwrap(),
            info: PluginInfo::new(
                AbsoluteUrl::parse(&format!("https://example.com/{provider}/string-to-local-date"))
                    .unwrap(),
                name("string-to-local-date"),
            ),
            values,
        })
    };

    assert_eq!(
        instance.values,
        vec![
            expected("locale", vec![string("dd/mm/yyyy")]),
            expected("basic", vec![string("yyyy-mm-dd")]),
            SelectorValue::Environment(json!(2)),
        ]
    );
}

#[test]
fn test_alias_with_parameters_rejects_more() {
    let catalog = Catalog::load(&fixture("converters.toml")).unwrap();
    let collection = catalog.collection().unwrap();
    let error = collection
        .get(&selector("local-date(\"yyyy\")"), &catalog.environment())
        .unwrap_err();
    assert!(error.to_string().starts_with("Invalid alias local-date"));
}

#[test]
fn test_json_catalog_ambiguity() {
    let catalog = Catalog::load(&fixture("formatters.json")).unwrap();
    let collection = catalog.collection().unwrap();

    assert_eq!(
        collection.ambiguous_names().iter().cloned().collect::<Vec<_>>(),
        vec![name("general")]
    );
    assert_eq!(collection.infos().len(), 4);
    assert_eq!(
        collection
            .get(&selector("percent"), &MapEnvironmentContext::new())
            .unwrap()
            .provider
            .value(),
        "number"
    );
    assert_eq!(
        collection
            .get(&selector("upper(general)"), &catalog.environment())
            .unwrap_err()
            .to_string(),
        "Unknown general"
    );
}

#[test]
fn test_mappers_over_catalog_infos() {
    let catalog = Catalog::load(&fixture("formatters.json")).unwrap();
    let helper = PluginHelper::<PluginName>::new("formatter");
    let text = &catalog.entries()[0].infos;

    let renames = infos("https://example.com/text/general text-general");
    let mapper = helper.renaming_mapper(&renames, text).unwrap();
    assert_eq!(mapper.name(&name("text-general")).unwrap(), name("general"));
    assert_eq!(
        mapper.selector(&selector("text-general (1)")).unwrap(),
        selector("general (1)")
    );

    let filtered = helper.filtered_mapper(&renames, text);
    assert_eq!(filtered.infos(), &renames);
    assert_eq!(
        filtered.name(&name("upper")).unwrap_err().to_string(),
        "Unknown upper"
    );
}

#[test]
fn test_catalog_converted_between_formats() {
    let catalog = Catalog::load(&fixture("converters.toml")).unwrap();
    let dir = TestCatalog::new();
    let json_path = dir.root().join("converters.json");
    ConfigStore::new().save(&json_path, catalog.file()).unwrap();

    let reloaded = Catalog::load(&json_path).unwrap();
    assert_eq!(reloaded.file(), catalog.file());
}
