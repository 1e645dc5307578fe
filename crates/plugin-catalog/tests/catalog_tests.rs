use plugin_catalog::{Catalog, CatalogFile, ConfigStore, Error, PluginInstance};
use plugin_core::{Name, PluginName, PluginProvider, PluginSelector, SelectorValue};
use plugin_test_utils::catalog::{SAMPLE_TOML, TestCatalog};
use plugin_test_utils::fixtures::{infos, name};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn sample() -> (TestCatalog, Catalog) {
    let dir = TestCatalog::new();
    let catalog = Catalog::load(&dir.sample()).unwrap();
    (dir, catalog)
}

fn selector(text: &str) -> PluginSelector<PluginName> {
    PluginSelector::parse(text).unwrap()
}

#[test]
fn test_load_toml_sample() {
    let (_dir, catalog) = sample();
    assert_eq!(catalog.entries().len(), 2);
    assert_eq!(catalog.entries()[0].name.value(), "core");
    assert_eq!(
        catalog.entries()[1].aliases.as_ref().map(|a| a.to_string()),
        Some("dup, to-date string-to-local-date".to_string())
    );
}

#[test]
fn test_aliases_shape_provider_infos() {
    let (_dir, catalog) = sample();
    let providers = catalog.providers().unwrap();
    assert_eq!(
        providers[1].infos(),
        &infos(
            "https://example.com/dates/dup dup, https://example.com/dates/string-to-local-date to-date"
        )
    );
}

#[test]
fn test_collection_marks_dup_ambiguous() {
    let (_dir, catalog) = sample();
    let collection = catalog.collection().unwrap();
    assert!(collection.ambiguous_names().contains(&name("dup")));
    assert_eq!(
        collection
            .infos()
            .iter()
            .filter(|info| info.name() == &name("dup"))
            .count(),
        2
    );
    let error = collection
        .get(&selector("dup"), &catalog.environment())
        .unwrap_err();
    assert_eq!(error.to_string(), "Unknown dup");
}

#[test]
fn test_resolve_through_aliases_and_environment() {
    let (_dir, catalog) = sample();
    let collection = catalog.collection().unwrap();
    let instance = collection
        .get(
            &selector(r#"collection(number-to-boolean, to-date("yyyy-mm-dd"), $locale)"#),
            &catalog.environment(),
        )
        .unwrap();

    assert_eq!(instance.provider.value(), "core");
    assert_eq!(
        instance.to_string(),
        r#"collection(number-to-boolean, string-to-local-date("yyyy-mm-dd"), "en-AU")"#
    );

    let SelectorValue::Provided(PluginInstance { provider, info, values }) = &instance.values[1]
    else {
        panic!("expected a provided value, got {:?}", instance.values[1]);
    };
    assert_eq!(provider.value(), "dates");
    assert_eq!(info.url().as_str(), "https://example.com/dates/string-to-local-date");
    assert_eq!(values, &vec![SelectorValue::String("yyyy-mm-dd".to_string())]);
    assert_eq!(instance.values[2], SelectorValue::Environment(json!("en-AU")));
}

#[rstest]
#[case("catalog.json")]
#[case("catalog.yaml")]
#[case("catalog.toml")]
fn test_save_and_load_each_format(#[case] file_name: &str) {
    let (dir, catalog) = sample();
    let path = dir.root().join(file_name);
    let store = ConfigStore::new();
    store.save(&path, catalog.file()).unwrap();

    let loaded: CatalogFile = store.load(&path).unwrap();
    assert_eq!(&loaded, catalog.file());
}

#[test]
fn test_unsupported_extension() {
    let dir = TestCatalog::new();
    let path = dir.write("catalog.ini", SAMPLE_TOML);
    assert!(matches!(
        Catalog::load(&path),
        Err(Error::UnsupportedFormat { extension }) if extension == "ini"
    ));
}

#[test]
fn test_too_large() {
    let dir = TestCatalog::new();
    let path = dir.sample();
    let result = Catalog::load_with(&ConfigStore::with_max_size(16), &path);
    assert!(matches!(result, Err(Error::CatalogTooLarge { max: 16, .. })));
}

#[test]
fn test_invalid_info_text_is_a_parse_error() {
    let dir = TestCatalog::new();
    let path = dir.write(
        "catalog.toml",
        r#"
[[providers]]
name = "core"
url = "https://example.com/providers/core"
infos = "https://example.com/core/a a!"
"#,
    );
    let error = Catalog::load(&path).unwrap_err();
    assert!(matches!(error, Error::ConfigParse { ref format, .. } if format == "TOML"));
    assert!(error.to_string().contains("Invalid character '!'"));
}

#[test]
fn test_duplicate_provider() {
    let dir = TestCatalog::new();
    let path = dir.write(
        "catalog.json",
        &json!({
            "providers": [
                { "name": "core", "url": "https://example.com/one", "infos": "" },
                { "name": "core", "url": "https://example.com/two", "infos": "" }
            ]
        })
        .to_string(),
    );
    assert!(matches!(
        Catalog::load(&path),
        Err(Error::DuplicateProvider { name }) if name == "core"
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TestCatalog::new();
    let result = Catalog::load(&dir.root().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io { .. })));
}
