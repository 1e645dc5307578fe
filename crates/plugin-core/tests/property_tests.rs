use std::collections::BTreeSet;

use plugin_core::{
    AbsoluteUrl, PluginAlias, PluginAliasSet, PluginInfo, PluginInfoSet, PluginName,
    PluginSelector, SelectorParameter,
};
use proptest::prelude::*;

fn name(text: &str) -> PluginName {
    PluginName::new(text).unwrap()
}

fn url(text: &str) -> AbsoluteUrl {
    AbsoluteUrl::parse(text).unwrap()
}

// Names never start with 't', so `target-*` names cannot collide with them.
const NAME: &str = "[a-s][a-z0-9-]{0,8}";

fn infos_for(names: &BTreeSet<String>) -> PluginInfoSet<PluginName> {
    PluginInfoSet::new(
        names
            .iter()
            .map(|n| PluginInfo::new(url(&format!("https://example.com/{n}")), name(n))),
    )
    .unwrap()
}

fn parameter() -> impl Strategy<Value = SelectorParameter<PluginName>> {
    prop_oneof![
        (-1000i32..1000).prop_map(|n| SelectorParameter::Number(f64::from(n))),
        (-1000i32..1000).prop_map(|n| SelectorParameter::Number(f64::from(n) / 8.0)),
        "[a-zA-Z0-9 ,()\"\\\\]{0,8}".prop_map(SelectorParameter::String),
        NAME.prop_map(|n| SelectorParameter::Selector(PluginSelector::new(name(&n), ""))),
    ]
}

proptest! {
    #[test]
    fn test_info_set_text_round_trip(names in prop::collection::btree_set(NAME, 0..8)) {
        let infos = infos_for(&names);
        let parsed = PluginInfoSet::<PluginName>::parse(&infos.to_string()).unwrap();
        prop_assert_eq!(parsed, infos);
    }

    #[test]
    fn test_info_round_trip(n in NAME, path in "[a-z0-9/]{0,12}") {
        let info = PluginInfo::new(url(&format!("https://example.com/{path}")), name(&n));
        prop_assert_eq!(PluginInfo::<PluginName>::parse(&info.to_string()).unwrap(), info);
    }

    #[test]
    fn test_selector_round_trip(
        n in NAME,
        values in prop::collection::vec(parameter(), 0..5),
    ) {
        let selector = PluginSelector::new(name(&n), "").set_values(&values).unwrap();
        let parsed = PluginSelector::<PluginName>::parse(&selector.to_string()).unwrap();
        prop_assert_eq!(parsed, selector);
    }

    #[test]
    fn test_alias_set_round_trip(
        names in prop::collection::btree_set(NAME, 1..8),
        split in 0usize..8,
        with_url in prop::collection::vec(any::<bool>(), 8),
    ) {
        let declarations: Vec<PluginAlias<PluginName>> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                if i < split {
                    return PluginAlias::new(name(n), None, None).unwrap();
                }
                let target = name(&format!("target-{n}"));
                if with_url[i] {
                    PluginAlias::new(
                        name(n),
                        Some(PluginSelector::new(target, "(1, \"x\")")),
                        Some(url(&format!("https://example.com/alias/{n}"))),
                    )
                    .unwrap()
                } else {
                    PluginAlias::new(name(n), Some(PluginSelector::new(target, "")), None).unwrap()
                }
            })
            .collect();

        let aliases = PluginAliasSet::new(declarations).unwrap();
        let parsed = PluginAliasSet::<PluginName>::parse(&aliases.to_string()).unwrap();
        prop_assert_eq!(parsed, aliases);
    }

    #[test]
    fn test_info_set_uniqueness(entries in prop::collection::vec((0u8..6, 0u8..6), 0..6)) {
        let infos: Vec<_> = entries
            .iter()
            .map(|(u, n)| {
                PluginInfo::new(url(&format!("https://example.com/{u}")), name(&format!("n{n}")))
            })
            .collect();
        let distinct_urls = entries.iter().map(|(u, _)| u).collect::<BTreeSet<_>>().len();
        let distinct_names = entries.iter().map(|(_, n)| n).collect::<BTreeSet<_>>().len();

        match PluginInfoSet::new(infos.clone()) {
            Ok(set) => {
                prop_assert_eq!(distinct_urls, entries.len());
                prop_assert_eq!(distinct_names, entries.len());
                prop_assert!(infos.iter().all(|info| set.contains(info)));
                prop_assert_eq!(set.len(), entries.len());
            }
            Err(_) => prop_assert!(distinct_urls < entries.len() || distinct_names < entries.len()),
        }
    }

    #[test]
    fn test_merge_of_plain_names_is_a_subset(
        provided in prop::collection::btree_set(NAME, 0..8),
        plain in prop::collection::btree_set(NAME, 0..8),
    ) {
        let provider = infos_for(&provided);
        let aliases = PluginAliasSet::new(
            plain.iter().map(|n| PluginAlias::new(name(n), None, None).unwrap()),
        )
        .unwrap();

        let merged = aliases.merge(&provider).unwrap();
        let expected = provider.delete_if(|info| !plain.contains(info.name().to_string().as_str()));
        prop_assert_eq!(merged, expected);
    }
}
