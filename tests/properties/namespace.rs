//! Property tests for namespaces and qualified names.

use proptest::prelude::*;

use weaver::domain::services::Options;
use weaver::domain::value_objects::{Namespace, QualifiedName};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").unwrap()
}

fn namespace() -> impl Strategy<Value = Namespace> {
    proptest::collection::vec(segment(), 0..=4)
        .prop_map(|segments| Namespace::parse(&segments.join(".")).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Display and parse agree for every valid namespace.
    #[test]
    fn property_namespace_display_parses_back(ns in namespace()) {
        let reparsed = Namespace::parse(&ns.to_string()).unwrap();
        prop_assert_eq!(reparsed, ns);
    }

    /// PROPERTY: A namespace is an ancestor of all of its children, and
    /// `ancestors_or_self` walks up to the root.
    #[test]
    fn property_ancestors_end_at_root(ns in namespace(), child in segment()) {
        let deeper = ns.child(&child).unwrap();
        prop_assert!(ns.is_ancestor_or_self_of(&deeper));
        prop_assert!(!deeper.is_ancestor_or_self_of(&ns));

        let chain: Vec<Namespace> = deeper.ancestors_or_self().collect();
        prop_assert_eq!(chain.len(), deeper.depth() + 1);
        prop_assert_eq!(chain.first(), Some(&deeper));
        prop_assert!(chain.last().unwrap().is_root());
    }

    /// PROPERTY: An unqualified key lands in the default namespace; a
    /// qualified key ignores it.
    #[test]
    fn property_resolve_uses_default_only_for_plain_keys(
        ns in namespace(),
        other in namespace(),
        name in segment(),
    ) {
        let plain = QualifiedName::resolve(&name, &ns).unwrap();
        prop_assert_eq!(plain.namespace(), &ns);
        prop_assert_eq!(plain.name(), name.as_str());

        if !other.is_root() {
            let key = format!("{}.{}", other, name);
            let qualified = QualifiedName::resolve(&key, &ns).unwrap();
            prop_assert_eq!(qualified.namespace(), &other);
        }
    }

    /// PROPERTY: The closest binding in the hierarchy wins.
    #[test]
    fn property_closest_option_wins(ns in namespace(), child in segment(), key in segment()) {
        let deeper = ns.child(&child).unwrap();
        let mut options = Options::new();
        options.set(QualifiedName::new(ns.clone(), &key).unwrap(), "outer".to_string());

        let lookup = QualifiedName::new(deeper.clone(), &key).unwrap();
        prop_assert_eq!(options.get_in_hierarchy(&lookup), Some("outer"));

        options.set(QualifiedName::new(deeper, &key).unwrap(), "inner".to_string());
        prop_assert_eq!(options.get_in_hierarchy(&lookup), Some("inner"));
    }
}
