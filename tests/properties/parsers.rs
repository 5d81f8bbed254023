//! Robustness properties for the expression parsers.

use proptest::prelude::*;

use weaver::domain::outlet::Template;
use weaver::domain::services::Selector;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `Template::parse` never panics on arbitrary input.
    #[test]
    fn property_template_parse_never_panics(source in "(?s).{0,128}") {
        let _ = Template::parse(&source);
    }

    /// PROPERTY: Text without braces is a template that renders verbatim,
    /// so it lists no mergepoints.
    #[test]
    fn property_plain_text_has_no_mergepoints(source in "[^{}]{0,64}") {
        let template = Template::parse(&source).unwrap();
        prop_assert_eq!(template.mergepoints().count(), 0);
    }

    /// PROPERTY: `Selector::parse` never panics on arbitrary input.
    #[test]
    fn property_selector_parse_never_panics(expression in "(?s).{0,64}") {
        let _ = Selector::parse(&expression);
    }
}
