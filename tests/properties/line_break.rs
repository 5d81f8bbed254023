//! Property tests for line break detection and conversion.

use proptest::prelude::*;

use weaver::domain::value_objects::LineBreak;

fn line_break() -> impl Strategy<Value = LineBreak> {
    prop_oneof![Just(LineBreak::Lf), Just(LineBreak::Crlf), Just(LineBreak::Cr)]
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(proptest::string::string_regex("[A-Za-z0-9 ;{}]{0,20}").unwrap(), 2..10)
}

proptest! {
    /// PROPERTY: Converted content is detected as the target line break.
    #[test]
    fn property_apply_then_detect(lines in lines(), target in line_break()) {
        let content = lines.join("\n");
        let converted = target.apply(&content);
        prop_assert_eq!(LineBreak::detect(&converted), Some(target));
    }

    /// PROPERTY: Conversion is idempotent and keeps the text between breaks.
    #[test]
    fn property_apply_is_idempotent(lines in lines(), first in line_break(), second in line_break()) {
        let content = lines.join("\r\n");
        let once = second.apply(&first.apply(&content));
        prop_assert_eq!(second.apply(&once), once.clone());
        prop_assert_eq!(LineBreak::Lf.apply(&once), lines.join("\n"));
    }
}
