//! Property tests for the checksums file format.

use chrono::DateTime;
use proptest::prelude::*;

use weaver::domain::entities::Checksums;
use weaver::domain::value_objects::ContentChecksum;
use weaver::infrastructure::repositories::{format_checksums, parse_checksums};

fn key() -> impl Strategy<Value = String> {
    // keys may contain '-' and ':' (template set and path)
    proptest::string::string_regex("[a-z]{1,6}:/[a-z0-9_./-]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Records written by `format_checksums` read back with the
    /// same dates and checksums.
    #[test]
    fn property_written_records_read_back(
        records in proptest::collection::btree_map(
            key(),
            (0i64..4_102_444_800_000, proptest::collection::vec(any::<u8>(), 0..16)),
            0..8,
        )
    ) {
        let mut checksums = Checksums::new();
        for (key, (millis, content)) in &records {
            checksums.set_modification_date(key.clone(), DateTime::from_timestamp_millis(*millis).unwrap());
            checksums.set_checksum(key.clone(), ContentChecksum::of(content));
        }

        let parsed = parse_checksums(&format_checksums(&checksums)).unwrap();
        prop_assert_eq!(parsed.len(), records.len());
        for (key, (millis, content)) in &records {
            prop_assert_eq!(
                parsed.modification_date(key).map(|d| d.timestamp_millis()),
                Some(*millis)
            );
            prop_assert_eq!(
                parsed.checksum(key).map(ContentChecksum::to_hex),
                Some(ContentChecksum::of(content).to_hex())
            );
        }
    }

    /// PROPERTY: `parse_checksums` never panics on arbitrary input.
    #[test]
    fn property_parse_checksums_never_panics(content in "(?s).{0,256}") {
        let _ = parse_checksums(&content);
    }
}
