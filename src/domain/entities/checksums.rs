//! Checksums entity - per-source content hashes and modification dates
//!
//! Used to decide whether a source changed since the last generation run.
//! It's a pure data structure - I/O is handled by `ChecksumsRepository`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::ContentChecksum;

/// Build the source-change key for a source file: `{template_set}:{absolute path}`.
pub fn source_change_key(template_set: &str, path: &Path) -> String {
    format!("{}:{}", template_set, path.to_string_lossy().replace('\\', "/"))
}

/// Drop sub-millisecond precision; persisted dates are millisecond-exact.
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or(date)
}

/// Two parallel maps keyed by source-change key.
///
/// A key may be present in one map and absent in the other; absence means
/// "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checksums {
    checksums: BTreeMap<String, ContentChecksum>,
    modification_dates: BTreeMap<String, DateTime<Utc>>,
}

impl Checksums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.checksums.is_empty() && self.modification_dates.is_empty()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn checksum(&self, key: &str) -> Option<&ContentChecksum> {
        self.checksums.get(key)
    }

    pub fn set_checksum(&mut self, key: impl Into<String>, checksum: ContentChecksum) {
        self.checksums.insert(key.into(), checksum);
    }

    pub fn modification_date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.modification_dates.get(key).copied()
    }

    pub fn set_modification_date(&mut self, key: impl Into<String>, date: DateTime<Utc>) {
        self.modification_dates
            .insert(key.into(), truncate_to_millis(date));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.checksums.contains_key(key) || self.modification_dates.contains_key(key)
    }

    /// Union of keys of both maps, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.checksums
            .keys()
            .chain(self.modification_dates.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
    }

    /// Copy entries for keys this instance does not know at all.
    ///
    /// Keys touched in this run win; unrelated keys from `other` survive.
    pub fn merge_missing_from(&mut self, other: &Checksums) {
        for key in other.keys() {
            if self.contains(key) {
                continue;
            }
            if let Some(checksum) = other.checksum(key) {
                self.checksums.insert(key.to_string(), checksum.clone());
            }
            if let Some(date) = other.modification_date(key) {
                self.modification_dates.insert(key.to_string(), date);
            }
        }
    }
}
