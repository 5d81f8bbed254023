//! Incremental-build decision
//!
//! Decides whether a source changed since the checksums of the last run were
//! recorded. Whenever something cannot be determined the source counts as
//! modified.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::entities::{truncate_to_millis, Checksums};
use crate::domain::value_objects::ContentChecksum;

/// True unless the prior run recorded the same checksum and a modification
/// date not older than the current one.
pub fn check_source_modified(
    source_key: &str,
    current_checksum: Option<&ContentChecksum>,
    current_modified: Option<DateTime<Utc>>,
    prior: &Checksums,
) -> bool {
    let Some(current_modified) = current_modified else {
        return true;
    };
    let Some(prior_modified) = prior.modification_date(source_key) else {
        return true;
    };
    if prior_modified < truncate_to_millis(current_modified) {
        return true;
    }
    match (prior.checksum(source_key), current_checksum) {
        (Some(prior), Some(current)) => prior.as_bytes() != current.as_bytes(),
        _ => true,
    }
}

/// Caches decisions per source key for the duration of one run; a source
/// visited by several outputs is judged once.
#[derive(Debug, Clone, Default)]
pub struct SourceChangeTracker {
    decisions: HashMap<String, bool>,
}

impl SourceChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_modified(
        &mut self,
        source_key: &str,
        current_checksum: Option<&ContentChecksum>,
        current_modified: Option<DateTime<Utc>>,
        prior: &Checksums,
    ) -> bool {
        if let Some(&decision) = self.decisions.get(source_key) {
            return decision;
        }
        let decision =
            check_source_modified(source_key, current_checksum, current_modified, prior);
        self.decisions.insert(source_key.to_string(), decision);
        decision
    }

    pub fn cached(&self, source_key: &str) -> Option<bool> {
        self.decisions.get(source_key).copied()
    }
}
