//! Text Checksums Repository
//!
//! Implements the ChecksumsRepository port with a line-oriented text file:
//!
//! ```text
//! 1700000000123-9F86D081884C7D65-orm:/work/schema/library.json
//! ```
//!
//! Each record is `millis-HEX-key`. The first two `-` separate the fields,
//! the key is everything after the second one and may itself contain `-`.
//! Timestamp and checksum may be empty; both separators are mandatory.

use std::path::Path;

use chrono::DateTime;

use crate::domain::entities::Checksums;
use crate::domain::ports::checksums_repository::{
    ChecksumsError, ChecksumsRepository, ChecksumsResult,
};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::value_objects::ContentChecksum;
use crate::infrastructure::fs::LocalFs;

/// Checksums persisted as text, one record per line
#[derive(Debug, Clone, Default)]
pub struct TextChecksumsRepository<F = LocalFs> {
    fs: F,
}

impl TextChecksumsRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl<F: FileSystem> TextChecksumsRepository<F> {
    /// Create with a custom file system
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

/// Parse checksums file content.
pub fn parse_checksums(content: &str) -> ChecksumsResult<Checksums> {
    let mut checksums = Checksums::new();
    for (index, raw) in content.lines().enumerate() {
        let record = raw.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }
        let malformed = |reason: &str| ChecksumsError::MalformedRecord {
            line: index + 1,
            record: record.to_string(),
            reason: reason.to_string(),
        };

        let mut fields = record.splitn(3, '-');
        let (millis, hex, key) = match (fields.next(), fields.next(), fields.next()) {
            (Some(millis), Some(hex), Some(key)) => (millis, hex, key),
            _ => return Err(malformed("expected two '-' separators")),
        };
        if key.is_empty() {
            return Err(malformed("empty key"));
        }

        if !millis.is_empty() {
            let date = millis
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .ok_or_else(|| malformed("invalid timestamp"))?;
            checksums.set_modification_date(key, date);
        }
        if !hex.is_empty() {
            let checksum =
                ContentChecksum::from_hex(hex).map_err(|_| malformed("invalid checksum"))?;
            checksums.set_checksum(key, checksum);
        }
    }
    Ok(checksums)
}

/// Serialize checksums, one record per key in key order.
///
/// Two values have no text form and are written as empty fields: dates
/// before the epoch and zero-length checksums. Both read back as absent,
/// which makes the source count as modified on the next run.
pub fn format_checksums(checksums: &Checksums) -> String {
    let mut out = String::new();
    for key in checksums.keys() {
        let millis = match checksums.modification_date(key).map(|d| d.timestamp_millis()) {
            Some(millis) if millis >= 0 => millis.to_string(),
            Some(millis) => {
                tracing::warn!(key, millis, "modification date before the epoch not persisted");
                String::new()
            }
            None => String::new(),
        };
        let hex = match checksums.checksum(key) {
            Some(checksum) if checksum.is_empty() => {
                tracing::warn!(key, "empty checksum not persisted");
                String::new()
            }
            Some(checksum) => checksum.to_hex(),
            None => String::new(),
        };
        out.push_str(&format!("{}-{}-{}\n", millis, hex, key));
    }
    out
}

impl<F: FileSystem> ChecksumsRepository for TextChecksumsRepository<F> {
    fn load(&self, path: &Path) -> ChecksumsResult<Checksums> {
        if !self.fs.exists(path) {
            return Ok(Checksums::new());
        }
        let content = self.fs.read(path)?;
        parse_checksums(&content)
    }

    fn save(&self, checksums: &Checksums, path: &Path) -> ChecksumsResult<()> {
        let mut merged = checksums.clone();
        match self.load(path) {
            Ok(on_disk) => merged.merge_missing_from(&on_disk),
            Err(err @ ChecksumsError::MalformedRecord { .. }) => {
                tracing::warn!(path = %path.display(), error = %err, "replacing unreadable checksums file");
            }
            Err(err) => return Err(err),
        }
        self.fs
            .write_bytes(path, format_checksums(&merged).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn millis(ms: i64) -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn parses_records_with_dashes_in_key() {
        let checksums = parse_checksums("1000-AB12-unitA:/src/my-file.xml\n").unwrap();
        let key = "unitA:/src/my-file.xml";
        assert_eq!(checksums.modification_date(key), Some(millis(1000)));
        assert_eq!(checksums.checksum(key).unwrap().as_bytes(), &[0xAB, 0x12]);
    }

    #[test]
    fn empty_fields_are_allowed() {
        let checksums = parse_checksums("--k1\n5--k2\n-FF-k3\n\n").unwrap();
        assert!(checksums.contains("k1"));
        assert!(checksums.checksum("k1").is_none());
        assert!(checksums.modification_date("k1").is_none());
        assert_eq!(checksums.modification_date("k2"), Some(millis(5)));
        assert!(checksums.checksum("k2").is_none());
        assert_eq!(checksums.checksum("k3").unwrap().to_hex(), "FF");
    }

    #[test]
    fn malformed_records_report_line() {
        for (content, line) in [
            ("1000AB12key\n", 1),
            ("1-AB-ok\n1000-AB12\n", 2),
            ("x-AB-key\n", 1),
            ("1-XYZ-key\n", 1),
            ("1-+A+B-key\n", 1),
            ("1-AB-\n", 1),
        ] {
            match parse_checksums(content) {
                Err(ChecksumsError::MalformedRecord { line: actual, .. }) => {
                    assert_eq!(actual, line, "content {:?}", content)
                }
                other => panic!("expected malformed record for {:?}, got {:?}", content, other),
            }
        }
    }

    #[test]
    fn format_uses_uppercase_hex_and_key_order() {
        let mut checksums = Checksums::new();
        checksums.set_checksum("b", ContentChecksum::from_bytes(vec![0xab, 0x01]));
        checksums.set_modification_date("b", millis(7));
        checksums.set_modification_date("a", millis(3));
        assert_eq!(format_checksums(&checksums), "3--a\n7-AB01-b\n");
    }

    #[test]
    fn values_without_text_form_read_back_as_absent() {
        let mut checksums = Checksums::new();
        checksums.set_modification_date("old", millis(-5));
        checksums.set_checksum("old", ContentChecksum::from_bytes(vec![0x01]));
        checksums.set_checksum("empty", ContentChecksum::from_bytes(Vec::new()));
        checksums.set_modification_date("empty", millis(9));

        let text = format_checksums(&checksums);
        assert_eq!(text, "9--empty\n-01-old\n");

        let parsed = parse_checksums(&text).unwrap();
        assert!(parsed.modification_date("old").is_none());
        assert!(parsed.checksum("empty").is_none());
        assert_eq!(parsed.modification_date("empty"), Some(millis(9)));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = TextChecksumsRepository::new();
        let loaded = repo.load(&dir.path().join("none.checksums")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_keeps_unrelated_keys_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache").join("last-source-changes.checksums");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "1-AA-old\n2-BB-touched\n").unwrap();

        let mut current = Checksums::new();
        current.set_checksum("touched", ContentChecksum::from_bytes(vec![0xCC]));
        current.set_modification_date("touched", millis(9));

        let repo = TextChecksumsRepository::new();
        repo.save(&current, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1-AA-old\n9-CC-touched\n");
    }

    #[test]
    fn save_replaces_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("c.checksums");
        std::fs::write(&path, "garbage\n").unwrap();

        let mut current = Checksums::new();
        current.set_modification_date("k", millis(1));
        TextChecksumsRepository::new().save(&current, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1--k\n");
    }
}
