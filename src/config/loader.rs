//! Unit file loading

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigurationError;

use super::types::{Overrides, UnitFile};

/// Environment variable overriding `unit.run_only_on_source_change`
pub const ENV_RUN_ONLY_ON_SOURCE_CHANGE: &str = "WEAVER_RUN_ONLY_ON_SOURCE_CHANGE";
/// Environment variable overriding `unit.cache_dir`
pub const ENV_CACHE_DIR: &str = "WEAVER_CACHE_DIR";

/// Load a unit file and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(UnitFile, Vec<ConfigWarning>), ConfigurationError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

/// Parse unit file content; `path` only labels errors and warnings.
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> Result<(UnitFile, Vec<ConfigWarning>), ConfigurationError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let file: UnitFile = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigurationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((file, warnings))
}

/// Overrides from `WEAVER_*` environment variables
pub fn env_overrides() -> Overrides {
    overrides_from(|key| std::env::var(key).ok())
}

/// Overrides read through `lookup`, so tests need not touch the process
/// environment.
pub fn overrides_from(lookup: impl Fn(&str) -> Option<String>) -> Overrides {
    let run_only_on_source_change = lookup(ENV_RUN_ONLY_ON_SOURCE_CHANGE).and_then(|value| {
        match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            other => {
                tracing::warn!(
                    "ignoring {}={}: expected true or false",
                    ENV_RUN_ONLY_ON_SOURCE_CHANGE,
                    other
                );
                None
            }
        }
    });
    let cache_dir = lookup(ENV_CACHE_DIR)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from);

    Overrides {
        run_only_on_source_change,
        cache_dir,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "unit",
        "name",
        "template_set",
        "namespace",
        "run_only_on_source_change",
        "cache_dir",
        "checksums_file",
        "base_dir",
        "output_dirs",
        "options",
        "source_defaults",
        "outlets",
        "mergepoints",
        "outlet",
        "mergepoint",
        "position",
        "outputs",
        "content_outlet",
        "filename",
        "filename_outlet",
        "outlet_namespace",
        "existing_target_strategy",
        "output_dir_key",
        "encoding",
        "line_break",
        "postprocessors",
        "source",
        "element",
        "transformers",
        "skip_decider",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
