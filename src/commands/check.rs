use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use weaver::{load_unit, LocalFs, Overrides, Plugins, WeaverError};

pub fn cmd_check(configs: &[PathBuf], json: bool) -> Result<()> {
    let plugins = Plugins::builtin(Arc::new(LocalFs::new()));
    if json {
        super::write_event(&serde_json::json!({
            "event": "start",
            "command": "check",
            "units": configs.len(),
        }))?;
    }

    let mut warning_count = 0;
    for path in configs {
        let (unit, warnings) = load_unit(path, &plugins, Overrides::default())
            .map_err(WeaverError::from)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        warning_count += warnings.len();

        if json {
            for warning in &warnings {
                super::write_event(&serde_json::json!({
                    "event": "warning",
                    "file": path.display().to_string(),
                    "key": warning.key,
                    "line": warning.line,
                    "suggestion": warning.suggestion,
                }))?;
            }
            super::write_event(&serde_json::json!({
                "event": "unit_valid",
                "file": path.display().to_string(),
                "unit": unit.name,
                "outlets": unit.outlets.len(),
                "outputs": unit.outputs.len(),
            }))?;
            continue;
        }

        // warnings were already logged while loading
        println!(
            "{}: unit '{}' is valid ({} outlets, {} outputs, {} warnings)",
            path.display(),
            unit.name,
            unit.outlets.len(),
            unit.outputs.len(),
            warnings.len()
        );
    }

    if json {
        super::write_event(&serde_json::json!({
            "event": "complete",
            "command": "check",
            "units": configs.len(),
            "warnings": warning_count,
        }))?;
    }
    Ok(())
}
