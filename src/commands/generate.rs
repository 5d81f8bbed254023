use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use weaver::domain::ports::{FileSystem, GenerationEventSink};
use weaver::{
    load_unit, Controller, JsonEventSink, LocalFs, LogSettings, Overrides, Plugins,
    TextChecksumsRepository, TracingEventSink, UnitConfiguration, WeaverError,
};

pub fn cmd_generate(
    configs: &[PathBuf],
    force_regenerate: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(LocalFs::new());
    let plugins = Plugins::builtin(fs.clone());
    let overrides = Overrides {
        run_only_on_source_change: force_regenerate.then_some(false),
        cache_dir: None,
    };

    // every unit is validated before the first one runs
    let mut units: Vec<UnitConfiguration> = Vec::with_capacity(configs.len());
    for path in configs {
        let (unit, _warnings) = load_unit(path, &plugins, overrides.clone())
            .map_err(WeaverError::from)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        units.push(unit);
    }

    let log = LogSettings::from_verbosity(verbose).with_detailed_events(json || verbose > 0);
    let events: Arc<dyn GenerationEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink::new(log.detailed_events))
    };

    if json {
        super::write_event(&serde_json::json!({
            "event": "start",
            "command": "generate",
            "units": units.len(),
            "force_regenerate": force_regenerate,
        }))?;
    }

    let mut controller = Controller::new(
        Arc::new(plugins),
        fs,
        Arc::new(TextChecksumsRepository::new()),
        log,
    )
    .with_events(events);
    let report = controller.run(&mut units)?;

    if json {
        super::write_event(&serde_json::json!({
            "event": "complete",
            "command": "generate",
            "units": report.units.len(),
            "written": report.written_count(),
            "skipped": report.skipped_count(),
        }))?;
        return Ok(());
    }

    for unit in &report.units {
        println!(
            "{}: {} file(s) written, {} skipped",
            unit.unit,
            unit.written.len(),
            unit.skipped_nodes + unit.skipped_sources
        );
        if verbose > 0 {
            for path in &unit.written {
                println!("  {}", path.display());
            }
        }
    }
    if !report.has_changes() {
        println!("Nothing to generate.");
    }
    Ok(())
}
