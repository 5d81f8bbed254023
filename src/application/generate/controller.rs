//! Generation Controller
//!
//! Drives one run over a list of generation units:
//! 1. Load the checksums of the previous run (incremental units only)
//! 2. For every output, iterate its sources
//! 3. Skip unchanged sources when the unit asks for it, transform the rest
//! 4. For every selected model node: resolve the file name, consult the
//!    skip decider and existing-target strategy, execute the content outlet,
//!    postprocess and hand the result to the strategy
//! 5. Persist the checksums of this run
//!
//! Any failure aborts the unit and the run.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{
    source_change_key, Checksums, ControllerState, FilenameSource, ModelPath, Output, Source,
    UnitConfiguration,
};
use crate::domain::outlet::{ExecutionContext, OutletRef, OutletResult};
use crate::domain::ports::{
    ChecksumsError, ChecksumsRepository, ComponentFactory, FileSystem, GenerationEvent,
    GenerationEventSink, NoopEventSink, TargetFile,
};
use crate::domain::value_objects::{LineBreak, LineBreakPolicy};
use crate::error::{ConfigurationError, GenerationError, SourceError, WeaverError, WeaverResult};

use super::components::OutputComponents;
use super::options::LogSettings;
use super::result::{GenerationReport, UnitReport};

pub struct Controller {
    factory: Arc<dyn ComponentFactory>,
    fs: Arc<dyn FileSystem>,
    checksums: Arc<dyn ChecksumsRepository>,
    events: Arc<dyn GenerationEventSink>,
    log: LogSettings,
    state: ControllerState,
}

/// Where in the pipeline a failure happened
struct Location<'a> {
    output: &'a Output,
    source: &'a str,
}

impl Location<'_> {
    fn wrap(&self, model_path: String, err: impl Into<WeaverError>) -> WeaverError {
        WeaverError::Context {
            output: self.output.name().to_string(),
            source_description: self.source.to_string(),
            model_path,
            cause: Box::new(err.into()),
        }
    }
}

impl Controller {
    pub fn new(
        factory: Arc<dyn ComponentFactory>,
        fs: Arc<dyn FileSystem>,
        checksums: Arc<dyn ChecksumsRepository>,
        log: LogSettings,
    ) -> Self {
        Self {
            factory,
            fs,
            checksums,
            events: Arc::new(NoopEventSink),
            log,
            state: ControllerState::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn GenerationEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Run state shared by all units of this controller
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Processes `units` in order, stopping at the first failing unit.
    pub fn run(&mut self, units: &mut [UnitConfiguration]) -> WeaverResult<GenerationReport> {
        let mut report = GenerationReport::new();
        for unit in units.iter_mut() {
            let unit_report = self.run_unit(unit)?;
            report.units.push(unit_report);
        }
        Ok(report)
    }

    /// Processes a single unit. Run-scoped variables survive into later calls.
    pub fn run_unit(&mut self, unit: &mut UnitConfiguration) -> WeaverResult<UnitReport> {
        let mut report = UnitReport::new(&unit.name);
        tracing::info!(unit = %unit.name, outputs = unit.outputs.len(), "starting generation unit");
        self.events.on_event(GenerationEvent::UnitStarted {
            unit: unit.name.clone(),
            output_count: unit.outputs.len(),
        });

        let result = self.generate_unit(unit, &mut report);
        self.state.end_generation();

        match result {
            Ok(()) => {
                tracing::info!(
                    unit = %unit.name,
                    written = report.written.len(),
                    "generation unit complete"
                );
                self.events.on_event(GenerationEvent::UnitCompleted {
                    unit: unit.name.clone(),
                    written_count: report.written.len(),
                    skipped_count: report.skipped_nodes + report.skipped_sources,
                });
                Ok(report)
            }
            Err(err) => {
                self.events.on_event(GenerationEvent::UnitFailed {
                    unit: unit.name.clone(),
                    error: error_chain(&err),
                });
                Err(err.in_unit(&unit.name))
            }
        }
    }

    fn generate_unit(
        &mut self,
        unit: &mut UnitConfiguration,
        report: &mut UnitReport,
    ) -> WeaverResult<()> {
        self.state.begin_unit(&unit.name, &unit.template_set);
        let checksums_path = unit.checksums_path();
        self.state.last_checksums = if unit.run_only_on_source_change {
            self.load_prior_checksums(&checksums_path)?
        } else {
            Checksums::new()
        };

        // outputs carry per-node caches; detach them so the rest of the
        // unit stays shared with executing outlets
        let mut outputs = std::mem::take(&mut unit.outputs);
        let result = outputs
            .iter_mut()
            .try_for_each(|output| self.generate_output(unit, output, report));
        unit.outputs = outputs;
        result?;

        tracing::debug!(path = %checksums_path.display(), "persisting source checksums");
        self.checksums
            .save(&self.state.this_checksums, &checksums_path)?;
        Ok(())
    }

    /// An unreadable checksums file means every source counts as modified;
    /// it is replaced when the unit completes.
    fn load_prior_checksums(&self, path: &Path) -> WeaverResult<Checksums> {
        match self.checksums.load(path) {
            Ok(checksums) => Ok(checksums),
            Err(err @ ChecksumsError::MalformedRecord { .. }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unreadable checksums file, regenerating all sources"
                );
                Ok(Checksums::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn generate_output(
        &mut self,
        unit: &UnitConfiguration,
        output: &mut Output,
        report: &mut UnitReport,
    ) -> WeaverResult<()> {
        tracing::debug!(output = %output.name(), "starting output");
        self.state.output_name = Some(output.name().to_string());
        self.detail(GenerationEvent::OutputStarted {
            unit: unit.name.clone(),
            output: output.name().to_string(),
        });

        let mut components = OutputComponents::resolve(self.factory.as_ref(), output)?;
        let provider_description = components.provider.description();
        let location = |output: &Output, err: SourceError| {
            Location {
                output,
                source: &provider_description,
            }
            .wrap(String::from("-"), err)
        };

        components
            .provider
            .init(unit)
            .map_err(|err| location(output, err))?;
        while components.provider.has_next() {
            let Some(source) = components
                .provider
                .next_source()
                .map_err(|err| location(output, err))?
            else {
                break;
            };
            self.generate_source(unit, output, &components, source, report)?;
        }

        self.state.clear_source();
        Ok(())
    }

    fn generate_source(
        &mut self,
        unit: &UnitConfiguration,
        output: &mut Output,
        components: &OutputComponents,
        source: Source,
        report: &mut UnitReport,
    ) -> WeaverResult<()> {
        let description = source.description().to_string();

        if let Some(file) = source.source_file() {
            let key = source_change_key(&unit.template_set, file);
            let modified = self.state.source_changes.is_modified(
                &key,
                source.content_checksum(),
                source.last_modified(),
                &self.state.last_checksums,
            );
            if let Some(checksum) = source.content_checksum() {
                self.state.this_checksums.set_checksum(key.clone(), checksum.clone());
            }
            if let Some(date) = source.last_modified() {
                self.state.this_checksums.set_modification_date(key, date);
            }
            if unit.run_only_on_source_change && !modified {
                tracing::info!(output = %output.name(), source = %description, "source unchanged, skipping");
                report.skipped_sources += 1;
                self.detail(GenerationEvent::SourceSkipped {
                    output: output.name().to_string(),
                    source: description,
                });
                return Ok(());
            }
        }

        let file = source.source_file().map(Path::to_path_buf);
        let mut root = source.into_root_element();
        for transformer in &components.transformers {
            let location = Location {
                output,
                source: &description,
            };
            root = transformer
                .transform(root, &self.state)
                .map_err(|err| location.wrap(String::from("-"), err))?;
            if root.is_empty() {
                return Err(location.wrap(
                    String::from("-"),
                    SourceError::EmptyRoot {
                        transformer: transformer.name().to_string(),
                    },
                ));
            }
        }

        let paths = components.selector.select(&root, &ModelPath::root());
        tracing::debug!(
            source = %description,
            selector = components.selector.expression(),
            nodes = paths.len(),
            "selected model nodes"
        );
        self.state.set_source(&description, file.as_deref(), root);

        for path in paths {
            self.state.set_current_path(path);
            let result = self.generate_node(unit, output, components, report);
            output.clear_resolved_filename();
            self.state.end_file();
            if let Err(err) = result {
                let model_path = self.state.describe_current_path();
                return Err(Location {
                    output,
                    source: &description,
                }
                .wrap(model_path, err));
            }
        }
        Ok(())
    }

    fn generate_node(
        &mut self,
        unit: &UnitConfiguration,
        output: &mut Output,
        components: &OutputComponents,
        report: &mut UnitReport,
    ) -> WeaverResult<()> {
        if self.log.traces_outlets() {
            tracing::trace!(node = %self.state.describe_current_path(), "generating node");
        }

        let filename = self.resolve_filename(unit, output)?;
        let path = unit
            .target_path(output.output_dir_key(), &filename)
            .ok_or_else(|| ConfigurationError::UnknownOutputDir {
                output: output.name().to_string(),
                key: output.output_dir_key().to_string(),
            })?;
        self.state.output_file = Some(path.clone());
        let target = TargetFile {
            output_dir_key: output.output_dir_key().to_string(),
            filename,
            path,
            encoding: output.encoding(),
        };

        if let Some(decider) = &components.skip_decider {
            if !decider.proceed(&self.state) {
                self.skip_node(output, "skip decider declined", report);
                return Ok(());
            }
        }
        if !components.strategy.before_generation(&target, unit)? {
            let reason = format!(
                "{} strategy declined {}",
                components.strategy.name(),
                target.path.display()
            );
            self.skip_node(output, &reason, report);
            return Ok(());
        }

        let content = self.execute(unit, output.content_outlet())?;
        let content = match content {
            OutletResult::Text(text) => {
                let mut text = text;
                for processor in &components.processors {
                    text = processor.process(&text)?;
                }
                OutletResult::Text(self.apply_line_break(output, &target, text)?)
            }
            bytes @ OutletResult::Bytes(_) => bytes,
        };

        if let Some(parent) = target.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        components
            .strategy
            .after_generation(&target, &content, unit)?;

        tracing::info!(output = %output.name(), path = %target.path.display(), "written");
        self.detail(GenerationEvent::FileWritten {
            output: output.name().to_string(),
            path: target.path.clone(),
        });
        report.written.push(target.path);
        Ok(())
    }

    fn resolve_filename(
        &mut self,
        unit: &UnitConfiguration,
        output: &mut Output,
    ) -> WeaverResult<String> {
        let reference = match output.filename_source() {
            FilenameSource::Fixed(name) => return Ok(name.clone()),
            FilenameSource::Outlet(reference) => reference.clone(),
        };
        let filename = self
            .execute(unit, &reference)?
            .into_text()
            .map_err(|_| ConfigurationError::FilenameNotText {
                output: output.name().to_string(),
                outlet: reference.name.to_string(),
            })?;
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(ConfigurationError::InvalidParameter {
                component: format!("output '{}'", output.name()),
                parameter: "filename_outlet".to_string(),
                message: format!("outlet '{}' produced an empty file name", reference.name),
            }
            .into());
        }
        output.set_resolved_filename(filename);
        Ok(filename.to_string())
    }

    fn execute(
        &mut self,
        unit: &UnitConfiguration,
        reference: &OutletRef,
    ) -> WeaverResult<OutletResult> {
        if self.log.traces_outlets() {
            tracing::trace!(outlet = %reference, "executing outlet");
        }
        let mut context = ExecutionContext::new(&unit.outlets, &unit.options, &mut self.state);
        Ok(context.execute(reference)?)
    }

    fn apply_line_break(
        &self,
        output: &mut Output,
        target: &TargetFile,
        text: String,
    ) -> WeaverResult<String> {
        let line_break = match output.line_break() {
            LineBreakPolicy::Keep => None,
            LineBreakPolicy::Lf => Some(LineBreak::Lf),
            LineBreakPolicy::Crlf => Some(LineBreak::Crlf),
            LineBreakPolicy::Cr => Some(LineBreak::Cr),
            LineBreakPolicy::Existing => self.existing_line_break(output, target)?,
        };
        Ok(match line_break {
            Some(line_break) => line_break.apply(&text),
            None => text,
        })
    }

    fn existing_line_break(
        &self,
        output: &mut Output,
        target: &TargetFile,
    ) -> WeaverResult<Option<LineBreak>> {
        let path = target.path.as_path();
        if let Some(cached) = output.cached_line_break(path) {
            return Ok(Some(cached));
        }
        if !self.fs.exists(path) {
            return Ok(None);
        }
        let bytes = self.fs.read_bytes(path)?;
        let existing = target
            .encoding
            .decode(&bytes)
            .map_err(GenerationError::from)?;
        let detected = LineBreak::detect(&existing);
        if let Some(line_break) = detected {
            output.cache_line_break(path, line_break);
        }
        Ok(detected)
    }

    fn skip_node(&self, output: &Output, reason: &str, report: &mut UnitReport) {
        let node = self.state.describe_current_path();
        tracing::debug!(output = %output.name(), node = %node, reason, "node skipped");
        report.skipped_nodes += 1;
        self.detail(GenerationEvent::NodeSkipped {
            output: output.name().to_string(),
            node,
            reason: reason.to_string(),
        });
    }

    fn detail(&self, event: GenerationEvent) {
        if self.log.detailed_events && self.events.wants_detailed_events() {
            self.events.on_event(event);
        }
    }
}

/// Error message with all causes, outermost first.
fn error_chain(err: &WeaverError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
