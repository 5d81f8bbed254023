//! Generate Use Case Tests

use super::*;
use crate::domain::entities::{
    ComponentSpec, ControllerState, FilenameSource, ModelNode, Output, Params, SourceSpec,
    UnitConfiguration,
};
use crate::domain::outlet::{
    ExecutionContext, MergepointMapping, MergepointPosition, Outlet, OutletRef, OutletResult,
};
use crate::domain::ports::{GenerationEvent, GenerationEventSink, SourceTransformer};
use crate::domain::value_objects::{LineBreakPolicy, Namespace, QualifiedName};
use crate::error::{ConfigurationError, GenerationError, SourceError, WeaverError};
use crate::infrastructure::repositories::parse_checksums;
use crate::infrastructure::{LocalFs, Plugins, TextChecksumsRepository};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Outlet that counts its invocations
#[derive(Debug)]
struct CountingOutlet {
    name: QualifiedName,
    text: String,
    calls: Arc<AtomicUsize>,
}

impl Outlet for CountingOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "counting"
    }

    fn execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(OutletResult::Text(self.text.clone()))
    }
}

/// Transformer that throws the whole model away
#[derive(Debug)]
struct ClearRoot;

impl SourceTransformer for ClearRoot {
    fn name(&self) -> &str {
        "clear"
    }

    fn transform(&self, _root: ModelNode, _state: &ControllerState) -> Result<ModelNode, SourceError> {
        Ok(ModelNode::new(""))
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<GenerationEvent>>,
}

impl GenerationEventSink for RecordingSink {
    fn on_event(&self, event: GenerationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn name(s: &str) -> QualifiedName {
    QualifiedName::resolve(s, &Namespace::root()).unwrap()
}

fn reference(s: &str) -> OutletRef {
    OutletRef::parse(s, &Namespace::root()).unwrap()
}

fn template(unit: &mut UnitConfiguration, outlet: &str, text: &str) {
    let plugins = Plugins::builtin(Arc::new(LocalFs::new()));
    let spec =
        ComponentSpec::new("template").with_params(Params::new().with_text("template", text));
    let outlet = crate::domain::ports::ComponentFactory::outlet(
        &plugins,
        name(outlet),
        &spec,
        Path::new("."),
    )
    .unwrap();
    unit.outlets.register(outlet).unwrap();
}

fn inline_source(document: &str, element: &str) -> SourceSpec {
    SourceSpec {
        provider: Some(
            ComponentSpec::new("inline").with_params(Params::new().with_text("document", document)),
        ),
        element: Some(element.to_string()),
        ..SourceSpec::default()
    }
}

fn file_source(dir: &str, element: &str) -> SourceSpec {
    SourceSpec {
        provider: Some(
            ComponentSpec::new("file").with_params(Params::new().with_text("base_dir", dir)),
        ),
        element: Some(element.to_string()),
        ..SourceSpec::default()
    }
}

fn unit_in(dir: &Path) -> UnitConfiguration {
    let mut unit = UnitConfiguration::new("test", dir);
    unit.output_dirs
        .insert("default".to_string(), dir.join("out"));
    unit
}

fn controller() -> Controller {
    let fs = Arc::new(LocalFs::new());
    Controller::new(
        Arc::new(Plugins::builtin(fs.clone())),
        fs,
        Arc::new(TextChecksumsRepository::new()),
        LogSettings::from_verbosity(1),
    )
}

const LIBRARY: &str = r#"{"library": {"book": [{"@title": "Dune"}, {"@title": "Emma"}]}}"#;

#[test]
fn generates_one_file_per_selected_node() {
    let dir = tempdir().unwrap();
    let mut unit = unit_in(dir.path());
    template(&mut unit, "lib.file", "{{attr:title|snake}}.txt");
    template(&mut unit, "lib.body", "Title: {{attr:title}}\n");
    unit.outputs.push(
        Output::new(
            name("lib.books"),
            reference("lib.body"),
            FilenameSource::Outlet(reference("lib.file")),
        )
        .with_source(inline_source(LIBRARY, "/library/book")),
    );

    let report = controller().run(std::slice::from_mut(&mut unit)).unwrap();

    assert_eq!(report.written_count(), 2);
    let out = dir.path().join("out");
    assert_eq!(
        std::fs::read_to_string(out.join("dune.txt")).unwrap(),
        "Title: Dune\n"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("emma.txt")).unwrap(),
        "Title: Emma\n"
    );
}

#[test]
fn skip_existing_does_not_execute_content_outlet() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::write(dir.path().join("out/Fixed.txt"), "hand written").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let mut unit = unit_in(dir.path());
    unit.outlets
        .register(Arc::new(CountingOutlet {
            name: name("a.content"),
            text: "generated".into(),
            calls: calls.clone(),
        }))
        .unwrap();
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.content"),
            FilenameSource::Fixed("Fixed.txt".into()),
        )
        .with_existing_target_strategy("skipExisting")
        .with_source(inline_source(LIBRARY, "/")),
    );

    let report = controller().run(std::slice::from_mut(&mut unit)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.units[0].skipped_nodes, 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/Fixed.txt")).unwrap(),
        "hand written"
    );
}

#[test]
fn mergepoint_chain_concatenates_in_order() {
    let dir = tempdir().unwrap();
    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.main", "[{{mergepoint:body}}]");
    template(&mut unit, "a.c", "C");
    template(&mut unit, "a.b", "B");
    unit.outlets
        .add_mapping(
            &name("a.main"),
            "body",
            &MergepointMapping::new(vec![reference("a.b"), reference("a.c")], MergepointPosition::Append),
        )
        .unwrap();
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.main"),
            FilenameSource::Fixed("main.txt".into()),
        )
        .with_source(inline_source(LIBRARY, "/")),
    );

    controller().run(std::slice::from_mut(&mut unit)).unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/main.txt")).unwrap(),
        "[BC]"
    );
}

#[test]
fn unchanged_sources_are_skipped_on_second_run() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("schema")).unwrap();
    std::fs::write(dir.path().join("schema/lib.json"), LIBRARY).unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let mut unit = unit_in(dir.path());
    unit.run_only_on_source_change = true;
    unit.outlets
        .register(Arc::new(CountingOutlet {
            name: name("a.content"),
            text: "x".into(),
            calls: calls.clone(),
        }))
        .unwrap();
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.content"),
            FilenameSource::Fixed("lib.txt".into()),
        )
        .with_source(file_source("schema", "/")),
    );

    let first = controller().run(std::slice::from_mut(&mut unit)).unwrap();
    assert_eq!(first.written_count(), 1);
    assert!(unit.checksums_path().exists());

    let second = controller().run(std::slice::from_mut(&mut unit)).unwrap();
    assert_eq!(second.written_count(), 0);
    assert_eq!(second.units[0].skipped_sources, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // new content always counts as modified
    std::fs::write(
        dir.path().join("schema/lib.json"),
        r#"{"library": {"book": []}}"#,
    )
    .unwrap();
    let third = controller().run(std::slice::from_mut(&mut unit)).unwrap();
    assert_eq!(third.written_count(), 1);
}

#[test]
fn skip_decider_declines_single_nodes() {
    let dir = tempdir().unwrap();
    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.file", "{{attr:title}}");
    template(&mut unit, "a.body", "x");
    let mut source = inline_source(
        r#"{"library": {"book": [{"@title": "Dune", "@generate": "true"}, {"@title": "Emma"}]}}"#,
        "//book",
    );
    source.skip_decider = Some(
        ComponentSpec::new("attribute").with_params(Params::new().with_text("attribute", "generate")),
    );
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Outlet(reference("a.file")),
        )
        .with_source(source),
    );

    let sink = Arc::new(RecordingSink::default());
    let report = controller()
        .with_events(sink.clone())
        .run(std::slice::from_mut(&mut unit))
        .unwrap();

    assert_eq!(report.units[0].written.len(), 1);
    assert!(dir.path().join("out/Dune").exists());
    assert!(!dir.path().join("out/Emma").exists());
    let events = sink.events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, GenerationEvent::NodeSkipped { node, .. } if node == "/library/book[2]")));
}

#[test]
fn bytes_filename_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("name.bin"), b"abc").unwrap();
    let fs = Arc::new(LocalFs::new());
    let plugins = Plugins::builtin(fs);
    let spec =
        ComponentSpec::new("bytes").with_params(Params::new().with_text("file", "name.bin"));
    let bytes = crate::domain::ports::ComponentFactory::outlet(
        &plugins,
        name("a.file"),
        &spec,
        dir.path(),
    )
    .unwrap();

    let mut unit = unit_in(dir.path());
    unit.outlets.register(bytes).unwrap();
    template(&mut unit, "a.body", "x");
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Outlet(reference("a.file")),
        )
        .with_source(inline_source(LIBRARY, "/")),
    );

    let err = controller()
        .run(std::slice::from_mut(&mut unit))
        .unwrap_err();
    let WeaverError::Unit { cause, .. } = &err else {
        panic!("expected unit error, got {err:?}");
    };
    let WeaverError::Context { cause, model_path, .. } = cause.as_ref() else {
        panic!("expected context, got {cause:?}");
    };
    assert_eq!(model_path, "/library");
    assert!(matches!(
        cause.as_ref(),
        WeaverError::Configuration(ConfigurationError::FilenameNotText { .. })
    ));
    assert_eq!(err.category().exit_code(), 2);
}

#[test]
fn unknown_strategy_fails_before_sources_are_read() {
    let dir = tempdir().unwrap();
    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.body", "x");
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Fixed("x.txt".into()),
        )
        .with_existing_target_strategy("overwrite")
        .with_source(file_source("missing-dir", "/")),
    );

    let plugins = Plugins::builtin(Arc::new(LocalFs::new()));
    assert!(matches!(
        validate_unit(&unit, &plugins),
        Err(ConfigurationError::UnknownStrategy { .. })
    ));
    let err = controller()
        .run(std::slice::from_mut(&mut unit))
        .unwrap_err();
    assert_eq!(err.category().exit_code(), 2);
}

#[test]
fn existing_line_break_policy_keeps_crlf() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::write(dir.path().join("out/a.txt"), "old\r\nfile\r\n").unwrap();

    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.body", "one\ntwo\n");
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Fixed("a.txt".into()),
        )
        .with_line_break(LineBreakPolicy::Existing)
        .with_source(inline_source(LIBRARY, "/")),
    );

    controller().run(std::slice::from_mut(&mut unit)).unwrap();

    assert_eq!(
        std::fs::read(dir.path().join("out/a.txt")).unwrap(),
        b"one\r\ntwo\r\n"
    );
}

#[test]
fn file_scoped_variables_do_not_leak_between_units() {
    let dir = tempdir().unwrap();
    let mut first = unit_in(dir.path());
    template(&mut first, "a.body", "x");
    first.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Fixed("x.txt".into()),
        )
        .with_source(inline_source(LIBRARY, "/")),
    );

    let mut controller = controller();
    controller.run(std::slice::from_mut(&mut first)).unwrap();

    let state: &ControllerState = controller.state();
    assert!(state.variables.is_empty());
    assert!(state.root().is_none());
    assert!(state.outlet_stack().is_empty());
}

#[test]
fn unreadable_checksums_file_does_not_block_generation() {
    for incremental in [false, true] {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("schema")).unwrap();
        std::fs::write(dir.path().join("schema/lib.json"), LIBRARY).unwrap();

        let mut unit = unit_in(dir.path());
        unit.run_only_on_source_change = incremental;
        template(&mut unit, "a.body", "x");
        unit.outputs.push(
            Output::new(
                name("a.out"),
                reference("a.body"),
                FilenameSource::Fixed("lib.txt".into()),
            )
            .with_source(file_source("schema", "/")),
        );
        let checksums_path = unit.checksums_path();
        std::fs::create_dir_all(checksums_path.parent().unwrap()).unwrap();
        std::fs::write(&checksums_path, "garbage\n").unwrap();

        let report = controller().run(std::slice::from_mut(&mut unit)).unwrap();

        assert_eq!(report.written_count(), 1, "incremental: {incremental}");
        let rewritten = std::fs::read_to_string(&checksums_path).unwrap();
        assert!(!rewritten.contains("garbage"));
        assert_eq!(parse_checksums(&rewritten).unwrap().len(), 1);
    }
}

#[test]
fn transformer_returning_empty_root_is_a_source_error() {
    let dir = tempdir().unwrap();
    let fs = Arc::new(LocalFs::new());
    let mut plugins = Plugins::builtin(fs.clone());
    plugins.register_transformer("clear", |_| Ok(Box::new(ClearRoot)));
    let mut controller = Controller::new(
        Arc::new(plugins),
        fs,
        Arc::new(TextChecksumsRepository::new()),
        LogSettings::from_verbosity(1),
    );

    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.body", "x");
    let mut source = inline_source(LIBRARY, "/");
    source.transformers = Some(vec![ComponentSpec::new("clear")]);
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Fixed("x.txt".into()),
        )
        .with_source(source),
    );

    let err = controller
        .run(std::slice::from_mut(&mut unit))
        .unwrap_err();
    assert_eq!(err.category().exit_code(), 3);
    let WeaverError::Unit { cause, .. } = &err else {
        panic!("expected unit error, got {err:?}");
    };
    let WeaverError::Context { cause, model_path, output, .. } = cause.as_ref() else {
        panic!("expected context, got {cause:?}");
    };
    assert_eq!(output, "a.out");
    assert_eq!(model_path, "-");
    assert!(matches!(
        cause.as_ref(),
        WeaverError::Source(SourceError::EmptyRoot { transformer }) if transformer == "clear"
    ));
    assert!(!dir.path().join("out/x.txt").exists());
}

#[test]
fn failing_output_dir_creation_aborts_unit() {
    let dir = tempdir().unwrap();
    // a regular file where the output directory belongs
    std::fs::write(dir.path().join("out"), "not a directory").unwrap();

    let mut unit = unit_in(dir.path());
    template(&mut unit, "a.body", "x");
    unit.outputs.push(
        Output::new(
            name("a.out"),
            reference("a.body"),
            FilenameSource::Fixed("x.txt".into()),
        )
        .with_source(inline_source(LIBRARY, "/")),
    );

    let err = controller()
        .run(std::slice::from_mut(&mut unit))
        .unwrap_err();
    let WeaverError::Unit { cause, .. } = &err else {
        panic!("expected unit error, got {err:?}");
    };
    let WeaverError::Context { cause, .. } = cause.as_ref() else {
        panic!("expected context, got {cause:?}");
    };
    assert!(matches!(cause.as_ref(), WeaverError::Fs(_)));
    assert!(!unit.checksums_path().exists());
}
