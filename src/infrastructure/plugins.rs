//! Component registry
//!
//! Maps configuration type tags to constructor functions for every
//! pluggable component. `Plugins::builtin` knows the components shipped
//! with the crate; embedders register more with the `register_*` methods.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{ComponentSpec, Params};
use crate::domain::outlet::{
    AttributeOutlet, BytesOutlet, CaseTransform, ChildrenOutlet, Outlet, SetVariableOutlet,
    Template, TemplateOutlet, TextOutlet,
};
use crate::domain::ports::{
    ComponentFactory, ExistingTargetStrategy, FileSystem, SkipDecider, SourceProvider,
    SourceTransformer, StringProcessor,
};
use crate::domain::services::Selector;
use crate::domain::value_objects::{QualifiedName, VariableScope};
use crate::error::ConfigurationError;
use crate::infrastructure::processors::{
    CollapseBlankLines, FinalNewline, Replace, TrimTrailingWhitespace,
};
use crate::infrastructure::skip_deciders::AttributeSkipDecider;
use crate::infrastructure::sources::{DocumentFormat, FileSourceProvider, InlineSourceProvider};
use crate::infrastructure::strategies::builtin_strategies;
use crate::infrastructure::transformers::{RemoveNodes, SortChildren};

type ConfigResult<T> = Result<T, ConfigurationError>;

/// What an outlet constructor may use besides its parameters
pub struct OutletBuild<'a> {
    pub name: QualifiedName,
    pub params: &'a Params,
    pub base_dir: &'a Path,
    pub fs: &'a dyn FileSystem,
}

pub type OutletConstructor = fn(OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>>;
pub type ProviderConstructor =
    fn(&Params, Arc<dyn FileSystem>) -> ConfigResult<Box<dyn SourceProvider>>;
pub type TransformerConstructor = fn(&Params) -> ConfigResult<Box<dyn SourceTransformer>>;
pub type SkipDeciderConstructor = fn(&Params) -> ConfigResult<Box<dyn SkipDecider>>;
pub type ProcessorConstructor = fn(&Params) -> ConfigResult<Box<dyn StringProcessor>>;

pub struct Plugins {
    fs: Arc<dyn FileSystem>,
    outlets: HashMap<String, OutletConstructor>,
    providers: HashMap<String, ProviderConstructor>,
    transformers: HashMap<String, TransformerConstructor>,
    skip_deciders: HashMap<String, SkipDeciderConstructor>,
    processors: HashMap<String, ProcessorConstructor>,
    strategies: HashMap<String, Arc<dyn ExistingTargetStrategy>>,
}

impl Plugins {
    /// Registry without any components
    pub fn empty(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            outlets: HashMap::new(),
            providers: HashMap::new(),
            transformers: HashMap::new(),
            skip_deciders: HashMap::new(),
            processors: HashMap::new(),
            strategies: HashMap::new(),
        }
    }

    /// Registry with every built-in component
    pub fn builtin(fs: Arc<dyn FileSystem>) -> Self {
        let mut plugins = Self::empty(fs.clone());

        plugins.register_outlet("template", template_outlet);
        plugins.register_outlet("text", text_outlet);
        plugins.register_outlet("bytes", bytes_outlet);
        plugins.register_outlet("attribute", attribute_outlet);
        plugins.register_outlet("children", children_outlet);
        plugins.register_outlet("set-variable", set_variable_outlet);

        plugins.register_provider("file", file_provider);
        plugins.register_provider("inline", inline_provider);

        plugins.register_transformer("sort-children", sort_children);
        plugins.register_transformer("remove", remove_nodes);

        plugins.register_skip_decider("attribute", attribute_skip_decider);

        plugins.register_processor("final-newline", |_| Ok(Box::new(FinalNewline)));
        plugins.register_processor("trim-trailing-whitespace", |_| {
            Ok(Box::new(TrimTrailingWhitespace))
        });
        plugins.register_processor("collapse-blank-lines", |_| Ok(Box::new(CollapseBlankLines)));
        plugins.register_processor("replace", replace_processor);

        for strategy in builtin_strategies(fs) {
            plugins.register_strategy(strategy);
        }
        plugins
    }

    pub fn register_outlet(&mut self, tag: &str, constructor: OutletConstructor) {
        self.outlets.insert(tag.to_string(), constructor);
    }

    pub fn register_provider(&mut self, tag: &str, constructor: ProviderConstructor) {
        self.providers.insert(tag.to_string(), constructor);
    }

    pub fn register_transformer(&mut self, tag: &str, constructor: TransformerConstructor) {
        self.transformers.insert(tag.to_string(), constructor);
    }

    pub fn register_skip_decider(&mut self, tag: &str, constructor: SkipDeciderConstructor) {
        self.skip_deciders.insert(tag.to_string(), constructor);
    }

    pub fn register_processor(&mut self, tag: &str, constructor: ProcessorConstructor) {
        self.processors.insert(tag.to_string(), constructor);
    }

    /// Registers under the strategy's own name, replacing any previous one.
    pub fn register_strategy(&mut self, strategy: Arc<dyn ExistingTargetStrategy>) {
        self.strategies.insert(strategy.name().to_string(), strategy);
    }
}

fn unknown(kind: &'static str, spec: &ComponentSpec) -> ConfigurationError {
    ConfigurationError::UnknownComponentType {
        kind,
        type_tag: spec.type_tag.clone(),
    }
}

impl ComponentFactory for Plugins {
    fn outlet(
        &self,
        name: QualifiedName,
        spec: &ComponentSpec,
        base_dir: &Path,
    ) -> ConfigResult<Arc<dyn Outlet>> {
        let constructor = self
            .outlets
            .get(&spec.type_tag)
            .ok_or_else(|| unknown("outlet", spec))?;
        constructor(OutletBuild {
            name,
            params: &spec.params,
            base_dir,
            fs: self.fs.as_ref(),
        })
    }

    fn source_provider(&self, spec: &ComponentSpec) -> ConfigResult<Box<dyn SourceProvider>> {
        let constructor = self
            .providers
            .get(&spec.type_tag)
            .ok_or_else(|| unknown("source provider", spec))?;
        constructor(&spec.params, self.fs.clone())
    }

    fn transformer(&self, spec: &ComponentSpec) -> ConfigResult<Box<dyn SourceTransformer>> {
        let constructor = self
            .transformers
            .get(&spec.type_tag)
            .ok_or_else(|| unknown("transformer", spec))?;
        constructor(&spec.params)
    }

    fn skip_decider(&self, spec: &ComponentSpec) -> ConfigResult<Box<dyn SkipDecider>> {
        let constructor = self
            .skip_deciders
            .get(&spec.type_tag)
            .ok_or_else(|| unknown("skip decider", spec))?;
        constructor(&spec.params)
    }

    fn processor(&self, spec: &ComponentSpec) -> ConfigResult<Box<dyn StringProcessor>> {
        let constructor = self
            .processors
            .get(&spec.type_tag)
            .ok_or_else(|| unknown("postprocessor", spec))?;
        constructor(&spec.params)
    }

    fn strategy(&self, name: &str) -> Option<Arc<dyn ExistingTargetStrategy>> {
        self.strategies.get(name).cloned()
    }
}

// Outlets

fn parse_template(name: &QualifiedName, source: &str) -> ConfigResult<Template> {
    Template::parse(source).map_err(|err| ConfigurationError::Template {
        outlet: name.to_string(),
        message: err.to_string(),
    })
}

fn read_param_file(build: &OutletBuild<'_>, key: &str) -> ConfigResult<Option<Vec<u8>>> {
    let Some(file) = build.params.text(key) else {
        return Ok(None);
    };
    let path = build.base_dir.join(file);
    build
        .fs
        .read_bytes(&path)
        .map(Some)
        .map_err(|err| ConfigurationError::InvalidParameter {
            component: build.name.to_string(),
            parameter: key.to_string(),
            message: err.to_string(),
        })
}

fn template_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let source = match (build.params.text("template"), read_param_file(&build, "file")?) {
        (Some(inline), None) => inline,
        (None, Some(bytes)) => {
            String::from_utf8(bytes).map_err(|_| ConfigurationError::InvalidParameter {
                component: build.name.to_string(),
                parameter: "file".to_string(),
                message: "template file is not valid UTF-8".to_string(),
            })?
        }
        (Some(_), Some(_)) => {
            return Err(ConfigurationError::InvalidParameter {
                component: build.name.to_string(),
                parameter: "file".to_string(),
                message: "set either `template` or `file`, not both".to_string(),
            })
        }
        (None, None) => {
            return Err(ConfigurationError::MissingParameter {
                component: build.name.to_string(),
                parameter: "template".to_string(),
            })
        }
    };
    let template = parse_template(&build.name, &source)?;
    Ok(Arc::new(TemplateOutlet::new(build.name, template)))
}

fn text_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let text = build.params.require_text(&build.name.to_string(), "text")?;
    Ok(Arc::new(TextOutlet::new(build.name, text)))
}

fn bytes_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let bytes = read_param_file(&build, "file")?.ok_or_else(|| {
        ConfigurationError::MissingParameter {
            component: build.name.to_string(),
            parameter: "file".to_string(),
        }
    })?;
    Ok(Arc::new(BytesOutlet::new(build.name, bytes)))
}

fn attribute_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let component = build.name.to_string();
    let attribute = build.params.require_text(&component, "attribute")?;
    let mut outlet = AttributeOutlet::new(build.name, attribute);
    if let Some(default) = build.params.text("default") {
        outlet = outlet.with_default(default);
    }
    if let Some(transform) = build.params.text("transform") {
        let transform = CaseTransform::parse(&transform).ok_or_else(|| {
            ConfigurationError::InvalidParameter {
                component: component.clone(),
                parameter: "transform".to_string(),
                message: format!("unknown transform '{}'", transform),
            }
        })?;
        outlet = outlet.with_transform(transform);
    }
    if let Some(suffix) = build.params.text("suffix") {
        outlet = outlet.with_suffix(suffix);
    }
    Ok(Arc::new(outlet))
}

fn children_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let select = build
        .params
        .text("select")
        .unwrap_or_else(|| "*".to_string());
    let mut outlet = ChildrenOutlet::new(build.name, Selector::parse(&select)?);
    if let Some(mergepoint) = build.params.text("mergepoint") {
        outlet = outlet.with_mergepoint(mergepoint);
    }
    if let Some(separator) = build.params.text("separator") {
        outlet = outlet.with_separator(separator);
    }
    Ok(Arc::new(outlet))
}

fn set_variable_outlet(build: OutletBuild<'_>) -> ConfigResult<Arc<dyn Outlet>> {
    let component = build.name.to_string();
    let variable = build.params.require_text(&component, "variable")?;
    let value = parse_template(&build.name, &build.params.require_text(&component, "value")?)?;
    let scope = match build.params.text("scope") {
        Some(scope) => scope
            .parse::<VariableScope>()
            .map_err(|message| ConfigurationError::InvalidParameter {
                component: component.clone(),
                parameter: "scope".to_string(),
                message,
            })?,
        None => VariableScope::default(),
    };
    let outlet = SetVariableOutlet::new(build.name, variable, value, scope).ok_or_else(|| {
        ConfigurationError::InvalidParameter {
            component,
            parameter: "value".to_string(),
            message: "set-variable values cannot contain mergepoints".to_string(),
        }
    })?;
    Ok(Arc::new(outlet))
}

// Source providers

fn document_format(component: &str, params: &Params) -> ConfigResult<Option<DocumentFormat>> {
    params
        .text("format")
        .map(|format| {
            format
                .parse::<DocumentFormat>()
                .map_err(|message| ConfigurationError::InvalidParameter {
                    component: component.to_string(),
                    parameter: "format".to_string(),
                    message,
                })
        })
        .transpose()
}

fn file_provider(
    params: &Params,
    fs: Arc<dyn FileSystem>,
) -> ConfigResult<Box<dyn SourceProvider>> {
    let base_dir = params.text("base_dir").unwrap_or_else(|| ".".to_string());
    let mut provider = FileSourceProvider::new(fs, base_dir);
    if let Some(include) = params.list("include") {
        provider = provider.with_include(include);
    }
    if let Some(exclude) = params.list("exclude") {
        provider = provider.with_exclude(exclude);
    }
    if let Some(format) = document_format("file", params)? {
        provider = provider.with_format(format);
    }
    Ok(Box::new(provider))
}

fn inline_provider(
    params: &Params,
    _fs: Arc<dyn FileSystem>,
) -> ConfigResult<Box<dyn SourceProvider>> {
    let document = params.require_text("inline", "document")?;
    let format = document_format("inline", params)?.unwrap_or(DocumentFormat::Json);
    Ok(Box::new(InlineSourceProvider::new(document, format)))
}

// Transformers

fn sort_children(params: &Params) -> ConfigResult<Box<dyn SourceTransformer>> {
    let by = params.require_text("sort-children", "by")?;
    let parent = params.text("parent").unwrap_or_else(|| "/".to_string());
    Ok(Box::new(SortChildren::new(by, Selector::parse(&parent)?)))
}

fn remove_nodes(params: &Params) -> ConfigResult<Box<dyn SourceTransformer>> {
    let path = params.require_text("remove", "path")?;
    Ok(Box::new(RemoveNodes::new(Selector::parse(&path)?)))
}

// Skip deciders

fn attribute_skip_decider(params: &Params) -> ConfigResult<Box<dyn SkipDecider>> {
    let mut decider = AttributeSkipDecider::new(params.require_text("attribute", "attribute")?);
    if let Some(equals) = params.text("equals") {
        decider = decider.with_equals(equals);
    }
    if params.bool("attribute", "negate")?.unwrap_or(false) {
        decider = decider.negated();
    }
    if let Some(default) = params.bool("attribute", "default")? {
        decider = decider.with_default(default);
    }
    Ok(Box::new(decider))
}

// Postprocessors

fn replace_processor(params: &Params) -> ConfigResult<Box<dyn StringProcessor>> {
    let from = params.require_text("replace", "from")?;
    let to = params.text("to").unwrap_or_default();
    let processor = Replace::new(from, to).ok_or_else(|| ConfigurationError::InvalidParameter {
        component: "replace".to_string(),
        parameter: "from".to_string(),
        message: "must not be empty".to_string(),
    })?;
    Ok(Box::new(processor))
}
