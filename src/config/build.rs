//! Conversion of unit files into domain configuration
//!
//! All declarations are resolved and validated here, before any source is
//! read or any target written.

use std::path::{Path, PathBuf};

use crate::application::generate::validate_unit;
use crate::domain::entities::{
    ComponentSpec, FilenameSource, Output, SourceSpec, UnitConfiguration,
};
use crate::domain::outlet::{MergepointMapping, OutletRef};
use crate::domain::ports::ComponentFactory;
use crate::domain::value_objects::{ConfigWarning, Encoding, Namespace, QualifiedName};
use crate::error::ConfigurationError;

use super::loader::{env_overrides, load_with_warnings};
use super::types::{Overrides, OutputSection, SourceSection, UnitFile};

/// Load, override, convert and validate the unit file at `path`.
///
/// `overrides` (typically from CLI flags) win over `WEAVER_*` variables.
pub fn load_unit(
    path: &Path,
    factory: &dyn ComponentFactory,
    overrides: Overrides,
) -> Result<(UnitConfiguration, Vec<ConfigWarning>), ConfigurationError> {
    let (mut file, warnings) = load_with_warnings(path)?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    env_overrides()
        .merged_with(overrides)
        .apply(&mut file.unit);
    let unit = build_unit(file, path, factory)?;
    Ok((unit, warnings))
}

/// Convert a parsed unit file. Relative paths resolve against the unit
/// file's directory.
pub fn build_unit(
    file: UnitFile,
    config_path: &Path,
    factory: &dyn ComponentFactory,
) -> Result<UnitConfiguration, ConfigurationError> {
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let base_dir = file.unit.base_dir.as_deref().unwrap_or(Path::new("."));
    let base_dir = absolutize(&config_dir.join(base_dir));
    let namespace = match &file.unit.namespace {
        Some(ns) => Namespace::parse(ns)?,
        None => Namespace::root(),
    };

    let mut unit = UnitConfiguration::new(&file.unit.name, base_dir);
    if let Some(template_set) = file.unit.template_set {
        unit.template_set = template_set;
    }
    unit.run_only_on_source_change = file.unit.run_only_on_source_change;
    unit.cache_dir = file.unit.cache_dir;
    unit.checksums_file = file.unit.checksums_file;
    unit.output_dirs = file.unit.output_dirs;

    for (key, value) in file.options {
        unit.options
            .set(QualifiedName::resolve(&key, &namespace)?, value.to_string());
    }

    for outlet in file.outlets {
        let name = QualifiedName::resolve(&outlet.name, &namespace)?;
        let outlet = factory.outlet(name, &outlet.spec, &unit.base_dir)?;
        unit.outlets.register(outlet)?;
    }

    for mapping in file.mergepoints {
        let outlet = QualifiedName::resolve(&mapping.outlet, &namespace)?;
        let outlets = mapping
            .outlets
            .iter()
            .map(|reference| OutletRef::parse(reference, &namespace))
            .collect::<Result<Vec<_>, _>>()?;
        unit.outlets.add_mapping(
            &outlet,
            &mapping.mergepoint,
            &MergepointMapping::new(outlets, mapping.position),
        )?;
    }

    let defaults = file
        .source_defaults
        .map(|section| source_spec(section, None))
        .unwrap_or_default();
    for section in file.outputs {
        unit.outputs.push(output(section, &namespace, &defaults)?);
    }

    validate_unit(&unit, factory)?;
    tracing::debug!(
        unit = %unit.name,
        outlets = unit.outlets.len(),
        outputs = unit.outputs.len(),
        "configuration loaded"
    );
    Ok(unit)
}

fn output(
    section: OutputSection,
    namespace: &Namespace,
    defaults: &SourceSpec,
) -> Result<Output, ConfigurationError> {
    let name = QualifiedName::resolve(&section.name, namespace)?;
    let outlet_namespace = section
        .outlet_namespace
        .as_deref()
        .map(Namespace::parse)
        .transpose()?;
    let reference = |raw: &str| -> Result<OutletRef, ConfigurationError> {
        let reference = OutletRef::parse(raw, namespace)?;
        Ok(match &outlet_namespace {
            Some(ns) => reference.with_namespace(ns.clone()),
            None => reference,
        })
    };

    let filename_outlet = section
        .filename_outlet
        .as_deref()
        .map(&reference)
        .transpose()?;
    let filename =
        FilenameSource::from_parts(&name.to_string(), section.filename, filename_outlet)?;
    let content_outlet = reference(&section.content_outlet)?;

    let mut source = source_spec(section.source, defaults.provider.as_ref());
    source.copy_not_set_settings_from(defaults);

    let mut output = Output::new(name, content_outlet, filename)
        .with_source(source)
        .with_postprocessors(section.postprocessors)
        .with_line_break(section.line_break);
    if let Some(strategy) = section.existing_target_strategy {
        output = output.with_existing_target_strategy(strategy);
    }
    if let Some(key) = section.output_dir_key {
        output = output.with_output_dir_key(key);
    }
    if let Some(encoding) = section.encoding {
        output = output.with_encoding(encoding.parse::<Encoding>()?);
    }
    Ok(output)
}

/// An output that sets provider parameters without a type inherits the
/// default provider's type.
fn source_spec(section: SourceSection, default_provider: Option<&ComponentSpec>) -> SourceSpec {
    let provider = match (section.provider, default_provider) {
        (Some(type_tag), _) => Some(ComponentSpec::new(type_tag).with_params(section.params)),
        (None, Some(default)) if !section.params.is_empty() => {
            Some(ComponentSpec::new(default.type_tag.clone()).with_params(section.params))
        }
        (None, _) => None,
    };
    SourceSpec {
        provider,
        element: section.element,
        transformers: section.transformers,
        skip_decider: section.skip_decider,
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
