//! Per-output components
//!
//! Everything an output needs at generation time is instantiated from its
//! declaration in one place, so configuration mistakes surface before the
//! first source is read.

use std::sync::Arc;

use crate::domain::entities::{FilenameSource, Output, UnitConfiguration};
use crate::domain::outlet::OutletRef;
use crate::domain::ports::{
    ComponentFactory, ExistingTargetStrategy, SkipDecider, SourceProvider, SourceTransformer,
    StringProcessor,
};
use crate::domain::services::Selector;
use crate::error::ConfigurationError;

/// Live components of one output declaration
pub struct OutputComponents {
    pub strategy: Arc<dyn ExistingTargetStrategy>,
    pub provider: Box<dyn SourceProvider>,
    pub selector: Selector,
    pub transformers: Vec<Box<dyn SourceTransformer>>,
    pub skip_decider: Option<Box<dyn SkipDecider>>,
    pub processors: Vec<Box<dyn StringProcessor>>,
}

impl OutputComponents {
    /// Instantiates the output's components; a fresh source provider each call.
    pub fn resolve(
        factory: &dyn ComponentFactory,
        output: &Output,
    ) -> Result<Self, ConfigurationError> {
        let strategy = factory
            .strategy(output.existing_target_strategy())
            .ok_or_else(|| ConfigurationError::UnknownStrategy {
                output: output.name().to_string(),
                name: output.existing_target_strategy().to_string(),
            })?;

        let source = output.source();
        let provider_spec =
            source
                .provider
                .as_ref()
                .ok_or_else(|| ConfigurationError::MissingParameter {
                    component: format!("output '{}'", output.name()),
                    parameter: "source.type".to_string(),
                })?;
        let provider = factory.source_provider(provider_spec)?;
        let selector = Selector::parse(source.element_or_root())?;
        let transformers = source
            .transformers()
            .iter()
            .map(|spec| factory.transformer(spec))
            .collect::<Result<Vec<_>, _>>()?;
        let skip_decider = source
            .skip_decider
            .as_ref()
            .map(|spec| factory.skip_decider(spec))
            .transpose()?;
        let processors = output
            .postprocessors()
            .iter()
            .map(|spec| factory.processor(spec))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            strategy,
            provider,
            selector,
            transformers,
            skip_decider,
            processors,
        })
    }
}

/// Checks a unit completely without touching sources or targets.
pub fn validate_unit(
    unit: &UnitConfiguration,
    factory: &dyn ComponentFactory,
) -> Result<(), ConfigurationError> {
    unit.outlets.validate()?;
    for output in &unit.outputs {
        let referenced_by = format!("output '{}'", output.name());
        require_outlet(unit, output.content_outlet(), &referenced_by)?;
        if let FilenameSource::Outlet(reference) = output.filename_source() {
            require_outlet(unit, reference, &referenced_by)?;
        }
        if unit.output_dir(output.output_dir_key()).is_none() {
            return Err(ConfigurationError::UnknownOutputDir {
                output: output.name().to_string(),
                key: output.output_dir_key().to_string(),
            });
        }
        OutputComponents::resolve(factory, output)?;
    }
    Ok(())
}

fn require_outlet(
    unit: &UnitConfiguration,
    reference: &OutletRef,
    referenced_by: &str,
) -> Result<(), ConfigurationError> {
    if unit.outlets.contains_in_hierarchy(&reference.name) {
        Ok(())
    } else {
        Err(ConfigurationError::UnknownOutlet {
            name: reference.name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    }
}
