//! Built-in outlets

use super::{CaseTransform, ExecutionContext, Outlet, OutletResult, Template};
use crate::domain::services::Selector;
use crate::domain::value_objects::{QualifiedName, VariableScope};
use crate::error::GenerationError;

/// Renders a [`Template`]; the only built-in that can host arbitrary mergepoints
#[derive(Debug)]
pub struct TemplateOutlet {
    name: QualifiedName,
    template: Template,
}

impl TemplateOutlet {
    pub fn new(name: QualifiedName, template: Template) -> Self {
        Self { name, template }
    }
}

impl Outlet for TemplateOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "template"
    }

    fn accepts_mergepoints(&self) -> bool {
        true
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        self.template.render(ctx).map(OutletResult::Text)
    }
}

/// Fixed text
#[derive(Debug)]
pub struct TextOutlet {
    name: QualifiedName,
    text: String,
}

impl TextOutlet {
    pub fn new(name: QualifiedName, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
        }
    }
}

impl Outlet for TextOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "text"
    }

    fn execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        Ok(OutletResult::Text(self.text.clone()))
    }
}

/// Raw bytes, e.g. a copied binary resource
#[derive(Debug)]
pub struct BytesOutlet {
    name: QualifiedName,
    bytes: Vec<u8>,
}

impl BytesOutlet {
    pub fn new(name: QualifiedName, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}

impl Outlet for BytesOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "bytes"
    }

    fn execute(&self, _ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        Ok(OutletResult::Bytes(self.bytes.clone()))
    }
}

/// Value of one attribute of the current node.
///
/// A missing attribute yields the default if one is configured and fails
/// otherwise. Typical use is deriving a filename.
#[derive(Debug)]
pub struct AttributeOutlet {
    name: QualifiedName,
    attribute: String,
    default: Option<String>,
    transform: Option<CaseTransform>,
    suffix: String,
}

impl AttributeOutlet {
    pub fn new(name: QualifiedName, attribute: impl Into<String>) -> Self {
        Self {
            name,
            attribute: attribute.into(),
            default: None,
            transform: None,
            suffix: String::new(),
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_transform(mut self, transform: CaseTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Appended after the transform, e.g. `.java`
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Outlet for AttributeOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "attribute"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        let node = ctx.current_node()?;
        let value = match (node.attribute(&self.attribute), &self.default) {
            (Some(value), _) => value.to_string(),
            (None, Some(default)) => default.clone(),
            (None, None) => {
                return Err(GenerationError::MissingAttribute {
                    attribute: self.attribute.clone(),
                    element: node.name().to_string(),
                })
            }
        };
        let mut value = match self.transform {
            Some(transform) => transform.apply(&value),
            None => value,
        };
        value.push_str(&self.suffix);
        Ok(OutletResult::Text(value))
    }
}

/// Runs one mergepoint for every node the selector addresses from the
/// current node, joining the results with a separator.
#[derive(Debug)]
pub struct ChildrenOutlet {
    name: QualifiedName,
    selector: Selector,
    mergepoint: String,
    separator: String,
}

impl ChildrenOutlet {
    pub const DEFAULT_MERGEPOINT: &'static str = "each";

    pub fn new(name: QualifiedName, selector: Selector) -> Self {
        Self {
            name,
            selector,
            mergepoint: Self::DEFAULT_MERGEPOINT.to_string(),
            separator: String::new(),
        }
    }

    pub fn with_mergepoint(mut self, mergepoint: impl Into<String>) -> Self {
        self.mergepoint = mergepoint.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Outlet for ChildrenOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "children"
    }

    fn accepts_mergepoints(&self) -> bool {
        true
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        let paths = self.selector.select(ctx.root()?, ctx.current_path());
        let mut parts = Vec::with_capacity(paths.len());
        for path in paths {
            parts.push(ctx.descend(path, |ctx| ctx.execute_mergepoint(&self.mergepoint))?);
        }
        Ok(OutletResult::Text(parts.join(&self.separator)))
    }
}

/// Binds a variable and produces no text.
#[derive(Debug)]
pub struct SetVariableOutlet {
    name: QualifiedName,
    variable: String,
    value: Template,
    scope: VariableScope,
}

impl SetVariableOutlet {
    /// `None` when the value template invokes mergepoints, which a leaf
    /// outlet cannot have.
    pub fn new(
        name: QualifiedName,
        variable: impl Into<String>,
        value: Template,
        scope: VariableScope,
    ) -> Option<Self> {
        if value.mergepoints().next().is_some() {
            return None;
        }
        Some(Self {
            name,
            variable: variable.into(),
            value,
            scope,
        })
    }
}

impl Outlet for SetVariableOutlet {
    fn name(&self) -> &QualifiedName {
        &self.name
    }

    fn type_tag(&self) -> &'static str {
        "set-variable"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>) -> Result<OutletResult, GenerationError> {
        let value = self.value.render(ctx)?;
        ctx.set_variable(&self.variable, value, self.scope)?;
        Ok(OutletResult::Text(String::new()))
    }
}
