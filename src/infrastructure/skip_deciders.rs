//! Built-in skip deciders

use crate::domain::entities::ControllerState;
use crate::domain::ports::SkipDecider;

/// Proceeds based on an attribute of the current model node.
///
/// With `equals` set, the node proceeds when the attribute has that value;
/// otherwise when the attribute is present at all. `default` applies when
/// there is no current node.
#[derive(Debug, Clone)]
pub struct AttributeSkipDecider {
    attribute: String,
    equals: Option<String>,
    negate: bool,
    default: bool,
}

impl AttributeSkipDecider {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            equals: None,
            negate: false,
            default: true,
        }
    }

    pub fn with_equals(mut self, value: impl Into<String>) -> Self {
        self.equals = Some(value.into());
        self
    }

    /// Invert the attribute test
    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

impl SkipDecider for AttributeSkipDecider {
    fn proceed(&self, state: &ControllerState) -> bool {
        let Some(node) = state.current_node() else {
            return self.default;
        };
        let value = node.attribute(&self.attribute);
        let matched = match &self.equals {
            Some(expected) => value == Some(expected.as_str()),
            None => value.is_some(),
        };
        matched != self.negate
    }
}
