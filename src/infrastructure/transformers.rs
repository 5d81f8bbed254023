//! Built-in source transformers

use crate::domain::entities::{ControllerState, ModelNode, ModelPath};
use crate::domain::ports::SourceTransformer;
use crate::domain::services::Selector;
use crate::error::SourceError;

/// Sorts the children of selected nodes by an attribute value.
///
/// The sort is stable; children lacking the attribute sort first.
#[derive(Debug, Clone)]
pub struct SortChildren {
    by: String,
    parents: Selector,
}

impl SortChildren {
    pub fn new(by: impl Into<String>, parents: Selector) -> Self {
        Self {
            by: by.into(),
            parents,
        }
    }
}

impl SourceTransformer for SortChildren {
    fn name(&self) -> &str {
        "sort-children"
    }

    fn transform(
        &self,
        mut root: ModelNode,
        _state: &ControllerState,
    ) -> Result<ModelNode, SourceError> {
        let paths = self.parents.select(&root, &ModelPath::root());
        // deepest first, so reordering never moves a path still to be visited
        for path in paths.iter().rev() {
            if let Some(node) = root.node_at_mut(path) {
                let by = self.by.as_str();
                node.children_mut()
                    .sort_by(|a, b| a.attribute(by).cmp(&b.attribute(by)));
            }
        }
        Ok(root)
    }
}

/// Removes every node the selector addresses.
#[derive(Debug, Clone)]
pub struct RemoveNodes {
    selector: Selector,
}

impl RemoveNodes {
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }
}

impl SourceTransformer for RemoveNodes {
    fn name(&self) -> &str {
        "remove"
    }

    fn transform(
        &self,
        mut root: ModelNode,
        _state: &ControllerState,
    ) -> Result<ModelNode, SourceError> {
        let paths = self.selector.select(&root, &ModelPath::root());
        for path in paths.iter().rev() {
            let (Some(parent), Some(&index)) = (path.parent(), path.indices().last()) else {
                return Err(SourceError::EmptyRoot {
                    transformer: self.name().to_string(),
                });
            };
            if let Some(parent) = root.node_at_mut(&parent) {
                if index < parent.children().len() {
                    parent.children_mut().remove(index);
                }
            }
        }
        Ok(root)
    }
}
