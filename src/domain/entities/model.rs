//! Source model entities
//!
//! A source is parsed into a tree of `ModelNode`s. Nodes are addressed by
//! `ModelPath`, the child indices from the root.

use std::collections::BTreeMap;
use std::fmt;

/// Element of a source model tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelNode {
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: ModelNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// An element without a name is not a usable root.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn children(&self) -> &[ModelNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<ModelNode> {
        &mut self.children
    }

    pub fn push_child(&mut self, child: ModelNode) {
        self.children.push(child);
    }

    /// Node at `path` below this node.
    pub fn node_at(&self, path: &ModelPath) -> Option<&ModelNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    pub fn node_at_mut(&mut self, path: &ModelPath) -> Option<&mut ModelNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }
}

/// Child indices from the model root; the empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelPath(Vec<usize>);

impl ModelPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// XPath-style description, e.g. `/database/table[2]`.
    ///
    /// Positions are 1-based among same-named siblings and omitted when an
    /// element has no same-named sibling.
    pub fn describe(&self, root: &ModelNode) -> String {
        let mut out = format!("/{}", root.name());
        let mut node = root;
        for &index in &self.0 {
            let Some(child) = node.children.get(index) else {
                out.push_str("/?");
                break;
            };
            let same_named: Vec<usize> = node
                .children
                .iter()
                .enumerate()
                .filter(|(_, c)| c.name == child.name)
                .map(|(i, _)| i)
                .collect();
            out.push('/');
            out.push_str(child.name());
            if same_named.len() > 1 {
                let position = same_named.iter().position(|&i| i == index).unwrap_or(0) + 1;
                out.push_str(&format!("[{}]", position));
            }
            node = child;
        }
        out
    }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "/{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> ModelNode {
        ModelNode::new("database")
            .with_attribute("name", "bookstore")
            .with_child(ModelNode::new("table").with_attribute("name", "book"))
            .with_child(ModelNode::new("view"))
            .with_child(ModelNode::new("table").with_attribute("name", "author"))
    }

    #[test]
    fn node_at_walks_indices() {
        let root = database();
        let node = root.node_at(&ModelPath::root().child(2)).unwrap();
        assert_eq!(node.attribute("name"), Some("author"));
        assert!(root.node_at(&ModelPath::root().child(7)).is_none());
        assert_eq!(root.node_at(&ModelPath::root()), Some(&root));
    }

    #[test]
    fn describe_uses_positions_among_same_named_siblings() {
        let root = database();
        assert_eq!(ModelPath::root().describe(&root), "/database");
        assert_eq!(ModelPath::root().child(2).describe(&root), "/database/table[2]");
        assert_eq!(ModelPath::root().child(1).describe(&root), "/database/view");
    }

    #[test]
    fn parent_of_root_is_none() {
        assert!(ModelPath::root().parent().is_none());
        assert_eq!(ModelPath::root().child(1).parent(), Some(ModelPath::root()));
    }
}
