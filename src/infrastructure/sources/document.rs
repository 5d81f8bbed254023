//! Model documents
//!
//! JSON, YAML and TOML documents become `ModelNode` trees:
//!
//! - keys starting with `@` are attributes, `#text` is the element text
//! - an array value yields one child element per item, all named by the key
//! - scalar values yield child elements carrying the scalar as text
//! - a document with a single top-level key uses that key as root element,
//!   otherwise the root element is named `document`
//!
//! Object keys are visited in sorted order; arrays keep their order.

use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::domain::entities::ModelNode;

/// Root element name for documents with several top-level keys
pub const DOCUMENT_ROOT: &str = "document";

/// Element name for items of a top-level array
pub const ARRAY_ITEM: &str = "item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    /// Parse `content` into a model tree.
    pub fn parse(&self, content: &str) -> Result<ModelNode, String> {
        let value: Value = match self {
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
            DocumentFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?,
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
        };
        document_to_model(value)
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "toml" => Ok(DocumentFormat::Toml),
            other => Err(format!("unknown document format '{}'", other)),
        }
    }
}

pub fn document_to_model(value: Value) -> Result<ModelNode, String> {
    match value {
        Value::Object(map) if map.len() == 1 => {
            let Some((name, value)) = map.into_iter().next() else {
                return Err("empty document".to_string());
            };
            if name.starts_with('@') || name == "#text" {
                return Err(format!("top-level key '{}' cannot be the root element", name));
            }
            element(name, value)
        }
        Value::Object(map) => fill(ModelNode::new(DOCUMENT_ROOT), map),
        Value::Array(items) => {
            let mut root = ModelNode::new(DOCUMENT_ROOT);
            for item in items {
                root.push_child(element(ARRAY_ITEM.to_string(), item)?);
            }
            Ok(root)
        }
        other => Err(format!("document must be an object, found {}", kind(&other))),
    }
}

fn element(name: String, value: Value) -> Result<ModelNode, String> {
    let node = ModelNode::new(name);
    match value {
        Value::Object(map) => fill(node, map),
        Value::Null => Ok(node),
        Value::Array(_) => Err(format!("nested array directly inside '{}'", node.name())),
        scalar => Ok(node.with_text(scalar_text(&scalar))),
    }
}

fn fill(mut node: ModelNode, map: Map<String, Value>) -> Result<ModelNode, String> {
    for (key, value) in map {
        if let Some(attribute) = key.strip_prefix('@') {
            match value {
                Value::Object(_) | Value::Array(_) => {
                    return Err(format!(
                        "attribute '{}' of '{}' must be a scalar",
                        attribute,
                        node.name()
                    ))
                }
                Value::Null => {}
                scalar => node.set_attribute(attribute, scalar_text(&scalar)),
            }
        } else if key == "#text" {
            if !value.is_null() {
                node.set_text(scalar_text(&value));
            }
        } else if let Value::Array(items) = value {
            for item in items {
                node.push_child(element(key.clone(), item)?);
            }
        } else {
            node.push_child(element(key, value)?);
        }
    }
    Ok(node)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_attributes_children_and_text() {
        let root = DocumentFormat::Json
            .parse(
                r##"{"database": {"@name": "library", "table": [
                    {"@name": "book", "column": [{"@name": "id"}, {"@name": "title", "@size": 200}]},
                    {"@name": "author", "description": {"#text": "people"}}
                ]}}"##,
            )
            .unwrap();

        assert_eq!(root.name(), "database");
        assert_eq!(root.attribute("name"), Some("library"));
        assert_eq!(root.children().len(), 2);
        let book = &root.children()[0];
        assert_eq!(book.children()[1].attribute("size"), Some("200"));
        let author = &root.children()[1];
        assert_eq!(author.children()[0].text(), Some("people"));
    }

    #[test]
    fn yaml_and_toml_documents() {
        let yaml = DocumentFormat::Yaml
            .parse("catalog:\n  \"@version\": 2\n  entry:\n    - \"@id\": a\n    - \"@id\": b\n")
            .unwrap();
        assert_eq!(yaml.attribute("version"), Some("2"));
        assert_eq!(yaml.children().len(), 2);

        let toml = DocumentFormat::Toml
            .parse("[service]\n\"@name\" = \"api\"\nport = 8080\n")
            .unwrap();
        assert_eq!(toml.name(), "service");
        assert_eq!(toml.children()[0].name(), "port");
        assert_eq!(toml.children()[0].text(), Some("8080"));
    }

    #[test]
    fn several_top_level_keys_use_document_root() {
        let root = DocumentFormat::Json.parse(r#"{"a": 1, "b": 2}"#).unwrap();
        assert_eq!(root.name(), DOCUMENT_ROOT);
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(DocumentFormat::Json.parse("42").is_err());
        assert!(DocumentFormat::Json.parse(r#"{"a": {"@x": [1]}}"#).is_err());
        assert!(DocumentFormat::Json.parse("{not json").is_err());
    }

    #[test]
    fn format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/b.YML")), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path(Path::new("a/b.xml")), None);
    }
}
