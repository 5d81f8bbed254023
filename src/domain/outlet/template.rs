//! Placeholder templates for `template` outlets
//!
//! ```text
//! class {{attr:name|pascal}} {
//! {{mergepoint:body}}}
//! ```
//!
//! Placeholders: `mergepoint:NAME`, `option:KEY`, `var:KEY`, `attr:NAME`,
//! `node:name`, `node:text`, `node:path`, each optionally followed by one
//! or more `|transform`. `{{{{` produces a literal `{{`.

use std::fmt;

use super::ExecutionContext;
use crate::error::GenerationError;

/// Case transformation applied to a placeholder value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    /// PascalCase (e.g., BookAuthor)
    Pascal,
    /// camelCase (e.g., bookAuthor)
    Camel,
    /// snake_case (e.g., book_author)
    Snake,
    /// kebab-case (e.g., book-author)
    Kebab,
    Upper,
    Lower,
}

impl CaseTransform {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pascal" => Some(CaseTransform::Pascal),
            "camel" => Some(CaseTransform::Camel),
            "snake" => Some(CaseTransform::Snake),
            "kebab" => Some(CaseTransform::Kebab),
            "upper" => Some(CaseTransform::Upper),
            "lower" => Some(CaseTransform::Lower),
            _ => None,
        }
    }

    pub fn apply(&self, input: &str) -> String {
        use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};

        match self {
            CaseTransform::Pascal => input.to_pascal_case(),
            CaseTransform::Camel => input.to_lower_camel_case(),
            CaseTransform::Snake => input.to_snake_case(),
            CaseTransform::Kebab => input.to_kebab_case(),
            CaseTransform::Upper => input.to_uppercase(),
            CaseTransform::Lower => input.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Mergepoint(String),
    Option(String),
    Variable(String),
    Attribute(String),
    NodeName,
    NodeText,
    NodePath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder {
        value: Value,
        transforms: Vec<CaseTransform>,
    },
}

/// Template parsed once at configuration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Parse failure with the byte offset of the offending placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSyntaxError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for TemplateSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at offset {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for TemplateSyntaxError {}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateSyntaxError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            if let Some(escaped) = after.strip_prefix("{{") {
                literal.push_str("{{");
                offset += start + 4;
                rest = escaped;
                continue;
            }
            let end = after.find("}}").ok_or_else(|| TemplateSyntaxError {
                offset: offset + start,
                message: "unterminated placeholder".to_string(),
            })?;
            let placeholder = parse_placeholder(&after[..end]).map_err(|message| {
                TemplateSyntaxError {
                    offset: offset + start,
                    message,
                }
            })?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(placeholder);
            offset += start + 2 + end + 2;
            rest = &after[end + 2..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Names of the mergepoints the template invokes, in order of appearance.
    pub fn mergepoints(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder {
                value: Value::Mergepoint(name),
                ..
            } => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn render(&self, ctx: &mut ExecutionContext<'_>) -> Result<String, GenerationError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { value, transforms } => {
                    let mut value = resolve(value, ctx)?;
                    for transform in transforms {
                        value = transform.apply(&value);
                    }
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

fn parse_placeholder(inner: &str) -> Result<Segment, String> {
    let mut parts = inner.split('|').map(str::trim);
    let head = parts.next().unwrap_or_default();
    let (kind, arg) = head
        .split_once(':')
        .map(|(k, a)| (k.trim(), a.trim()))
        .ok_or_else(|| format!("placeholder '{}' needs the form kind:argument", head))?;
    if arg.is_empty() {
        return Err(format!("placeholder '{}' has an empty argument", head));
    }

    let value = match (kind, arg) {
        ("mergepoint", name) => Value::Mergepoint(name.to_string()),
        ("option", key) => Value::Option(key.to_string()),
        ("var", key) => Value::Variable(key.to_string()),
        ("attr", name) => Value::Attribute(name.to_string()),
        ("node", "name") => Value::NodeName,
        ("node", "text") => Value::NodeText,
        ("node", "path") => Value::NodePath,
        ("node", other) => return Err(format!("unknown node property '{}'", other)),
        (other, _) => return Err(format!("unknown placeholder kind '{}'", other)),
    };

    let transforms = parts
        .map(|name| CaseTransform::parse(name).ok_or_else(|| format!("unknown transform '{}'", name)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Segment::Placeholder { value, transforms })
}

fn resolve(value: &Value, ctx: &mut ExecutionContext<'_>) -> Result<String, GenerationError> {
    match value {
        Value::Mergepoint(name) => ctx.execute_mergepoint(name),
        Value::Option(key) => ctx.require_option(key).map(str::to_string),
        Value::Variable(key) => ctx.require_variable(key).map(str::to_string),
        Value::Attribute(name) => {
            let node = ctx.current_node()?;
            node.attribute(name)
                .map(str::to_string)
                .ok_or_else(|| GenerationError::MissingAttribute {
                    attribute: name.clone(),
                    element: node.name().to_string(),
                })
        }
        Value::NodeName => Ok(ctx.current_node()?.name().to_string()),
        Value::NodeText => Ok(ctx.current_node()?.text().unwrap_or_default().to_string()),
        Value::NodePath => Ok(ctx.describe_current_path()),
    }
}
