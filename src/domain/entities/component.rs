//! Component specifications
//!
//! Pluggable components (outlets, source providers, transformers,
//! postprocessors, skip deciders) are declared as a type tag plus
//! parameters and instantiated through a `ComponentFactory`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

/// Named parameters of a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn with_text(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, ParamValue::Text(value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Scalar parameter rendered as text
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|v| v.to_string())
    }

    pub fn require_text(&self, component: &str, key: &str) -> Result<String, ConfigurationError> {
        self.text(key)
            .ok_or_else(|| ConfigurationError::MissingParameter {
                component: component.to_string(),
                parameter: key.to_string(),
            })
    }

    /// List parameter; a single string counts as a one-element list.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        match self.0.get(key)? {
            ParamValue::List(items) => Some(items.clone()),
            other => Some(vec![other.to_string()]),
        }
    }

    pub fn bool(&self, component: &str, key: &str) -> Result<Option<bool>, ConfigurationError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(ParamValue::Bool(b)) => Ok(Some(*b)),
            Some(ParamValue::Text(s)) if s == "true" || s == "false" => Ok(Some(s == "true")),
            Some(other) => Err(ConfigurationError::InvalidParameter {
                component: component.to_string(),
                parameter: key.to_string(),
                message: format!("expected true or false, got '{}'", other),
            }),
        }
    }
}

/// Type tag plus parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(flatten)]
    pub params: Params,
}

impl ComponentSpec {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// Where an output's sources come from and how they are addressed.
///
/// Every field may be left unset and inherited from unit-level defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSpec {
    pub provider: Option<ComponentSpec>,
    /// Selector for the model nodes an output is generated for
    pub element: Option<String>,
    pub transformers: Option<Vec<ComponentSpec>>,
    pub skip_decider: Option<ComponentSpec>,
}

impl SourceSpec {
    /// Fill every unset setting from `defaults`.
    ///
    /// Provider parameters are merged key by key when both sides use the
    /// same provider type.
    pub fn copy_not_set_settings_from(&mut self, defaults: &SourceSpec) {
        if self.provider.is_none() {
            self.provider = defaults.provider.clone();
        } else if let (Some(own), Some(default)) =
            (self.provider.as_mut(), defaults.provider.as_ref())
        {
            if own.type_tag == default.type_tag {
                for (key, value) in default.params.iter() {
                    if !own.params.contains(key) {
                        own.params.insert(key, value.clone());
                    }
                }
            }
        }
        if self.element.is_none() {
            self.element = defaults.element.clone();
        }
        if self.transformers.is_none() {
            self.transformers = defaults.transformers.clone();
        }
        if self.skip_decider.is_none() {
            self.skip_decider = defaults.skip_decider.clone();
        }
    }

    pub fn element_or_root(&self) -> &str {
        self.element.as_deref().unwrap_or("/")
    }

    pub fn transformers(&self) -> &[ComponentSpec] {
        self.transformers.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_accepts_single_string() {
        let params = Params::new().with_text("include", "*.json");
        assert_eq!(params.list("include"), Some(vec!["*.json".to_string()]));
    }

    #[test]
    fn require_text_reports_component() {
        let err = Params::new().require_text("replace", "from").unwrap_err();
        assert_eq!(err.to_string(), "replace: missing required parameter 'from'");
    }

    #[test]
    fn copy_not_set_settings_keeps_own_values() {
        let defaults = SourceSpec {
            provider: Some(ComponentSpec::new("file").with_params(
                Params::new()
                    .with_text("base_dir", "schema")
                    .with_text("format", "json"),
            )),
            element: Some("/database".to_string()),
            transformers: None,
            skip_decider: None,
        };
        let mut own = SourceSpec {
            provider: Some(
                ComponentSpec::new("file").with_params(Params::new().with_text("format", "yaml")),
            ),
            element: Some("//table".to_string()),
            ..SourceSpec::default()
        };

        own.copy_not_set_settings_from(&defaults);

        let provider = own.provider.unwrap();
        assert_eq!(provider.params.text("format").as_deref(), Some("yaml"));
        assert_eq!(provider.params.text("base_dir").as_deref(), Some("schema"));
        assert_eq!(own.element.as_deref(), Some("//table"));
    }

    #[test]
    fn copy_not_set_settings_ignores_other_provider_types() {
        let defaults = SourceSpec {
            provider: Some(
                ComponentSpec::new("file").with_params(Params::new().with_text("base_dir", "x")),
            ),
            ..SourceSpec::default()
        };
        let mut own = SourceSpec {
            provider: Some(ComponentSpec::new("inline")),
            ..SourceSpec::default()
        };
        own.copy_not_set_settings_from(&defaults);
        assert!(!own.provider.unwrap().params.contains("base_dir"));
    }
}
