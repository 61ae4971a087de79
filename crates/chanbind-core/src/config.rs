//! Configuration types for the binding lifecycle system
//!
//! This module defines the per-binding configuration structures an owning
//! application feeds into binding construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::binding::has_text;
use crate::error::{Error, Result};

/// Configuration for a single binding
///
/// Endpoint-specific settings ride along in the free-form `properties`
/// object; the core only interprets `name`, `group`, and `enabled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Name of the binding target
    pub name: String,

    /// Consumer group; blank marks the binding anonymous
    #[serde(default)]
    pub group: String,

    /// Whether this binding should be constructed and started
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Endpoint-specific settings (opaque to the core)
    #[serde(default)]
    pub properties: serde_json::Value,
}

fn default_enabled() -> bool {
    true
}

impl BindingConfig {
    /// Create a configuration with defaults (no group, enabled, no
    /// endpoint properties)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: String::new(),
            enabled: true,
            properties: serde_json::Value::Null,
        }
    }

    /// Set the consumer group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Whether this configuration describes an anonymous binding
    pub fn is_anonymous(&self) -> bool {
        !has_text(&self.group)
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// An enabled binding needs an addressable name; endpoint properties,
    /// when present, must be a JSON object.
    pub fn validate(&self) -> Result<()> {
        if self.enabled && !has_text(&self.name) {
            return Err(Error::invalid_argument(
                "enabled binding requires a non-blank name",
            ));
        }
        if !self.properties.is_null() && !self.properties.is_object() {
            return Err(Error::config(format!(
                "binding {} properties must be a JSON object",
                self.name
            )));
        }
        Ok(())
    }
}

/// Configuration for a set of bindings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingsConfig {
    /// Bindings to construct
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl BindingsConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every binding and reject duplicate (name, group) pairs
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            binding.validate()?;
            if !seen.insert((binding.name.as_str(), binding.group.as_str())) {
                return Err(Error::config(format!(
                    "duplicate binding {}/{}",
                    binding.name, binding.group
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let config: BindingConfig = serde_json::from_str(r#"{ "name": "orders-in" }"#)
            .expect("minimal config parses");

        assert_eq!(config.name, "orders-in");
        assert_eq!(config.group, "");
        assert!(config.enabled);
        assert!(config.is_anonymous());
        config.validate().expect("minimal config is valid");
    }

    #[test]
    fn whitespace_group_is_anonymous() {
        let config = BindingConfig::new("orders-in").with_group("   ");
        assert!(config.is_anonymous());
    }

    #[test]
    fn enabled_binding_requires_a_name() {
        let config = BindingConfig::new("").with_group("grp1");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let mut disabled = BindingConfig::new("");
        disabled.enabled = false;
        disabled.validate().expect("disabled bindings skip the name check");
    }

    #[test]
    fn properties_must_be_an_object() {
        let mut config = BindingConfig::new("orders-in");
        config.properties = serde_json::json!(["not", "an", "object"]);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        config.properties = serde_json::json!({ "capacity": 64 });
        config.validate().expect("object properties are valid");
    }

    #[test]
    fn malformed_json_surfaces_as_a_json_error() {
        let err = BindingsConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn bindings_parse_from_json() {
        let config = BindingsConfig::from_json(
            r#"{
                "bindings": [
                    { "name": "orders-in", "group": "grp1" },
                    { "name": "audit-out", "properties": { "capacity": 16 } }
                ]
            }"#,
        )
        .expect("well-formed config parses and validates");

        assert_eq!(config.bindings.len(), 2);
        assert!(!config.bindings[0].is_anonymous());
        assert!(config.bindings[1].is_anonymous());
    }

    #[test]
    fn duplicate_name_group_pairs_are_rejected() {
        let config = BindingsConfig {
            bindings: vec![
                BindingConfig::new("orders-in").with_group("grp1"),
                BindingConfig::new("orders-in").with_group("grp2"),
                BindingConfig::new("orders-in").with_group("grp1"),
            ],
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
