//! User-configurable setting descriptions and value resolution.
//!
//! A plugin exposes settings by attaching a map of [`ConfigField`]s to its
//! manifest. The host persists the user's choices and hands a resolved
//! value table back to the plugin inside every context object.
//! [`resolve_config`] is the shared resolution step: validate the supplied
//! values against the schema, fill defaults for absent keys, and reject
//! keys the schema does not declare.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::PluginError;

/// Resolved configuration values keyed by field name.
pub type ConfigValues = BTreeMap<String, Value>;

/// The value type of a configurable setting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConfigFieldType {
    /// Free-form text.
    String,
    /// A JSON number; `min`/`max` bounds apply.
    Number,
    /// A true/false toggle.
    Boolean,
    /// One value out of a closed option list.
    Select,
}

/// One entry in a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    value: String,
    label: String,
}

impl SelectOption {
    /// Creates an option with a stored value and a display label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Returns the stored value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(&self) -> &str {
        self.label.as_str()
    }
}

/// Description of one user-configurable setting.
///
/// `options` is only meaningful for [`ConfigFieldType::Select`] fields;
/// `min`/`max` only for [`ConfigFieldType::Number`] fields.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::config::ConfigField;
/// use serde_json::json;
///
/// let field = ConfigField::number("Poll interval")
///     .with_range(30.0, 3600.0)
///     .with_default(json!(300.0));
/// assert!(field.validate_value("poll_interval", &json!(60.0)).is_ok());
/// assert!(field.validate_value("poll_interval", &json!(5.0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    #[serde(rename = "type")]
    field_type: ConfigFieldType,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl ConfigField {
    fn new(field_type: ConfigFieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            description: None,
            required: false,
            default: None,
            options: None,
            min: None,
            max: None,
        }
    }

    /// Describes a free-form text setting.
    #[must_use]
    pub fn string(label: impl Into<String>) -> Self {
        Self::new(ConfigFieldType::String, label)
    }

    /// Describes a numeric setting.
    #[must_use]
    pub fn number(label: impl Into<String>) -> Self {
        Self::new(ConfigFieldType::Number, label)
    }

    /// Describes a boolean toggle.
    #[must_use]
    pub fn boolean(label: impl Into<String>) -> Self {
        Self::new(ConfigFieldType::Boolean, label)
    }

    /// Describes a closed-choice setting.
    #[must_use]
    pub fn select(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(ConfigFieldType::Select, label);
        field.options = Some(options);
        field
    }

    /// Adds a longer help text shown next to the field.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the field as mandatory.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Supplies the default value used when the user has not set one.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Bounds a numeric field to an inclusive range.
    #[must_use]
    pub const fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Returns the value type.
    #[must_use]
    pub const fn field_type(&self) -> ConfigFieldType {
        self.field_type
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the help text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the field is mandatory.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the option list for select fields.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Checks a supplied value against this field's type and constraints.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Validation`] naming `field` when the value
    /// has the wrong JSON type, falls outside a numeric range, or is not a
    /// member of a select field's option list.
    pub fn validate_value(&self, field: &str, value: &Value) -> Result<(), PluginError> {
        match self.field_type {
            ConfigFieldType::String => {
                if !value.is_string() {
                    return Err(PluginError::validation(field, "must be a string"));
                }
            }
            ConfigFieldType::Boolean => {
                if !value.is_boolean() {
                    return Err(PluginError::validation(field, "must be a boolean"));
                }
            }
            ConfigFieldType::Number => {
                let Some(number) = value.as_f64() else {
                    return Err(PluginError::validation(field, "must be a number"));
                };
                if let Some(min) = self.min
                    && number < min
                {
                    return Err(PluginError::validation(
                        field,
                        format!("must be at least {min}"),
                    ));
                }
                if let Some(max) = self.max
                    && number > max
                {
                    return Err(PluginError::validation(
                        field,
                        format!("must be at most {max}"),
                    ));
                }
            }
            ConfigFieldType::Select => {
                let Some(choice) = value.as_str() else {
                    return Err(PluginError::validation(field, "must be a string option"));
                };
                if !self.options().iter().any(|o| o.value() == choice) {
                    return Err(PluginError::validation(
                        field,
                        format!("'{choice}' is not one of the declared options"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Validates `overrides` against `schema` and fills defaults.
///
/// Every supplied key must be declared in the schema and pass its field's
/// [`ConfigField::validate_value`]. Absent keys take the field default when
/// one exists; a required field with neither a supplied value nor a default
/// is an error.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] for undeclared keys, type/range
/// violations, or missing required values.
pub fn resolve_config(
    schema: &BTreeMap<String, ConfigField>,
    overrides: &ConfigValues,
) -> Result<ConfigValues, PluginError> {
    if let Some(unknown) = overrides.keys().find(|key| !schema.contains_key(*key)) {
        return Err(PluginError::validation(
            unknown.clone(),
            "is not declared in the config schema",
        ));
    }
    let mut resolved = ConfigValues::new();
    for (key, field) in schema {
        if let Some(value) = overrides.get(key) {
            field.validate_value(key, value)?;
            resolved.insert(key.clone(), value.clone());
        } else if let Some(default) = field.default_value() {
            resolved.insert(key.clone(), default.clone());
        } else if field.is_required() {
            return Err(PluginError::validation(
                key.clone(),
                "is required and has no default",
            ));
        }
    }
    Ok(resolved)
}
