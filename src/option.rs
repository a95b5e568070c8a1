//! Typed, bounds-checked option cells.
//!
//! Each generator owns a map of these. An option is created from an
//! [`OptionSettings`] record, whose `type` tag picks the kind of cell, and
//! from then on it only accepts values of that kind that fall within its
//! bounds. A rejected value never replaces the stored one.

use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::errors::GeneratorError;

pub const STRING_MIN_LENGTH: i64 = 0;
pub const STRING_MAX_LENGTH: i64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Boolean,
    Integer,
    String,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Boolean => "boolean",
            OptionType::Integer => "integer",
            OptionType::String => "string",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(OptionType::Boolean),
            "integer" => Ok(OptionType::Integer),
            "string" => Ok(OptionType::String),
            other => Err(GeneratorError::InvalidOptionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl OptionValue {
    pub fn option_type(&self) -> OptionType {
        match self {
            OptionValue::Boolean(_) => OptionType::Boolean,
            OptionValue::Integer(_) => OptionType::Integer,
            OptionValue::String(_) => OptionType::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OptionValue::Boolean(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Boolean(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// Settings record handed to `set_option`.
///
/// `type` is kept as a raw tag so that a missing or unknown tag surfaces as
/// [`GeneratorError::InvalidOptionType`] rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSettings {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub default: Option<OptionValue>,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
}

impl OptionSettings {
    pub fn new(kind: OptionType) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn boolean(default: bool) -> Self {
        Self::new(OptionType::Boolean).with_default(default)
    }

    pub fn integer(default: i64) -> Self {
        Self::new(OptionType::Integer).with_default(default)
    }

    pub fn string(default: &str) -> Self {
        Self::new(OptionType::String).with_default(default)
    }

    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Constraint {
    Boolean,
    Integer { min: i64, max: i64 },
    String { min: i64, max: i64 },
}

impl Constraint {
    fn option_type(&self) -> OptionType {
        match self {
            Constraint::Boolean => OptionType::Boolean,
            Constraint::Integer { .. } => OptionType::Integer,
            Constraint::String { .. } => OptionType::String,
        }
    }

    fn check(&self, value: &OptionValue) -> Result<(), GeneratorError> {
        match (self, value) {
            (Constraint::Boolean, OptionValue::Boolean(_)) => Ok(()),
            (Constraint::Integer { min, max }, OptionValue::Integer(i)) => {
                if i < min || i > max {
                    return Err(GeneratorError::InvalidValue(format!(
                        "{} is outside {}..={}", i, min, max
                    )));
                }
                Ok(())
            }
            (Constraint::String { min, max }, OptionValue::String(s)) => {
                let length = s.chars().count() as i64;
                if length < *min || length > *max {
                    return Err(GeneratorError::InvalidValue(format!(
                        "length {} is outside {}..={}", length, min, max
                    )));
                }
                Ok(())
            }
            (constraint, value) => Err(GeneratorError::InvalidValue(format!(
                "{} required, got {}", constraint.option_type(), value.option_type()
            ))),
        }
    }
}

/// A single configuration cell. `value` stays `None` until explicitly set,
/// which keeps "never set" apart from "set to false/0/empty".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorOption {
    #[serde(flatten)]
    constraint: Constraint,
    value: Option<OptionValue>,
    default: Option<OptionValue>,
}

impl GeneratorOption {
    pub fn boolean(default: bool) -> Self {
        Self {
            constraint: Constraint::Boolean,
            value: None,
            default: Some(OptionValue::Boolean(default)),
        }
    }

    /// Integer cell bounded to `min..=max`; `default` is trusted.
    pub fn integer(default: Option<i64>, min: i64, max: i64) -> Self {
        Self {
            constraint: Constraint::Integer { min, max },
            value: None,
            default: default.map(OptionValue::Integer),
        }
    }

    pub fn from_settings(settings: &OptionSettings) -> Result<Self, GeneratorError> {
        let kind: OptionType = settings.kind.as_deref().unwrap_or("").parse()?;

        let constraint = match kind {
            OptionType::Boolean => Constraint::Boolean,
            OptionType::Integer => Constraint::Integer {
                min: settings.min.unwrap_or(i64::MIN),
                max: settings.max.unwrap_or(i64::MAX),
            },
            OptionType::String => Constraint::String {
                min: settings.min.unwrap_or(STRING_MIN_LENGTH),
                max: settings.max.unwrap_or(STRING_MAX_LENGTH),
            },
        };

        if let Constraint::Integer { min, max } | Constraint::String { min, max } = constraint {
            if min > max {
                return Err(GeneratorError::InvalidArgument(format!(
                    "option minimum {} exceeds maximum {}", min, max
                )));
            }
        }

        if let Some(default) = &settings.default {
            constraint.check(default)?;
        }

        Ok(Self {
            constraint,
            value: None,
            default: settings.default.clone(),
        })
    }

    pub fn option_type(&self) -> OptionType {
        self.constraint.option_type()
    }

    /// Explicit value, else the default, else `None`.
    pub fn value(&self) -> Option<&OptionValue> {
        self.value.as_ref().or(self.default.as_ref())
    }

    pub fn default_value(&self) -> Option<&OptionValue> {
        self.default.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn set_value(&mut self, value: OptionValue) -> Result<(), GeneratorError> {
        self.constraint.check(&value)?;
        self.value = Some(value);
        Ok(())
    }

    /// Drops the explicit value so the default shows through again.
    pub fn reset(&mut self) {
        self.value = None;
    }

    pub fn min(&self) -> Option<i64> {
        match self.constraint {
            Constraint::Integer { min, .. } | Constraint::String { min, .. } => Some(min),
            Constraint::Boolean => None,
        }
    }

    pub fn max(&self) -> Option<i64> {
        match self.constraint {
            Constraint::Integer { max, .. } | Constraint::String { max, .. } => Some(max),
            Constraint::Boolean => None,
        }
    }
}
