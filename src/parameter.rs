use std::collections::HashMap;

use serde::{ Deserialize, Serialize };

/// Unvalidated auxiliary generator state: character strings, separators,
/// dictionary locations and memoized word lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Text(String),
    List(Vec<String>),
}

impl Parameter {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Parameter::Text(text) => Some(text.as_str()),
            Parameter::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Parameter::List(list) => Some(list.as_slice()),
            Parameter::Text(_) => None,
        }
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::Text(value.to_string())
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::Text(value)
    }
}

impl From<Vec<String>> for Parameter {
    fn from(value: Vec<String>) -> Self {
        Parameter::List(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    values: HashMap<String, Parameter>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: Parameter) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.values.get(name)
    }

    pub fn get_or(&self, name: &str, default: Parameter) -> Parameter {
        self.values.get(name).cloned().unwrap_or(default)
    }

    /// Text under `name`, or `default` when absent or not text.
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).and_then(Parameter::as_text).unwrap_or(default)
    }

    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
