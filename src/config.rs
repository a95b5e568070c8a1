use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{ Deserialize, Serialize };

use crate::charset;
use crate::errors::GeneratorError;
use crate::generators::{ Generator, GeneratorKind, PasswordGenerator };
use crate::option::{ OptionSettings, OptionValue };
use crate::parameter::Parameter;
use crate::random::SeededRandom;

/// Serialized description of a ready-to-use generator.
///
/// ```json
/// {
///   "kind": "requirement",
///   "options": { "LENGTH": 16, "SYMBOLS": true },
///   "minimum_counts": { "NUMBERS": 2 },
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    pub options: BTreeMap<String, OptionValue>,
    pub parameters: BTreeMap<String, Parameter>,
    pub minimum_counts: BTreeMap<String, i64>,
    pub maximum_counts: BTreeMap<String, i64>,
    pub max_attempts: Option<usize>,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(kind: GeneratorKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeneratorError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        debug!("loaded generator config from {}", path.display());
        Self::from_json(&contents)
    }

    pub fn build(&self) -> Result<Generator, GeneratorError> {
        let mut generator = Generator::new(self.kind);

        if let Some(seed) = self.seed {
            generator.set_random_source(Arc::new(SeededRandom::new(seed)));
        }

        for (name, value) in &self.options {
            if !generator.core().has_option(name) && charset::is_character_option(name) {
                generator.set_option(name, &OptionSettings::boolean(false))?;
            }
            generator.set_option_value(name, value.clone())?;
        }

        for (name, value) in &self.parameters {
            generator.set_parameter(name, value.clone());
        }

        if !self.has_requirements() {
            return Ok(generator);
        }

        let kind = self.kind;
        let requirement = generator.as_requirement_mut().ok_or_else(|| {
            GeneratorError::InvalidArgument(format!("'{}' generator does not take character counts", kind))
        })?;

        for (name, count) in &self.minimum_counts {
            requirement.set_minimum_count(name, Some(*count))?;
        }
        for (name, count) in &self.maximum_counts {
            requirement.set_maximum_count(name, Some(*count))?;
        }
        if let Some(attempts) = self.max_attempts {
            requirement.set_max_attempts(Some(attempts));
        }

        Ok(generator)
    }

    fn has_requirements(&self) -> bool {
        !self.minimum_counts.is_empty() || !self.maximum_counts.is_empty() || self.max_attempts.is_some()
    }
}
