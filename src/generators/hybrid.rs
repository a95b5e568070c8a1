use crate::charset::{ self, CharacterSet, OPTION_AVOID_SIMILAR, OPTION_SYMBOLS };
use crate::errors::GeneratorError;
use crate::option::GeneratorOption;

use super::computer::register_character_options;
use super::{ CharacterPoolGenerator, GeneratorCore, PasswordGenerator };

pub const OPTION_SEGMENT_COUNT: &str = "SEGMENT_COUNT";
pub const OPTION_SEGMENT_LENGTH: &str = "SEGMENT_LENGTH";
pub const PARAMETER_SEPARATOR: &str = "SEPARATOR";

const DEFAULT_SEGMENT_COUNT: i64 = 4;
const DEFAULT_SEGMENT_LENGTH: i64 = 3;
const DEFAULT_SEPARATOR: &str = "-";

/// Segmented passwords such as `aB3-x9Q-...`.
///
/// Symbols and similar-avoidance are not carried by default; re-adding
/// either option with `set_option` brings it back into the pool assembly.
/// The separator characters are always removed from the pool.
#[derive(Debug, Clone)]
pub struct HybridPasswordGenerator {
    core: GeneratorCore,
}

impl HybridPasswordGenerator {
    pub fn new() -> Self {
        let mut core = GeneratorCore::new();
        register_character_options(&mut core);
        core.remove_option(OPTION_SYMBOLS)
            .remove_option(OPTION_AVOID_SIMILAR)
            .insert_option(OPTION_SEGMENT_COUNT, GeneratorOption::integer(Some(DEFAULT_SEGMENT_COUNT), 1, i64::MAX))
            .insert_option(OPTION_SEGMENT_LENGTH, GeneratorOption::integer(Some(DEFAULT_SEGMENT_LENGTH), 1, i64::MAX))
            .set_parameter(PARAMETER_SEPARATOR, DEFAULT_SEPARATOR);

        Self { core }
    }

    pub fn segment_count(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_SEGMENT_COUNT)
    }

    pub fn set_segment_count(&mut self, count: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_SEGMENT_COUNT, count)?;
        Ok(self)
    }

    pub fn segment_length(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_SEGMENT_LENGTH)
    }

    pub fn set_segment_length(&mut self, length: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_SEGMENT_LENGTH, length)?;
        Ok(self)
    }

    pub fn segment_separator(&self) -> &str {
        self.core.parameters().text_or(PARAMETER_SEPARATOR, DEFAULT_SEPARATOR)
    }

    pub fn set_segment_separator(&mut self, separator: &str) -> &mut Self {
        self.core.set_parameter(PARAMETER_SEPARATOR, separator);
        self
    }

    /// Same as [`segment_count`](Self::segment_count).
    pub fn length(&self) -> Result<usize, GeneratorError> {
        self.segment_count()
    }

    pub fn set_length(&mut self, count: i64) -> Result<&mut Self, GeneratorError> {
        self.set_segment_count(count)
    }
}

impl Default for HybridPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator for HybridPasswordGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        let pool = self.character_list()?;
        let segment_count = self.segment_count()?;
        let segment_length = self.segment_length()?;

        let segments = (0..segment_count)
            .map(|_| pool.sample(segment_length, &self.core))
            .collect::<Result<Vec<String>, GeneratorError>>()?;

        Ok(segments.join(self.segment_separator()))
    }
}

impl CharacterPoolGenerator for HybridPasswordGenerator {
    fn character_list(&self) -> Result<CharacterSet, GeneratorError> {
        let pool = charset::assemble(&self.core)?.without(self.segment_separator());
        if pool.is_empty() {
            return Err(GeneratorError::CharactersNotFound);
        }

        Ok(pool)
    }
}
