use log::trace;

use crate::charset::{ OPTION_AVOID_SIMILAR, OPTION_LOWER_CASE, OPTION_NUMBERS, OPTION_SYMBOLS, OPTION_UPPER_CASE };
use crate::errors::GeneratorError;
use crate::option::GeneratorOption;

use super::{ CharacterPoolGenerator, GeneratorCore, PasswordGenerator };

pub const OPTION_LENGTH: &str = "LENGTH";
pub const DEFAULT_LENGTH: i64 = 10;

pub(crate) fn register_character_options(core: &mut GeneratorCore) {
    core.insert_option(OPTION_UPPER_CASE, GeneratorOption::boolean(true))
        .insert_option(OPTION_LOWER_CASE, GeneratorOption::boolean(true))
        .insert_option(OPTION_NUMBERS, GeneratorOption::boolean(true))
        .insert_option(OPTION_SYMBOLS, GeneratorOption::boolean(false))
        .insert_option(OPTION_AVOID_SIMILAR, GeneratorOption::boolean(false));
}

/// Fixed-length passwords sampled uniformly from the character pool.
#[derive(Debug, Clone)]
pub struct ComputerPasswordGenerator {
    core: GeneratorCore,
}

impl ComputerPasswordGenerator {
    pub fn new() -> Self {
        let mut core = GeneratorCore::new();
        register_character_options(&mut core);
        core.insert_option(OPTION_LENGTH, GeneratorOption::integer(Some(DEFAULT_LENGTH), 1, i64::MAX));

        Self { core }
    }

    pub fn length(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_LENGTH)
    }

    pub fn set_length(&mut self, length: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_LENGTH, length)?;
        Ok(self)
    }
}

impl Default for ComputerPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator for ComputerPasswordGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        let pool = self.character_list()?;
        let length = self.length()?;
        trace!("sampling {} characters", length);

        pool.sample(length, &self.core)
    }
}

impl CharacterPoolGenerator for ComputerPasswordGenerator {}
