use crate::errors::GeneratorError;
use crate::option::GeneratorOption;

use super::computer::{ DEFAULT_LENGTH, OPTION_LENGTH };
use super::{ GeneratorCore, PasswordGenerator };

const PASSWORD: &str = "password";
const PADDING: char = '?';

/// Predictable output for wiring tests: `"password"` cut or padded to length.
#[derive(Debug, Clone)]
pub struct DummyPasswordGenerator {
    core: GeneratorCore,
}

impl DummyPasswordGenerator {
    pub fn new() -> Self {
        let mut core = GeneratorCore::new();
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

impl Default for DummyPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator for DummyPasswordGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        let length = self.length()?;

        Ok(PASSWORD.chars().chain(std::iter::repeat(PADDING)).take(length).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_password_test() {
        let mut generator = DummyPasswordGenerator::new();
        assert_eq!(generator.generate_password().unwrap(), "password??");

        generator.set_length(5).unwrap();
        assert_eq!(generator.generate_password().unwrap(), "passw");

        generator.set_length(8).unwrap();
        assert_eq!(generator.generate_passwords(2).unwrap(), vec!["password", "password"]);
    }

    #[test]
    fn length_test() {
        let mut generator = DummyPasswordGenerator::new();

        assert_eq!(generator.length().unwrap(), 10);
        assert!(matches!(generator.set_length(0), Err(GeneratorError::InvalidArgument(_))));
        assert!(generator.core().option("UPPERCASE").is_err());
    }
}
