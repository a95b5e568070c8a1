use std::path::{ Path, PathBuf };
use std::sync::Arc;

use log::debug;

use crate::dictionary::{ FileWordSource, WordSource };
use crate::errors::GeneratorError;
use crate::option::{ GeneratorOption, OptionSettings, OptionValue };
use crate::parameter::Parameter;

use super::{ GeneratorCore, PasswordGenerator };

pub const OPTION_WORDS: &str = "WORDS";
pub const OPTION_MIN_WORD_LENGTH: &str = "MIN";
pub const OPTION_MAX_WORD_LENGTH: &str = "MAX";

pub const PARAMETER_DICTIONARY_FILE: &str = "DICTIONARY";
pub const PARAMETER_WORD_CACHE: &str = "CACHE";
pub const PARAMETER_WORD_SEPARATOR: &str = "SEPARATOR";

const DEFAULT_WORDS: i64 = 4;
const DEFAULT_MIN_WORD_LENGTH: i64 = 3;
const DEFAULT_MAX_WORD_LENGTH: i64 = 20;

/// Passphrases of random dictionary words joined by a separator.
///
/// The filtered word list is memoized in the `CACHE` parameter and dropped
/// whenever the dictionary or the word length bounds change.
#[derive(Debug, Clone)]
pub struct HumanPasswordGenerator {
    core: GeneratorCore,
    source: Arc<dyn WordSource>,
}

impl HumanPasswordGenerator {
    pub fn new() -> Self {
        Self::with_word_source(Arc::new(FileWordSource))
    }

    pub fn with_word_source(source: Arc<dyn WordSource>) -> Self {
        let mut core = GeneratorCore::new();
        core.insert_option(OPTION_WORDS, GeneratorOption::integer(Some(DEFAULT_WORDS), 1, i64::MAX))
            .insert_option(OPTION_MIN_WORD_LENGTH, GeneratorOption::integer(Some(DEFAULT_MIN_WORD_LENGTH), 1, i64::MAX))
            .insert_option(OPTION_MAX_WORD_LENGTH, GeneratorOption::integer(Some(DEFAULT_MAX_WORD_LENGTH), 1, i64::MAX))
            .set_parameter(PARAMETER_WORD_SEPARATOR, "");

        Self { core, source }
    }

    pub fn generate_word_list(&mut self) -> Result<Vec<String>, GeneratorError> {
        self.fill_word_cache()?;
        self.cached_words().map(<[String]>::to_vec).ok_or(GeneratorError::WordsNotFound)
    }

    fn cached_words(&self) -> Option<&[String]> {
        self.core.parameter(PARAMETER_WORD_CACHE).and_then(Parameter::as_list)
    }

    fn fill_word_cache(&mut self) -> Result<(), GeneratorError> {
        if self.cached_words().is_some() {
            return Ok(());
        }

        let location = self.word_list()?;
        let min = self.min_word_length()?;
        let max = self.max_word_length()?;

        let words: Vec<String> = self
            .source
            .read_lines(&location.to_string_lossy())?
            .into_iter()
            .filter(|word| {
                let length = word.chars().count();
                length >= min && length <= max
            })
            .collect();

        if words.is_empty() {
            return Err(GeneratorError::WordsNotFound);
        }

        debug!("loaded {} words from {}", words.len(), location.display());
        self.core.set_parameter(PARAMETER_WORD_CACHE, words);

        Ok(())
    }

    pub fn word_count(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_WORDS)
    }

    pub fn set_word_count(&mut self, count: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_WORDS, count)?;
        Ok(self)
    }

    pub fn min_word_length(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_MIN_WORD_LENGTH)
    }

    pub fn set_min_word_length(&mut self, length: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_MIN_WORD_LENGTH, length)?;
        self.core.remove_parameter(PARAMETER_WORD_CACHE);
        Ok(self)
    }

    pub fn max_word_length(&self) -> Result<usize, GeneratorError> {
        self.core.count_value(OPTION_MAX_WORD_LENGTH)
    }

    pub fn set_max_word_length(&mut self, length: i64) -> Result<&mut Self, GeneratorError> {
        self.core.set_positive(OPTION_MAX_WORD_LENGTH, length)?;
        self.core.remove_parameter(PARAMETER_WORD_CACHE);
        Ok(self)
    }

    pub fn set_word_list(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, GeneratorError> {
        let path = path.as_ref();
        let location = path.to_string_lossy();
        if !self.source.exists(&location) {
            return Err(GeneratorError::FileNotFound(path.to_path_buf()));
        }

        self.core.set_parameter(PARAMETER_DICTIONARY_FILE, location.into_owned());
        self.core.remove_parameter(PARAMETER_WORD_CACHE);
        Ok(self)
    }

    pub fn word_list(&self) -> Result<PathBuf, GeneratorError> {
        let location = self
            .core
            .parameter(PARAMETER_DICTIONARY_FILE)
            .and_then(Parameter::as_text)
            .unwrap_or("");

        if !self.source.exists(location) {
            return Err(GeneratorError::FileNotFound(PathBuf::from(location)));
        }

        Ok(PathBuf::from(location))
    }

    pub fn word_separator(&self) -> &str {
        self.core.parameters().text_or(PARAMETER_WORD_SEPARATOR, "")
    }

    pub fn set_word_separator(&mut self, separator: &str) -> &mut Self {
        self.core.set_parameter(PARAMETER_WORD_SEPARATOR, separator);
        self
    }

    /// Shortest passphrase the current settings can produce.
    pub fn min_password_length(&self) -> Result<usize, GeneratorError> {
        self.password_length(self.min_word_length()?)
    }

    /// Longest passphrase the current settings can produce.
    pub fn max_password_length(&self) -> Result<usize, GeneratorError> {
        self.password_length(self.max_word_length()?)
    }

    fn password_length(&self, word_length: usize) -> Result<usize, GeneratorError> {
        let words = self.word_count()?;
        let separator = self.word_separator().chars().count();

        Ok(word_length * words + separator * words.saturating_sub(1))
    }

    fn invalidates_cache(name: &str) -> bool {
        matches!(name, OPTION_MIN_WORD_LENGTH | OPTION_MAX_WORD_LENGTH | PARAMETER_DICTIONARY_FILE)
    }
}

impl Default for HumanPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator for HumanPasswordGenerator {
    fn core(&self) -> &GeneratorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        &mut self.core
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        self.fill_word_cache()?;
        let words = self.cached_words().ok_or(GeneratorError::WordsNotFound)?;
        let last = words.len() as i64 - 1;
        let count = self.word_count()?;

        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let index = self.core.random_integer(0, last)?;
            picked.push(words[index as usize].as_str());
        }

        Ok(picked.join(self.word_separator()))
    }

    fn set_option(&mut self, name: &str, settings: &OptionSettings) -> Result<&mut Self, GeneratorError> {
        self.core.set_option(name, settings)?;
        if Self::invalidates_cache(name) {
            self.core.remove_parameter(PARAMETER_WORD_CACHE);
        }
        Ok(self)
    }

    fn remove_option(&mut self, name: &str) -> &mut Self {
        self.core.remove_option(name);
        if Self::invalidates_cache(name) {
            self.core.remove_parameter(PARAMETER_WORD_CACHE);
        }
        self
    }

    fn set_option_value(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self, GeneratorError> {
        self.core.set_option_value(name, value)?;
        if Self::invalidates_cache(name) {
            self.core.remove_parameter(PARAMETER_WORD_CACHE);
        }
        Ok(self)
    }

    fn set_parameter(&mut self, name: &str, value: impl Into<Parameter>) -> &mut Self {
        self.core.set_parameter(name, value);
        if Self::invalidates_cache(name) {
            self.core.remove_parameter(PARAMETER_WORD_CACHE);
        }
        self
    }
}
