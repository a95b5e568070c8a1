//! Character classes and pool assembly shared by the character-based
//! generators.

use std::fmt;

use log::debug;

use crate::errors::GeneratorError;
use crate::generators::GeneratorCore;

pub const UPPERCASE_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@$%^&*()<>,.?/[]{}-=_+";
pub const SIMILAR_CHARACTERS: &str = "lOo";

pub const OPTION_UPPER_CASE: &str = "UPPERCASE";
pub const OPTION_LOWER_CASE: &str = "LOWERCASE";
pub const OPTION_NUMBERS: &str = "NUMBERS";
pub const OPTION_SYMBOLS: &str = "SYMBOLS";
pub const OPTION_AVOID_SIMILAR: &str = "AVOID_SIMILAR";

pub const PARAMETER_UPPER_CASE: &str = "UPPERCASE";
pub const PARAMETER_LOWER_CASE: &str = "LOWERCASE";
pub const PARAMETER_NUMBERS: &str = "NUMBERS";
pub const PARAMETER_SYMBOLS: &str = "SYMBOLS";
pub const PARAMETER_SIMILAR: &str = "AVOID_SIMILAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescription {
    pub key: &'static str,
    pub label: &'static str,
}

/// Boolean options understood by the pool assembly.
pub const CHARACTER_OPTIONS: [OptionDescription; 5] = [
    OptionDescription { key: OPTION_UPPER_CASE, label: "Include Uppercase" },
    OptionDescription { key: OPTION_LOWER_CASE, label: "Include Lowercase" },
    OptionDescription { key: OPTION_NUMBERS, label: "Include Numbers" },
    OptionDescription { key: OPTION_SYMBOLS, label: "Include Symbols" },
    OptionDescription { key: OPTION_AVOID_SIMILAR, label: "Avoid Similar Characters" },
];

pub fn is_character_option(name: &str) -> bool {
    CHARACTER_OPTIONS.iter().any(|option| option.key == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Numbers,
    Symbols,
}

impl CharacterClass {
    /// Pool order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub fn option_name(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => OPTION_UPPER_CASE,
            CharacterClass::Lowercase => OPTION_LOWER_CASE,
            CharacterClass::Numbers => OPTION_NUMBERS,
            CharacterClass::Symbols => OPTION_SYMBOLS,
        }
    }

    pub fn parameter_name(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => PARAMETER_UPPER_CASE,
            CharacterClass::Lowercase => PARAMETER_LOWER_CASE,
            CharacterClass::Numbers => PARAMETER_NUMBERS,
            CharacterClass::Symbols => PARAMETER_SYMBOLS,
        }
    }

    pub fn default_characters(&self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE_LETTERS,
            CharacterClass::Lowercase => LOWERCASE_LETTERS,
            CharacterClass::Numbers => NUMBERS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn from_option_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.option_name() == name)
    }

    /// Characters configured for this class on `core`.
    pub fn characters<'a>(&self, core: &'a GeneratorCore) -> &'a str {
        core.parameters().text_or(self.parameter_name(), self.default_characters())
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// The characters a password is sampled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    characters: String,
}

impl CharacterSet {
    pub fn new(characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
        }
    }

    pub fn characters(&self) -> &str {
        &self.characters
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.characters.chars().count()
    }

    pub fn contains(&self, c: char) -> bool {
        self.characters.contains(c)
    }

    /// Copy with every occurrence of every character in `remove` dropped.
    pub fn without(&self, remove: &str) -> CharacterSet {
        CharacterSet {
            characters: self.characters.chars().filter(|c| !remove.contains(*c)).collect(),
        }
    }

    /// Draws `length` characters independently and uniformly.
    pub fn sample(&self, length: usize, core: &GeneratorCore) -> Result<String, GeneratorError> {
        let characters: Vec<char> = self.characters.chars().collect();
        if characters.is_empty() {
            return Err(GeneratorError::CharactersNotFound);
        }

        let last = characters.len() as i64 - 1;
        let mut password = String::with_capacity(length);

        for _ in 0..length {
            let index = core.random_integer(0, last)?;
            password.push(characters[index as usize]);
        }

        Ok(password)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.characters)
    }
}

/// Builds the pool from the enabled classes of `core`, then strips the
/// similar set when avoid-similar is on.
pub fn assemble(core: &GeneratorCore) -> Result<CharacterSet, GeneratorError> {
    let mut characters = String::new();

    for class in CharacterClass::ALL {
        if core.is_enabled(class.option_name()) {
            characters.push_str(class.characters(core));
        }
    }

    let mut pool = CharacterSet::new(characters);

    if core.is_enabled(OPTION_AVOID_SIMILAR) {
        let similar = core.parameters().text_or(PARAMETER_SIMILAR, SIMILAR_CHARACTERS);
        pool = pool.without(similar);
    }

    if pool.is_empty() {
        return Err(GeneratorError::CharactersNotFound);
    }

    debug!("assembled character pool of {} characters", pool.len());

    Ok(pool)
}
