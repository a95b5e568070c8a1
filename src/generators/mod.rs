//! Generator surface shared by every concrete generator.
//!
//! Each generator embeds a [`GeneratorCore`], the option/parameter store plus
//! the injected random source, and implements [`PasswordGenerator`] on top of
//! it. The character-based generators additionally implement
//! [`CharacterPoolGenerator`], which carries the pool assembly.

mod computer;
mod dummy;
mod human;
mod hybrid;
mod requirement;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{ Arc, OnceLock };

use serde::{ Deserialize, Serialize };

use crate::charset::{ self, CharacterClass, CharacterSet, OPTION_AVOID_SIMILAR, PARAMETER_SIMILAR, SIMILAR_CHARACTERS };
use crate::errors::GeneratorError;
use crate::option::{ GeneratorOption, OptionSettings, OptionValue };
use crate::parameter::{ Parameter, ParameterStore };
use crate::random::{ RandomSource, ThreadRandom };

pub use computer::{ ComputerPasswordGenerator, DEFAULT_LENGTH, OPTION_LENGTH };
pub use dummy::DummyPasswordGenerator;
pub use human::{
    HumanPasswordGenerator, OPTION_MAX_WORD_LENGTH, OPTION_MIN_WORD_LENGTH, OPTION_WORDS,
    PARAMETER_DICTIONARY_FILE, PARAMETER_WORD_CACHE, PARAMETER_WORD_SEPARATOR,
};
pub use hybrid::{ HybridPasswordGenerator, OPTION_SEGMENT_COUNT, OPTION_SEGMENT_LENGTH, PARAMETER_SEPARATOR };
pub use requirement::{ DEFAULT_MAX_ATTEMPTS, RequirementPasswordGenerator };

#[derive(Debug, Clone, Default)]
pub struct GeneratorCore {
    options: BTreeMap<String, GeneratorOption>,
    parameters: ParameterStore,
    random: OnceLock<Arc<dyn RandomSource>>,
}

impl GeneratorCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_option(&mut self, name: &str, settings: &OptionSettings) -> Result<&mut Self, GeneratorError> {
        let option = GeneratorOption::from_settings(settings)?;
        self.options.insert(name.to_string(), option);
        Ok(self)
    }

    pub(crate) fn insert_option(&mut self, name: &str, option: GeneratorOption) -> &mut Self {
        self.options.insert(name.to_string(), option);
        self
    }

    pub fn remove_option(&mut self, name: &str) -> &mut Self {
        self.options.remove(name);
        self
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn option(&self, name: &str) -> Result<&GeneratorOption, GeneratorError> {
        self.options
            .get(name)
            .ok_or_else(|| GeneratorError::InvalidOption(name.to_string()))
    }

    pub fn options(&self) -> &BTreeMap<String, GeneratorOption> {
        &self.options
    }

    pub fn set_option_value(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self, GeneratorError> {
        let option = self
            .options
            .get_mut(name)
            .ok_or_else(|| GeneratorError::InvalidOption(name.to_string()))?;

        option.set_value(value.into())?;
        Ok(self)
    }

    pub fn option_value(&self, name: &str) -> Result<Option<&OptionValue>, GeneratorError> {
        Ok(self.option(name)?.value())
    }

    /// True only for a present boolean option whose value is `true`.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.options
            .get(name)
            .and_then(GeneratorOption::value)
            .and_then(OptionValue::as_bool)
            .unwrap_or(false)
    }

    pub fn integer_value(&self, name: &str) -> Result<Option<i64>, GeneratorError> {
        Ok(self.option_value(name)?.and_then(OptionValue::as_integer))
    }

    /// Integer option read as a non-negative count; unset is an error.
    pub fn count_value(&self, name: &str) -> Result<usize, GeneratorError> {
        let value = self
            .integer_value(name)?
            .ok_or_else(|| GeneratorError::InvalidArgument(format!("option '{}' is not set", name)))?;

        usize::try_from(value)
            .map_err(|_| GeneratorError::InvalidArgument(format!("option '{}' is negative", name)))
    }

    /// Sets an integer option that must be at least 1.
    pub fn set_positive(&mut self, name: &str, value: i64) -> Result<&mut Self, GeneratorError> {
        if value < 1 {
            return Err(GeneratorError::invalid_argument("Expected positive integer"));
        }
        self.set_option_value(name, value)
    }

    pub fn set_parameter(&mut self, name: &str, value: impl Into<Parameter>) -> &mut Self {
        self.parameters.set(name, value.into());
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn remove_parameter(&mut self, name: &str) -> Option<Parameter> {
        self.parameters.remove(name)
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    pub fn set_random_source(&mut self, source: Arc<dyn RandomSource>) -> &mut Self {
        self.random = OnceLock::from(source);
        self
    }

    pub fn random_source(&self) -> &Arc<dyn RandomSource> {
        self.random
            .get_or_init(|| Arc::new(ThreadRandom) as Arc<dyn RandomSource>)
    }

    pub fn random_integer(&self, min: i64, max: i64) -> Result<i64, GeneratorError> {
        if min > max {
            return Err(GeneratorError::InvalidArgument(format!(
                "minimum {} exceeds maximum {}", min, max
            )));
        }

        let value = self.random_source().random_integer(min, max);
        if value < min || value > max {
            return Err(GeneratorError::InvalidArgument(format!(
                "random source answered {} outside {}..={}", value, min, max
            )));
        }

        Ok(value)
    }
}

pub trait PasswordGenerator {
    fn core(&self) -> &GeneratorCore;

    fn core_mut(&mut self) -> &mut GeneratorCore;

    fn generate_password(&mut self) -> Result<String, GeneratorError>;

    /// Generates `count` passwords in sequence. Duplicates are possible.
    fn generate_passwords(&mut self, count: i64) -> Result<Vec<String>, GeneratorError> {
        if count < 0 {
            return Err(GeneratorError::invalid_argument("Expected non-negative count"));
        }

        let mut passwords = Vec::new();
        for _ in 0..count {
            passwords.push(self.generate_password()?);
        }

        Ok(passwords)
    }

    fn options(&self) -> &BTreeMap<String, GeneratorOption> {
        self.core().options()
    }

    fn set_option(&mut self, name: &str, settings: &OptionSettings) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.core_mut().set_option(name, settings)?;
        Ok(self)
    }

    fn remove_option(&mut self, name: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().remove_option(name);
        self
    }

    fn option(&self, name: &str) -> Result<&GeneratorOption, GeneratorError> {
        self.core().option(name)
    }

    fn set_option_value(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.core_mut().set_option_value(name, value)?;
        Ok(self)
    }

    fn option_value(&self, name: &str) -> Result<Option<&OptionValue>, GeneratorError> {
        self.core().option_value(name)
    }

    fn set_parameter(&mut self, name: &str, value: impl Into<Parameter>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().set_parameter(name, value);
        self
    }

    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.core().parameter(name)
    }

    fn parameter_or(&self, name: &str, default: Parameter) -> Parameter {
        self.core().parameters().get_or(name, default)
    }

    fn set_random_source(&mut self, source: Arc<dyn RandomSource>) -> &mut Self
    where
        Self: Sized,
    {
        self.core_mut().set_random_source(source);
        self
    }

    fn random_integer(&self, min: i64, max: i64) -> Result<i64, GeneratorError> {
        self.core().random_integer(min, max)
    }
}

/// Generators that sample from an assembled character pool.
pub trait CharacterPoolGenerator: PasswordGenerator {
    fn character_list(&self) -> Result<CharacterSet, GeneratorError> {
        charset::assemble(self.core())
    }

    fn set_class(&mut self, class: CharacterClass, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_option_value(class.option_name(), enabled)
    }

    fn class_enabled(&self, class: CharacterClass) -> bool {
        self.core().is_enabled(class.option_name())
    }

    fn set_uppercase(&mut self, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_class(CharacterClass::Uppercase, enabled)
    }

    fn uppercase(&self) -> bool {
        self.class_enabled(CharacterClass::Uppercase)
    }

    fn set_lowercase(&mut self, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_class(CharacterClass::Lowercase, enabled)
    }

    fn lowercase(&self) -> bool {
        self.class_enabled(CharacterClass::Lowercase)
    }

    fn set_numbers(&mut self, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_class(CharacterClass::Numbers, enabled)
    }

    fn numbers(&self) -> bool {
        self.class_enabled(CharacterClass::Numbers)
    }

    fn set_symbols(&mut self, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_class(CharacterClass::Symbols, enabled)
    }

    fn symbols(&self) -> bool {
        self.class_enabled(CharacterClass::Symbols)
    }

    fn set_avoid_similar(&mut self, enabled: bool) -> Result<&mut Self, GeneratorError>
    where
        Self: Sized,
    {
        self.set_option_value(OPTION_AVOID_SIMILAR, enabled)
    }

    fn avoid_similar(&self) -> bool {
        self.core().is_enabled(OPTION_AVOID_SIMILAR)
    }

    fn set_class_characters(&mut self, class: CharacterClass, characters: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.set_parameter(class.parameter_name(), characters)
    }

    fn class_characters(&self, class: CharacterClass) -> &str {
        class.characters(self.core())
    }

    fn set_similar_characters(&mut self, characters: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.set_parameter(PARAMETER_SIMILAR, characters)
    }

    fn similar_characters(&self) -> &str {
        self.core().parameters().text_or(PARAMETER_SIMILAR, SIMILAR_CHARACTERS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Computer,
    Hybrid,
    Requirement,
    Human,
    Dummy,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Computer => "computer",
            GeneratorKind::Hybrid => "hybrid",
            GeneratorKind::Requirement => "requirement",
            GeneratorKind::Human => "human",
            GeneratorKind::Dummy => "dummy",
        }
    }

    /// The integer option that plays the role of "length" for this kind.
    pub fn length_option(&self) -> &'static str {
        match self {
            GeneratorKind::Computer | GeneratorKind::Requirement | GeneratorKind::Dummy => OPTION_LENGTH,
            GeneratorKind::Hybrid => OPTION_SEGMENT_COUNT,
            GeneratorKind::Human => OPTION_WORDS,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "computer" => Ok(GeneratorKind::Computer),
            "hybrid" => Ok(GeneratorKind::Hybrid),
            "requirement" => Ok(GeneratorKind::Requirement),
            "human" => Ok(GeneratorKind::Human),
            "dummy" => Ok(GeneratorKind::Dummy),
            other => Err(GeneratorError::InvalidArgument(format!("unknown generator kind '{}'", other))),
        }
    }
}

/// Any of the concrete generators, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Generator {
    Computer(ComputerPasswordGenerator),
    Hybrid(HybridPasswordGenerator),
    Requirement(RequirementPasswordGenerator),
    Human(HumanPasswordGenerator),
    Dummy(DummyPasswordGenerator),
}

impl Generator {
    pub fn new(kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Computer => Generator::Computer(ComputerPasswordGenerator::new()),
            GeneratorKind::Hybrid => Generator::Hybrid(HybridPasswordGenerator::new()),
            GeneratorKind::Requirement => Generator::Requirement(RequirementPasswordGenerator::new()),
            GeneratorKind::Human => Generator::Human(HumanPasswordGenerator::new()),
            GeneratorKind::Dummy => Generator::Dummy(DummyPasswordGenerator::new()),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Computer(_) => GeneratorKind::Computer,
            Generator::Hybrid(_) => GeneratorKind::Hybrid,
            Generator::Requirement(_) => GeneratorKind::Requirement,
            Generator::Human(_) => GeneratorKind::Human,
            Generator::Dummy(_) => GeneratorKind::Dummy,
        }
    }

    pub fn as_requirement_mut(&mut self) -> Option<&mut RequirementPasswordGenerator> {
        match self {
            Generator::Requirement(generator) => Some(generator),
            _ => None,
        }
    }
}

impl PasswordGenerator for Generator {
    fn core(&self) -> &GeneratorCore {
        match self {
            Generator::Computer(generator) => generator.core(),
            Generator::Hybrid(generator) => generator.core(),
            Generator::Requirement(generator) => generator.core(),
            Generator::Human(generator) => generator.core(),
            Generator::Dummy(generator) => generator.core(),
        }
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        match self {
            Generator::Computer(generator) => generator.core_mut(),
            Generator::Hybrid(generator) => generator.core_mut(),
            Generator::Requirement(generator) => generator.core_mut(),
            Generator::Human(generator) => generator.core_mut(),
            Generator::Dummy(generator) => generator.core_mut(),
        }
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        match self {
            Generator::Computer(generator) => generator.generate_password(),
            Generator::Hybrid(generator) => generator.generate_password(),
            Generator::Requirement(generator) => generator.generate_password(),
            Generator::Human(generator) => generator.generate_password(),
            Generator::Dummy(generator) => generator.generate_password(),
        }
    }

    // The word generator invalidates its cache on these, so route them.
    fn set_option(&mut self, name: &str, settings: &OptionSettings) -> Result<&mut Self, GeneratorError> {
        match self {
            Generator::Human(generator) => {
                generator.set_option(name, settings)?;
            }
            _ => {
                self.core_mut().set_option(name, settings)?;
            }
        }
        Ok(self)
    }

    fn remove_option(&mut self, name: &str) -> &mut Self {
        match self {
            Generator::Human(generator) => {
                generator.remove_option(name);
            }
            _ => {
                self.core_mut().remove_option(name);
            }
        }
        self
    }

    fn set_option_value(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self, GeneratorError> {
        match self {
            Generator::Human(generator) => {
                generator.set_option_value(name, value)?;
            }
            _ => {
                self.core_mut().set_option_value(name, value)?;
            }
        }
        Ok(self)
    }

    fn set_parameter(&mut self, name: &str, value: impl Into<Parameter>) -> &mut Self {
        match self {
            Generator::Human(generator) => {
                generator.set_parameter(name, value);
            }
            _ => {
                self.core_mut().set_parameter(name, value);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::option::OptionType;
    use crate::random::NoRandom;

    #[test]
    fn unknown_option_test() {
        let mut generator = DummyPasswordGenerator::new();

        assert!(matches!(generator.option("nonexistent"), Err(GeneratorError::InvalidOption(_))));
        assert!(matches!(generator.option_value("nonexistent"), Err(GeneratorError::InvalidOption(_))));
        assert!(matches!(
            generator.set_option_value("nonexistent", 1),
            Err(GeneratorError::InvalidOption(_))
        ));
    }

    #[test]
    fn set_option_test() {
        let mut generator = DummyPasswordGenerator::new();
        generator.set_option("FLAG", &OptionSettings::boolean(true)).unwrap();

        assert_eq!(generator.option("FLAG").unwrap().option_type(), OptionType::Boolean);
        assert_eq!(generator.option_value("FLAG").unwrap(), Some(&OptionValue::Boolean(true)));

        let bad = OptionSettings {
            kind: Some(String::from("colour")),
            ..OptionSettings::default()
        };
        assert!(matches!(generator.set_option("BAD", &bad), Err(GeneratorError::InvalidOptionType(_))));
        assert!(!generator.core().has_option("BAD"));
    }

    #[test]
    fn set_option_overwrites_test() {
        let mut generator = DummyPasswordGenerator::new();
        generator.set_option("X", &OptionSettings::boolean(true)).unwrap();
        generator.set_option("X", &OptionSettings::string("abc")).unwrap();

        assert_eq!(generator.option("X").unwrap().option_type(), OptionType::String);
        assert_eq!(generator.option_value("X").unwrap(), Some(&OptionValue::from("abc")));
    }

    #[test]
    fn remove_option_test() {
        let mut generator = DummyPasswordGenerator::new();
        generator.set_option("FLAG", &OptionSettings::boolean(true)).unwrap();

        generator.remove_option("FLAG").remove_option("FLAG");
        assert!(matches!(generator.option("FLAG"), Err(GeneratorError::InvalidOption(_))));
    }

    #[test]
    fn option_round_trip_test() {
        let mut generator = DummyPasswordGenerator::new();
        generator
            .set_option("NAME", &OptionSettings::new(OptionType::String).with_range(1, 8))
            .unwrap();

        generator.set_option_value("NAME", "oktogen").unwrap();
        assert_eq!(generator.option_value("NAME").unwrap(), Some(&OptionValue::from("oktogen")));

        assert!(matches!(
            generator.set_option_value("NAME", "much too long"),
            Err(GeneratorError::InvalidValue(_))
        ));
        assert!(matches!(generator.set_option_value("NAME", true), Err(GeneratorError::InvalidValue(_))));
        assert_eq!(generator.option_value("NAME").unwrap(), Some(&OptionValue::from("oktogen")));
    }

    #[test]
    fn parameter_test() {
        let mut generator = DummyPasswordGenerator::new();

        assert_eq!(generator.parameter("SEPARATOR"), None);
        assert_eq!(generator.parameter_or("SEPARATOR", Parameter::from("-")), Parameter::from("-"));

        generator.set_parameter("SEPARATOR", "+");
        assert_eq!(generator.parameter("SEPARATOR"), Some(&Parameter::from("+")));
    }

    #[test]
    fn generate_passwords_count_test() {
        let mut generator = DummyPasswordGenerator::new();

        assert!(generator.generate_passwords(0).unwrap().is_empty());
        assert_eq!(generator.generate_passwords(3).unwrap(), vec!["password??"; 3]);
        assert!(matches!(generator.generate_passwords(-1), Err(GeneratorError::InvalidArgument(_))));
    }

    #[test]
    fn random_integer_test() {
        let mut generator = DummyPasswordGenerator::new();

        let value = generator.random_integer(1, 6).unwrap();
        assert!((1..=6).contains(&value));
        assert!(matches!(generator.random_integer(6, 1), Err(GeneratorError::InvalidArgument(_))));

        generator.set_random_source(Arc::new(NoRandom));
        assert_eq!(generator.random_integer(1, 6).unwrap(), 1);
    }

    #[derive(Debug)]
    struct OutOfRange;

    impl RandomSource for OutOfRange {
        fn random_integer(&self, _min: i64, max: i64) -> i64 {
            max + 1
        }
    }

    #[test]
    fn random_source_out_of_range_test() {
        let mut core = GeneratorCore::new();
        core.set_random_source(Arc::new(OutOfRange));

        assert!(matches!(core.random_integer(0, 3), Err(GeneratorError::InvalidArgument(_))));
    }

    #[test]
    fn count_value_test() {
        let mut core = GeneratorCore::new();
        core.insert_option("N", GeneratorOption::integer(None, i64::MIN, i64::MAX));

        assert!(matches!(core.count_value("N"), Err(GeneratorError::InvalidArgument(_))));
        core.set_option_value("N", -2).unwrap();
        assert!(matches!(core.count_value("N"), Err(GeneratorError::InvalidArgument(_))));
        core.set_option_value("N", 7).unwrap();
        assert_eq!(core.count_value("N").unwrap(), 7);

        assert!(matches!(core.set_positive("N", 0), Err(GeneratorError::InvalidArgument(_))));
        assert_eq!(core.count_value("N").unwrap(), 7);
    }

    #[test]
    fn kind_test() {
        for kind in [
            GeneratorKind::Computer,
            GeneratorKind::Hybrid,
            GeneratorKind::Requirement,
            GeneratorKind::Human,
            GeneratorKind::Dummy,
        ] {
            assert_eq!(kind.as_str().parse::<GeneratorKind>().unwrap(), kind);
            assert_eq!(Generator::new(kind).kind(), kind);
            assert!(Generator::new(kind).core().has_option(kind.length_option()));
        }
        assert!("quantum".parse::<GeneratorKind>().is_err());
    }

    #[test]
    fn enum_dispatch_test() {
        let mut generator = Generator::new(GeneratorKind::Computer);
        generator
            .set_random_source(Arc::new(NoRandom))
            .set_option_value(OPTION_LENGTH, 4)
            .unwrap();

        assert_eq!(generator.generate_password().unwrap(), "AAAA");
        assert!(generator.as_requirement_mut().is_none());
    }
}
