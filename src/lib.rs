//! Configurable password generators.
//!
//! Every generator carries a store of typed, range-checked options and a
//! free-form parameter map, and draws its randomness from an injectable
//! [`RandomSource`]. Five generators are provided:
//!
//! ```text
//! Computer     fixed-length strings over the enabled character classes
//! Hybrid       separated segments such as  aB3-x9Q-kk2-Z0p
//! Requirement  Computer plus per-class minimum/maximum counts
//! Human        dictionary words joined by a separator
//! Dummy        "password" cut or padded to length, for tests
//! ```
//!
//! # Examples
//!
//! ```
//! use oktogen::{ CharacterPoolGenerator, ComputerPasswordGenerator, PasswordGenerator };
//!
//! let mut generator = ComputerPasswordGenerator::new();
//! generator.set_symbols(true).unwrap().set_length(16).unwrap();
//!
//! let password = generator.generate_password().unwrap();
//! assert_eq!(password.chars().count(), 16);
//! ```
//!
//! Per-class limits are checked before any candidate is drawn:
//!
//! ```
//! use oktogen::{ GeneratorError, PasswordGenerator, RequirementPasswordGenerator };
//!
//! let mut generator = RequirementPasswordGenerator::new();
//! generator.set_length(4).unwrap();
//! generator.set_minimum_count("NUMBERS", Some(5)).unwrap();
//!
//! assert!(!generator.valid_limits());
//! assert!(matches!(generator.generate_password(), Err(GeneratorError::ImpossibleMinMaxLimits)));
//! ```

pub mod charset;
pub mod config;
pub mod dictionary;
pub mod errors;
pub mod generators;
pub mod option;
pub mod parameter;
pub mod random;

pub use charset::{ CharacterClass, CharacterSet, CHARACTER_OPTIONS };
pub use config::GeneratorConfig;
pub use dictionary::{ FileWordSource, WordSource };
pub use errors::GeneratorError;
pub use generators::{
    CharacterPoolGenerator, ComputerPasswordGenerator, DummyPasswordGenerator, Generator, GeneratorCore,
    GeneratorKind, HumanPasswordGenerator, HybridPasswordGenerator, PasswordGenerator,
    RequirementPasswordGenerator,
};
pub use option::{ GeneratorOption, OptionSettings, OptionType, OptionValue };
pub use parameter::Parameter;
pub use random::{ NoRandom, RandomSource, SeededRandom, ThreadRandom };
