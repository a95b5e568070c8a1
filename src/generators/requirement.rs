//! Character-pool generation under per-class minimum and maximum counts.
//!
//! Candidates are drawn exactly as [`ComputerPasswordGenerator`] draws them
//! and rejected until one meets every configured count. The limits are
//! checked up front by [`RequirementPasswordGenerator::valid_limits`], so an
//! infeasible configuration fails immediately instead of looping. Feasible
//! but very tight limits are still bounded by an attempt cap.

use std::collections::BTreeMap;

use log::{ debug, trace, warn };

use crate::charset::{ CharacterClass, CharacterSet };
use crate::errors::GeneratorError;

use super::{ CharacterPoolGenerator, ComputerPasswordGenerator, GeneratorCore, PasswordGenerator };

pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Debug, Clone)]
pub struct RequirementPasswordGenerator {
    base: ComputerPasswordGenerator,
    minimum_counts: BTreeMap<CharacterClass, usize>,
    maximum_counts: BTreeMap<CharacterClass, usize>,
    max_attempts: Option<usize>,
}

impl RequirementPasswordGenerator {
    pub fn new() -> Self {
        Self {
            base: ComputerPasswordGenerator::new(),
            minimum_counts: BTreeMap::new(),
            maximum_counts: BTreeMap::new(),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }

    pub fn length(&self) -> Result<usize, GeneratorError> {
        self.base.length()
    }

    pub fn set_length(&mut self, length: i64) -> Result<&mut Self, GeneratorError> {
        self.base.set_length(length)?;
        Ok(self)
    }

    /// Whether `option` names a character class that can carry a count.
    pub fn valid_option(&self, option: &str) -> bool {
        CharacterClass::from_option_name(option).is_some()
    }

    pub fn minimum_count(&self, option: &str) -> Result<Option<usize>, GeneratorError> {
        let class = Self::class_for(option)?;
        Ok(self.minimum_counts.get(&class).copied())
    }

    pub fn maximum_count(&self, option: &str) -> Result<Option<usize>, GeneratorError> {
        let class = Self::class_for(option)?;
        Ok(self.maximum_counts.get(&class).copied())
    }

    /// `None` clears the bound.
    pub fn set_minimum_count(&mut self, option: &str, count: Option<i64>) -> Result<&mut Self, GeneratorError> {
        let class = Self::class_for(option)?;
        Self::update_count(&mut self.minimum_counts, class, count)?;
        Ok(self)
    }

    /// `None` clears the bound.
    pub fn set_maximum_count(&mut self, option: &str, count: Option<i64>) -> Result<&mut Self, GeneratorError> {
        let class = Self::class_for(option)?;
        Self::update_count(&mut self.maximum_counts, class, count)?;
        Ok(self)
    }

    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    /// Cap on rejected candidates per password; `None` never gives up.
    pub fn set_max_attempts(&mut self, attempts: Option<usize>) -> &mut Self {
        self.max_attempts = attempts;
        self
    }

    fn class_for(option: &str) -> Result<CharacterClass, GeneratorError> {
        CharacterClass::from_option_name(option).ok_or_else(|| GeneratorError::InvalidOption(option.to_string()))
    }

    fn update_count(
        counts: &mut BTreeMap<CharacterClass, usize>,
        class: CharacterClass,
        count: Option<i64>,
    ) -> Result<(), GeneratorError> {
        match count {
            None => {
                counts.remove(&class);
            }
            Some(count) => {
                let count = usize::try_from(count)
                    .map_err(|_| GeneratorError::invalid_argument("Expected non-negative integer"))?;
                counts.insert(class, count);
            }
        }
        Ok(())
    }

    /// Static check that the configured counts can be met at the configured
    /// length. Never draws from the random source.
    pub fn valid_limits(&self) -> bool {
        let length = match self.length() {
            Ok(length) => length,
            Err(_) => return false,
        };

        let minimum_total: usize = self.minimum_counts.values().sum();
        if minimum_total > length {
            return false;
        }

        for (min_class, min_count) in &self.minimum_counts {
            let others: usize = self
                .maximum_counts
                .iter()
                .filter(|(max_class, _)| *max_class != min_class)
                .map(|(_, count)| count)
                .sum();

            if min_count + others > length {
                return false;
            }
        }

        for (max_class, max_count) in &self.maximum_counts {
            let others: usize = self
                .minimum_counts
                .iter()
                .filter(|(min_class, _)| *min_class != max_class)
                .map(|(_, count)| count)
                .sum();

            if max_count + others > length {
                return false;
            }
        }

        // A class outside the pool can never reach a positive minimum.
        let unreachable = self
            .minimum_counts
            .iter()
            .any(|(class, count)| *count > 0 && !self.class_reachable(*class));
        if unreachable {
            return false;
        }

        // When every enabled class is capped, the caps must cover the length.
        let enabled: Vec<CharacterClass> = CharacterClass::ALL
            .into_iter()
            .filter(|class| self.class_reachable(*class))
            .collect();
        if !enabled.is_empty() && enabled.iter().all(|class| self.maximum_counts.contains_key(class)) {
            let capacity: usize = enabled.iter().filter_map(|class| self.maximum_counts.get(class)).sum();
            if capacity < length {
                return false;
            }
        }

        true
    }

    /// Enabled and left with at least one character after similar-avoidance.
    fn class_reachable(&self, class: CharacterClass) -> bool {
        if !self.class_enabled(class) {
            return false;
        }

        let characters = CharacterSet::new(self.class_characters(class));
        if self.avoid_similar() {
            return !characters.without(self.similar_characters()).is_empty();
        }

        !characters.is_empty()
    }

    /// Checks `password` against every configured count. Characters are
    /// counted against each class's configured character string.
    pub fn validate_password(&self, password: &str) -> bool {
        for class in CharacterClass::ALL {
            let minimum = self.minimum_counts.get(&class);
            let maximum = self.maximum_counts.get(&class);
            if minimum.is_none() && maximum.is_none() {
                continue;
            }

            let characters = self.class_characters(class);
            let count = password.chars().filter(|c| characters.contains(*c)).count();

            if minimum.is_some_and(|minimum| count < *minimum) {
                return false;
            }

            if maximum.is_some_and(|maximum| count > *maximum) {
                return false;
            }
        }

        true
    }
}

impl Default for RequirementPasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordGenerator for RequirementPasswordGenerator {
    fn core(&self) -> &GeneratorCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut GeneratorCore {
        self.base.core_mut()
    }

    fn generate_password(&mut self) -> Result<String, GeneratorError> {
        if !self.valid_limits() {
            return Err(GeneratorError::ImpossibleMinMaxLimits);
        }

        let pool = self.character_list()?;
        let length = self.length()?;
        let mut attempts = 0usize;

        loop {
            let candidate = pool.sample(length, self.core())?;
            if self.validate_password(&candidate) {
                debug!("accepted candidate after {} rejections", attempts);
                return Ok(candidate);
            }

            attempts += 1;
            trace!("rejected candidate {}", attempts);

            if self.max_attempts.is_some_and(|limit| attempts >= limit) {
                warn!("giving up after {} rejected candidates", attempts);
                return Err(GeneratorError::AttemptsExhausted(attempts));
            }
        }
    }
}

impl CharacterPoolGenerator for RequirementPasswordGenerator {}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::charset::{
        OPTION_AVOID_SIMILAR, OPTION_LOWER_CASE, OPTION_NUMBERS, OPTION_SYMBOLS, OPTION_UPPER_CASE,
    };
    use crate::random::{ NoRandom, SeededRandom };

    const CLASSES: [&str; 4] = [OPTION_UPPER_CASE, OPTION_LOWER_CASE, OPTION_NUMBERS, OPTION_SYMBOLS];

    fn blank() -> RequirementPasswordGenerator {
        let mut generator = RequirementPasswordGenerator::new();
        for option in CLASSES {
            generator.set_option_value(option, false).unwrap();
        }
        generator.set_option_value(OPTION_AVOID_SIMILAR, false).unwrap();
        generator
    }

    fn all_classes() -> RequirementPasswordGenerator {
        let mut generator = blank();
        for option in CLASSES {
            generator.set_option_value(option, true).unwrap();
        }
        generator
    }

    #[test]
    fn length_test() {
        let mut generator = all_classes();
        generator.set_option_value(OPTION_AVOID_SIMILAR, true).unwrap();

        for length in [1, 4, 8, 16] {
            generator.set_length(length).unwrap();
            assert_eq!(generator.length().unwrap(), length as usize);
            assert_eq!(generator.generate_password().unwrap().len(), length as usize);
        }

        assert!(matches!(generator.set_length(-1), Err(GeneratorError::InvalidArgument(_))));
    }

    #[test]
    fn valid_option_test() {
        let generator = blank();

        for option in CLASSES {
            assert!(generator.valid_option(option));
        }
        assert!(!generator.valid_option(OPTION_AVOID_SIMILAR));
        assert!(!generator.valid_option("LENGTH"));
        assert!(!generator.valid_option(""));
    }

    #[test]
    fn min_max_test() {
        let mut generator = blank();

        for option in CLASSES {
            for count in [None, Some(1), Some(2)] {
                generator.set_minimum_count(option, count).unwrap();
                assert_eq!(generator.minimum_count(option).unwrap(), count.map(|c| c as usize));

                generator.set_maximum_count(option, count).unwrap();
                assert_eq!(generator.maximum_count(option).unwrap(), count.map(|c| c as usize));
            }
        }
    }

    #[test]
    fn count_option_errors_test() {
        let mut generator = blank();

        for option in [OPTION_AVOID_SIMILAR, "LENGTH", "NOPE"] {
            assert!(matches!(generator.set_minimum_count(option, Some(1)), Err(GeneratorError::InvalidOption(_))));
            assert!(matches!(generator.set_maximum_count(option, Some(1)), Err(GeneratorError::InvalidOption(_))));
            assert!(matches!(generator.minimum_count(option), Err(GeneratorError::InvalidOption(_))));
        }

        assert!(matches!(
            generator.set_minimum_count(OPTION_UPPER_CASE, Some(-1)),
            Err(GeneratorError::InvalidArgument(_))
        ));
        assert!(matches!(
            generator.set_maximum_count(OPTION_UPPER_CASE, Some(-1)),
            Err(GeneratorError::InvalidArgument(_))
        ));
        assert_eq!(generator.minimum_count(OPTION_UPPER_CASE).unwrap(), None);
    }

    #[test]
    fn valid_limits_test() {
        let mut generator = all_classes();
        generator.set_length(4).unwrap();
        for option in CLASSES {
            generator.set_minimum_count(option, Some(1)).unwrap();
        }

        assert!(generator.valid_limits());
    }

    #[test]
    fn valid_limits_minimum_sum_test() {
        let mut generator = all_classes();
        generator.set_length(3).unwrap();
        for option in CLASSES {
            generator.set_minimum_count(option, Some(1)).unwrap();
        }

        assert!(!generator.valid_limits());
    }

    #[test]
    fn valid_limits_single_minimum_test() {
        let mut generator = all_classes();
        generator.set_length(3).unwrap();
        generator.set_minimum_count(OPTION_UPPER_CASE, Some(4)).unwrap();

        assert!(!generator.valid_limits());
    }

    #[test]
    fn valid_limits_maximum_test() {
        let mut generator = all_classes();
        generator.set_length(5).unwrap();
        for option in CLASSES {
            generator.set_maximum_count(option, Some(1)).unwrap();
        }

        assert!(!generator.valid_limits());
    }

    #[test]
    fn valid_limits_minimum_against_maximums_test() {
        let mut generator = all_classes();
        generator.set_length(6).unwrap();
        generator
            .set_minimum_count(OPTION_UPPER_CASE, Some(3))
            .and_then(|g| g.set_maximum_count(OPTION_LOWER_CASE, Some(2)))
            .and_then(|g| g.set_maximum_count(OPTION_NUMBERS, Some(2)))
            .unwrap();

        assert!(!generator.valid_limits());

        generator.set_maximum_count(OPTION_NUMBERS, Some(1)).unwrap();
        assert!(generator.valid_limits());
    }

    #[test]
    fn valid_limits_partial_test() {
        let mut generator = blank();
        generator.set_length(4).unwrap();
        generator.set_option_value(OPTION_UPPER_CASE, true).unwrap();

        generator.set_maximum_count(OPTION_UPPER_CASE, Some(1)).unwrap();
        assert!(!generator.valid_limits());

        generator.set_maximum_count(OPTION_UPPER_CASE, None).unwrap();
        generator.set_minimum_count(OPTION_UPPER_CASE, Some(5)).unwrap();
        assert!(!generator.valid_limits());
    }

    #[test]
    fn valid_limits_disabled_class_test() {
        let mut generator = blank();
        generator.set_length(8).unwrap();
        generator.set_option_value(OPTION_LOWER_CASE, true).unwrap();
        generator.set_minimum_count(OPTION_NUMBERS, Some(1)).unwrap();

        assert!(!generator.valid_limits());

        generator.set_minimum_count(OPTION_NUMBERS, Some(0)).unwrap();
        assert!(generator.valid_limits());
    }

    #[test]
    fn valid_limits_similar_stripped_class_test() {
        let mut generator = blank();
        generator
            .set_option_value(OPTION_UPPER_CASE, true)
            .and_then(|g| g.set_option_value(OPTION_LOWER_CASE, true))
            .and_then(|g| g.set_option_value(OPTION_AVOID_SIMILAR, true))
            .and_then(|g| g.set_length(6))
            .and_then(|g| g.set_minimum_count(OPTION_UPPER_CASE, Some(1)))
            .unwrap()
            .set_parameter(OPTION_UPPER_CASE, "O");

        assert!(!generator.valid_limits());
        assert!(matches!(generator.generate_password(), Err(GeneratorError::ImpossibleMinMaxLimits)));

        generator.set_option_value(OPTION_AVOID_SIMILAR, false).unwrap();
        assert!(generator.valid_limits());
    }

    #[test]
    fn impossible_limits_test() {
        let mut generator = blank();
        generator.set_option_value(OPTION_UPPER_CASE, true).unwrap();
        generator.set_length(4).unwrap();
        generator.set_minimum_count(OPTION_UPPER_CASE, Some(5)).unwrap();

        assert!(matches!(generator.generate_password(), Err(GeneratorError::ImpossibleMinMaxLimits)));
        assert!(matches!(generator.generate_passwords(2), Err(GeneratorError::ImpossibleMinMaxLimits)));
    }

    #[test]
    fn validate_password_test() {
        let cases = [
            ("ABCDef", OPTION_UPPER_CASE, false),
            ("ABCdef", OPTION_UPPER_CASE, true),
            ("ABcdef", OPTION_UPPER_CASE, true),
            ("Abcdef", OPTION_UPPER_CASE, false),
            ("ABCdef^'%", OPTION_SYMBOLS, true),
            ("ABcdef!@", OPTION_SYMBOLS, true),
            ("Abcdef!", OPTION_SYMBOLS, false),
        ];

        for (password, option, valid) in cases {
            let mut generator = blank();
            generator.set_minimum_count(option, Some(2)).unwrap();
            generator.set_maximum_count(option, Some(3)).unwrap();

            assert_eq!(generator.validate_password(password), valid, "{} / {}", password, option);
        }
    }

    #[test]
    fn validate_password_uses_configured_characters_test() {
        let mut generator = blank();
        generator.set_parameter(OPTION_NUMBERS, "xyz");
        generator.set_minimum_count(OPTION_NUMBERS, Some(2)).unwrap();

        assert!(generator.validate_password("x1y"));
        assert!(!generator.validate_password("123"));
    }

    #[test]
    fn minimum_generation_test() {
        for length in [8, 16] {
            let mut generator = all_classes();
            generator.set_option_value(OPTION_AVOID_SIMILAR, true).unwrap();
            generator.set_random_source(Arc::new(SeededRandom::new(length as u64)));
            generator.set_length(length).unwrap();
            for option in CLASSES {
                generator.set_minimum_count(option, Some(2)).unwrap();
            }

            assert!(generator.valid_limits());

            let passwords = generator.generate_passwords(5).unwrap();
            assert_eq!(passwords.len(), 5);
            for password in passwords {
                assert_eq!(password.len(), length as usize);
                assert!(generator.validate_password(&password));
            }
        }
    }

    #[test]
    fn exact_minimum_generation_test() {
        let mut generator = all_classes();
        generator.set_random_source(Arc::new(SeededRandom::new(11)));
        generator.set_length(4).unwrap();
        for option in CLASSES {
            generator.set_minimum_count(option, Some(1)).unwrap();
        }

        let password = generator.generate_password().unwrap();
        assert!(password.chars().any(|c| c.is_ascii_uppercase()));
        assert!(password.chars().any(|c| c.is_ascii_lowercase()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password.chars().any(|c| !c.is_ascii_alphanumeric()));
    }

    #[test]
    fn maximum_generation_test() {
        let mut generator = blank();
        generator.set_option_value(OPTION_UPPER_CASE, true).unwrap();
        generator.set_option_value(OPTION_NUMBERS, true).unwrap();
        generator.set_random_source(Arc::new(SeededRandom::new(5)));
        generator.set_length(6).unwrap();
        generator.set_maximum_count(OPTION_NUMBERS, Some(1)).unwrap();

        for password in generator.generate_passwords(10).unwrap() {
            assert!(password.chars().filter(|c| c.is_ascii_digit()).count() <= 1);
        }
    }

    #[test]
    fn attempts_exhausted_test() {
        let mut generator = all_classes();
        generator.set_random_source(Arc::new(NoRandom));
        generator.set_length(4).unwrap();
        generator.set_minimum_count(OPTION_NUMBERS, Some(1)).unwrap();
        generator.set_max_attempts(Some(50));

        assert!(generator.valid_limits());
        assert!(matches!(generator.generate_password(), Err(GeneratorError::AttemptsExhausted(50))));
        assert_eq!(generator.max_attempts(), Some(50));
    }
}
