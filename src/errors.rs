use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid option type: '{0}'")]
    InvalidOptionType(String),

    #[error("Invalid option: '{0}'")]
    InvalidOption(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("No character sets selected")]
    CharactersNotFound,

    #[error("No words selected")]
    WordsNotFound,

    #[error("Minimum and maximum counts cannot be satisfied at this length")]
    ImpossibleMinMaxLimits,

    #[error("No password met the configured counts after {0} attempts")]
    AttemptsExhausted(usize),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GeneratorError {
    pub(crate) fn invalid_argument(message: &str) -> Self {
        GeneratorError::InvalidArgument(message.to_string())
    }
}
