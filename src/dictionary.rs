use std::fmt;
use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::{ Path, PathBuf };

use crate::errors::GeneratorError;

/// Line-oriented source of dictionary words.
pub trait WordSource: fmt::Debug + Send + Sync {
    fn exists(&self, location: &str) -> bool;

    /// Every non-blank line of `location`, without line endings.
    fn read_lines(&self, location: &str) -> Result<Vec<String>, GeneratorError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileWordSource;

impl WordSource for FileWordSource {
    fn exists(&self, location: &str) -> bool {
        Path::new(location).is_file()
    }

    fn read_lines(&self, location: &str) -> Result<Vec<String>, GeneratorError> {
        if !self.exists(location) {
            return Err(GeneratorError::FileNotFound(PathBuf::from(location)));
        }

        let reader = BufReader::new(File::open(location)?);
        let mut words = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let word = line.trim_end_matches(['\r', '\n']);
            if !word.trim().is_empty() {
                words.push(word.to_string());
            }
        }

        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn read_lines_test() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "apple\r\nbanana\n\n   \ncherry").unwrap();
        let location = file.path().to_str().unwrap();

        assert!(FileWordSource.exists(location));
        assert_eq!(FileWordSource.read_lines(location).unwrap(), vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn missing_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("missing.txt");
        let location = location.to_str().unwrap();

        assert!(!FileWordSource.exists(location));
        assert!(matches!(FileWordSource.read_lines(location), Err(GeneratorError::FileNotFound(_))));
        assert!(!FileWordSource.exists(dir.path().to_str().unwrap()));
    }
}
