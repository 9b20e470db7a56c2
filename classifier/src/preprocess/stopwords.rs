//! Stop-word list. The built-in list is the standard English list the models were trained with;
//! a custom newline-separated file can replace it.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::ClassifierError;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Linguistic resources required by the preprocessor. Loading is a startup precondition.
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stop_words: HashSet<String>,
}

impl LinguisticResources {
    /// Built-in English stop words.
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Loads stop words from `path` when given, otherwise uses the built-in list.
    /// A configured file that is missing, unreadable or empty is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ClassifierError> {
        let Some(path) = path else {
            return Ok(Self::english());
        };
        if !path.exists() {
            return Err(ClassifierError::MissingResource(format!(
                "stop-word list not found: {}",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stop_words: HashSet<String> = raw
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        if stop_words.is_empty() {
            return Err(ClassifierError::MissingResource(format!(
                "stop-word list is empty: {}",
                path.display()
            )));
        }
        info!(path = %path.display(), count = stop_words.len(), "Loaded stop-word list");
        Ok(Self { stop_words })
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_contains_common_words() {
        let r = LinguisticResources::english();
        assert!(r.stop_words().contains("the"));
        assert!(r.stop_words().contains("wouldn't"));
        assert!(!r.stop_words().contains("news"));
    }

    #[test]
    fn test_load_none_uses_builtin() {
        let r = LinguisticResources::load(None).unwrap();
        assert_eq!(r.stop_words().len(), ENGLISH_STOP_WORDS.len());
    }

    #[test]
    fn test_load_custom_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list\nFoo\nbar\n\n").unwrap();
        let r = LinguisticResources::load(Some(file.path())).unwrap();
        assert_eq!(r.stop_words().len(), 2);
        assert!(r.stop_words().contains("foo"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = LinguisticResources::load(Some(&dir.path().join("absent.txt")));
        assert!(matches!(result, Err(ClassifierError::MissingResource(_))));
    }

    #[test]
    fn test_load_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = LinguisticResources::load(Some(file.path()));
        assert!(matches!(result, Err(ClassifierError::MissingResource(_))));
    }
}
