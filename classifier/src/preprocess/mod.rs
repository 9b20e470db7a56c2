//! Text normalization: lower-case, strip punctuation, drop stop words and non-alphabetic tokens, lemmatize.

mod lemmatizer;
mod stopwords;

pub use lemmatizer::Lemmatizer;
pub use stopwords::LinguisticResources;

use std::collections::HashSet;

use regex::Regex;

use crate::error::ClassifierError;

/// ASCII punctuation is deleted in place, so `don't` becomes `dont`.
const ASCII_PUNCTUATION: &str = r"[[:punct:]]";
/// Any other punctuation (curly quotes, guillemets, dashes, ellipsis) separates words.
const UNICODE_PUNCTUATION: &str = r"\p{P}";

/// Normalizes raw text into the space-separated token stream the vectorizer was fitted on.
///
/// Deterministic and side-effect free once built; shared read-only across sessions.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    stop_words: HashSet<String>,
    lemmatizer: Lemmatizer,
    ascii_punctuation: Regex,
    unicode_punctuation: Regex,
}

impl Preprocessor {
    pub fn new(
        resources: &LinguisticResources,
        lemmatizer: Lemmatizer,
    ) -> Result<Self, ClassifierError> {
        Ok(Self {
            stop_words: resources.stop_words().clone(),
            lemmatizer,
            ascii_punctuation: Regex::new(ASCII_PUNCTUATION)?,
            unicode_punctuation: Regex::new(UNICODE_PUNCTUATION)?,
        })
    }

    /// Returns the normalized text; an empty string means nothing is left to classify.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.ascii_punctuation.replace_all(&lowered, "");
        let separated = self.unicode_punctuation.replace_all(&stripped, " ");

        separated
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .filter(|token| token.chars().all(char::is_alphabetic))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
