//! TF-IDF vectorizer loaded from a JSON artifact.
//!
//! Tokens are runs of two or more word characters; n-grams in `ngram_range` are joined with a
//! single space. Term frequencies are optionally sublinear (`1 + ln(tf)`), weighted by idf and
//! L2-normalized when `norm` is `"l2"`.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::error::ClassifierError;

/// Sparse feature vector: `(feature index, value)` pairs sorted by index, zeros omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn from_map(map: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: map.into_iter().filter(|(_, v)| *v != 0.0).collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `index`, 0.0 when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight vector.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(i, v)| weights.get(*i).copied().unwrap_or(0.0) * v)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Tokens as scikit-learn's default `token_pattern` finds them.
const TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// On-disk form of the vectorizer.
#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Builds a vectorizer from its parts, validating dimensions.
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        ngram_range: (usize, usize),
        sublinear_tf: bool,
        norm: Option<Norm>,
    ) -> Result<Self, ClassifierError> {
        let v = Self {
            vocabulary,
            idf,
            ngram_range,
            sublinear_tf,
            norm,
            token_pattern: Regex::new(TOKEN_PATTERN)?,
        };
        v.validate()?;
        Ok(v)
    }

    /// Loads and validates the vectorizer artifact.
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        if !path.exists() {
            return Err(ClassifierError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: VectorizerArtifact =
            serde_json::from_str(&raw).map_err(|source| ClassifierError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let vectorizer = Self::new(
            artifact.vocabulary,
            artifact.idf,
            artifact.ngram_range,
            artifact.sublinear_tf,
            artifact.norm,
        )?;
        info!(
            path = %path.display(),
            features = vectorizer.n_features(),
            "Vectorizer loaded"
        );
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ClassifierError::InvalidArtifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len())
        {
            return Err(ClassifierError::InvalidArtifact(format!(
                "vocabulary term '{}' has index {} but idf has {} entries",
                term,
                index,
                self.idf.len()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidArtifact(
                "idf contains non-finite weights".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of features (columns) produced by [`transform`](Self::transform).
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Single-word vocabulary terms; used as the lemmatizer lexicon.
    pub fn unigrams(&self) -> impl Iterator<Item = &str> {
        self.vocabulary
            .keys()
            .filter(|t| !t.contains(' '))
            .map(String::as_str)
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Converts normalized text into a TF-IDF vector. Out-of-vocabulary terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = self.tokenize(text);
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&index) = self.vocabulary.get(&gram) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, value) in counts.iter_mut() {
            let tf = if self.sublinear_tf {
                1.0 + value.ln()
            } else {
                *value
            };
            *value = tf * self.idf[*index];
        }

        if self.norm == Some(Norm::L2) {
            let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                counts.values_mut().for_each(|v| *v /= norm);
            }
        }

        SparseVector::from_map(counts)
    }
}
