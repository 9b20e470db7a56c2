//! Noun lemmatizer: reduces plural forms to their base form.
//!
//! With a lexicon (the vectorizer vocabulary) it behaves like a dictionary-backed morphological
//! analyzer: a candidate base form is accepted only if the lexicon knows it, and the shortest known
//! form wins. Without a lexicon it falls back to conservative suffix rules.

use std::collections::{HashMap, HashSet};

/// Irregular plurals, checked before any suffix rule.
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("wives", "wife"),
    ("lives", "life"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("thieves", "thief"),
];

/// Words ending in `s` that are not plurals.
const INVARIANT: &[&str] = &[
    "news", "series", "species", "means", "politics", "physics", "economics", "mathematics",
    "ethics", "always", "perhaps", "whereas", "sometimes", "nevertheless", "afterwards",
    "towards", "besides", "lens", "gas", "bus", "yes", "chaos", "basis", "crisis", "analysis",
];

/// Suffix substitutions for nouns, in the order a dictionary-backed analyzer tries them.
const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
    invariant: HashSet<String>,
    lexicon: Option<HashSet<String>>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Rule-based lemmatizer without a lexicon.
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            invariant: INVARIANT.iter().map(|w| w.to_string()).collect(),
            lexicon: None,
        }
    }

    /// Lemmatizer that only produces base forms present in `lexicon`.
    pub fn with_lexicon<I, S>(lexicon: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lexicon: Some(lexicon.into_iter().map(Into::into).collect()),
            ..Self::new()
        }
    }

    /// Returns the lemma of a lower-case alphabetic token.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.irregular.get(word) {
            return base.clone();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }
        match &self.lexicon {
            Some(lexicon) => Self::lemmatize_with_lexicon(word, lexicon),
            None => Self::lemmatize_by_rules(word),
        }
    }

    fn lemmatize_with_lexicon(word: &str, lexicon: &HashSet<String>) -> String {
        let mut candidates: Vec<String> = Vec::new();
        if lexicon.contains(word) {
            candidates.push(word.to_string());
        }
        for (suffix, replacement) in NOUN_SUFFIXES {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.is_empty() {
                    continue;
                }
                let form = format!("{}{}", stem, replacement);
                if lexicon.contains(&form) && !candidates.contains(&form) {
                    candidates.push(form);
                }
            }
        }
        candidates
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_by_rules(word: &str) -> String {
        if word.chars().count() <= 3 {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{}y", stem);
            }
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{}ss", stem);
        }
        for (suffix, replacement) in [("ches", "ch"), ("shes", "sh"), ("xes", "x"), ("zzes", "zz")] {
            if let Some(stem) = word.strip_suffix(suffix) {
                return format!("{}{}", stem, replacement);
            }
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        match word.strip_suffix('s') {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}
