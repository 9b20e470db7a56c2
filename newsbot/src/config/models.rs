//! Model artifacts config and the fixed model registry table.

use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};

use classifier::ModelSpec;

/// `(identifier, display name, description, artifact file)` for every served model, in menu order.
pub const MODEL_TABLE: &[(&str, &str, &str, &str)] = &[
    (
        "linear_svc",
        "LinearSVC (Быстрая)",
        "Линейный классификатор. Быстрый, хорошо подходит для текста.",
        "lsvc_model.json",
    ),
    (
        "lgbm",
        "LightGBM (Точная)",
        "Градиентный бустинг. Высокая точность, может быть медленнее.",
        "lgbm_model.json",
    ),
];

#[derive(Debug, Clone)]
pub struct ModelsConfig {
    /// MODEL_DIR
    pub model_dir: PathBuf,
    /// VECTORIZER_PATH, default `<MODEL_DIR>/vectorizer.json`
    pub vectorizer_path: PathBuf,
    /// STOPWORDS_PATH; built-in English list when unset
    pub stopwords_path: Option<PathBuf>,
}

impl ModelsConfig {
    pub fn from_env() -> Result<Self> {
        let model_dir = PathBuf::from(env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string()));
        let vectorizer_path = env::var("VECTORIZER_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| model_dir.join("vectorizer.json"));
        let stopwords_path = env::var("STOPWORDS_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            model_dir,
            vectorizer_path,
            stopwords_path,
        })
    }

    /// Builds the config for a given artifact directory with default file names.
    pub fn in_dir(model_dir: impl Into<PathBuf>) -> Self {
        let model_dir = model_dir.into();
        Self {
            vectorizer_path: model_dir.join("vectorizer.json"),
            model_dir,
            stopwords_path: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.stopwords_path {
            if !path.exists() {
                anyhow::bail!("STOPWORDS_PATH points to a missing file: {}", path.display());
            }
        }
        Ok(())
    }

    pub fn stopwords_path(&self) -> Option<&Path> {
        self.stopwords_path.as_deref()
    }

    /// Registry entries with artifact paths resolved against `model_dir`.
    pub fn model_specs(&self) -> Vec<ModelSpec> {
        MODEL_TABLE
            .iter()
            .map(|(identifier, display_name, description, file)| ModelSpec {
                identifier: identifier.to_string(),
                display_name: display_name.to_string(),
                description: description.to_string(),
                path: self.model_dir.join(file),
            })
            .collect()
    }
}
