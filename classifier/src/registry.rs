//! Model registry: the fixed set of pre-loaded classifiers plus the shared vectorizer.
//!
//! Populated once at startup; read-only afterwards and shared across sessions without locking.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ClassifierError;
use crate::estimator::Estimator;
use crate::vectorizer::TfidfVectorizer;

/// Registry entry as configured: where the artifact lives and how the model is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub identifier: String,
    pub display_name: String,
    pub description: String,
    pub path: PathBuf,
}

/// A loaded model with its presentation metadata.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    pub identifier: String,
    pub display_name: String,
    pub description: String,
    pub estimator: Estimator,
}

impl ModelDescriptor {
    pub fn supports_confidence(&self) -> bool {
        self.estimator.supports_confidence()
    }
}

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    vectorizer: TfidfVectorizer,
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    /// Loads the vectorizer and every model in `specs`. Any missing or malformed artifact is an error;
    /// callers must not start serving without a registry.
    pub fn load(vectorizer_path: &Path, specs: &[ModelSpec]) -> Result<Self, ClassifierError> {
        let vectorizer = TfidfVectorizer::from_file(vectorizer_path)?;
        let mut models = Vec::with_capacity(specs.len());
        for spec in specs {
            let estimator = Estimator::from_file(&spec.path, vectorizer.n_features())?;
            info!(
                model = %spec.identifier,
                display_name = %spec.display_name,
                kind = estimator.kind(),
                path = %spec.path.display(),
                "Model loaded"
            );
            models.push(ModelDescriptor {
                identifier: spec.identifier.clone(),
                display_name: spec.display_name.clone(),
                description: spec.description.clone(),
                estimator,
            });
        }
        Self::from_parts(vectorizer, models)
    }

    /// Builds a registry from already-loaded parts, validating dimensions and identifier uniqueness.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        models: Vec<ModelDescriptor>,
    ) -> Result<Self, ClassifierError> {
        if models.is_empty() {
            return Err(ClassifierError::InvalidArtifact(
                "model registry is empty".to_string(),
            ));
        }
        for (i, model) in models.iter().enumerate() {
            model.estimator.validate(vectorizer.n_features())?;
            let duplicate = models[..i].iter().any(|m| {
                m.identifier == model.identifier || m.display_name == model.display_name
            });
            if duplicate {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "duplicate model '{}'",
                    model.identifier
                )));
            }
        }
        info!(models = models.len(), "Model registry initialized");
        Ok(Self { vectorizer, models })
    }

    /// Looks up a model by identifier.
    pub fn resolve(&self, identifier: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.identifier == identifier)
    }

    /// Looks up a model by its exact display name (what the choice keyboard sends back).
    pub fn find_by_display_name(&self, display_name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.display_name == display_name)
    }

    /// Models in configuration order.
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn display_names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.display_name.clone()).collect()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}
