//! Prediction dispatch: normalize → vectorize → infer → label and confidence.
//!
//! [`PredictionDispatcher::predict`] never fails and never panics on bad input: every failure becomes
//! an [`Label::Error`] prediction without confidence, since it sits on a user-facing path.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::ClassifierError;
use crate::preprocess::{Lemmatizer, LinguisticResources, Preprocessor};
use crate::registry::{ModelDescriptor, ModelRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Real,
    Fake,
    Error,
}

impl Label {
    /// Stored form of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "REAL",
            Label::Fake => "FAKE",
            Label::Error => "ERROR",
        }
    }

    fn from_class(class: u8) -> Self {
        if class == 1 {
            Label::Fake
        } else {
            Label::Real
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a prediction ended with [`Label::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionFailure {
    UnknownModel(String),
    /// Normalization left nothing to classify.
    NothingToClassify,
    Inference(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Maximum class probability in `[0, 1]`; only for models with a probability interface.
    pub confidence: Option<f32>,
    pub failure: Option<PredictionFailure>,
}

impl Prediction {
    pub fn failed(failure: PredictionFailure) -> Self {
        Self {
            label: Label::Error,
            confidence: None,
            failure: Some(failure),
        }
    }

    fn verdict(class: u8, confidence: Option<f32>) -> Self {
        Self {
            label: Label::from_class(class),
            confidence,
            failure: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.label == Label::Error
    }
}

/// Read-only prediction pipeline over a shared registry; safe to call concurrently.
#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
    preprocessor: Preprocessor,
}

impl PredictionDispatcher {
    /// Builds the dispatcher. The lemmatizer uses the vectorizer vocabulary as its lexicon so that only
    /// base forms the models know are produced.
    pub fn new(
        registry: Arc<ModelRegistry>,
        resources: &LinguisticResources,
    ) -> Result<Self, ClassifierError> {
        let lemmatizer = Lemmatizer::with_lexicon(registry.vectorizer().unigrams());
        let preprocessor = Preprocessor::new(resources, lemmatizer)?;
        Ok(Self {
            registry,
            preprocessor,
        })
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Classifies `raw_text` with the model `model_identifier`.
    pub fn predict(&self, raw_text: &str, model_identifier: &str) -> Prediction {
        let Some(model) = self.registry.resolve(model_identifier) else {
            error!(model = %model_identifier, "Unknown model requested");
            return Prediction::failed(PredictionFailure::UnknownModel(
                model_identifier.to_string(),
            ));
        };

        let normalized = self.preprocessor.normalize(raw_text);
        if normalized.trim().is_empty() {
            warn!(model = %model.identifier, "Nothing left to classify after normalization");
            return Prediction::failed(PredictionFailure::NothingToClassify);
        }

        match self.infer(model, &normalized) {
            Ok(prediction) => {
                info!(
                    model = %model.identifier,
                    label = %prediction.label,
                    confidence = ?prediction.confidence,
                    "Prediction done"
                );
                prediction
            }
            Err(e) => {
                error!(model = %model.identifier, error = %e, "Prediction failed");
                Prediction::failed(PredictionFailure::Inference(e.to_string()))
            }
        }
    }

    fn infer(
        &self,
        model: &ModelDescriptor,
        normalized: &str,
    ) -> Result<Prediction, ClassifierError> {
        let features = self.registry.vectorizer().transform(normalized);
        let class = model.estimator.predict(&features)?;
        let confidence = model
            .estimator
            .predict_proba(&features)?
            .map(|p| p[0].max(p[1]).clamp(0.0, 1.0) as f32);
        Ok(Prediction::verdict(class, confidence))
    }
}
