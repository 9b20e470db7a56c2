//! Classifier crate: text normalization, TF-IDF vectorization, pre-trained estimators and prediction dispatch.
//!
//! ## Modules
//!
//! - [`preprocess`] – Preprocessor, stop words, lemmatizer
//! - [`vectorizer`] – TfidfVectorizer, SparseVector
//! - [`estimator`] – Estimator variants (linear SVC, logistic regression, gradient boosting)
//! - [`registry`] – ModelRegistry, ModelDescriptor, ModelSpec
//! - [`dispatcher`] – PredictionDispatcher, Prediction, Label

pub mod dispatcher;
pub mod error;
pub mod estimator;
pub mod preprocess;
pub mod registry;
pub mod vectorizer;

pub use dispatcher::{Label, Prediction, PredictionDispatcher, PredictionFailure};
pub use error::ClassifierError;
pub use estimator::{Estimator, LinearModel, Tree, TreeEnsemble, TreeNode};
pub use preprocess::{Lemmatizer, LinguisticResources, Preprocessor};
pub use registry::{ModelDescriptor, ModelRegistry, ModelSpec};
pub use vectorizer::{Norm, SparseVector, TfidfVectorizer};
