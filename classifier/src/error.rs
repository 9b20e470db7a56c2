//! Classifier error types.
//!
//! Loading errors are startup-fatal; [`ClassifierError::Inference`] is converted into an ERROR prediction by the dispatcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading artifacts and linguistic resources, or during inference.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Linguistic resource unavailable: {0}")]
    MissingResource(String),

    #[error("Invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Inference failed: {0}")]
    Inference(String),
}
