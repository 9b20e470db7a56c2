//! Pre-trained binary estimators loaded from JSON artifacts.
//!
//! Each variant states its own capabilities: every estimator has a decision function, only some
//! expose class probabilities. Class 1 means "fake", class 0 means "real".

use std::path::Path;

use serde::Deserialize;

use crate::error::ClassifierError;
use crate::vectorizer::SparseVector;

/// Linear decision function `w·x + b`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn decision(&self, x: &SparseVector) -> f64 {
        x.dot(&self.coef) + self.intercept
    }
}

/// One node of a regression tree. Samples with `x[feature] <= threshold` go left.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    fn evaluate(&self, x: &SparseVector) -> Result<f64, ClassifierError> {
        let mut index = 0;
        // A well-formed tree reaches a leaf in at most `nodes.len()` steps.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    index = if x.get(*feature) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => {
                    return Err(ClassifierError::Inference(format!(
                        "tree node {} out of range",
                        index
                    )))
                }
            }
        }
        Err(ClassifierError::Inference(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }
}

/// Additive tree ensemble with a logistic link (binary gradient boosting).
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub init_score: f64,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    fn raw_score(&self, x: &SparseVector) -> Result<f64, ClassifierError> {
        let mut score = self.init_score;
        for tree in &self.trees {
            score += tree.evaluate(x)?;
        }
        Ok(score)
    }
}

/// Capability-tagged estimator. The JSON artifact selects the variant with `"kind"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// Linear support vector classifier: decision function only, no probabilities.
    LinearSvc(LinearModel),
    /// Logistic regression: sigmoid of the linear decision.
    LogisticRegression(LinearModel),
    /// Gradient-boosted trees: sigmoid of the summed leaf values.
    GradientBoosting(TreeEnsemble),
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Estimator {
    /// Loads and validates an estimator artifact against the vectorizer's feature count.
    pub fn from_file(path: &Path, n_features: usize) -> Result<Self, ClassifierError> {
        if !path.exists() {
            return Err(ClassifierError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let estimator: Self =
            serde_json::from_str(&raw).map_err(|source| ClassifierError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        estimator.validate(n_features)?;
        Ok(estimator)
    }

    /// Checks that the artifact fits a vectorizer with `n_features` columns.
    pub fn validate(&self, n_features: usize) -> Result<(), ClassifierError> {
        match self {
            Estimator::LinearSvc(m) | Estimator::LogisticRegression(m) => {
                if m.coef.len() != n_features {
                    return Err(ClassifierError::InvalidArtifact(format!(
                        "expected {} coefficients, found {}",
                        n_features,
                        m.coef.len()
                    )));
                }
                if !m.intercept.is_finite() || m.coef.iter().any(|w| !w.is_finite()) {
                    return Err(ClassifierError::InvalidArtifact(
                        "linear model has non-finite weights".to_string(),
                    ));
                }
            }
            Estimator::GradientBoosting(ensemble) => {
                if ensemble.trees.is_empty() {
                    return Err(ClassifierError::InvalidArtifact(
                        "tree ensemble has no trees".to_string(),
                    ));
                }
                for (t, tree) in ensemble.trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(ClassifierError::InvalidArtifact(format!(
                            "tree {} has no nodes",
                            t
                        )));
                    }
                    for node in &tree.nodes {
                        if let TreeNode::Split {
                            feature,
                            left,
                            right,
                            ..
                        } = node
                        {
                            if *feature >= n_features
                                || *left >= tree.nodes.len()
                                || *right >= tree.nodes.len()
                            {
                                return Err(ClassifierError::InvalidArtifact(format!(
                                    "tree {} references a missing feature or node",
                                    t
                                )));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LinearSvc(_) => "linear_svc",
            Estimator::LogisticRegression(_) => "logistic_regression",
            Estimator::GradientBoosting(_) => "gradient_boosting",
        }
    }

    /// Whether [`predict_proba`](Self::predict_proba) yields probabilities.
    pub fn supports_confidence(&self) -> bool {
        !matches!(self, Estimator::LinearSvc(_))
    }

    /// Signed decision value; positive means class 1.
    pub fn decision_function(&self, x: &SparseVector) -> Result<f64, ClassifierError> {
        let value = match self {
            Estimator::LinearSvc(m) | Estimator::LogisticRegression(m) => m.decision(x),
            Estimator::GradientBoosting(e) => e.raw_score(x)?,
        };
        if !value.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "non-finite decision value {}",
                value
            )));
        }
        Ok(value)
    }

    /// Binary class: 1 (fake) or 0 (real).
    pub fn predict(&self, x: &SparseVector) -> Result<u8, ClassifierError> {
        Ok(u8::from(self.decision_function(x)? > 0.0))
    }

    /// `[p(class 0), p(class 1)]`, or `None` for estimators without a probability interface.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Option<[f64; 2]>, ClassifierError> {
        if !self.supports_confidence() {
            return Ok(None);
        }
        let p1 = sigmoid(self.decision_function(x)?);
        Ok(Some([1.0 - p1, p1]))
    }
}
