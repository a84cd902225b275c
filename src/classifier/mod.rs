//! Naive Bayes classification of tracks
//!
//! This module turns count vectors into labelled featuresets, trains and
//! evaluates a categorical Naive Bayes model, reduces featuresets to the most
//! informative features and repeats evaluation over random splits.
//!
//! # Example
//!
//! ```rust,ignore
//! use lyriclass::classifier::{build_featuresets, evaluate, EvalConfig};
//! use rand::SeedableRng;
//!
//! let sets = build_featuresets(&vocabulary, &vectors, &labels)?;
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//! let evaluation = evaluate(&sets, &EvalConfig::default(), &mut rng)?;
//! println!("{:?}", evaluation.metrics.fscore);
//! ```

mod evaluate;
mod featureset;
mod metrics;
mod monte_carlo;
mod naive_bayes;
mod selection;

pub use evaluate::{evaluate, evaluate_split, train_test_split, EvalConfig, Evaluation};
pub use featureset::{build_featuresets, FeatureMap, Featureset};
pub use metrics::{ConfusionMatrix, Metrics, MetricsSpread};
pub use monte_carlo::{repetition_rng, MonteCarloReport, MonteCarloValidator};
pub use naive_bayes::{
    most_informative_features, InformativeFeature, NaiveBayesClassifier, ProbabilityTable,
    DEFAULT_ALPHA,
};
pub use selection::{select_features, select_informative};

use crate::models::Label;
use thiserror::Error;

/// Errors that can occur while building, training or evaluating
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("No training examples labelled '{label}'; cannot fit a two-class model")]
    InsufficientData { label: Label },

    #[error("No featuresets to evaluate")]
    EmptyDataset,

    #[error("Invalid test fraction {0}: must be strictly between 0 and 1")]
    InvalidTestFraction(f64),

    #[error("Invalid smoothing alpha {0}: must be a positive finite number")]
    InvalidSmoothing(f64),

    #[error("Shape mismatch: expected {expected} entries, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;
