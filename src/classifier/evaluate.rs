//! Train/test evaluation
//!
//! One evaluation shuffles the featuresets, holds out a test split, trains on
//! the rest and scores the held-out predictions.

use super::featureset::Featureset;
use super::metrics::{ConfusionMatrix, Metrics};
use super::naive_bayes::{NaiveBayesClassifier, DEFAULT_ALPHA};
use super::{ClassifierError, ClassifierResult};
use crate::config::ClassifierConfig;
use crate::models::Label;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Settings for a single evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    /// Share of featuresets held out for testing
    pub test_fraction: f64,
    /// Additive smoothing passed to the classifier
    pub alpha: f64,
    /// Training classes smaller than this are logged as a warning
    pub min_class_examples: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            alpha: DEFAULT_ALPHA,
            min_class_examples: 5,
        }
    }
}

impl From<&ClassifierConfig> for EvalConfig {
    fn from(config: &ClassifierConfig) -> Self {
        Self {
            test_fraction: config.test_fraction,
            alpha: config.alpha,
            min_class_examples: config.min_class_examples,
        }
    }
}

/// Outcome of one train/test evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub classifier: NaiveBayesClassifier,
    pub metrics: Metrics,
    pub confusion: ConfusionMatrix,
    pub train_size: usize,
    pub test_size: usize,
}

/// Randomly partition featuresets into `(train, test)`.
///
/// The test split holds `ceil(n * test_fraction)` examples drawn without
/// replacement; the train split holds the rest.
pub fn train_test_split<'a, R>(
    featuresets: &'a [Featureset],
    test_fraction: f64,
    rng: &mut R,
) -> ClassifierResult<(Vec<&'a Featureset>, Vec<&'a Featureset>)>
where
    R: Rng + ?Sized,
{
    if featuresets.is_empty() {
        return Err(ClassifierError::EmptyDataset);
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ClassifierError::InvalidTestFraction(test_fraction));
    }

    let n = featuresets.len();
    let test_size = ((n as f64) * test_fraction).ceil() as usize;
    let test_size = test_size.min(n);

    let mut order: Vec<&Featureset> = featuresets.iter().collect();
    order.shuffle(rng);
    let train = order.split_off(test_size);
    Ok((train, order))
}

/// Train on `train` and score predictions on `test`.
pub fn evaluate_split(
    train: &[&Featureset],
    test: &[&Featureset],
    config: &EvalConfig,
) -> ClassifierResult<Evaluation> {
    let classifier = NaiveBayesClassifier::train(train.iter().copied(), config.alpha)?;

    let class_counts = classifier.table().class_counts();
    for label in Label::ALL {
        let count = class_counts[label.index()];
        if count < config.min_class_examples {
            warn!(
                "Only {} training example(s) labelled '{}' (recommended at least {})",
                count, label, config.min_class_examples
            );
        }
    }

    let truth: Vec<Label> = test.iter().map(|set| set.label).collect();
    let predicted = classifier.classify_many(test.iter().copied());
    let confusion = ConfusionMatrix::from_predictions(&truth, &predicted);

    for label in Label::ALL {
        if confusion.support(label) == 0 {
            warn!(
                "Test split has no examples labelled '{}'; its metrics are reported as zero",
                label
            );
        }
    }

    let metrics = Metrics::from_confusion(&confusion);
    debug!(
        train = train.len(),
        test = test.len(),
        accuracy = confusion.accuracy(),
        "Evaluated split"
    );

    Ok(Evaluation {
        classifier,
        metrics,
        confusion,
        train_size: train.len(),
        test_size: test.len(),
    })
}

/// Split, train and score in one call
pub fn evaluate<R>(
    featuresets: &[Featureset],
    config: &EvalConfig,
    rng: &mut R,
) -> ClassifierResult<Evaluation>
where
    R: Rng + ?Sized,
{
    let (train, test) = train_test_split(featuresets, config.test_fraction, rng)?;
    evaluate_split(&train, &test, config)
}
