//! Naive Bayes over categorical feature values
//!
//! Each feature's count is treated as a discrete value, not a magnitude.
//! Training estimates class priors and, for every (feature, value) pair seen
//! in training, a smoothed conditional probability per class:
//!
//! ```text
//! P(v | c) = (count(f = v, c) + alpha) / (count(f, c) + alpha * |values(f)|)
//! ```
//!
//! Prediction picks the class with the highest summed log probability.

use super::featureset::{FeatureMap, Featureset};
use super::{ClassifierError, ClassifierResult};
use crate::models::Label;
use crate::text::{FeatureId, Vocabulary};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default additive smoothing (Laplace)
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Observed values of one feature with per-class counts
#[derive(Debug, Clone, Default)]
struct FeatureValues {
    /// value -> count per class, in `Label::ALL` order
    counts: BTreeMap<u32, [usize; 2]>,
    /// Training examples per class that carried this feature
    totals: [usize; 2],
}

/// Conditional probability table estimated from a training split
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    alpha: f64,
    class_counts: [usize; 2],
    log_priors: [f64; 2],
    features: BTreeMap<FeatureId, FeatureValues>,
}

impl ProbabilityTable {
    /// Estimate priors and conditional probabilities.
    ///
    /// Fails with [`ClassifierError::InsufficientData`] when a class has no
    /// training examples.
    pub fn fit<'a, I>(featuresets: I, alpha: f64) -> ClassifierResult<Self>
    where
        I: IntoIterator<Item = &'a Featureset>,
    {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(ClassifierError::InvalidSmoothing(alpha));
        }

        let mut class_counts = [0usize; 2];
        let mut features: BTreeMap<FeatureId, FeatureValues> = BTreeMap::new();

        for set in featuresets {
            let class = set.label.index();
            class_counts[class] += 1;
            for (id, value) in set.features.iter() {
                let entry = features.entry(id).or_default();
                entry.counts.entry(value).or_insert([0, 0])[class] += 1;
                entry.totals[class] += 1;
            }
        }

        if let Some(label) = Label::ALL.into_iter().find(|l| class_counts[l.index()] == 0) {
            return Err(ClassifierError::InsufficientData { label });
        }

        let total = (class_counts[0] + class_counts[1]) as f64;
        let log_priors = class_counts.map(|count| (count as f64 / total).ln());

        Ok(Self {
            alpha,
            class_counts,
            log_priors,
            features,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Training examples per class, in `Label::ALL` order
    pub fn class_counts(&self) -> [usize; 2] {
        self.class_counts
    }

    pub fn prior(&self, label: Label) -> f64 {
        self.log_priors[label.index()].exp()
    }

    /// Number of features seen in training
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// `P(feature = value | label)`, or `None` when the pair was never
    /// observed in training.
    pub fn probability(&self, id: FeatureId, value: u32, label: Label) -> Option<f64> {
        let values = self.features.get(&id)?;
        let counts = values.counts.get(&value)?;
        Some(self.smoothed(values, counts, label))
    }

    fn smoothed(&self, values: &FeatureValues, counts: &[usize; 2], label: Label) -> f64 {
        let class = label.index();
        let bins = values.counts.len() as f64;
        (counts[class] as f64 + self.alpha) / (values.totals[class] as f64 + self.alpha * bins)
    }

    /// Unnormalised log posterior per class, in `Label::ALL` order.
    ///
    /// Pairs never seen in training carry no evidence and are skipped.
    pub fn log_scores(&self, features: &FeatureMap) -> [f64; 2] {
        let mut scores = self.log_priors;
        for (id, value) in features.iter() {
            let Some(values) = self.features.get(&id) else {
                continue;
            };
            let Some(counts) = values.counts.get(&value) else {
                continue;
            };
            for label in Label::ALL {
                scores[label.index()] += self.smoothed(values, counts, label).ln();
            }
        }
        scores
    }

    /// Every observed (feature, value) pair with its per-class probabilities
    fn observed_pairs(&self) -> impl Iterator<Item = (FeatureId, u32, [f64; 2])> + '_ {
        self.features.iter().flat_map(move |(id, values)| {
            values.counts.iter().map(move |(value, counts)| {
                let probs = Label::ALL.map(|label| self.smoothed(values, counts, label));
                (*id, *value, probs)
            })
        })
    }
}

/// A trained Naive Bayes classifier
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    table: ProbabilityTable,
}

impl NaiveBayesClassifier {
    pub fn train<'a, I>(featuresets: I, alpha: f64) -> ClassifierResult<Self>
    where
        I: IntoIterator<Item = &'a Featureset>,
    {
        Ok(Self {
            table: ProbabilityTable::fit(featuresets, alpha)?,
        })
    }

    pub fn table(&self) -> &ProbabilityTable {
        &self.table
    }

    /// Most likely label. Ties go to the first label in `Label::ALL`.
    pub fn classify(&self, features: &FeatureMap) -> Label {
        let scores = self.table.log_scores(features);
        if scores[Label::Explicit.index()] > scores[Label::NotExplicit.index()] {
            Label::Explicit
        } else {
            Label::NotExplicit
        }
    }

    /// Posterior probability per class, in `Label::ALL` order
    pub fn prob_classify(&self, features: &FeatureMap) -> [f64; 2] {
        let scores = self.table.log_scores(features);
        let max = scores[0].max(scores[1]);
        let exp = scores.map(|s| (s - max).exp());
        let sum = exp[0] + exp[1];
        exp.map(|e| e / sum)
    }

    pub fn classify_many<'a, I>(&self, featuresets: I) -> Vec<Label>
    where
        I: IntoIterator<Item = &'a Featureset>,
    {
        featuresets
            .into_iter()
            .map(|set| self.classify(&set.features))
            .collect()
    }
}

/// A feature ranked by how strongly one of its values separates the classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InformativeFeature {
    pub name: String,
    #[serde(skip)]
    pub id: FeatureId,
    /// The count value that produced the ratio
    pub value: u32,
    /// Largest over smallest conditional probability across classes
    pub ratio: f64,
    /// Class under which the value is more likely
    pub favours: Label,
}

/// Top-`k` features by likelihood ratio, highest first.
///
/// Each feature appears once, scored by its most separating value. Ties are
/// ordered by feature name.
pub fn most_informative_features(
    table: &ProbabilityTable,
    vocabulary: &Vocabulary,
    k: usize,
) -> Vec<InformativeFeature> {
    let mut best: BTreeMap<FeatureId, InformativeFeature> = BTreeMap::new();

    for (id, value, probs) in table.observed_pairs() {
        let Some(name) = vocabulary.token(id) else {
            continue;
        };
        let (hi, lo) = if probs[1] > probs[0] {
            (Label::Explicit, Label::NotExplicit)
        } else {
            (Label::NotExplicit, Label::Explicit)
        };
        let ratio = probs[hi.index()] / probs[lo.index()];

        let better = best.get(&id).map_or(true, |current| ratio > current.ratio);
        if better {
            best.insert(
                id,
                InformativeFeature {
                    name: name.to_string(),
                    id,
                    value,
                    ratio,
                    favours: hi,
                },
            );
        }
    }

    let mut ranked: Vec<InformativeFeature> = best.into_values().collect();
    ranked.sort_by(|a, b| b.ratio.total_cmp(&a.ratio).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::build_featuresets;
    use crate::text::vectorize;

    fn corpus(docs: &[(&str, bool)]) -> (Vocabulary, Vec<Featureset>) {
        let texts: Vec<&str> = docs.iter().map(|(t, _)| *t).collect();
        let labels: Vec<Label> = docs.iter().map(|(_, e)| Label::from(*e)).collect();
        let out = vectorize(&texts);
        let sets = build_featuresets(&out.vocabulary, &out.vectors, &labels).unwrap();
        (out.vocabulary, sets)
    }

    #[test]
    fn test_priors_follow_class_frequency() {
        let (_, sets) = corpus(&[("a", true), ("b", false), ("c", false), ("d", false)]);
        let table = ProbabilityTable::fit(&sets, DEFAULT_ALPHA).unwrap();
        assert!((table.prior(Label::Explicit) - 0.25).abs() < 1e-12);
        assert!((table.prior(Label::NotExplicit) - 0.75).abs() < 1e-12);
        assert_eq!(table.class_counts(), [3, 1]);
    }

    #[test]
    fn test_laplace_smoothing() {
        let (vocab, sets) = corpus(&[("damn", true), ("damn", true), ("hello", false)]);
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        let damn = vocab.id("damn").unwrap();

        // damn observed with values {0, 1}: two bins
        let p1_explicit = table.probability(damn, 1, Label::Explicit).unwrap();
        let p1_clean = table.probability(damn, 1, Label::NotExplicit).unwrap();
        assert!((p1_explicit - 3.0 / 4.0).abs() < 1e-12);
        assert!((p1_clean - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.probability(damn, 7, Label::Explicit), None);
    }

    #[test]
    fn test_conditional_probabilities_sum_to_one() {
        let (vocab, sets) = corpus(&[
            ("la la", true),
            ("la", false),
            ("oh", false),
            ("la la la", true),
        ]);
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        let la = vocab.id("la").unwrap();
        for label in Label::ALL {
            let total: f64 = [0, 1, 2, 3]
                .iter()
                .filter_map(|v| table.probability(la, *v, label))
                .sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_missing_class_is_insufficient_data() {
        let (_, sets) = corpus(&[("a", true), ("b", true)]);
        let err = ProbabilityTable::fit(&sets, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InsufficientData {
                label: Label::NotExplicit
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_alpha() {
        let (_, sets) = corpus(&[("a", true), ("b", false)]);
        assert!(matches!(
            ProbabilityTable::fit(&sets, 0.0),
            Err(ClassifierError::InvalidSmoothing(_))
        ));
    }

    #[test]
    fn test_classifies_separable_corpus() {
        let (vocab, sets) = corpus(&[
            ("damn hell damn", true),
            ("hell fire damn", true),
            ("damn it", true),
            ("sunshine love", false),
            ("love sweet sunshine", false),
            ("sweet love", false),
        ]);
        let classifier = NaiveBayesClassifier::train(&sets, 1.0).unwrap();
        let predictions = classifier.classify_many(&sets);
        let truth: Vec<Label> = sets.iter().map(|s| s.label).collect();
        assert_eq!(predictions, truth);

        let probs = classifier.prob_classify(&sets[0].features);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs[Label::Explicit.index()] > 0.5);

        let top = most_informative_features(classifier.table(), &vocab, 2);
        assert_eq!(top.len(), 2);
        assert!(top[0].ratio >= top[1].ratio);
    }

    #[test]
    fn test_unseen_values_carry_no_evidence() {
        let (vocab, sets) = corpus(&[("a", true), ("b", false), ("b", false)]);
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        let a = vocab.id("a").unwrap();
        let unseen: FeatureMap = [(a, 9)].into_iter().collect();
        let scores = table.log_scores(&unseen);
        assert!((scores[0] - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((scores[1] - (1.0f64 / 3.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_informative_ranking_is_unique_and_sorted() {
        let (vocab, sets) = corpus(&[
            ("damn damn", true),
            ("damn", true),
            ("damn night", true),
            ("night sky", false),
            ("sky", false),
            ("sky blue", false),
        ]);
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        let ranked = most_informative_features(&table, &vocab, 10);

        assert_eq!(ranked.len(), vocab.len());
        let mut names: Vec<&str> = ranked.iter().map(|f| f.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ranked.len());
        for pair in ranked.windows(2) {
            assert!(pair[0].ratio >= pair[1].ratio);
        }
        assert!(ranked.iter().all(|f| f.ratio >= 1.0));

        // Absence of "damn" is the strongest evidence it carries
        let damn = ranked.iter().find(|f| f.name == "damn").unwrap();
        assert_eq!(damn.value, 0);
        assert_eq!(damn.favours, Label::NotExplicit);
        assert!((damn.ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_informative_truncates_to_k() {
        let (vocab, sets) = corpus(&[("a b c", true), ("d e", false)]);
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        assert_eq!(most_informative_features(&table, &vocab, 3).len(), 3);
        assert!(most_informative_features(&table, &vocab, 0).is_empty());
    }
}
