//! Feature selection
//!
//! Reduces every feature map to a chosen set of features. Other features are
//! removed as keys, not zeroed, so a reduced map never has more entries than
//! names selected.

use super::featureset::Featureset;
use super::naive_bayes::InformativeFeature;
use crate::text::{FeatureId, Vocabulary};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Keep only the features named in `names`, preserving featureset order.
///
/// Names missing from the vocabulary select nothing.
pub fn select_features<S: AsRef<str>>(
    featuresets: &[Featureset],
    vocabulary: &Vocabulary,
    names: &[S],
) -> Vec<Featureset> {
    let mut keep: FxHashSet<FeatureId> = FxHashSet::default();
    for name in names {
        match vocabulary.id(name.as_ref()) {
            Some(id) => {
                keep.insert(id);
            }
            None => debug!("Selected feature '{}' is not in the vocabulary", name.as_ref()),
        }
    }
    reduce(featuresets, &keep)
}

/// Keep only the features of a ranking from [`most_informative_features`].
///
/// [`most_informative_features`]: super::most_informative_features
pub fn select_informative(
    featuresets: &[Featureset],
    ranking: &[InformativeFeature],
) -> Vec<Featureset> {
    let keep: FxHashSet<FeatureId> = ranking.iter().map(|f| f.id).collect();
    reduce(featuresets, &keep)
}

fn reduce(featuresets: &[Featureset], keep: &FxHashSet<FeatureId>) -> Vec<Featureset> {
    info!("Reducing featuresets to {} feature(s)", keep.len());
    featuresets
        .iter()
        .map(|set| Featureset::new(set.features.filtered(|id| keep.contains(&id)), set.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{build_featuresets, most_informative_features, ProbabilityTable};
    use crate::models::Label;
    use crate::text::vectorize;

    fn sample() -> (Vocabulary, Vec<Featureset>) {
        let out = vectorize(&["a b c", "d e", "a e"]);
        let labels = [Label::Explicit, Label::NotExplicit, Label::Explicit];
        let sets = build_featuresets(&out.vocabulary, &out.vectors, &labels).unwrap();
        (out.vocabulary, sets)
    }

    #[test]
    fn test_keeps_only_named_keys() {
        let (vocab, sets) = sample();
        let reduced = select_features(&sets, &vocab, &["a", "e"]);
        assert_eq!(reduced.len(), sets.len());
        let a = vocab.id("a").unwrap();
        let b = vocab.id("b").unwrap();
        for (before, after) in sets.iter().zip(&reduced) {
            assert_eq!(after.features.len(), 2);
            assert_eq!(after.label, before.label);
            assert_eq!(after.features.get(a), before.features.get(a));
            assert!(!after.features.contains(b));
        }
    }

    #[test]
    fn test_unknown_and_duplicate_names() {
        let (vocab, sets) = sample();
        let reduced = select_features(&sets, &vocab, &["a", "a", "zebra"]);
        assert!(reduced.iter().all(|s| s.features.len() == 1));

        let none = select_features::<&str>(&sets, &vocab, &[]);
        assert!(none.iter().all(|s| s.features.is_empty()));
    }

    #[test]
    fn test_select_from_ranking_is_bounded() {
        let (vocab, sets) = sample();
        let table = ProbabilityTable::fit(&sets, 1.0).unwrap();
        for k in 0..=6 {
            let ranking = most_informative_features(&table, &vocab, k);
            let reduced = select_informative(&sets, &ranking);
            assert!(reduced.iter().all(|s| s.features.len() <= k));
            assert!(reduced
                .iter()
                .all(|s| s.features.len() == k.min(vocab.len())));
        }
    }
}
