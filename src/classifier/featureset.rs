//! Featuresets: typed feature maps paired with labels
//!
//! A feature map is keyed by vocabulary id, so a map can only name tokens
//! that exist in the vocabulary it was built from.

use super::{ClassifierError, ClassifierResult};
use crate::models::Label;
use crate::text::{CountVector, FeatureId, Vocabulary};
use std::collections::BTreeMap;

/// Ordered mapping from feature to observed count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureMap {
    entries: BTreeMap<FeatureId, u32>,
}

impl FeatureMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<u32> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, u32)> + '_ {
        self.entries.iter().map(|(id, count)| (*id, *count))
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.entries.keys().copied()
    }

    /// Copy of this map keeping only the entries `keep` accepts
    pub fn filtered(&self, mut keep: impl FnMut(FeatureId) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(id, _)| keep(**id))
                .map(|(id, count)| (*id, *count))
                .collect(),
        }
    }
}

impl FromIterator<(FeatureId, u32)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (FeatureId, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One labelled training/test example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Featureset {
    pub features: FeatureMap,
    pub label: Label,
}

impl Featureset {
    pub fn new(features: FeatureMap, label: Label) -> Self {
        Self { features, label }
    }
}

/// Pair every count vector with its label as a dense feature map.
///
/// Zero counts are kept, so each map has exactly `vocabulary.len()` entries.
pub fn build_featuresets(
    vocabulary: &Vocabulary,
    vectors: &[CountVector],
    labels: &[Label],
) -> ClassifierResult<Vec<Featureset>> {
    if vectors.len() != labels.len() {
        return Err(ClassifierError::ShapeMismatch {
            expected: vectors.len(),
            found: labels.len(),
        });
    }

    vectors
        .iter()
        .zip(labels)
        .map(|(vector, label)| {
            if vector.len() != vocabulary.len() {
                return Err(ClassifierError::ShapeMismatch {
                    expected: vocabulary.len(),
                    found: vector.len(),
                });
            }
            let features = vocabulary
                .ids()
                .map(|id| (id, vector[id.index()]))
                .collect();
            Ok(Featureset::new(features, *label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::vectorize;

    #[test]
    fn test_dense_maps_include_zero_counts() {
        let out = vectorize(&["rain rain", "fire"]);
        let sets = build_featuresets(
            &out.vocabulary,
            &out.vectors,
            &[Label::NotExplicit, Label::Explicit],
        )
        .unwrap();

        assert_eq!(sets.len(), 2);
        for set in &sets {
            assert_eq!(set.features.len(), out.vocabulary.len());
        }

        let fire = out.vocabulary.id("fire").unwrap();
        let rain = out.vocabulary.id("rain").unwrap();
        assert_eq!(sets[0].features.get(rain), Some(2));
        assert_eq!(sets[0].features.get(fire), Some(0));
        assert_eq!(sets[1].label, Label::Explicit);
    }

    #[test]
    fn test_empty_vocabulary_gives_empty_maps() {
        let out = vectorize(&["", ""]);
        let sets = build_featuresets(
            &out.vocabulary,
            &out.vectors,
            &[Label::Explicit, Label::NotExplicit],
        )
        .unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.features.is_empty()));
    }

    #[test]
    fn test_label_count_mismatch() {
        let out = vectorize(&["a", "b"]);
        let err = build_featuresets(&out.vocabulary, &out.vectors, &[Label::Explicit]).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::ShapeMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_vector_length_mismatch() {
        let vocab = Vocabulary::from_tokens(["a", "b"]);
        let err = build_featuresets(&vocab, &[vec![1]], &[Label::Explicit]).unwrap_err();
        assert!(matches!(err, ClassifierError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_filtered_removes_keys() {
        let vocab = Vocabulary::from_tokens(["a", "b", "c"]);
        let map: FeatureMap = vocab.ids().map(|id| (id, 0)).collect();
        let b = vocab.id("b").unwrap();
        let reduced = map.filtered(|id| id == b);
        assert_eq!(reduced.len(), 1);
        assert!(reduced.contains(b));
    }
}
