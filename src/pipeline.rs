//! Feature construction pipeline
//!
//! Wires the text stages into one call: normalize every track, vectorize the
//! normalized corpus, then pair the count vectors with labels.

use crate::classifier::{build_featuresets, ClassifierResult, Featureset};
use crate::config::NormalizerConfig;
use crate::models::{Label, Track};
use crate::text::{vectorize, Normalizer, SnowballStemmer, StopWords, Stemmer, Vocabulary};
use tracing::info;

/// Everything downstream stages need from a track table
#[derive(Debug, Clone)]
pub struct Prepared {
    /// Normalized lyric text, parallel to the input tracks
    pub normalized: Vec<String>,
    pub vocabulary: Vocabulary,
    pub featuresets: Vec<Featureset>,
}

/// Build the default English normalizer, extended with configured stop words
pub fn normalizer_from_config(config: &NormalizerConfig) -> Normalizer<SnowballStemmer> {
    let stop_words = StopWords::english().with_extra(config.extra_stop_words.iter());
    Normalizer::new(stop_words, SnowballStemmer::english())
}

/// Normalize, vectorize and build featuresets for `tracks`
pub fn prepare<S: Stemmer>(
    tracks: &[Track],
    normalizer: &Normalizer<S>,
) -> ClassifierResult<Prepared> {
    let normalized = normalizer.normalize_all(tracks);
    let vectorized = vectorize(&normalized);
    info!(
        "Built vocabulary of {} token(s) from {} track(s)",
        vectorized.vocabulary.len(),
        tracks.len()
    );

    let labels: Vec<Label> = tracks.iter().map(Track::label).collect();
    let featuresets = build_featuresets(&vectorized.vocabulary, &vectorized.vectors, &labels)?;

    Ok(Prepared {
        normalized,
        vocabulary: vectorized.vocabulary,
        featuresets,
    })
}
