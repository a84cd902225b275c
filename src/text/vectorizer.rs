//! Bag-of-words vectorization
//!
//! Builds a vocabulary over a corpus of normalized strings and turns each
//! string into a vector of token counts aligned with it.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Index of a token within a [`Vocabulary`].
///
/// Only a vocabulary hands these out, so an id taken from one is always in
/// range for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(u32);

impl FeatureId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Distinct tokens of a corpus in lexicographic order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: FxHashMap<String, FeatureId>,
}

impl Vocabulary {
    /// Build from any token collection; duplicates collapse, order is sorted.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
        let tokens: Vec<String> = sorted.into_iter().collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), FeatureId(i as u32)))
            .collect();
        Self { tokens, index }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Id of a token, if it is in the vocabulary
    pub fn id(&self, token: &str) -> Option<FeatureId> {
        self.index.get(token).copied()
    }

    /// Token for an id
    pub fn token(&self, id: FeatureId) -> Option<&str> {
        self.tokens.get(id.index()).map(String::as_str)
    }

    /// Every id in canonical order
    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        (0..self.tokens.len()).map(|i| FeatureId(i as u32))
    }
}

/// Per-document token counts, aligned with a vocabulary
pub type CountVector = Vec<u32>;

/// Vocabulary plus one count vector per document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vectorized {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<CountVector>,
}

/// Whitespace-token count vectorizer
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary of a corpus
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.vocabulary = Vocabulary::from_tokens(
            documents
                .iter()
                .flat_map(|doc| doc.as_ref().split_whitespace()),
        );
    }

    /// Count vector of one document. Tokens outside the vocabulary are
    /// ignored.
    pub fn transform(&self, document: &str) -> CountVector {
        let mut vector = vec![0u32; self.vocabulary.len()];
        for token in document.split_whitespace() {
            if let Some(id) = self.vocabulary.id(token) {
                vector[id.index()] += 1;
            }
        }
        vector
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vectorized {
        self.fit(documents);
        let vectors = documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect();
        Vectorized {
            vocabulary: self.vocabulary.clone(),
            vectors,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

/// Vocabulary and count vectors for a corpus in one call
pub fn vectorize<S: AsRef<str>>(documents: &[S]) -> Vectorized {
    CountVectorizer::new().fit_transform(documents)
}
