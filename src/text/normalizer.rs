//! Lyric normalization
//!
//! Splits on whitespace, drops stop words and reduces the remaining tokens to
//! their stems. The stop-word test is case-insensitive; stemming sees the
//! token exactly as written. A stem that is itself a stop word is dropped
//! too, so normalizing normalized text changes nothing.

use super::stopwords::StopWords;
use crate::models::Track;
use rust_stemmers::Algorithm;

/// A deterministic word → stem transform
pub trait Stemmer {
    fn stem(&self, token: &str) -> String;
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String,
{
    fn stem(&self, token: &str) -> String {
        self(token)
    }
}

/// English Snowball (Porter2) stemmer.
///
/// Porter2 alone can shorten its own output again ("agreed" -> "agre" ->
/// "agr"), so stemming is repeated until the result is stable.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn english() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::english()
    }
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer").finish_non_exhaustive()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str) -> String {
        let mut current = self.inner.stem(token).into_owned();
        // Bounded by token length
        for _ in 0..token.len() {
            let next = self.inner.stem(&current);
            if next == current {
                break;
            }
            current = next.into_owned();
        }
        current
    }
}

/// Stop-word removal followed by stemming
#[derive(Debug)]
pub struct Normalizer<S = SnowballStemmer> {
    stop_words: StopWords,
    stemmer: S,
}

impl Normalizer<SnowballStemmer> {
    /// English stop words and the English Snowball stemmer
    pub fn english() -> Self {
        Self::new(StopWords::english(), SnowballStemmer::english())
    }
}

impl<S: Stemmer> Normalizer<S> {
    pub fn new(stop_words: StopWords, stemmer: S) -> Self {
        Self {
            stop_words,
            stemmer,
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalize one lyric string. Returns an empty string when every token
    /// is filtered.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for token in text.split_whitespace() {
            if self.stop_words.contains(token) {
                continue;
            }
            let stem = self.stemmer.stem(token);
            if stem.is_empty() || self.stop_words.contains(&stem) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&stem);
        }
        out
    }

    /// Normalize every track's lyrics, preserving track order
    pub fn normalize_all(&self, tracks: &[Track]) -> Vec<String> {
        tracks.iter().map(|t| self.normalize(&t.lyrics)).collect()
    }
}
