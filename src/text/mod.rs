//! Text processing for lyrics
//!
//! - Stop-word removal and stemming (`Normalizer`)
//! - Bag-of-words vectorization (`CountVectorizer`)

mod normalizer;
mod stopwords;
mod vectorizer;

pub use normalizer::{Normalizer, SnowballStemmer, Stemmer};
pub use stopwords::StopWords;
pub use vectorizer::{vectorize, CountVector, CountVectorizer, FeatureId, Vectorized, Vocabulary};
