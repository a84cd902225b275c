//! lyriclass - Naive Bayes explicit-lyrics classifier
//!
//! Normalizes song lyrics, turns them into bag-of-words featuresets and
//! trains, evaluates and cross-validates a Naive Bayes model that predicts
//! whether a track is explicit.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod text;
