//! Informative command - rank features by likelihood ratio

use super::{emit, load_prepared};
use crate::classifier::{evaluate, most_informative_features, EvalConfig};
use crate::config::ProjectConfig;
use crate::reporters::{self, OutputFormat, Report};
use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// Run the informative command
pub fn run(
    csv: &Path,
    config: &ProjectConfig,
    seed: u64,
    top: usize,
    format: OutputFormat,
) -> Result<()> {
    let (_, prepared) = load_prepared(csv, config)?;
    let eval_config = EvalConfig::from(&config.classifier);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let evaluation = evaluate(&prepared.featuresets, &eval_config, &mut rng)?;

    let mut report = Report::new(seed);
    report.informative =
        most_informative_features(evaluation.classifier.table(), &prepared.vocabulary, top);

    let rendered = reporters::report_with_format(&report, format)?;
    emit(&rendered, format);
    Ok(())
}
