//! Select command - retrain on the top-K informative features

use super::{emit, load_prepared};
use crate::classifier::{evaluate, most_informative_features, select_informative, EvalConfig};
use crate::config::ProjectConfig;
use crate::reporters::{self, MetricsSection, OutputFormat, Report};
use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::info;

/// Run the select command.
///
/// Both evaluations draw their split from the same seed, so the reduced model
/// is scored on the same held-out tracks as the full one.
pub fn run(
    csv: &Path,
    config: &ProjectConfig,
    seed: u64,
    top_k: usize,
    show_confusion_matrix: bool,
    format: OutputFormat,
) -> Result<()> {
    let (_, prepared) = load_prepared(csv, config)?;
    let eval_config = EvalConfig::from(&config.classifier);

    let full = evaluate(
        &prepared.featuresets,
        &eval_config,
        &mut ChaCha8Rng::seed_from_u64(seed),
    )?;
    let ranking = most_informative_features(full.classifier.table(), &prepared.vocabulary, top_k);
    let reduced_sets = select_informative(&prepared.featuresets, &ranking);
    let reduced = evaluate(&reduced_sets, &eval_config, &mut ChaCha8Rng::seed_from_u64(seed))?;
    info!(
        "Accuracy {:.4} with {} features, {:.4} with top {}",
        full.confusion.accuracy(),
        prepared.vocabulary.len(),
        reduced.confusion.accuracy(),
        ranking.len()
    );

    let mut report = Report::new(seed);
    let sections = [
        (
            format!("All features ({})", prepared.vocabulary.len()),
            full,
        ),
        (format!("Top {} features", ranking.len()), reduced),
    ];
    for (title, evaluation) in sections {
        let mut section = MetricsSection::new(title, evaluation.metrics)
            .with_sizes(evaluation.train_size, evaluation.test_size);
        if show_confusion_matrix {
            section = section.with_confusion(evaluation.confusion);
        }
        report.push(section);
    }
    report.informative = ranking;

    let rendered = reporters::report_with_format(&report, format)?;
    emit(&rendered, format);
    Ok(())
}
