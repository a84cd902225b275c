//! Evaluate command - one seeded train/test evaluation

use super::{emit, load_prepared};
use crate::classifier::{evaluate, EvalConfig};
use crate::config::ProjectConfig;
use crate::reporters::{self, MetricsSection, OutputFormat, Report};
use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::info;

/// Run the evaluate command
pub fn run(
    csv: &Path,
    config: &ProjectConfig,
    seed: u64,
    quiet: bool,
    show_confusion_matrix: bool,
    format: OutputFormat,
) -> Result<()> {
    let (_, prepared) = load_prepared(csv, config)?;
    let eval_config = EvalConfig::from(&config.classifier);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let evaluation = evaluate(&prepared.featuresets, &eval_config, &mut rng)?;
    info!(
        "Evaluated on {} test track(s), accuracy {:.4}",
        evaluation.test_size,
        evaluation.confusion.accuracy()
    );

    if quiet && !show_confusion_matrix {
        return Ok(());
    }

    let mut section = MetricsSection::new("Evaluation", evaluation.metrics)
        .with_sizes(evaluation.train_size, evaluation.test_size)
        .with_metrics_hidden(quiet);
    if show_confusion_matrix {
        section = section.with_confusion(evaluation.confusion);
    }

    let mut report = Report::new(seed);
    report.push(section);
    let rendered = reporters::report_with_format(&report, format)?;
    emit(&rendered, format);
    Ok(())
}
