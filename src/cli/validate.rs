//! Validate command - Monte Carlo cross-validation

use super::{emit, load_prepared};
use crate::classifier::{
    evaluate, most_informative_features, select_informative, EvalConfig, MonteCarloValidator,
};
use crate::config::ProjectConfig;
use crate::reporters::{self, MetricsSection, OutputFormat, Report};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::num::NonZeroUsize;
use std::path::Path;

pub struct ValidateOptions {
    pub seed: u64,
    pub repetitions: usize,
    pub top_k: Option<usize>,
    pub workers: usize,
    pub format: OutputFormat,
}

/// Create bar progress style
fn create_bar_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("█▓▒░  "))
}

/// Run the validate command
pub fn run(csv: &Path, config: &ProjectConfig, options: &ValidateOptions) -> Result<()> {
    let repetitions = NonZeroUsize::new(options.repetitions)
        .context("Repetitions must be at least 1")?;
    let (_, prepared) = load_prepared(csv, config)?;
    let eval_config = EvalConfig::from(&config.classifier);

    let featuresets = match options.top_k {
        Some(k) => {
            let ranked = evaluate(
                &prepared.featuresets,
                &eval_config,
                &mut ChaCha8Rng::seed_from_u64(options.seed),
            )?;
            let ranking = most_informative_features(ranked.classifier.table(), &prepared.vocabulary, k);
            select_informative(&prepared.featuresets, &ranking)
        }
        None => prepared.featuresets,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()?;

    let bar = ProgressBar::new(repetitions.get() as u64);
    bar.set_style(create_bar_style()?);
    bar.set_message("repetitions");

    let validator = MonteCarloValidator::new(repetitions, eval_config);
    let result = pool.install(|| {
        validator.run_with_progress(&featuresets, options.seed, &|| bar.inc(1))
    });
    bar.finish_and_clear();
    let mc = result?;

    let title = match options.top_k {
        Some(k) => format!("Mean over {} repetitions (top {} features)", mc.repetitions, k),
        None => format!("Mean over {} repetitions", mc.repetitions),
    };
    let mut report = Report::new(mc.seed);
    report.repetitions = Some(mc.repetitions);
    report.push(MetricsSection::new(title, mc.mean).with_spread(mc.spread()));

    let rendered = reporters::report_with_format(&report, options.format)?;
    emit(&rendered, options.format);
    Ok(())
}
