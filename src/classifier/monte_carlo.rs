//! Monte Carlo cross-validation
//!
//! Repeats a random train/test evaluation N times and averages the metric
//! records element-wise. Repetition `i` draws from its own ChaCha stream of
//! the run seed, so results do not depend on scheduling and repetition 0
//! reproduces a direct evaluation seeded with `ChaCha8Rng::seed_from_u64`.

use super::evaluate::{evaluate, EvalConfig};
use super::featureset::Featureset;
use super::metrics::{Metrics, MetricsSpread};
use super::ClassifierResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::num::NonZeroUsize;
use tracing::{debug, info};

/// Random source for repetition `index` of a run seeded with `seed`
pub fn repetition_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Averaged result of a Monte Carlo run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloReport {
    pub seed: u64,
    pub repetitions: usize,
    /// Element-wise mean over `runs`
    pub mean: Metrics,
    /// One record per repetition, in repetition order
    pub runs: Vec<Metrics>,
}

impl MonteCarloReport {
    pub fn spread(&self) -> Option<MetricsSpread> {
        MetricsSpread::from_records(&self.runs)
    }
}

#[derive(Debug, Clone)]
pub struct MonteCarloValidator {
    repetitions: NonZeroUsize,
    config: EvalConfig,
    parallel: bool,
}

impl MonteCarloValidator {
    pub fn new(repetitions: NonZeroUsize, config: EvalConfig) -> Self {
        Self {
            repetitions,
            config,
            parallel: true,
        }
    }

    /// Run repetitions on the rayon pool (default) or sequentially
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn repetitions(&self) -> NonZeroUsize {
        self.repetitions
    }

    pub fn run(&self, featuresets: &[Featureset], seed: u64) -> ClassifierResult<MonteCarloReport> {
        self.run_with_progress(featuresets, seed, &|| {})
    }

    /// Like [`run`](Self::run), calling `on_repetition` after each
    /// repetition finishes (from whichever thread ran it).
    pub fn run_with_progress(
        &self,
        featuresets: &[Featureset],
        seed: u64,
        on_repetition: &(dyn Fn() + Sync),
    ) -> ClassifierResult<MonteCarloReport> {
        let n = self.repetitions.get();
        info!(
            "Running {} Monte Carlo repetition(s) over {} featuresets (seed {})",
            n,
            featuresets.len(),
            seed
        );

        let repetition = |index: usize| -> ClassifierResult<Metrics> {
            let mut rng = repetition_rng(seed, index);
            let evaluation = evaluate(featuresets, &self.config, &mut rng)?;
            debug!(
                repetition = index,
                fscore_explicit = evaluation.metrics.fscore[1],
                "Repetition finished"
            );
            on_repetition();
            Ok(evaluation.metrics)
        };

        let runs: Vec<Metrics> = if self.parallel {
            (0..n)
                .into_par_iter()
                .map(repetition)
                .collect::<ClassifierResult<Vec<_>>>()?
        } else {
            (0..n).map(repetition).collect::<ClassifierResult<Vec<_>>>()?
        };

        let mut sum = Metrics::default();
        for record in &runs {
            sum.accumulate(record);
        }
        let mean = sum.map(|v| v / n as f64);

        Ok(MonteCarloReport {
            seed,
            repetitions: n,
            mean,
            runs,
        })
    }
}
