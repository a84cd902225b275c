//! Evaluation metrics
//!
//! Per-class precision, recall, F-score and support, always reported over
//! both classes in `Label::ALL` order. A class missing from the test split
//! gets zeros rather than disappearing, so records from different splits
//! can be accumulated element-wise.

use crate::models::Label;
use serde::Serialize;

/// 2×2 confusion matrix, rows = true label, columns = predicted label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[Label], predicted: &[Label]) -> Self {
        debug_assert_eq!(truth.len(), predicted.len());
        let mut counts = [[0usize; 2]; 2];
        for (t, p) in truth.iter().zip(predicted) {
            counts[t.index()][p.index()] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, truth: Label, predicted: Label) -> usize {
        self.counts[truth.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Examples whose true label is `label`
    pub fn support(&self, label: Label) -> usize {
        self.counts[label.index()].iter().sum()
    }

    /// Examples predicted as `label`
    pub fn predicted(&self, label: Label) -> usize {
        self.counts.iter().map(|row| row[label.index()]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = Label::ALL.iter().map(|l| self.get(*l, *l)).sum();
        correct as f64 / total as f64
    }
}

/// Per-class metric arrays, in `Label::ALL` order.
///
/// Support is a count for a single evaluation; it becomes fractional once
/// records are averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: [f64; 2],
    pub recall: [f64; 2],
    pub fscore: [f64; 2],
    pub support: [f64; 2],
}

impl Metrics {
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let mut metrics = Metrics::default();
        for label in Label::ALL {
            let i = label.index();
            let tp = matrix.get(label, label) as f64;
            let predicted = matrix.predicted(label) as f64;
            let actual = matrix.support(label) as f64;

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, actual);
            metrics.precision[i] = precision;
            metrics.recall[i] = recall;
            metrics.fscore[i] = ratio(2.0 * precision * recall, precision + recall);
            metrics.support[i] = actual;
        }
        metrics
    }

    pub fn from_predictions(truth: &[Label], predicted: &[Label]) -> Self {
        Self::from_confusion(&ConfusionMatrix::from_predictions(truth, predicted))
    }

    /// The four arrays with their display names
    pub fn named_arrays(&self) -> [(&'static str, [f64; 2]); 4] {
        [
            ("precision", self.precision),
            ("recall", self.recall),
            ("fscore", self.fscore),
            ("support", self.support),
        ]
    }

    pub fn total_support(&self) -> f64 {
        self.support.iter().sum()
    }

    /// Element-wise add `other` into `self`
    pub fn accumulate(&mut self, other: &Metrics) {
        for i in 0..2 {
            self.precision[i] += other.precision[i];
            self.recall[i] += other.recall[i];
            self.fscore[i] += other.fscore[i];
            self.support[i] += other.support[i];
        }
    }

    /// Element-wise map over all four arrays
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Metrics {
        Metrics {
            precision: self.precision.map(&f),
            recall: self.recall.map(&f),
            fscore: self.fscore.map(&f),
            support: self.support.map(&f),
        }
    }

    /// Element-wise combination of two records
    pub fn zip_with(&self, other: &Metrics, f: impl Fn(f64, f64) -> f64) -> Metrics {
        let pair = |a: [f64; 2], b: [f64; 2]| [f(a[0], b[0]), f(a[1], b[1])];
        Metrics {
            precision: pair(self.precision, other.precision),
            recall: pair(self.recall, other.recall),
            fscore: pair(self.fscore, other.fscore),
            support: pair(self.support, other.support),
        }
    }

    /// Element-wise mean, accumulated in slice order. `None` for no records.
    pub fn mean(records: &[Metrics]) -> Option<Metrics> {
        if records.is_empty() {
            return None;
        }
        let mut sum = Metrics::default();
        for record in records {
            sum.accumulate(record);
        }
        let n = records.len() as f64;
        Some(sum.map(|v| v / n))
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Element-wise spread of a set of metric records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSpread {
    pub min: Metrics,
    pub max: Metrics,
    /// Population standard deviation
    pub std_dev: Metrics,
}

impl MetricsSpread {
    pub fn from_records(records: &[Metrics]) -> Option<Self> {
        let mean = Metrics::mean(records)?;
        let first = records[0];
        let mut min = first;
        let mut max = first;
        let mut squares = Metrics::default();
        for record in records {
            min = min.zip_with(record, f64::min);
            max = max.zip_with(record, f64::max);
            squares.accumulate(&record.zip_with(&mean, |v, m| (v - m) * (v - m)));
        }
        let n = records.len() as f64;
        let std_dev = squares.map(|v| (v / n).sqrt());
        Some(Self { min, max, std_dev })
    }
}
