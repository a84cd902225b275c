//! Output reporters for evaluation results
//!
//! Supports two output formats:
//! - `text` - Aligned terminal tables
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::classifier::{ConfusionMatrix, InformativeFeature, Metrics, MetricsSpread};
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One titled metrics record with optional extras
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSection {
    pub title: String,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confusion: Option<ConfusionMatrix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<MetricsSpread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_size: Option<usize>,
    /// Text output omits the metric table (JSON always carries it)
    #[serde(skip)]
    pub hide_metrics: bool,
}

impl MetricsSection {
    pub fn new(title: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            title: title.into(),
            metrics,
            confusion: None,
            spread: None,
            train_size: None,
            test_size: None,
            hide_metrics: false,
        }
    }

    pub fn with_confusion(mut self, confusion: ConfusionMatrix) -> Self {
        self.confusion = Some(confusion);
        self
    }

    pub fn with_spread(mut self, spread: Option<MetricsSpread>) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_metrics_hidden(mut self, hidden: bool) -> Self {
        self.hide_metrics = hidden;
        self
    }

    pub fn with_sizes(mut self, train: usize, test: usize) -> Self {
        self.train_size = Some(train);
        self.test_size = Some(test);
        self
    }
}

/// Everything a command prints
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<MetricsSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub informative: Vec<InformativeFeature>,
}

impl Report {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            repetitions: None,
            sections: Vec::new(),
            informative: Vec::new(),
        }
    }

    pub fn push(&mut self, section: MetricsSection) {
        self.sections.push(section);
    }
}

/// Render a report in the given format
pub fn report_with_format(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}
