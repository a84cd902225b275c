//! CLI command definitions and handlers

mod evaluate;
mod informative;
mod init;
mod select;
mod stats;
mod validate;

use crate::config::{load_project_config, ProjectConfig};
use crate::dataset::{load_tracks, Dataset};
use crate::pipeline::{normalizer_from_config, prepare, Prepared};
use crate::reporters::OutputFormat;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a count that must be at least 1
fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("value must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid number", s)),
    }
}

/// lyriclass - Naive Bayes explicit-lyrics classifier
#[derive(Parser, Debug)]
#[command(name = "lyriclass")]
#[command(
    version,
    about = "Predict explicit songs from their lyrics with a bag-of-words Naive Bayes model",
    long_about = "lyriclass normalizes lyrics (stop-word removal and stemming), builds \
bag-of-words featuresets, and trains and evaluates a Naive Bayes classifier on random \
train/test splits. It can rank the most informative features, retrain on the top K, \
and average metrics over repeated Monte Carlo splits.",
    after_help = "\
Examples:
  lyriclass init                                 Write a lyriclass.toml template
  lyriclass stats tracks.csv                     Row counts, class balance, vocabulary
  lyriclass evaluate tracks.csv --seed 42        One seeded train/test evaluation
  lyriclass informative tracks.csv --top 20      Most informative features
  lyriclass select tracks.csv --top-k 100        Evaluate, reduce to top 100, evaluate again
  lyriclass validate tracks.csv -n 10 -f json    Monte Carlo validation as JSON"
)]
pub struct Cli {
    /// Config file (default: lyriclass.toml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers for Monte Carlo repetitions (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    /// Seed for train/test splits (default: config value, else random)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a lyriclass.toml config file with default settings
    Init,

    /// Show row counts, class balance and vocabulary size of a track table
    Stats {
        /// Input CSV with id, lyrics and explicit columns
        csv: PathBuf,
    },

    /// Train on a random split and report test metrics
    Evaluate {
        /// Input CSV with id, lyrics and explicit columns
        csv: PathBuf,

        /// Do not print the metric table
        #[arg(long, short = 'q')]
        quiet: bool,

        /// Render the confusion matrix
        #[arg(long)]
        confusion_matrix: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Train on a random split and list the most informative features
    Informative {
        /// Input CSV with id, lyrics and explicit columns
        csv: PathBuf,

        /// Number of features to list
        #[arg(long, default_value = "20")]
        top: usize,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Evaluate, reduce to the top-K informative features, evaluate again
    Select {
        /// Input CSV with id, lyrics and explicit columns
        csv: PathBuf,

        /// Features to keep (default: validation.top_k from config)
        #[arg(long, short = 'k', value_parser = parse_positive)]
        top_k: Option<usize>,

        /// Render confusion matrices
        #[arg(long)]
        confusion_matrix: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Average metrics over repeated random splits (Monte Carlo cross-validation)
    Validate {
        /// Input CSV with id, lyrics and explicit columns
        csv: PathBuf,

        /// Number of repetitions (default: validation.repetitions from config)
        #[arg(long, short = 'n', value_parser = parse_positive)]
        repetitions: Option<usize>,

        /// Reduce to the top-K informative features first
        #[arg(long, short = 'k', value_parser = parse_positive)]
        top_k: Option<usize>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    // Init never reads a config
    let load_config = || load_project_config(&cwd, cli.config.as_deref());

    match cli.command {
        Commands::Init => init::run(&cwd),
        Commands::Stats { csv } => stats::run(&csv, &load_config()?),
        Commands::Evaluate {
            csv,
            quiet,
            confusion_matrix,
            format,
        } => {
            let config = load_config()?;
            let seed = resolve_seed(cli.seed, &config);
            evaluate::run(&csv, &config, seed, quiet, confusion_matrix, format.parse()?)
        }
        Commands::Informative { csv, top, format } => {
            let config = load_config()?;
            let seed = resolve_seed(cli.seed, &config);
            informative::run(&csv, &config, seed, top, format.parse()?)
        }
        Commands::Select {
            csv,
            top_k,
            confusion_matrix,
            format,
        } => {
            let config = load_config()?;
            let seed = resolve_seed(cli.seed, &config);
            let top_k = top_k.unwrap_or(config.validation.top_k);
            select::run(&csv, &config, seed, top_k, confusion_matrix, format.parse()?)
        }
        Commands::Validate {
            csv,
            repetitions,
            top_k,
            format,
        } => {
            let config = load_config()?;
            let options = validate::ValidateOptions {
                seed: resolve_seed(cli.seed, &config),
                repetitions: repetitions.unwrap_or(config.validation.repetitions),
                top_k,
                workers: cli.workers,
                format: format.parse()?,
            };
            validate::run(&csv, &config, &options)
        }
    }
}

/// Seed from the flag, else from config, else fresh
fn resolve_seed(flag: Option<u64>, config: &ProjectConfig) -> u64 {
    let seed = flag
        .or(config.validation.seed)
        .unwrap_or_else(rand::random::<u64>);
    info!("Using seed {}", seed);
    seed
}

/// Load the track table and build featuresets
fn load_prepared(csv: &Path, config: &ProjectConfig) -> Result<(Dataset, Prepared)> {
    let dataset = load_tracks(csv, &config.dataset)?;
    let normalizer = normalizer_from_config(&config.normalizer);
    let prepared = prepare(&dataset.tracks, &normalizer)
        .with_context(|| format!("Failed to build featuresets from {}", csv.display()))?;
    Ok((dataset, prepared))
}

/// Print rendered output, making sure it ends with a newline
fn emit(rendered: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", rendered),
        OutputFormat::Text => print!("{}", rendered),
    }
}
