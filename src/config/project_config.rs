//! Project-level configuration support
//!
//! Loads configuration from `lyriclass.toml` or `.lyriclassrc.json` in the
//! working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # lyriclass.toml
//!
//! [dataset]
//! id_column = "track_id"
//! lyrics_column = "lyrics"
//! label_column = "explicit"
//!
//! [normalizer]
//! extra_stop_words = ["yeah", "oh"]
//!
//! [classifier]
//! test_fraction = 0.25
//! alpha = 1.0
//!
//! [validation]
//! repetitions = 10
//! top_k = 100
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lyriclass.toml";

const JSON_CONFIG_FILE_NAME: &str = ".lyriclassrc.json";

/// Template written by `lyriclass init`
pub const CONFIG_TEMPLATE: &str = r#"# lyriclass configuration

[dataset]
# Column names in the input CSV
id_column = "id"
lyrics_column = "lyrics"
label_column = "explicit"

[normalizer]
# Words dropped in addition to the built-in English stop words
extra_stop_words = []

[classifier]
# Share of tracks held out for testing on each split
test_fraction = 0.25

# Additive smoothing for conditional probabilities (1.0 = Laplace)
alpha = 1.0

# Warn when a class has fewer training examples than this
min_class_examples = 5

[validation]
# Monte Carlo repetitions for `lyriclass validate`
repetitions = 10

# Features kept by `lyriclass select`
top_k = 100

# Fixed seed for reproducible splits (omit for a fresh seed per run)
# seed = 42
"#;

/// Full project configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Input table column names
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    pub id_column: String,
    pub lyrics_column: String,
    pub label_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            lyrics_column: "lyrics".to_string(),
            label_column: "explicit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub test_fraction: f64,
    pub alpha: f64,
    pub min_class_examples: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            alpha: 1.0,
            min_class_examples: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    pub repetitions: usize,
    pub top_k: usize,
    pub seed: Option<u64>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            repetitions: 10,
            top_k: 100,
            seed: None,
        }
    }
}

/// Load project configuration.
///
/// An explicit path must exist and parse. Without one, `lyriclass.toml` and
/// then `.lyriclassrc.json` are tried in `dir`; a broken file is reported and
/// skipped, and defaults are used when nothing loads.
pub fn load_project_config(dir: &Path, explicit: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    if let Some(path) = explicit {
        let config = load_config_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;
        debug!("Loaded project config from {}", path.display());
        return Ok(config);
    }

    for name in [CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    Ok(ProjectConfig::default())
}

fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}
