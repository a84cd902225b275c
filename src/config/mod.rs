//! Configuration module for lyriclass
//!
//! This module handles:
//! - Project-level configuration (lyriclass.toml)
//! - Input column mapping
//! - Classifier and validation defaults

mod project_config;

pub use project_config::{
    load_project_config, ClassifierConfig, DatasetConfig, NormalizerConfig, ProjectConfig,
    ValidationConfig, CONFIG_FILE_NAME, CONFIG_TEMPLATE,
};
