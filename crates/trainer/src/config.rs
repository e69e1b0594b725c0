//! Trainer configuration
//!
//! Loaded from TOML; every section and field is optional and falls back
//! to its default. Command-line flags override individual fields after
//! loading.
//!
//! ```toml
//! [data]
//! has_headers = true
//! label_column = 4
//!
//! [[preprocessing]]
//! feature = 0
//! transform = "normalize"
//!
//! [[preprocessing]]
//! feature = 0
//! transform = "equal_width"
//! bins = 4
//!
//! [tree]
//! max_depth = 3
//!
//! [split]
//! test_fraction = 0.25
//! seed = 42
//! shuffle = true
//! ```

use mltools_tree::{TreeConfig, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::dataset::CsvOptions;
use crate::errors::{Result, TrainerError};
use crate::preprocessing::{FeatureTransform, Transform};

/// Complete trainer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub data: DataConfig,
    pub preprocessing: Vec<FeatureTransform>,
    pub tree: TreeSection,
    pub split: SplitConfig,
}

/// Input layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// First CSV record holds column names
    pub has_headers: bool,
    /// Label column; the last column when unset
    pub label_column: Option<usize>,
    /// Candidate split features; every non-label column when unset
    pub features: Option<Vec<usize>>,
}

/// Tree construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSection {
    pub max_depth: usize,
}

/// Train/test partitioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of rows held out for evaluation, in `[0, 1)`
    pub test_fraction: f64,
    pub seed: u64,
    /// Shuffle before splitting
    pub shuffle: bool,
}

impl Default for TreeSection {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            seed: 42,
            shuffle: true,
        }
    }
}

impl TrainerConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.split.test_fraction) {
            return Err(TrainerError::Config(format!(
                "split.test_fraction must be in [0, 1), got {}",
                self.split.test_fraction
            )));
        }

        for step in &self.preprocessing {
            match step.transform {
                Transform::EqualWidth { bins } | Transform::EqualFrequency { bins } if bins == 0 => {
                    return Err(TrainerError::Config(format!(
                        "preprocessing of column {}: bins must be at least 1",
                        step.feature
                    )));
                }
                _ => {}
            }
        }

        if let (Some(label), Some(features)) = (self.data.label_column, &self.data.features) {
            if features.contains(&label) {
                return Err(TrainerError::Config(format!(
                    "data.features includes the label column {}",
                    label
                )));
            }
        }

        Ok(())
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            has_headers: self.data.has_headers,
            ..CsvOptions::default()
        }
    }

    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            max_depth: self.tree.max_depth,
        }
    }
}
