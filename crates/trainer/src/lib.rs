//! mltools trainer - data handling and evaluation around the ID3 tree
//!
//! Loads CSV data, applies normalization and discretization, splits rows
//! deterministically into training and held-out sets, builds a decision
//! tree and reports how well it classifies both sets.

pub mod config;
pub mod dataset;
pub mod deterministic;
pub mod errors;
pub mod evaluation;
pub mod preprocessing;
pub mod trainer;

use std::path::Path;

pub use config::{DataConfig, SplitConfig, TrainerConfig, TreeSection};
pub use dataset::{
    load_csv, parse_csv_reader, shuffle_rows, train_test_split, CsvOptions, LoadedCsv,
};
pub use deterministic::LcgRng;
pub use errors::TrainerError;
pub use evaluation::{evaluate, Evaluation};
pub use preprocessing::{
    apply_transforms, equal_frequency_bins, equal_width_bins, normalize, FeatureTransform,
    Transform,
};
pub use trainer::{EvaluationReport, Trainer, TrainingOutcome, TrainingReport};

/// Train a tree directly from a CSV file using the provided configuration.
pub fn train_from_csv(
    path: &Path,
    config: TrainerConfig,
) -> Result<TrainingOutcome, TrainerError> {
    let data = load_csv(path, &config.csv_options())?;
    Trainer::new(config).run(data)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
