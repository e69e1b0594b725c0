//! Training pipeline
//!
//! Validates the loaded rows, applies preprocessing, shuffles and splits
//! them, builds the tree on the training part and evaluates it on both
//! parts.

use mltools_tree::{Dataset, DecisionTree, TreeBuilder};
use serde::Serialize;
use tracing::info;

use crate::config::TrainerConfig;
use crate::dataset::{shuffle_rows, train_test_split, LoadedCsv};
use crate::errors::{Result, TrainerError};
use crate::evaluation::{evaluate, Evaluation};
use crate::preprocessing::apply_transforms;

/// Everything a training run produces
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub tree: DecisionTree,
    pub headers: Option<Vec<String>>,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Predictions on the rows the tree was built from
    pub train_evaluation: Evaluation,
    /// Predictions on the held-out rows
    pub test_evaluation: Evaluation,
}

impl TrainingOutcome {
    pub fn report(&self) -> TrainingReport {
        TrainingReport {
            version: crate::VERSION.to_string(),
            train_rows: self.train_rows,
            test_rows: self.test_rows,
            label_index: self.tree.label_index(),
            max_depth: self.tree.max_depth(),
            depth: self.tree.depth(),
            node_count: self.tree.node_count(),
            leaf_count: self.tree.leaf_count(),
            train: EvaluationReport::from(self.train_evaluation),
            test: EvaluationReport::from(self.test_evaluation),
        }
    }
}

/// JSON summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub version: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub label_index: usize,
    pub max_depth: usize,
    pub depth: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub train: EvaluationReport,
    pub test: EvaluationReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    #[serde(flatten)]
    pub counts: Evaluation,
    pub accuracy: f64,
    pub coverage: f64,
}

impl From<Evaluation> for EvaluationReport {
    fn from(counts: Evaluation) -> Self {
        Self {
            counts,
            accuracy: counts.accuracy(),
            coverage: counts.coverage(),
        }
    }
}

/// Decision-tree trainer
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the full pipeline over loaded CSV data
    pub fn run(&self, data: LoadedCsv) -> Result<TrainingOutcome> {
        let LoadedCsv { headers, rows } = data;

        let width = rows.first().map_or(0, Vec::len);
        if width < 2 {
            return Err(TrainerError::Dataset(format!(
                "rows need at least one feature and a label, got {} column(s)",
                width
            )));
        }
        let label_index = self.config.data.label_column.unwrap_or(width - 1);

        // shape check before any column is touched
        let dataset = Dataset::new(rows, label_index)?;
        let candidates: Vec<usize> = match &self.config.data.features {
            Some(features) => features.clone(),
            None => dataset.feature_indices().into_iter().collect(),
        };
        dataset.candidate_features(candidates.iter().copied())?;
        let mut rows = dataset.into_rows();

        apply_transforms(&mut rows, &self.config.preprocessing)?;

        if self.config.split.shuffle {
            info!("Shuffling dataset with seed: {}", self.config.split.seed);
            shuffle_rows(&mut rows, self.config.split.seed);
        }

        let (train, test) = train_test_split(rows, self.config.split.test_fraction)?;
        info!("Split dataset: {} training rows, {} test rows", train.len(), test.len());

        let train = Dataset::new(train, label_index)?;
        let tree = TreeBuilder::new(self.config.tree_config()).build(&train, candidates)?;

        let train_evaluation = evaluate(&tree, train.rows())?;
        let test_evaluation = evaluate(&tree, &test)?;

        info!(
            "Training accuracy: {:.4} ({} / {})",
            train_evaluation.accuracy(),
            train_evaluation.correct,
            train_evaluation.total()
        );
        info!(
            "Test accuracy: {:.4} ({} correct, {} incorrect, {} unknown)",
            test_evaluation.accuracy(),
            test_evaluation.correct,
            test_evaluation.incorrect,
            test_evaluation.unknown
        );

        Ok(TrainingOutcome {
            tree,
            headers,
            train_rows: train.len(),
            test_rows: test.len(),
            train_evaluation,
            test_evaluation,
        })
    }
}
