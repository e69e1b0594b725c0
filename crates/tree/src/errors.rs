//! Error types for decision-tree construction and prediction

use thiserror::Error;

/// Errors raised while validating a dataset, building a tree or
/// classifying a row.
///
/// An unseen feature value during prediction is not an error; it is
/// reported as `None` by the prediction functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No rows were supplied
    #[error("dataset contains no rows")]
    EmptyDataset,

    /// A row does not have the same number of fields as the first row
    #[error("row {row} has {found} fields, expected {expected}")]
    InconsistentRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The label column does not exist in the rows
    #[error("label index {index} is out of range for rows of width {width}")]
    LabelIndexOutOfRange { index: usize, width: usize },

    /// A candidate feature does not exist in the rows
    #[error("feature index {index} is out of range for rows of width {width}")]
    FeatureIndexOutOfRange { index: usize, width: usize },

    /// The label column was offered as a splitting feature
    #[error("feature index {0} is the label column and cannot be split on")]
    LabelUsedAsFeature(usize),

    /// A row handed to a built tree has the wrong shape
    #[error("row has {found} fields but the tree was trained on rows of width {expected}")]
    RowWidthMismatch { expected: usize, found: usize },
}

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;
