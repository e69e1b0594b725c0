//! ID3 decision trees over tabular rows
//!
//! Builds a classification tree top-down by repeatedly splitting on the
//! candidate feature whose children have the lowest weighted Shannon
//! entropy, then classifies rows by walking the tree.
//!
//! Modules:
//! - `value`: field values and rows
//! - `dataset`: shape-validated labelled datasets
//! - `entropy`: label counts, entropy, majority vote
//! - `node`: tree nodes and prediction traversal
//! - `builder`: recursive construction and split search
//! - `tree`: the built tree, statistics and rendering
//!
//! Construction is deterministic: candidate features are tried in
//! ascending index order (lowest index wins a tie) and majority votes go
//! to the label seen first among the most frequent ones.

pub mod builder;
pub mod dataset;
pub mod entropy;
pub mod errors;
pub mod node;
pub mod tree;
pub mod value;

pub use builder::{build, TreeBuilder, TreeConfig, DEFAULT_MAX_DEPTH};
pub use dataset::Dataset;
pub use entropy::{entropy, label_counts, majority_label};
pub use errors::{Result, TreeError};
pub use node::{LeafReason, Node, NodeKind};
pub use tree::{DecisionTree, TreeDisplay};
pub use value::{Row, Value};

/// Classify `row` starting at `root`.
///
/// `None` when the row carries a value at some splitting feature that was
/// never seen during training.
pub fn predict<'a>(root: &'a Node, row: &[Value]) -> Option<&'a Value> {
    root.predict(row)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
