//! ID3 tree builder
//!
//! Top-down recursive partitioning. At every node the builder tries each
//! remaining candidate feature, partitions the rows by that feature's
//! distinct values and keeps the feature whose children have the lowest
//! weighted average entropy.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::entropy::{entropy_of_counts, label_counts, majority_of_counts};
use crate::errors::{Result, TreeError};
use crate::node::{LeafReason, Node, NodeKind};
use crate::tree::DecisionTree;
use crate::value::{Row, Value};

/// Depth at which nodes stop splitting unless configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Construction parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Nodes at this depth become majority-label leaves (root = 0)
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Everything a node needs before its kind is decided
struct NodeSeed {
    rows: Vec<Row>,
    candidate_features: BTreeSet<usize>,
    split_value: Option<Value>,
    depth: usize,
}

/// Scored partition of a node's rows by one feature
struct SplitCandidate<'a> {
    feature: usize,
    weighted_entropy: f64,
    bins: Vec<(&'a Value, Vec<&'a Row>)>,
}

/// Builds [`DecisionTree`]s from validated datasets
pub struct TreeBuilder {
    config: TreeConfig,
}

impl TreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Build a tree over `dataset`, splitting only on `candidate_features`.
    ///
    /// Candidates are validated against the dataset and visited in
    /// ascending index order; among equally good splits the lowest
    /// feature index wins.
    pub fn build<I>(&self, dataset: &Dataset, candidate_features: I) -> Result<DecisionTree>
    where
        I: IntoIterator<Item = usize>,
    {
        let candidate_features = dataset.candidate_features(candidate_features)?;

        let seed = NodeSeed {
            rows: dataset.rows().to_vec(),
            candidate_features,
            split_value: None,
            depth: 0,
        };
        let root = self.build_node(seed, dataset.label_index())?;

        let tree = DecisionTree::new(
            root,
            dataset.label_index(),
            dataset.width(),
            self.config.max_depth,
        );
        info!(
            rows = dataset.len(),
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built decision tree"
        );
        Ok(tree)
    }

    /// Decide the node's state (pure, exhausted, depth-capped or
    /// splittable) in that order and recurse into the children.
    fn build_node(&self, seed: NodeSeed, label_index: usize) -> Result<Node> {
        let counts = label_counts(&seed.rows, label_index);
        let entropy = entropy_of_counts(&counts);
        let majority = majority_of_counts(&counts)
            .cloned()
            .ok_or(TreeError::EmptyDataset)?;

        let leaf_reason = if counts.len() == 1 {
            Some(LeafReason::Pure)
        } else if seed.candidate_features.is_empty() {
            Some(LeafReason::Exhausted)
        } else if seed.depth >= self.config.max_depth {
            Some(LeafReason::DepthCapped)
        } else {
            None
        };

        let kind = match leaf_reason {
            Some(reason) => {
                debug!(
                    depth = seed.depth,
                    rows = seed.rows.len(),
                    label = %majority,
                    reason = reason.as_str(),
                    "leaf"
                );
                NodeKind::Leaf {
                    class_label: majority,
                    reason,
                }
            }
            None => match self.find_best_split(&seed, label_index) {
                Some(split) => {
                    debug!(
                        depth = seed.depth,
                        rows = seed.rows.len(),
                        feature = split.feature,
                        weighted_entropy = split.weighted_entropy,
                        children = split.bins.len(),
                        "split"
                    );
                    let mut child_candidates = seed.candidate_features.clone();
                    child_candidates.remove(&split.feature);

                    let children = split
                        .bins
                        .into_iter()
                        .map(|(value, rows)| {
                            let child = NodeSeed {
                                rows: rows.into_iter().cloned().collect(),
                                candidate_features: child_candidates.clone(),
                                split_value: Some(value.clone()),
                                depth: seed.depth + 1,
                            };
                            self.build_node(child, label_index)
                        })
                        .collect::<Result<Vec<_>>>()?;

                    NodeKind::Split {
                        feature: split.feature,
                        children,
                    }
                }
                None => NodeKind::Leaf {
                    class_label: majority,
                    reason: LeafReason::Exhausted,
                },
            },
        };

        Ok(Node {
            rows: seed.rows,
            candidate_features: seed.candidate_features,
            split_value: seed.split_value,
            entropy,
            depth: seed.depth,
            kind,
        })
    }

    /// Score every candidate feature and keep the one with the lowest
    /// weighted child entropy. Ties keep the earlier feature.
    fn find_best_split<'a>(
        &self,
        seed: &'a NodeSeed,
        label_index: usize,
    ) -> Option<SplitCandidate<'a>> {
        let total = seed.rows.len() as f64;
        let mut best: Option<SplitCandidate<'a>> = None;

        for &feature in &seed.candidate_features {
            let bins = partition(&seed.rows, feature);

            let weighted_entropy = bins
                .iter()
                .map(|(_, rows)| {
                    let counts = label_counts(rows.iter().copied(), label_index);
                    rows.len() as f64 / total * entropy_of_counts(&counts)
                })
                .sum::<f64>();

            debug!(feature, weighted_entropy, bins = bins.len(), "split candidate");

            if best
                .as_ref()
                .map_or(true, |current| weighted_entropy < current.weighted_entropy)
            {
                best = Some(SplitCandidate {
                    feature,
                    weighted_entropy,
                    bins,
                });
            }
        }

        best
    }
}

/// Group rows by their value at `feature`; bins appear in the order their
/// value is first seen. Every bin is non-empty.
fn partition(rows: &[Row], feature: usize) -> Vec<(&Value, Vec<&Row>)> {
    let mut positions: BTreeMap<&Value, usize> = BTreeMap::new();
    let mut bins: Vec<(&Value, Vec<&Row>)> = Vec::new();

    for row in rows {
        let Some(value) = row.get(feature) else {
            continue;
        };
        match positions.get(value) {
            Some(&pos) => bins[pos].1.push(row),
            None => {
                positions.insert(value, bins.len());
                bins.push((value, vec![row]));
            }
        }
    }

    bins
}

/// Build a tree with the given depth cutoff.
pub fn build<I>(dataset: &Dataset, candidate_features: I, max_depth: usize) -> Result<DecisionTree>
where
    I: IntoIterator<Item = usize>,
{
    TreeBuilder::new(TreeConfig { max_depth }).build(dataset, candidate_features)
}
