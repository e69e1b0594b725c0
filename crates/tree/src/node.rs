//! Decision tree nodes and prediction traversal

use std::collections::BTreeSet;

use crate::value::{Row, Value};

/// Why construction stopped at a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafReason {
    /// Every row carries the same label
    Pure,
    /// No candidate features were left on the path
    Exhausted,
    /// The node sits at the configured maximum depth
    DepthCapped,
}

impl LeafReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafReason::Pure => "pure",
            LeafReason::Exhausted => "exhausted",
            LeafReason::DepthCapped => "depth-capped",
        }
    }
}

/// Leaf or internal payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf {
        class_label: Value,
        reason: LeafReason,
    },
    /// Internal node; `children` holds one node per distinct value of
    /// `feature`, in first-occurrence order, and is never empty.
    Split { feature: usize, children: Vec<Node> },
}

/// A node of a built tree.
///
/// Each node owns a private copy of the rows routed to it. The tree is
/// immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) rows: Vec<Row>,
    pub(crate) candidate_features: BTreeSet<usize>,
    pub(crate) split_value: Option<Value>,
    pub(crate) entropy: f64,
    pub(crate) depth: usize,
    pub(crate) kind: NodeKind,
}

impl Node {
    /// Rows owned by this node
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Features still available for splitting at this node
    pub fn candidate_features(&self) -> &BTreeSet<usize> {
        &self.candidate_features
    }

    /// Value of the parent's splitting feature that routes rows here;
    /// `None` for the root.
    pub fn split_value(&self) -> Option<&Value> {
        self.split_value.as_ref()
    }

    /// Shannon entropy of the labels in [`Node::rows`]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Distance from the root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn class_label(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::Leaf { class_label, .. } => Some(class_label),
            NodeKind::Split { .. } => None,
        }
    }

    pub fn leaf_reason(&self) -> Option<LeafReason> {
        match &self.kind {
            NodeKind::Leaf { reason, .. } => Some(*reason),
            NodeKind::Split { .. } => None,
        }
    }

    pub fn splitting_feature(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Split { feature, .. } => Some(*feature),
        }
    }

    /// Children in first-occurrence order of their split value; empty for
    /// leaves.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Split { children, .. } => children,
        }
    }

    /// Classify `row` by walking from this node to a leaf.
    ///
    /// Returns `None` when the row carries a value for a splitting feature
    /// that no child was built for (or lacks the field entirely). There is
    /// no fallback to a majority label.
    pub fn predict(&self, row: &[Value]) -> Option<&Value> {
        let mut node = self;
        loop {
            match &node.kind {
                NodeKind::Leaf { class_label, .. } => return Some(class_label),
                NodeKind::Split { feature, children } => {
                    let value = row.get(*feature)?;
                    node = children
                        .iter()
                        .find(|child| child.split_value.as_ref() == Some(value))?;
                }
            }
        }
    }

    /// Pre-order iterator over this node and all its descendants
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }
}

/// Pre-order traversal returned by [`Node::iter`]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(split: i64, label: &str, depth: usize) -> Node {
        Node {
            rows: vec![vec![Value::from(split), Value::from(label)]],
            candidate_features: BTreeSet::new(),
            split_value: Some(Value::from(split)),
            entropy: 0.0,
            depth,
            kind: NodeKind::Leaf {
                class_label: Value::from(label),
                reason: LeafReason::Pure,
            },
        }
    }

    fn stump() -> Node {
        let left = leaf(0, "no", 1);
        let right = leaf(1, "yes", 1);
        Node {
            rows: [left.rows.clone(), right.rows.clone()].concat(),
            candidate_features: BTreeSet::from([0]),
            split_value: None,
            entropy: 1.0,
            depth: 0,
            kind: NodeKind::Split {
                feature: 0,
                children: vec![left, right],
            },
        }
    }

    #[test]
    fn predict_follows_matching_child() {
        let root = stump();
        assert_eq!(
            root.predict(&[Value::from(0), Value::from("?")]),
            Some(&Value::from("no"))
        );
        assert_eq!(
            root.predict(&[Value::from(1), Value::from("?")]),
            Some(&Value::from("yes"))
        );
    }

    #[test]
    fn predict_unknown_value_is_none() {
        let root = stump();
        assert_eq!(root.predict(&[Value::from(2), Value::from("?")]), None);
        assert_eq!(root.predict(&[Value::from("0")]), None);
        assert_eq!(root.predict(&[]), None);
    }

    #[test]
    fn accessors_on_split_and_leaf() {
        let root = stump();
        assert!(!root.is_leaf());
        assert_eq!(root.splitting_feature(), Some(0));
        assert_eq!(root.class_label(), None);
        assert_eq!(root.children().len(), 2);

        let child = &root.children()[0];
        assert!(child.is_leaf());
        assert_eq!(child.leaf_reason(), Some(LeafReason::Pure));
        assert_eq!(child.split_value(), Some(&Value::from(0)));
        assert!(child.children().is_empty());
    }

    #[test]
    fn iter_is_pre_order() {
        let root = stump();
        let depths: Vec<usize> = root.iter().map(Node::depth).collect();
        assert_eq!(depths, vec![0, 1, 1]);

        let labels: Vec<String> = root
            .iter()
            .filter_map(Node::class_label)
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["no", "yes"]);
    }
}
