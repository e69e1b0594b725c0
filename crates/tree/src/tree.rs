//! Built decision trees

use std::fmt::{self, Write};

use crate::errors::{Result, TreeError};
use crate::node::{Node, NodeKind};
use crate::value::Value;

/// A fully built, read-only decision tree
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root: Node,
    label_index: usize,
    width: usize,
    max_depth: usize,
}

impl DecisionTree {
    pub(crate) fn new(root: Node, label_index: usize, width: usize, max_depth: usize) -> Self {
        Self {
            root,
            label_index,
            width,
            max_depth,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    /// Width of the rows the tree was trained on
    pub fn width(&self) -> usize {
        self.width
    }

    /// Depth cutoff the tree was built with
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Classify a row of training width.
    ///
    /// `Ok(None)` means the row reached a node with no child for its
    /// value; a row of the wrong width is an error.
    pub fn predict(&self, row: &[Value]) -> Result<Option<&Value>> {
        if row.len() != self.width {
            return Err(TreeError::RowWidthMismatch {
                expected: self.width,
                found: row.len(),
            });
        }
        Ok(self.root.predict(row))
    }

    pub fn node_count(&self) -> usize {
        self.root.iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.iter().filter(|node| node.is_leaf()).count()
    }

    /// Depth of the deepest node actually built
    pub fn depth(&self) -> usize {
        self.root.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Indented text rendering. `names` labels feature columns by index;
    /// columns without a name print as `feature <i>`.
    pub fn render(&self, names: Option<&[String]>) -> String {
        self.display_with(names).to_string()
    }

    /// [`fmt::Display`] adapter printing feature columns by `names`
    pub fn display_with<'a>(&'a self, names: Option<&'a [String]>) -> TreeDisplay<'a> {
        TreeDisplay { tree: self, names }
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_node(f, &self.root, None, 0)
    }
}

/// Returned by [`DecisionTree::display_with`]
pub struct TreeDisplay<'a> {
    tree: &'a DecisionTree,
    names: Option<&'a [String]>,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_node(f, &self.tree.root, self.names, 0)
    }
}

fn feature_name(names: Option<&[String]>, index: usize) -> String {
    names
        .and_then(|names| names.get(index))
        .cloned()
        .unwrap_or_else(|| format!("feature {}", index))
}

fn render_node<W: Write>(
    out: &mut W,
    node: &Node,
    names: Option<&[String]>,
    indent: usize,
) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node.kind() {
        NodeKind::Leaf {
            class_label,
            reason,
        } => {
            writeln!(
                out,
                "{}-> {} ({}, {} rows)",
                pad,
                class_label,
                reason.as_str(),
                node.rows().len()
            )?;
        }
        NodeKind::Split { feature, children } => {
            let name = feature_name(names, *feature);
            writeln!(
                out,
                "{}split on {} (entropy {:.4}, {} rows)",
                pad,
                name,
                node.entropy(),
                node.rows().len()
            )?;
            for child in children {
                match child.split_value() {
                    Some(value) => writeln!(out, "{}  {} = {}", pad, name, value)?,
                    None => writeln!(out, "{}  {} = ?", pad, name)?,
                }
                render_node(out, child, names, indent + 2)?;
            }
        }
    }
    Ok(())
}
