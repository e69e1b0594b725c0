//! Validated labelled datasets
//!
//! Every row of a [`Dataset`] has the same width and the label index is
//! guaranteed to address a real column, so tree construction can index
//! rows directly.

use std::collections::BTreeSet;

use crate::errors::{Result, TreeError};
use crate::value::Row;

/// Labelled rows of uniform width
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
    label_index: usize,
    width: usize,
}

impl Dataset {
    /// Validate `rows` and wrap them with the given label column.
    ///
    /// Fails on an empty row set, on the first row whose width differs
    /// from row 0, and on a label index outside the row width.
    pub fn new(rows: Vec<Row>, label_index: usize) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(TreeError::EmptyDataset)?;

        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|&(_, len)| len != width)
        {
            return Err(TreeError::InconsistentRow {
                row,
                expected: width,
                found,
            });
        }

        if label_index >= width {
            return Err(TreeError::LabelIndexOutOfRange {
                index: label_index,
                width,
            });
        }

        Ok(Self {
            rows,
            label_index,
            width,
        })
    }

    /// Validate `rows` using the last column as the label.
    pub fn with_last_label(rows: Vec<Row>) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(TreeError::EmptyDataset)?;
        if width == 0 {
            return Err(TreeError::LabelIndexOutOfRange { index: 0, width });
        }
        Self::new(rows, width - 1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn label_index(&self) -> usize {
        self.label_index
    }

    /// Number of fields in every row
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column index except the label, ascending
    pub fn feature_indices(&self) -> BTreeSet<usize> {
        (0..self.width).filter(|&i| i != self.label_index).collect()
    }

    /// Check that `features` may be used as split candidates and collect
    /// them in ascending order. Duplicates collapse.
    pub fn candidate_features<I>(&self, features: I) -> Result<BTreeSet<usize>>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut candidates = BTreeSet::new();
        for index in features {
            if index >= self.width {
                return Err(TreeError::FeatureIndexOutOfRange {
                    index,
                    width: self.width,
                });
            }
            if index == self.label_index {
                return Err(TreeError::LabelUsedAsFeature(index));
            }
            candidates.insert(index);
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn row(values: &[i64]) -> Row {
        values.iter().map(|&v| Value::from(v)).collect()
    }

    #[test]
    fn rejects_empty_dataset() {
        assert_eq!(Dataset::new(Vec::new(), 0), Err(TreeError::EmptyDataset));
        assert_eq!(Dataset::with_last_label(Vec::new()), Err(TreeError::EmptyDataset));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![row(&[1, 2, 3]), row(&[4, 5, 6]), row(&[7, 8])];
        assert_eq!(
            Dataset::new(rows, 2),
            Err(TreeError::InconsistentRow {
                row: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_label_outside_rows() {
        let rows = vec![row(&[1, 2])];
        assert_eq!(
            Dataset::new(rows, 2),
            Err(TreeError::LabelIndexOutOfRange { index: 2, width: 2 })
        );
    }

    #[test]
    fn last_label_by_default() {
        let dataset = Dataset::with_last_label(vec![row(&[1, 2, 3])]).unwrap();
        assert_eq!(dataset.label_index(), 2);
        assert_eq!(dataset.width(), 3);
        assert_eq!(dataset.feature_indices(), BTreeSet::from([0, 1]));
    }

    #[test]
    fn candidate_features_are_checked() {
        let dataset = Dataset::new(vec![row(&[1, 2, 3])], 1).unwrap();

        assert_eq!(
            dataset.candidate_features([2, 0, 2]),
            Ok(BTreeSet::from([0, 2]))
        );
        assert_eq!(
            dataset.candidate_features([1]),
            Err(TreeError::LabelUsedAsFeature(1))
        );
        assert_eq!(
            dataset.candidate_features([0, 5]),
            Err(TreeError::FeatureIndexOutOfRange { index: 5, width: 3 })
        );
    }
}
