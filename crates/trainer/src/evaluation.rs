//! Held-out evaluation of a built tree

use mltools_tree::{DecisionTree, Row};
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;

/// Prediction outcomes over a set of rows.
///
/// Rows the tree cannot route (unseen feature values) are counted as
/// `unknown`, never as right or wrong.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub correct: usize,
    pub incorrect: usize,
    pub unknown: usize,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.unknown
    }

    /// Fraction of all rows predicted correctly; 0 when there are no rows
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.correct as f64 / total as f64,
        }
    }

    /// Fraction of rows that received any prediction
    pub fn coverage(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => (self.correct + self.incorrect) as f64 / total as f64,
        }
    }
}

/// Classify every row and compare with its label column
pub fn evaluate(tree: &DecisionTree, rows: &[Row]) -> Result<Evaluation> {
    let mut evaluation = Evaluation::default();

    for (i, row) in rows.iter().enumerate() {
        match tree.predict(row)? {
            None => {
                debug!(row = i, "no prediction for row");
                evaluation.unknown += 1;
            }
            Some(label) if *label == row[tree.label_index()] => evaluation.correct += 1,
            Some(_) => evaluation.incorrect += 1,
        }
    }

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mltools_tree::{build, Dataset, Value};

    fn row(feature: i64, label: &str) -> Row {
        vec![Value::from(feature), Value::from(label)]
    }

    #[test]
    fn counts_each_outcome() {
        let dataset = Dataset::new(vec![row(0, "no"), row(1, "yes")], 1).unwrap();
        let tree = build(&dataset, [0], 3).unwrap();

        let held_out = vec![row(0, "no"), row(1, "no"), row(2, "yes"), row(1, "yes")];
        let evaluation = evaluate(&tree, &held_out).unwrap();

        assert_eq!(
            evaluation,
            Evaluation {
                correct: 2,
                incorrect: 1,
                unknown: 1
            }
        );
        assert_eq!(evaluation.total(), 4);
        assert_eq!(evaluation.accuracy(), 0.5);
        assert_eq!(evaluation.coverage(), 0.75);
    }

    #[test]
    fn empty_evaluation() {
        let evaluation = Evaluation::default();
        assert_eq!(evaluation.accuracy(), 0.0);
        assert_eq!(evaluation.coverage(), 0.0);
    }

    #[test]
    fn malformed_rows_are_errors() {
        let dataset = Dataset::new(vec![row(0, "no"), row(1, "yes")], 1).unwrap();
        let tree = build(&dataset, [0], 3).unwrap();
        assert!(evaluate(&tree, &[vec![Value::from(0)]]).is_err());
    }
}
