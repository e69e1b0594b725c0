//! Label statistics: counts, Shannon entropy and majority vote.
//!
//! Labels are always tallied in the order they first appear in the rows,
//! which fixes both the floating-point summation order of the entropy and
//! the majority tie-break.

use std::collections::BTreeMap;

use crate::value::{Row, Value};

/// Count each distinct label, in first-occurrence order.
///
/// Accepts owned row slices as well as borrowed partitions. Rows too short
/// to hold a label are skipped.
pub fn label_counts<'a, I>(rows: I, label_index: usize) -> Vec<(&'a Value, usize)>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut positions: BTreeMap<&Value, usize> = BTreeMap::new();
    let mut counts: Vec<(&Value, usize)> = Vec::new();

    for label in rows.into_iter().filter_map(|row| row.get(label_index)) {
        match positions.get(label) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts
}

/// Shannon entropy of the label distribution:
///
/// `H = -Σ p(v) log2 p(v)`
///
/// Returns 0 for an empty slice and for a single label.
pub fn entropy(rows: &[Row], label_index: usize) -> f64 {
    entropy_of_counts(&label_counts(rows, label_index))
}

pub(crate) fn entropy_of_counts(counts: &[(&Value, usize)]) -> f64 {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .fold(0.0, |acc, (_, count)| {
            let p = *count as f64 / total as f64;
            acc - p * p.log2()
        })
}

/// Most frequent label. Among equally frequent labels the one seen first
/// in row order wins.
pub fn majority_label(rows: &[Row], label_index: usize) -> Option<&Value> {
    majority_of_counts(&label_counts(rows, label_index))
}

pub(crate) fn majority_of_counts<'a>(counts: &[(&'a Value, usize)]) -> Option<&'a Value> {
    let mut best: Option<(&Value, usize)> = None;
    for &(label, count) in counts {
        // strict: earlier labels keep ties
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}
