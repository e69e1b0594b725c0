//! Feature preprocessing: min-max normalization and discretization
//!
//! All transforms rewrite one column of the rows in place. Decision trees
//! split on raw equality, so continuous columns are normally normalized
//! and then binned before training.

use mltools_tree::{Row, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, TrainerError};

/// A column transform
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum Transform {
    /// Scale to `[0, 1]` by the observed min and max
    Normalize,
    /// Equal-width bins over `[0, 1]`
    EqualWidth { bins: usize },
    /// Bins holding roughly equal numbers of rows
    EqualFrequency { bins: usize },
}

/// A transform bound to a column
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureTransform {
    pub feature: usize,
    #[serde(flatten)]
    pub transform: Transform,
}

impl FeatureTransform {
    pub fn apply(&self, rows: &mut [Row]) -> Result<()> {
        match self.transform {
            Transform::Normalize => normalize(rows, self.feature).map(|_| ()),
            Transform::EqualWidth { bins } => equal_width_bins(rows, self.feature, bins),
            Transform::EqualFrequency { bins } => equal_frequency_bins(rows, self.feature, bins),
        }
    }
}

/// Apply transforms in order
pub fn apply_transforms(rows: &mut [Row], transforms: &[FeatureTransform]) -> Result<()> {
    for transform in transforms {
        debug!(feature = transform.feature, transform = ?transform.transform, "applying transform");
        transform.apply(rows)?;
    }
    Ok(())
}

fn numeric_value(row: &Row, row_idx: usize, feature: usize) -> Result<f64> {
    let value = row.get(feature).ok_or_else(|| {
        TrainerError::Preprocessing(format!("row {} has no column {}", row_idx, feature))
    })?;
    value.as_number().ok_or_else(|| {
        TrainerError::Preprocessing(format!(
            "row {}, column {}: expected a number, got {:?}",
            row_idx,
            feature,
            value.to_string()
        ))
    })
}

fn check_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        return Err(TrainerError::Preprocessing(
            "number of bins must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Min-max scale a numeric column to `[0, 1]`.
///
/// Returns the observed `(min, max)`. A constant column cannot be scaled
/// and is rejected.
pub fn normalize(rows: &mut [Row], feature: usize) -> Result<(f64, f64)> {
    let values = rows
        .iter()
        .enumerate()
        .map(|(i, row)| numeric_value(row, i, feature))
        .collect::<Result<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(TrainerError::Preprocessing("no rows to normalize".to_string()));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        return Err(TrainerError::Preprocessing(format!(
            "column {} cannot be normalized: min {} max {}",
            feature, min, max
        )));
    }

    for (row, value) in rows.iter_mut().zip(values) {
        row[feature] = Value::from((value - min) / range);
    }

    Ok((min, max))
}

/// Replace a `[0, 1]` column by its equal-width bin number: bin `x` holds
/// values with `x / bins <= v < (x + 1) / bins`. Values outside every
/// interval, including exactly 1.0, land in the last bin.
pub fn equal_width_bins(rows: &mut [Row], feature: usize, bins: usize) -> Result<()> {
    check_bins(bins)?;

    for (i, row) in rows.iter_mut().enumerate() {
        let value = numeric_value(row, i, feature)?;
        let bin = (0..bins)
            .find(|&x| {
                let lower = x as f64 / bins as f64;
                let upper = (x + 1) as f64 / bins as f64;
                lower <= value && value < upper
            })
            .unwrap_or(bins - 1);
        row[feature] = Value::from(bin);
    }

    Ok(())
}

/// Replace a column by equal-frequency bin numbers.
///
/// Rows are visited in ascending order of the column (stable, so equal
/// values keep their row order) and each bin receives up to
/// `len / bins` rows before the next bin starts.
pub fn equal_frequency_bins(rows: &mut [Row], feature: usize, bins: usize) -> Result<()> {
    check_bins(bins)?;

    if let Some(i) = rows.iter().position(|row| row.len() <= feature) {
        return Err(TrainerError::Preprocessing(format!(
            "row {} has no column {}",
            i, feature
        )));
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[a][feature].cmp(&rows[b][feature]));

    let bin_size = rows.len() as f64 / bins as f64;
    let mut count = 0usize;
    let mut bin = 0usize;
    for idx in order {
        if count as f64 >= bin_size {
            count = 0;
            bin += 1;
        }
        rows[idx][feature] = Value::from(bin);
        count += 1;
    }

    Ok(())
}
