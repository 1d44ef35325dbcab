use polars::prelude::*;
use rayon::prelude::*;

use std::ops::Index;

use crate::{BossError, Result};


/// Struct `Dataset` holds a batch of equal-length time series
/// and one class label per series.
/// Class labels are class indices `0, 1, ..., K-1`.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(super) series: Vec<Vec<f64>>,
    pub(super) labels: Vec<usize>,
    pub(super) n_classes: usize,
    pub(super) length: usize,
}


impl Dataset {
    /// Construct a new `Dataset` from the series and their labels.
    /// Every series must have the same length,
    /// and every label must be smaller than the number of series.
    pub fn new(series: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self> {
        if series.len() != labels.len() {
            return Err(BossError::invalid_dataset(format!(
                "got {} series but {} labels",
                series.len(), labels.len(),
            )));
        }
        if series.is_empty() {
            return Err(BossError::invalid_dataset("the dataset has no series"));
        }

        let length = series[0].len();
        if let Some(i) = series.iter().position(|s| s.len() != length) {
            return Err(BossError::invalid_dataset(format!(
                "series {i} has length {}, expected {length}",
                series[i].len(),
            )));
        }

        let n_series = series.len();
        if let Some(i) = labels.iter().position(|&y| y >= n_series) {
            return Err(BossError::invalid_dataset(format!(
                "series {i}: class label {} is not smaller than \
                 the number of series {n_series}",
                labels[i],
            )));
        }
        let n_classes = labels.iter()
            .copied()
            .max()
            .map_or(0, |k| k + 1);

        Ok(Self { series, labels, n_classes, length })
    }


    /// Construct a `Dataset` from rows whose class value
    /// is stored at column `class_index`.
    /// The class value must be the last column of every row,
    /// and must be a non-negative integer.
    /// `NaN` is read as a missing label.
    pub fn from_rows(rows: Vec<Vec<f64>>, class_index: usize) -> Result<Self> {
        let mut series = Vec::with_capacity(rows.len());
        let mut labels = Vec::with_capacity(rows.len());

        for (i, mut row) in rows.into_iter().enumerate() {
            if row.is_empty() || class_index != row.len() - 1 {
                return Err(BossError::invalid_dataset(format!(
                    "row {i}: the class attribute is not the last attribute \
                     (class index {class_index}, row length {})",
                    row.len(),
                )));
            }
            let y = row.pop().unwrap_or(f64::NAN);
            labels.push(label_from_value(Some(y), i)?);
            series.push(row);
        }

        Self::new(series, labels)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Dataset`.
    /// Each row of `data` is a time series,
    /// each column of `data` is a time stamp.
    pub fn from_dataframe(data: &DataFrame, target: &Series) -> Result<Self> {
        let (n_series, length) = data.shape();
        if target.len() != n_series {
            return Err(BossError::invalid_dataset(format!(
                "got {n_series} rows but {} target values",
                target.len(),
            )));
        }

        let columns = data.get_columns()
            .par_iter()
            .map(|column| {
                let column = column.cast(&DataType::Float64)?;
                let values = column.f64()?
                    .into_iter()
                    .collect::<Option<Vec<f64>>>()
                    .ok_or_else(|| BossError::invalid_dataset(format!(
                        "column `{}` has missing values",
                        column.name(),
                    )))?;
                Ok(values)
            })
            .collect::<Result<Vec<_>>>()?;

        let series = (0..n_series).map(|row| {
                columns.iter()
                    .map(|column| column[row])
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        debug_assert!(series.iter().all(|s| s.len() == length));

        let target = target.cast(&DataType::Float64)?;
        let labels = target.f64()?
            .into_iter()
            .enumerate()
            .map(|(i, y)| label_from_value(y, i))
            .collect::<Result<Vec<_>>>()?;

        Self::new(series, labels)
    }


    /// Returns the pair of the number of series and the series length.
    pub fn shape(&self) -> (usize, usize) {
        (self.series.len(), self.length)
    }


    /// Returns the number of classes, `max(label) + 1`.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Returns the labels of all series.
    pub fn labels(&self) -> &[usize] {
        &self.labels[..]
    }


    /// Returns the `idx`-th series.
    pub fn series(&self, idx: usize) -> &[f64] {
        &self.series[idx][..]
    }


    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (&[f64], usize) {
        (&self.series[idx][..], self.labels[idx])
    }


    /// Iterate over all `(series, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], usize)> + '_ {
        self.series.iter()
            .zip(&self.labels)
            .map(|(s, y)| (&s[..], *y))
    }
}


impl Index<usize> for Dataset {
    type Output = [f64];
    fn index(&self, idx: usize) -> &Self::Output {
        &self.series[idx][..]
    }
}


/// Convert a raw class value into a class index.
fn label_from_value(y: Option<f64>, row: usize) -> Result<usize> {
    let y = match y {
        Some(y) if !y.is_nan() => y,
        _ => {
            return Err(BossError::invalid_dataset(format!(
                "row {row}: the class label is missing"
            )));
        },
    };

    if y < 0.0 || !y.is_finite() || y.trunc() != y {
        return Err(BossError::invalid_dataset(format!(
            "row {row}: class label {y} is not a non-negative integer"
        )));
    }
    Ok(y as usize)
}
