//! Defines the `Classifier` trait shared by single BOSS models
//! and BOSS ensembles.
use rayon::prelude::*;

use crate::{
    Dataset,
    Result,
    common::utils,
};


/// A trait that defines the behavor of a time series classifier.
/// You only need to implement `distribution` and `n_classes`.
pub trait Classifier: Sync {
    /// Returns the number of classes this classifier predicts over.
    fn n_classes(&self) -> usize;


    /// Computes the weight of each class for `series`.
    /// The `k`-th item is the weight on class `k`,
    /// and the weights sum up to `1`.
    fn distribution(&self, series: &[f64]) -> Result<Vec<f64>>;


    /// Predicts the class of `series`.
    /// Ties are broken by the smallest class index.
    fn classify(&self, series: &[f64]) -> Result<usize> {
        let dist = self.distribution(series)?;
        Ok(utils::argmax(&dist[..]))
    }


    /// Predicts the classes of all series in `dataset`.
    fn classify_all(&self, dataset: &Dataset) -> Result<Vec<usize>> {
        let n_series = dataset.shape().0;
        (0..n_series).into_par_iter()
            .map(|i| self.classify(&dataset[i]))
            .collect()
    }


    /// Fraction of the series in `dataset` classified correctly.
    fn accuracy(&self, dataset: &Dataset) -> Result<f64> {
        let predictions = self.classify_all(dataset)?
            .into_iter()
            .map(Some);
        Ok(utils::accuracy(predictions, dataset.labels()))
    }
}
