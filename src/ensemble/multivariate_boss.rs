//! Provides [`MultivariateBoss`], one BOSS ensemble per channel.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    BossEnsemble,
    BossError,
    Learner,
    MultivariateDataset,
    Result,
    common::utils,
};
use super::multivariate_search::MultivariateSearch;


/// A BOSS classifier over multi-channel series.
///
/// Channel `c` of a query is classified by the `c`-th ensemble.
/// Each channel turns its votes into class fractions,
/// and the fractions are averaged over the channels,
/// so that every channel weighs the same
/// regardless of its number of members.
/// A channel without any vote is left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultivariateBoss {
    channels: Vec<BossEnsemble>,
    n_classes: usize,
    labels: Vec<usize>,
    train_predictions: Vec<usize>,
    train_accuracy: f64,
}


impl MultivariateBoss {
    /// Train one ensemble per channel with the default search.
    pub fn fit(dataset: &MultivariateDataset) -> Result<Self> {
        MultivariateSearch::init(dataset).run()
    }


    pub(crate) fn from_channels(
        channels: Vec<BossEnsemble>,
        n_classes: usize,
        labels: Vec<usize>,
    ) -> Self
    {
        let mut boss = Self {
            channels,
            n_classes,
            labels,
            train_predictions: Vec::new(),
            train_accuracy: 0.0,
        };
        boss.recompute_train_accuracy();
        boss
    }


    /// Recompute the LOOCV predictions on the training set
    /// and return the accuracy.
    pub fn recompute_train_accuracy(&mut self) -> f64 {
        let n_series = self.labels.len();
        let votes = self.channels.iter()
            .map(|ensemble| ensemble.loocv_votes())
            .collect::<Vec<_>>();

        self.train_predictions = (0..n_series).map(|i| {
                let dist = self.combine(votes.iter().map(|v| &v[i][..]));
                utils::argmax(&dist)
            })
            .collect();

        let predictions = self.train_predictions.iter().copied().map(Some);
        self.train_accuracy = utils::accuracy(predictions, &self.labels);
        self.train_accuracy
    }


    /// Returns the LOOCV accuracy on the training set,
    /// computed at the end of the search.
    pub fn train_accuracy_estimate(&self) -> f64 {
        self.train_accuracy
    }


    /// Returns the LOOCV predictions on the training set.
    pub fn train_predictions(&self) -> &[usize] {
        &self.train_predictions[..]
    }


    /// Returns the ensemble of each channel.
    pub fn channels(&self) -> &[BossEnsemble] {
        &self.channels[..]
    }


    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }


    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Computes the weight of each class for the channels `series`.
    /// The weights sum up to `1`.
    pub fn distribution<S>(&self, series: &[S]) -> Result<Vec<f64>>
        where S: AsRef<[f64]> + Sync,
    {
        if series.len() != self.channels.len() {
            return Err(BossError::invalid_parameter(
                "series",
                format!(
                    "expected {} channels, got {}",
                    self.channels.len(), series.len(),
                ),
            ));
        }

        let votes = self.channels.par_iter()
            .zip(series)
            .map(|(ensemble, channel)| ensemble.votes(channel.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.combine(votes.iter().map(|v| &v[..])))
    }


    /// Predicts the class of the channels `series`.
    /// Ties are broken by the smallest class index.
    pub fn classify<S>(&self, series: &[S]) -> Result<usize>
        where S: AsRef<[f64]> + Sync,
    {
        let dist = self.distribution(series)?;
        Ok(utils::argmax(&dist[..]))
    }


    /// Predicts the classes of all instances in `dataset`.
    pub fn classify_all(&self, dataset: &MultivariateDataset)
        -> Result<Vec<usize>>
    {
        let n_series = dataset.shape().0;
        (0..n_series).into_par_iter()
            .map(|i| self.classify(&dataset.instance(i)))
            .collect()
    }


    /// Fraction of the instances in `dataset` classified correctly.
    pub fn accuracy(&self, dataset: &MultivariateDataset) -> Result<f64> {
        let predictions = self.classify_all(dataset)?
            .into_iter()
            .map(Some);
        Ok(utils::accuracy(predictions, dataset.labels()))
    }


    /// Average the class fractions of the channels that voted.
    fn combine<'v, I>(&self, votes: I) -> Vec<f64>
        where I: Iterator<Item = &'v [f64]>,
    {
        let n_channels = self.channels.len() as f64;
        let mut dist = vec![0.0; self.n_classes];
        for channel in votes {
            let total = channel.iter().sum::<f64>();
            if total == 0.0 { continue; }
            dist.iter_mut()
                .zip(channel)
                .for_each(|(d, v)| { *d += v / total / n_channels; });
        }
        utils::normalize(&mut dist[..]);
        dist
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BossSearch, Dataset};

    /// Two low alternating waves (class 0) and two high ones (class 1).
    fn waves(low: f64, high: f64) -> Dataset {
        let wave = |a: f64, b: f64| {
            (0..16).map(|t| if t % 2 == 0 { a } else { b })
                .collect::<Vec<f64>>()
        };
        let series = vec![
            wave(low, low + 1.0), wave(low + 1.0, low),
            wave(high, high + 1.0), wave(high + 1.0, high),
        ];
        Dataset::new(series, vec![0, 0, 1, 1]).unwrap()
    }

    fn ensemble(dataset: &Dataset) -> BossEnsemble {
        BossSearch::init(dataset)
            .window_range(8, 8)
            .word_lengths(&[2])
            .normalize_options(&[false])
            .run()
            .unwrap()
    }

    #[test]
    fn channels_vote_together() {
        let a = waves(1.0, 10.0);
        let b = waves(3.0, 20.0);
        let boss = MultivariateBoss::from_channels(
            vec![ensemble(&a), ensemble(&b)], 2, vec![0, 0, 1, 1]
        );
        assert_eq!(boss.n_channels(), 2);
        assert_eq!(boss.train_accuracy_estimate(), 1.0);
        assert_eq!(boss.train_predictions(), &[0, 0, 1, 1]);

        let dist = boss.distribution(&[a.series(2), b.series(2)]).unwrap();
        assert_eq!(dist, vec![0.0, 1.0]);
        assert_eq!(boss.classify(&[a.series(0), b.series(0)]).unwrap(), 0);
    }

    #[test]
    fn channel_fractions_are_averaged() {
        let a = waves(1.0, 10.0);
        let boss = MultivariateBoss::from_channels(
            vec![ensemble(&a), ensemble(&a)], 2, vec![0, 0, 1, 1]
        );
        // A channel with more votes does not weigh more.
        let votes = [vec![2.0, 0.0], vec![0.0, 1.0]];
        let dist = boss.combine(votes.iter().map(|v| &v[..]));
        assert_eq!(dist, vec![0.5, 0.5]);

        // A silent channel is left out.
        let votes = [vec![3.0, 1.0], vec![0.0, 0.0]];
        let dist = boss.combine(votes.iter().map(|v| &v[..]));
        assert_eq!(dist, vec![0.75, 0.25]);

        let votes = [vec![0.0, 0.0], vec![0.0, 0.0]];
        let dist = boss.combine(votes.iter().map(|v| &v[..]));
        assert_eq!(dist, vec![0.5, 0.5]);
    }

    #[test]
    fn wrong_channel_count_is_rejected() {
        let a = waves(1.0, 10.0);
        let boss = MultivariateBoss::from_channels(
            vec![ensemble(&a)], 2, vec![0, 0, 1, 1]
        );
        let result = boss.distribution(&[a.series(0), a.series(1)]);
        assert!(matches!(result, Err(BossError::InvalidParameter { .. })));
    }
}
