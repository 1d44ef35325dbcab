//! Provides [`BossEnsemble`], an unweighted vote over BOSS models.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    BossParams,
    BossSearch,
    Classifier,
    Dataset,
    Learner,
    Result,
    common::utils,
    logging,
};
use super::member::EnsembleMember;
use super::storage::MemberStore;


/// An ensemble of BOSS models.
/// Each member classifies a query by its nearest training bag
/// and casts one vote.
///
/// Build it with [`BossEnsemble::fit`] for the default search,
/// or with [`BossSearch`] to set the search parameters.
///
/// # Example
///
/// ```no_run
/// use miniboss::prelude::*;
///
/// # let train = Dataset::new(vec![vec![0.0; 32]; 2], vec![0, 1]).unwrap();
/// # let test = train.clone();
/// let ensemble = BossEnsemble::fit(&train).unwrap();
/// let accuracy = ensemble.accuracy(&test).unwrap();
/// println!("Test accuracy is: {accuracy}");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossEnsemble {
    members: Vec<EnsembleMember>,
    store: MemberStore,
    n_classes: usize,
    // Training labels, used by the LOOCV estimate.
    labels: Vec<usize>,
    correct_threshold: f64,
    max_ensemble_size: usize,
    train_predictions: Vec<usize>,
    train_accuracy: f64,
}


impl BossEnsemble {
    /// Train an ensemble on `dataset` with the default search.
    pub fn fit(dataset: &Dataset) -> Result<Self> {
        BossSearch::init(dataset).run()
    }


    pub(crate) fn from_members(
        members: Vec<EnsembleMember>,
        store: MemberStore,
        n_classes: usize,
        labels: Vec<usize>,
        correct_threshold: f64,
        max_ensemble_size: usize,
    ) -> Self
    {
        let mut ensemble = Self {
            members,
            store,
            n_classes,
            labels,
            correct_threshold,
            max_ensemble_size,
            train_predictions: Vec::new(),
            train_accuracy: 0.0,
        };
        ensemble.recompute_train_accuracy();
        ensemble
    }


    /// Recompute the LOOCV predictions of the ensemble
    /// on the training set and return the accuracy.
    ///
    /// Every member classifies each training series
    /// against the other training series.
    pub fn recompute_train_accuracy(&mut self) -> f64 {
        self.train_predictions = self.loocv_votes()
            .iter()
            .map(|votes| utils::argmax(votes))
            .collect();

        let predictions = self.train_predictions.iter().copied().map(Some);
        self.train_accuracy = utils::accuracy(predictions, &self.labels);
        self.train_accuracy
    }


    /// Returns the LOOCV accuracy of the ensemble on the training set,
    /// computed at the end of the search.
    pub fn train_accuracy_estimate(&self) -> f64 {
        self.train_accuracy
    }


    /// Returns the LOOCV predictions of the ensemble
    /// on the training set.
    pub fn train_predictions(&self) -> &[usize] {
        &self.train_predictions[..]
    }


    /// Returns the parameters and the accuracy of each member.
    pub fn parameters(&self) -> Vec<(BossParams, f64)> {
        self.members.iter()
            .map(|member| (member.params(), member.accuracy()))
            .collect()
    }


    /// Returns the members in admission order.
    pub fn members(&self) -> &[EnsembleMember] {
        &self.members[..]
    }


    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }


    /// Returns `true` if the ensemble has no member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }


    /// Returns the admission threshold used by the search.
    pub fn correct_threshold(&self) -> f64 {
        self.correct_threshold
    }


    /// Returns the size bound used by the search.
    pub fn max_ensemble_size(&self) -> usize {
        self.max_ensemble_size
    }


    /// Returns the store holding the persisted members.
    pub fn store(&self) -> &MemberStore {
        &self.store
    }


    /// Number of votes per class for each training series,
    /// where each member classifies a series against the others.
    pub(crate) fn loocv_votes(&self) -> Vec<Vec<f64>> {
        let n_series = self.labels.len();
        let predictions = self.members.par_iter()
            .map(|member| match member.materialize(&self.store) {
                Ok(model) => model.loocv_predictions(),
                Err(e) => {
                    logging::warn(
                        format!("Member {} abstains: {e}", member.id())
                    );
                    vec![None; n_series]
                },
            })
            .collect::<Vec<_>>();

        (0..n_series).map(|i| {
                let mut votes = vec![0.0; self.n_classes];
                predictions.iter()
                    .filter_map(|p| p[i])
                    .filter(|&k| k < self.n_classes)
                    .for_each(|k| { votes[k] += 1.0; });
                votes
            })
            .collect()
    }


    /// Number of votes per class for `series`.
    pub(crate) fn votes(&self, series: &[f64]) -> Result<Vec<f64>> {
        let predictions = self.members.par_iter()
            .map(|member| self.vote(member, series))
            .collect::<Result<Vec<_>>>()?;

        let mut votes = vec![0.0; self.n_classes];
        predictions.into_iter()
            .flatten()
            .filter(|&k| k < self.n_classes)
            .for_each(|k| { votes[k] += 1.0; });
        Ok(votes)
    }


    /// The vote of `member` on `series`.
    /// A member that cannot be reloaded abstains.
    fn vote(&self, member: &EnsembleMember, series: &[f64])
        -> Result<Option<usize>>
    {
        match member.materialize(&self.store) {
            Ok(model) => model.classify_series(series),
            Err(e) => {
                logging::warn(format!("Member {} abstains: {e}", member.id()));
                Ok(None)
            },
        }
    }
}


impl Classifier for BossEnsemble {
    fn n_classes(&self) -> usize {
        self.n_classes
    }


    fn distribution(&self, series: &[f64]) -> Result<Vec<f64>> {
        let mut dist = self.votes(series)?;
        utils::normalize(&mut dist[..]);
        Ok(dist)
    }
}
