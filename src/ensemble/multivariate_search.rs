//! Provides [`MultivariateSearch`], which runs one [`BossSearch`]
//! per channel.
use std::ops::ControlFlow;

use crate::{
    BossEnsemble,
    BossSearch,
    Learner,
    MultivariateDataset,
    Result,
};
use super::multivariate_boss::MultivariateBoss;
use super::storage::MemberStore;


/// Defines the BOSS search over multi-channel series.
///
/// Each channel gets its own sweep,
/// its own admission state and its own members.
/// Every channel search uses the settings given to [`configure`].
/// When members are persisted, channel `c` writes into
/// the `channel_c` subdirectory of the storage directory.
///
/// The time limit applies to each channel separately.
///
/// [`configure`]: MultivariateSearch::configure
///
/// # Example
///
/// ```no_run
/// use miniboss::prelude::*;
///
/// # let series = vec![vec![vec![0.0; 32], vec![1.0; 16]]; 4];
/// # let labels = vec![0, 0, 1, 1];
/// let dataset = MultivariateDataset::new(series, labels).unwrap();
///
/// let mut search = MultivariateSearch::init(&dataset)
///     .configure(|search| {
///         search.max_ensemble_size(50)
///             .word_lengths(&[8, 6])
///     });
/// let ensemble = search.run().unwrap();
/// println!("train accuracy: {}", ensemble.train_accuracy_estimate());
/// ```
pub struct MultivariateSearch<'a> {
    dataset: &'a MultivariateDataset,
    // Settings shared by every channel.
    template: BossSearch<'a>,
    ensembles: Vec<BossEnsemble>,
}


impl<'a> MultivariateSearch<'a> {
    /// Initialize the search.
    /// Every channel uses the default settings of [`BossSearch::init`].
    pub fn init(dataset: &'a MultivariateDataset) -> Self {
        Self {
            dataset,
            template: BossSearch::init(dataset.channel(0)),
            ensembles: Vec::new(),
        }
    }


    /// Set the search of every channel.
    pub fn configure<F>(mut self, f: F) -> Self
        where F: FnOnce(BossSearch<'a>) -> BossSearch<'a>
    {
        self.template = f(self.template);
        self
    }


    fn store_of(&self, channel: usize) -> MemberStore {
        let dir = self.template.store()
            .dir()
            .join(format!("channel_{channel}"));
        MemberStore::new(dir)
    }
}


impl Learner for MultivariateSearch<'_> {
    type Output = MultivariateBoss;


    fn name(&self) -> &str {
        "Multivariate BOSS"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_series, n_channels) = self.dataset.shape();
        let info = Vec::from([
            ("# of series", format!("{n_series}")),
            ("# of channels", format!("{n_channels}")),
            ("# of classes", format!("{}", self.dataset.n_classes())),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) -> Result<()> {
        self.ensembles = Vec::with_capacity(self.dataset.n_channels());
        Ok(())
    }


    fn step(&mut self, iteration: usize) -> Result<ControlFlow<usize>> {
        let channel = iteration - 1;
        if channel >= self.dataset.n_channels() {
            return Ok(ControlFlow::Break(channel));
        }

        let store = self.store_of(channel);
        let ensemble = self.template
            .rebind(self.dataset.channel(channel), store)
            .run()?;
        self.ensembles.push(ensemble);
        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Result<Self::Output> {
        let ensembles = std::mem::take(&mut self.ensembles);
        Ok(MultivariateBoss::from_channels(
            ensembles,
            self.dataset.n_classes(),
            self.dataset.labels().to_vec(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_get_their_own_store() {
        let series = vec![vec![vec![0.0; 8], vec![1.0; 4]]; 2];
        let dataset = MultivariateDataset::new(series, vec![0, 1]).unwrap();
        let search = MultivariateSearch::init(&dataset)
            .configure(|search| search.storage_dir("members"));

        let dir = search.store_of(1).dir().to_path_buf();
        assert_eq!(dir, std::path::Path::new("members").join("channel_1"));
    }
}
