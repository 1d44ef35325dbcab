//! Defines a BOSS model with fixed parameters.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use std::sync::Arc;

use crate::{
    Bag,
    BossError,
    BreakpointTable,
    Classifier,
    Dataset,
    Result,
    SfaWord,
    common::checker,
    distance::nearest_neighbor,
    transform::Mft,
};


/// The parameters that identify one BOSS configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossParams {
    /// Length of the sliding windows.
    pub window_size: usize,
    /// Number of symbols per word.
    pub word_length: usize,
    /// Number of symbols in the alphabet.
    pub alphabet_size: usize,
    /// If `true`, the DC coefficient is dropped
    /// so that words ignore the window mean.
    pub normalize: bool,
    /// If `true`, consecutive identical words are counted once.
    pub numerosity_reduction: bool,
}


/// A BOSS model: the breakpoints learned for one configuration
/// and the bag of every training series.
///
/// The model keeps the words of maximal length of every training series
/// until [`IndividualBoss::clean`] is called,
/// so that [`IndividualBoss::shorten`] never re-transforms a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualBoss {
    params: BossParams,
    n_classes: usize,
    breakpoints: Arc<BreakpointTable>,
    bags: Vec<Bag>,

    // Words of the fitted length, one vector per training series.
    // Shared by every model shortened from the same fit.
    #[serde(skip)]
    words: Option<Arc<Vec<Vec<SfaWord>>>>,
}


impl IndividualBoss {
    /// Fit a model on `dataset` with the given parameters.
    pub(crate) fn fit(dataset: &Dataset, params: BossParams) -> Result<Self> {
        checker::dataset(dataset)?;
        checker::window_size(params.window_size, dataset.shape().1)?;
        checker::word_length(params.word_length)?;
        checker::alphabet_size(params.alphabet_size)?;

        let breakpoints = BreakpointTable::fit(
            dataset,
            params.window_size,
            params.word_length,
            params.alphabet_size,
            params.normalize,
        );

        let mft = Mft::new(
            params.window_size, params.word_length, params.normalize
        );
        let n_series = dataset.shape().0;
        let words = (0..n_series).into_par_iter()
            .map(|i| {
                mft.transform(&dataset[i])
                    .iter()
                    .map(|dft| SfaWord::from_coefficients(dft, &breakpoints))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let bags = words.iter()
            .zip(dataset.labels())
            .map(|(ws, &y)| {
                Bag::from_words(ws.iter().copied(), params.numerosity_reduction)
                    .with_label(Some(y))
            })
            .collect();

        Ok(Self {
            params,
            n_classes: dataset.n_classes(),
            breakpoints: Arc::new(breakpoints),
            bags,
            words: Some(Arc::new(words)),
        })
    }


    /// Returns a model whose bags are built from the leading
    /// `word_length` symbols of the cached words.
    /// Numerosity reduction is applied again from scratch.
    ///
    /// Shortening to the current word length returns
    /// a model with identical bags.
    pub fn shorten(&self, word_length: usize) -> Result<Self> {
        let current = self.params.word_length;
        if word_length > current || word_length < 2 {
            return Err(BossError::InvalidWordLength {
                current, requested: word_length,
            });
        }
        if word_length == current {
            return Ok(self.clone());
        }

        let words = self.words.as_ref()
            .ok_or_else(|| BossError::invalid_parameter(
                "word_length",
                "the cached words were released by `clean`",
            ))?;

        let reduction = self.params.numerosity_reduction;
        let bags = words.par_iter()
            .zip(&self.bags)
            .map(|(ws, old)| {
                let truncated = ws.iter().map(|w| w.truncate(word_length));
                Bag::from_words(truncated, reduction).with_label(old.label())
            })
            .collect();

        // The cached words keep their fitted length,
        // so a shortened model can be shortened again.
        let mut params = self.params;
        params.word_length = word_length;
        Ok(Self {
            params,
            n_classes: self.n_classes,
            breakpoints: Arc::clone(&self.breakpoints),
            bags,
            words: Some(Arc::clone(words)),
        })
    }


    /// Drop the cached words.
    /// After this call, the model can no longer be shortened.
    pub fn clean(&mut self) {
        self.words = None;
    }


    /// Returns `true` if the model still holds the cached words.
    pub fn has_word_cache(&self) -> bool {
        self.words.is_some()
    }


    /// Transform `series` into a bag with the current parameters.
    pub fn transform(&self, series: &[f64]) -> Result<Bag> {
        checker::window_size(self.params.window_size, series.len())?;

        let BossParams { window_size, word_length, normalize, .. } = self.params;
        let mft = Mft::new(window_size, word_length, normalize);
        let words = mft.transform(series)
            .into_iter()
            .map(|dft| SfaWord::from_coefficients(&dft, &self.breakpoints))
            .map(|w| w.truncate(word_length));

        Ok(Bag::from_words(words, self.params.numerosity_reduction))
    }


    /// Predicts the label of `series` by its nearest training bag.
    pub fn classify_series(&self, series: &[f64]) -> Result<Option<usize>> {
        let bag = self.transform(series)?;
        Ok(self.classify_bag(&bag))
    }


    /// Predicts the label of `bag` by its nearest training bag.
    pub fn classify_bag(&self, bag: &Bag) -> Option<usize> {
        nearest_neighbor(bag, &self.bags, None)
            .and_then(|nn| nn.label)
    }


    /// Classifies the `index`-th training series
    /// against every other training bag (leave-one-out).
    pub fn classify_loo(&self, index: usize) -> Option<usize> {
        nearest_neighbor(&self.bags[index], &self.bags, Some(index))
            .and_then(|nn| nn.label)
    }


    /// Leave-one-out predictions of every training series.
    pub fn loocv_predictions(&self) -> Vec<Option<usize>> {
        (0..self.bags.len()).into_par_iter()
            .map(|i| self.classify_loo(i))
            .collect()
    }


    /// Leave-one-out accuracy on the training set.
    ///
    /// The scan stops early and returns `None` as soon as the accuracy
    /// can no longer reach `lower_bound`.
    /// Pass a negative `lower_bound` to always get the accuracy.
    pub fn loocv_accuracy(&self, lower_bound: f64) -> Option<f64> {
        let n_series = self.bags.len();
        if n_series == 0 { return Some(0.0); }

        let required = (lower_bound * n_series as f64).max(0.0) as usize;
        let mut correct = 0;
        for (i, bag) in self.bags.iter().enumerate() {
            if correct + n_series - i < required {
                return None;
            }
            let prediction = self.classify_loo(i);
            if prediction.is_some() && prediction == bag.label() {
                correct += 1;
            }
        }
        Some(correct as f64 / n_series as f64)
    }


    /// Returns the parameters of this model.
    pub fn params(&self) -> BossParams {
        self.params
    }


    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.params.window_size
    }


    /// Returns the word length.
    pub fn word_length(&self) -> usize {
        self.params.word_length
    }


    /// Returns the alphabet size.
    pub fn alphabet_size(&self) -> usize {
        self.params.alphabet_size
    }


    /// Returns `true` if the DC coefficient is dropped.
    pub fn normalize(&self) -> bool {
        self.params.normalize
    }


    /// Returns the bag of every training series.
    pub fn bags(&self) -> &[Bag] {
        &self.bags[..]
    }


    /// Returns the breakpoints.
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }
}


impl Classifier for IndividualBoss {
    fn n_classes(&self) -> usize {
        self.n_classes
    }


    fn distribution(&self, series: &[f64]) -> Result<Vec<f64>> {
        let mut dist = vec![0.0; self.n_classes];
        match self.classify_series(series)? {
            Some(k) if k < self.n_classes => { dist[k] = 1.0; },
            _ => {
                let uni = 1.0 / self.n_classes as f64;
                dist.iter_mut().for_each(|d| *d = uni);
            },
        }
        Ok(dist)
    }
}
