use crate::{
    Dataset,
    IndividualBoss,
    Result,
    constants::*,
};
use super::BossParams;


/// A struct that builds [`IndividualBoss`].
/// `BossBuilder` keeps the parameters of one BOSS configuration.
///
/// # Example
///
/// ```no_run
/// use miniboss::prelude::*;
///
/// # let dataset = Dataset::new(vec![vec![0.0; 32]; 2], vec![0, 1]).unwrap();
/// # let series = vec![0.0; 32];
/// let model = BossBuilder::new(&dataset)
///     .window_size(24)
///     .word_length(8)
///     .alphabet_size(4)
///     .normalize(true)
///     .build()
///     .unwrap();
///
/// let label = model.classify(&series).unwrap();
/// ```
#[derive(Clone)]
pub struct BossBuilder<'a> {
    dataset: &'a Dataset,
    params: BossParams,
}


impl<'a> BossBuilder<'a> {
    /// Construct a new instance of [`BossBuilder`].
    /// By default, [`BossBuilder`] sets the parameters as follows;
    /// ```text
    /// window_size: min(MIN_WINDOW_SIZE == 10, series length),
    /// word_length: MAX_WORD_LENGTH == 16,
    /// alphabet_size: DEFAULT_ALPHABET_SIZE == 4,
    /// normalize: true,
    /// numerosity_reduction: true,
    /// ```
    pub fn new(dataset: &'a Dataset) -> Self {
        let length = dataset.shape().1;
        let params = BossParams {
            window_size: MIN_WINDOW_SIZE.min(length),
            word_length: MAX_WORD_LENGTH,
            alphabet_size: DEFAULT_ALPHABET_SIZE,
            normalize: true,
            numerosity_reduction: true,
        };
        Self { dataset, params }
    }


    /// Set the length of the sliding windows.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.params.window_size = window_size;
        self
    }


    /// Set the number of symbols per word.
    pub fn word_length(mut self, word_length: usize) -> Self {
        self.params.word_length = word_length;
        self
    }


    /// Set the alphabet size.
    pub fn alphabet_size(mut self, alphabet_size: usize) -> Self {
        self.params.alphabet_size = alphabet_size;
        self
    }


    /// If `true`, the first (DC) coefficient is dropped.
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.params.normalize = normalize;
        self
    }


    /// Turn numerosity reduction on/off.
    pub fn numerosity_reduction(mut self, flag: bool) -> Self {
        self.params.numerosity_reduction = flag;
        self
    }


    /// Build an [`IndividualBoss`].
    /// This method consumes `self`.
    pub fn build(self) -> Result<IndividualBoss> {
        IndividualBoss::fit(self.dataset, self.params)
    }
}
