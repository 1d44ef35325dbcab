//! Provides [`BossSearch`], the parameter sweep that builds a
//! [`BossEnsemble`].
use rayon::prelude::*;

use std::ops::ControlFlow;
use std::path::Path;
use std::time::Instant;

use crate::{
    BossBuilder,
    BossEnsemble,
    BossError,
    Dataset,
    IndividualBoss,
    Learner,
    Result,
    common::checker,
    constants::*,
    logging::{self, WindowReport},
};
use super::admission::AdmissionState;
use super::member::EnsembleMember;
use super::storage::{MemberStore, SerialiseOption};


/// One point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Configuration {
    pub(crate) normalize: bool,
    pub(crate) window_size: usize,
}


/// The best model found for one configuration.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) model: IndividualBoss,
    pub(crate) accuracy: f64,
}


/// Defines the BOSS parameter search.
///
/// For each normalization option and each window size,
/// `BossSearch` fits one model at the longest word length,
/// shortens it to every candidate word length,
/// and keeps the word length with the best LOOCV accuracy.
/// The resulting configuration then goes through the admission policy:
/// a configuration joins the ensemble only if its accuracy is at least
/// `correct_threshold` times the best accuracy seen so far,
/// and a new best accuracy evicts the members that fall below that bound.
///
/// # Example
///
/// ```no_run
/// use miniboss::prelude::*;
///
/// # let series = vec![vec![0.0; 32]; 4];
/// # let labels = vec![0, 0, 1, 1];
/// # let query = vec![0.0; 32];
/// let dataset = Dataset::new(series, labels).unwrap();
///
/// let mut search = BossSearch::init(&dataset)
///     .correct_threshold(0.92)
///     .max_ensemble_size(50)
///     .time_limit_as_secs(60)
///     .verbose(true);
///
/// let ensemble = search.run().unwrap();
///
/// println!("train accuracy: {}", ensemble.train_accuracy_estimate());
/// let label = ensemble.classify(&query).unwrap();
/// ```
pub struct BossSearch<'a> {
    // Training set
    dataset: &'a Dataset,

    // Candidate word lengths, tried in this order.
    word_lengths: Vec<usize>,
    alphabet_size: usize,
    normalize_options: Vec<bool>,
    // `None` means `[MIN_WINDOW_SIZE, series length]`.
    window_range: Option<(usize, usize)>,
    window_search_proportion: f64,
    numerosity_reduction: bool,

    // Admission policy
    correct_threshold: f64,
    max_ensemble_size: usize,

    // Persistence of the admitted members
    serialise: SerialiseOption,
    store: MemberStore,

    n_threads: usize,
    // Time limit in milliseconds
    time_limit: u128,
    verbose: bool,

    // Search state
    configurations: Vec<Configuration>,
    // Candidates of the current parallel chunk, indexed by configuration.
    precomputed: Vec<Option<Candidate>>,
    pool: Option<rayon::ThreadPool>,
    state: AdmissionState,
    members: Vec<EnsembleMember>,
    started: Option<Instant>,
    timed_out: bool,
}


impl<'a> BossSearch<'a> {
    /// Initialize the search with the default parameters:
    /// ```text
    /// word_lengths: DEFAULT_WORD_LENGTHS == [16, 14, 12, 10, 8],
    /// alphabet_size: DEFAULT_ALPHABET_SIZE == 4,
    /// normalize_options: DEFAULT_NORMALIZE_OPTIONS == [true, false],
    /// window range: [MIN_WINDOW_SIZE == 10, series length],
    /// window_search_proportion: WINDOW_SEARCH_PROPORTION == 0.25,
    /// correct_threshold: CORRECT_THRESHOLD == 0.92,
    /// max_ensemble_size: unbounded,
    /// numerosity_reduction: true,
    /// serialise: SerialiseOption::None,
    /// n_threads: 1,
    /// time limit: none,
    /// ```
    pub fn init(dataset: &'a Dataset) -> Self {
        Self {
            dataset,

            word_lengths: DEFAULT_WORD_LENGTHS.to_vec(),
            alphabet_size: DEFAULT_ALPHABET_SIZE,
            normalize_options: DEFAULT_NORMALIZE_OPTIONS.to_vec(),
            window_range: None,
            window_search_proportion: WINDOW_SEARCH_PROPORTION,
            numerosity_reduction: true,

            correct_threshold: CORRECT_THRESHOLD,
            max_ensemble_size: usize::MAX,

            serialise: SerialiseOption::None,
            store: MemberStore::default(),

            n_threads: 1,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            verbose: false,

            configurations: Vec::new(),
            precomputed: Vec::new(),
            pool: None,
            state: AdmissionState::new(CORRECT_THRESHOLD, usize::MAX),
            members: Vec::new(),
            started: None,
            timed_out: false,
        }
    }


    /// Set the candidate word lengths.
    /// Every model is fitted at the longest one
    /// and shortened to the others.
    pub fn word_lengths(mut self, word_lengths: &[usize]) -> Self {
        self.word_lengths = word_lengths.to_vec();
        self
    }


    /// Set the alphabet size.
    pub fn alphabet_size(mut self, alphabet_size: usize) -> Self {
        self.alphabet_size = alphabet_size;
        self
    }


    /// Set the normalization options to sweep over.
    pub fn normalize_options(mut self, options: &[bool]) -> Self {
        self.normalize_options = options.to_vec();
        self
    }


    /// Set the smallest and largest window sizes.
    /// The largest one is capped by the series length.
    /// `min` must be positive, at most `max`,
    /// and at most the series length.
    pub fn window_range(mut self, min: usize, max: usize) -> Self {
        self.window_range = Some((min, max));
        self
    }


    /// At most `series_length * proportion` window sizes are tried.
    pub fn window_search_proportion(mut self, proportion: f64) -> Self {
        self.window_search_proportion = proportion;
        self
    }


    /// Set the admission threshold relative to the best accuracy.
    pub fn correct_threshold(mut self, threshold: f64) -> Self {
        self.correct_threshold = threshold;
        self
    }


    /// Set the maximal number of members.
    pub fn max_ensemble_size(mut self, size: usize) -> Self {
        self.max_ensemble_size = size;
        self
    }


    /// Turn numerosity reduction on/off.
    pub fn numerosity_reduction(mut self, flag: bool) -> Self {
        self.numerosity_reduction = flag;
        self
    }


    /// Set what happens to the admitted members.
    pub fn serialise(mut self, option: SerialiseOption) -> Self {
        self.serialise = option;
        self
    }


    /// Set the directory the members are written to.
    pub fn storage_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.store = MemberStore::new(dir);
        self
    }


    /// Evaluate the configurations on `n_threads` threads.
    /// Configurations are evaluated in chunks of `n_threads`
    /// and admitted in sweep order.
    /// The time limit is checked between two chunks.
    pub fn n_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }


    /// Set the time limit for the search as milliseconds.
    /// The limit is checked between two configurations.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for the search as seconds.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000);
        self
    }


    /// Set the time limit for the search as minutes.
    #[inline(always)]
    pub fn time_limit_as_mins(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(60_000);
        self
    }


    /// Print the progress of the search.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Returns the window sizes tried for each normalization option.
    pub fn window_sizes(&self) -> Vec<usize> {
        let length = self.dataset.shape().1;
        let (min, max) = match self.window_range {
            Some((min, max)) => (min, max.min(length)),
            None => {
                let max = ((length as f64 * MAX_WINDOW_PROPORTION) as usize)
                    .min(length);
                let min = if max < MIN_WINDOW_SIZE { max / 2 } else { MIN_WINDOW_SIZE };
                (min.max(1), max)
            },
        };
        if min == 0 || max < min { return Vec::new(); }

        let searches = length as f64 * self.window_search_proportion;
        let step = (((max - min) as f64 / searches) as usize).max(1);

        (min..=max).step_by(step).collect()
    }


    /// Returns `true` if the time limit stopped the last run.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }


    fn check_params(&self) -> Result<()> {
        checker::dataset(self.dataset)?;
        checker::alphabet_size(self.alphabet_size)?;
        checker::correct_threshold(self.correct_threshold)?;

        if self.word_lengths.is_empty() {
            return Err(BossError::invalid_parameter(
                "word_lengths", "at least one word length is required"
            ));
        }
        for &word_length in &self.word_lengths {
            checker::word_length(word_length)?;
        }
        if self.normalize_options.is_empty() {
            return Err(BossError::invalid_parameter(
                "normalize_options", "at least one option is required"
            ));
        }
        if !(self.window_search_proportion > 0.0) {
            return Err(BossError::invalid_parameter(
                "window_search_proportion",
                format!("must be positive. got {}", self.window_search_proportion),
            ));
        }
        if self.max_ensemble_size == 0 {
            return Err(BossError::invalid_parameter(
                "max_ensemble_size", "must be positive"
            ));
        }
        if self.n_threads == 0 {
            return Err(BossError::invalid_parameter(
                "n_threads", "must be positive"
            ));
        }
        if let Some((min, max)) = self.window_range {
            let length = self.dataset.shape().1;
            if min == 0 || min > max || min > length {
                return Err(BossError::invalid_parameter(
                    "window_range",
                    format!(
                        "expected 1 <= min <= max and min <= {length}. \
                         got ({min}, {max})"
                    ),
                ));
            }
        }
        Ok(())
    }


    /// Fit the model of `config` at the longest word length,
    /// then keep the word length with the best LOOCV accuracy.
    /// Later word lengths win ties.
    fn evaluate(&self, config: Configuration) -> Result<Candidate> {
        let longest = self.word_lengths.iter()
            .copied()
            .max()
            .unwrap_or(MAX_WORD_LENGTH);

        let base = BossBuilder::new(self.dataset)
            .window_size(config.window_size)
            .word_length(longest)
            .alphabet_size(self.alphabet_size)
            .normalize(config.normalize)
            .numerosity_reduction(self.numerosity_reduction)
            .build()?;

        let mut best: Option<Candidate> = None;
        let mut best_acc = -1.0;
        for &word_length in &self.word_lengths {
            let model = base.shorten(word_length)?;
            let Some(accuracy) = model.loocv_accuracy(best_acc) else {
                continue;
            };
            if accuracy >= best_acc {
                best_acc = accuracy;
                best = Some(Candidate { model, accuracy });
            }
        }

        let mut best = best.ok_or_else(|| BossError::invalid_parameter(
            "word_lengths", "at least one word length is required"
        ))?;
        best.model.clean();
        Ok(best)
    }


    /// Run the admission policy on `candidate`.
    /// Returns `true` if it joined the ensemble.
    fn consider(&mut self, id: usize, candidate: Candidate) -> bool {
        let Candidate { model, accuracy } = candidate;
        if !self.state.admits(accuracy, self.members.len()) {
            return false;
        }

        let persisted = match self.serialise {
            SerialiseOption::None => false,
            SerialiseOption::Store | SerialiseOption::StoreLoad => {
                self.store.persist(id, &model)
            },
        };
        let mut member = EnsembleMember::resident(id, accuracy, model);
        if persisted && self.serialise == SerialiseOption::StoreLoad {
            member.unload();
        }

        let evicted = self.state.admit(&mut self.members, member);
        if self.serialise != SerialiseOption::None {
            evicted.iter()
                .for_each(|member| self.store.drop_member(member.id()));
        }
        true
    }


    /// A fresh search with the same settings over `dataset`.
    /// The members are written to `store`.
    pub(crate) fn rebind<'b>(&self, dataset: &'b Dataset, store: MemberStore)
        -> BossSearch<'b>
    {
        BossSearch {
            dataset,

            word_lengths: self.word_lengths.clone(),
            alphabet_size: self.alphabet_size,
            normalize_options: self.normalize_options.clone(),
            window_range: self.window_range,
            window_search_proportion: self.window_search_proportion,
            numerosity_reduction: self.numerosity_reduction,

            correct_threshold: self.correct_threshold,
            max_ensemble_size: self.max_ensemble_size,

            serialise: self.serialise,
            store,

            n_threads: self.n_threads,
            time_limit: self.time_limit,
            verbose: self.verbose,

            configurations: Vec::new(),
            precomputed: Vec::new(),
            pool: None,
            state: AdmissionState::new(
                self.correct_threshold, self.max_ensemble_size
            ),
            members: Vec::new(),
            started: None,
            timed_out: false,
        }
    }


    pub(crate) fn store(&self) -> &MemberStore {
        &self.store
    }


    /// Evaluate the chunk of `n_threads` configurations
    /// starting at `start` on the thread pool.
    fn evaluate_chunk(&mut self, start: usize) -> Result<()> {
        let Some(pool) = self.pool.as_ref() else { return Ok(()); };
        let end = (start + self.n_threads).min(self.configurations.len());

        let candidates = pool.install(|| {
            self.configurations[start..end].par_iter()
                .map(|&config| self.evaluate(config))
                .collect::<Result<Vec<_>>>()
        })?;
        candidates.into_iter()
            .zip(start..end)
            .for_each(|(candidate, index)| {
                self.precomputed[index] = Some(candidate);
            });
        Ok(())
    }


    fn elapsed_millis(&self) -> u128 {
        self.started
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0)
    }
}


impl Learner for BossSearch<'_> {
    type Output = BossEnsemble;


    fn name(&self) -> &str {
        "BOSS"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_series, length) = self.dataset.shape();
        let windows = self.window_sizes();
        let window_info = match (windows.first(), windows.last()) {
            (Some(min), Some(max)) => format!("{min}..={max} ({})", windows.len()),
            _ => "-".into(),
        };
        let max_size = if self.max_ensemble_size == usize::MAX {
            "Unbounded".into()
        } else {
            self.max_ensemble_size.to_string()
        };
        let info = Vec::from([
            ("# of series", format!("{n_series}")),
            ("# of classes", format!("{}", self.dataset.n_classes())),
            ("Series length", format!("{length}")),
            ("Window sizes", window_info),
            ("Word lengths", format!("{:?}", self.word_lengths)),
            ("Alphabet size", format!("{}", self.alphabet_size)),
            ("Normalize", format!("{:?}", self.normalize_options)),
            ("Correct threshold", format!("{}", self.correct_threshold)),
            ("Max. ensemble size", max_size),
            ("Serialise", format!("{:?}", self.serialise)),
            ("# of threads", format!("{}", self.n_threads)),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) -> Result<()> {
        self.check_params()?;

        let windows = self.window_sizes();
        self.configurations = self.normalize_options.iter()
            .flat_map(|&normalize| {
                windows.iter()
                    .map(move |&window_size| Configuration { normalize, window_size })
            })
            .collect();

        self.state = AdmissionState::new(
            self.correct_threshold, self.max_ensemble_size
        );
        self.members = Vec::new();
        self.timed_out = false;

        if self.verbose {
            logging::print_stats(self.name(), self.info(), self.time_limit);
            logging::print_log_header();
        }
        self.precomputed = (0..self.configurations.len())
            .map(|_| None)
            .collect();
        self.pool = if self.n_threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.n_threads)
                .build()
                .map_err(|e| BossError::invalid_parameter("n_threads", e))?;
            Some(pool)
        } else {
            None
        };

        self.started = Some(Instant::now());
        Ok(())
    }


    fn step(&mut self, iteration: usize) -> Result<ControlFlow<usize>> {
        let index = iteration - 1;
        if index >= self.configurations.len() {
            return Ok(ControlFlow::Break(index));
        }
        if self.elapsed_millis() > self.time_limit {
            self.timed_out = true;
            return Ok(ControlFlow::Break(index));
        }

        if self.pool.is_some() && self.precomputed[index].is_none() {
            self.evaluate_chunk(index)?;
        }

        let config = self.configurations[index];
        let candidate = match self.precomputed.get_mut(index).and_then(Option::take) {
            Some(candidate) => candidate,
            None => self.evaluate(config)?,
        };

        let report = WindowReport {
            normalize: config.normalize,
            window_size: config.window_size,
            word_length: candidate.model.word_length(),
            accuracy: candidate.accuracy,
            admitted: false,
            ensemble_size: 0,
        };
        let admitted = self.consider(index, candidate);

        if self.verbose {
            let report = WindowReport {
                admitted,
                ensemble_size: self.members.len(),
                ..report
            };
            logging::print_window(&report, self.elapsed_millis());
        }
        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Result<Self::Output> {
        self.precomputed = Vec::new();
        self.pool = None;
        if self.members.is_empty() {
            return Err(BossError::EmptyEnsemble);
        }

        let members = std::mem::take(&mut self.members);
        let ensemble = BossEnsemble::from_members(
            members,
            self.store.clone(),
            self.dataset.n_classes(),
            self.dataset.labels().to_vec(),
            self.correct_threshold,
            self.max_ensemble_size,
        );

        if self.verbose {
            logging::print_finish(
                self.timed_out,
                ensemble.len(),
                ensemble.train_accuracy_estimate(),
                self.elapsed_millis(),
            );
        }
        Ok(ensemble)
    }
}
