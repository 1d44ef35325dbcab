#![warn(missing_docs)]

//!
//! A crate that provides the BOSS (Bag-of-SFA-Symbols)
//! time series classifier and its ensemble.
//!
//! A BOSS model slides a window over each series,
//! approximates every window by its first Fourier coefficients,
//! quantizes them into a short word (Symbolic Fourier Approximation),
//! and represents the series by the histogram (bag) of its words.
//! A query is labeled by its nearest training bag.
//!
//! - [`IndividualBoss`]
//!     A single model with fixed parameters,
//!     built by [`BossBuilder`].
//!
//! - [`BossEnsemble`]
//!     An unweighted vote over the models found by [`BossSearch`].
//!     The search sweeps window sizes, word lengths,
//!     and normalization options,
//!     scores each configuration by leave-one-out accuracy,
//!     and keeps every configuration whose accuracy is
//!     close enough to the best one.
//!
//! - [`MultivariateBoss`]
//!     One [`BossEnsemble`] per channel of a [`MultivariateDataset`],
//!     built by [`MultivariateSearch`].
//!
//! # Example
//!
//! ```no_run
//! use miniboss::prelude::*;
//!
//! # let series = vec![vec![0.0; 32]; 4];
//! # let labels = vec![0, 0, 1, 1];
//! # let query = vec![0.0; 32];
//! let train = Dataset::new(series, labels).unwrap();
//!
//! let ensemble = BossSearch::init(&train)
//!     .max_ensemble_size(100)
//!     .verbose(true)
//!     .run()
//!     .unwrap();
//!
//! let label = ensemble.classify(&query).unwrap();
//! ```

pub mod constants;
pub mod error;
pub mod dataset;
pub mod transform;
pub mod binning;
pub mod word;
pub mod distance;
pub mod classifier;
pub mod individual;
pub mod learner;
pub mod ensemble;
pub mod prelude;

mod common;
mod logging;


pub use error::{BossError, Result};
pub use dataset::{Dataset, MultivariateDataset};
pub use binning::BreakpointTable;
pub use word::{SfaWord, Bag};
pub use classifier::Classifier;
pub use individual::{IndividualBoss, BossParams, BossBuilder};
pub use learner::Learner;
pub use ensemble::{
    BossEnsemble,
    BossSearch,
    EnsembleMember,
    MemberStore,
    SerialiseOption,
    MultivariateBoss,
    MultivariateSearch,
};
