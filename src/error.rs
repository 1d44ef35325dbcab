//! Error types shared by every fallible operation in this crate.

use std::io;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;


/// Result type alias for BOSS operations.
pub type Result<T> = std::result::Result<T, BossError>;


/// Errors that can occur while building or querying BOSS models.
#[derive(Error, Debug)]
pub enum BossError {
    /// The training data cannot be used as it is.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// A parameter is out of its valid range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Words can only be shortened, and never below two symbols.
    #[error(
        "Cannot change the word length from {current} to {requested}. \
         Words can only be shortened to a length in [2, {current}]"
    )]
    InvalidWordLength {
        /// Word length of the model being shortened.
        current: usize,
        /// Requested word length.
        requested: usize,
    },

    /// No configuration made it into the ensemble.
    #[error("The ensemble is empty; no configuration was admitted")]
    EmptyEnsemble,

    /// Reading or writing a member file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A member could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A data frame could not be converted into a dataset.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}


impl BossError {
    pub(crate) fn invalid_parameter<S>(name: &'static str, reason: S) -> Self
        where S: ToString,
    {
        Self::InvalidParameter { name, reason: reason.to_string() }
    }


    pub(crate) fn invalid_dataset<S: ToString>(reason: S) -> Self {
        Self::InvalidDataset(reason.to_string())
    }
}
