//! Struct `Dataset` represents a batch of labeled time series.

// Provides dataset struct.
pub(crate) mod dataset_struct;

// Provides the dataset of multi-channel series.
pub(crate) mod multivariate;


pub use dataset_struct::Dataset;
pub use multivariate::MultivariateDataset;
