//! Exports the BOSS models and traits.
//!
pub use crate::dataset::{Dataset, MultivariateDataset};


pub use crate::error::{
    BossError,
    Result,
};


pub use crate::individual::{
    IndividualBoss,
    BossParams,
    BossBuilder,
};


pub use crate::ensemble::{
    BossEnsemble,
    BossSearch,
    SerialiseOption,
    MultivariateBoss,
    MultivariateSearch,
};


pub use crate::classifier::Classifier;
pub use crate::learner::Learner;
