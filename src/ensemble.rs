//! The BOSS ensemble and the parameter search that builds it.

/// Defines the trained ensemble.
pub mod boss_ensemble;

/// Defines the parameter search.
pub mod search;

/// Defines the members of an ensemble.
pub mod member;

/// Per-member persistence.
pub mod storage;

/// Defines the per-channel ensembles of multi-channel series.
pub mod multivariate_boss;

/// Defines the per-channel search.
pub mod multivariate_search;

mod admission;


pub use boss_ensemble::BossEnsemble;
pub use search::BossSearch;
pub use member::EnsembleMember;
pub use storage::{MemberStore, SerialiseOption};
pub use multivariate_boss::MultivariateBoss;
pub use multivariate_search::MultivariateSearch;
