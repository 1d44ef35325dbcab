//! A single BOSS model with fixed parameters.

/// Defines `IndividualBoss` and its parameters.
pub mod individual_boss;

/// Defines a builder for `IndividualBoss`.
pub mod builder;


pub use individual_boss::{IndividualBoss, BossParams};
pub use builder::BossBuilder;
