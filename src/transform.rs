//! Fourier transforms over the windows of a series.
//!
//! - [`Dft`] transforms disjoint windows directly;
//!   it is only used to learn breakpoints.
//! - [`Mft`] transforms every sliding window incrementally;
//!   it is used to build every bag.

/// Disjoint windows and the direct DFT.
pub mod dft;

/// Incremental sliding-window transform.
pub mod mft;


pub use dft::{Dft, disjoint_windows};
pub use mft::Mft;
