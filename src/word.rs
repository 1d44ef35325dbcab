//! Symbolic words and the bags (histograms) built from them.

/// Packed symbolic words.
pub mod sfa_word;

/// Word histograms with numerosity reduction.
pub mod bag;


pub use sfa_word::SfaWord;
pub use bag::Bag;
