use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{
    BreakpointTable,
    common::checker,
};


/// A word of symbols packed into a `u64`.
/// The first symbol occupies the most significant used bits,
/// so that truncating a word to its leading symbols is a shift.
///
/// Two words are equal iff their symbol sequences are equal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize,
)]
pub struct SfaWord {
    bits: u64,
    length: u8,
    symbol_bits: u8,
}


impl SfaWord {
    /// Construct an empty word over an alphabet of `alphabet_size` symbols.
    #[inline]
    pub fn empty(alphabet_size: usize) -> Self {
        let symbol_bits = checker::bits_per_symbol(alphabet_size) as u8;
        Self { bits: 0, length: 0, symbol_bits }
    }


    /// Construct a word from a sequence of symbols.
    pub fn from_symbols(symbols: &[usize], alphabet_size: usize) -> Self {
        let mut word = Self::empty(alphabet_size);
        symbols.iter()
            .for_each(|&s| word.push(s));
        word
    }


    /// Quantize a coefficient vector with `breakpoints`.
    /// The word has `breakpoints.word_length()` symbols.
    pub fn from_coefficients(
        coefficients: &[f64],
        breakpoints: &BreakpointTable,
    ) -> Self
    {
        let mut word = Self::empty(breakpoints.alphabet_size());
        coefficients.iter()
            .take(breakpoints.word_length())
            .enumerate()
            .for_each(|(position, &value)| {
                word.push(breakpoints.symbol(position, value));
            });
        word
    }


    /// Append `symbol` at the end of this word.
    #[inline(always)]
    pub fn push(&mut self, symbol: usize) {
        self.bits = (self.bits << self.symbol_bits) | symbol as u64;
        self.length += 1;
    }


    /// Returns the word made of the first `length` symbols.
    /// If `length >= self.len()`, the word is returned as it is.
    #[inline(always)]
    pub fn truncate(&self, length: usize) -> Self {
        let current = self.len();
        if length >= current { return *self; }

        let shift = ((current - length) * self.symbol_bits as usize) as u32;
        let bits = self.bits.checked_shr(shift).unwrap_or(0);
        Self { bits, length: length as u8, symbol_bits: self.symbol_bits }
    }


    /// Returns the `i`-th symbol.
    #[inline]
    pub fn symbol(&self, i: usize) -> usize {
        assert!(i < self.len(), "symbol index {i} out of range");
        let shift = (self.len() - 1 - i) * self.symbol_bits as usize;
        let mask = (1_u64 << self.symbol_bits) - 1;
        ((self.bits >> shift) & mask) as usize
    }


    /// Returns the symbols of this word.
    pub fn symbols(&self) -> Vec<usize> {
        (0..self.len()).map(|i| self.symbol(i)).collect()
    }


    /// Returns the number of symbols.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length as usize
    }


    /// Returns `true` if the word has no symbol.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}


impl fmt::Display for SfaWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = self.symbols()
            .into_iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "[{word}]")
    }
}
