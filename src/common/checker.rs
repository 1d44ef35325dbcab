//! This file defines some functions that checks some pre-conditions
//! E.g., window size vs. series length, alphabet size

use crate::{
    Dataset,
    BossError,
    Result,
    constants::{
        MAX_WORD_LENGTH,
        WORD_BITS,
    },
};


/// Check whether the training sample can be used for training.
#[inline(always)]
pub(crate) fn dataset(dataset: &Dataset) -> Result<()> {
    let (n_series, length) = dataset.shape();

    if n_series == 0 {
        return Err(BossError::invalid_dataset("the dataset has no series"));
    }
    if length == 0 {
        return Err(BossError::invalid_dataset("the series are empty"));
    }
    Ok(())
}


/// Check the window size against the series length.
#[inline(always)]
pub(crate) fn window_size(window_size: usize, length: usize) -> Result<()> {
    if window_size == 0 {
        return Err(BossError::invalid_parameter(
            "window_size", "window size must be positive"
        ));
    }
    if window_size > length {
        return Err(BossError::invalid_parameter(
            "window_size",
            format!(
                "window size {window_size} exceeds \
                 the series length {length}"
            ),
        ));
    }
    Ok(())
}


/// Check the alphabet size.
/// Each symbol occupies `bits_per_symbol(alphabet_size)` bits
/// and a word of maximal length must fit into a packed word.
#[inline(always)]
pub(crate) fn alphabet_size(alphabet_size: usize) -> Result<()> {
    if alphabet_size < 2 {
        return Err(BossError::invalid_parameter(
            "alphabet_size",
            format!("alphabet size must be at least 2. got {alphabet_size}"),
        ));
    }
    let bits = bits_per_symbol(alphabet_size);
    if bits * MAX_WORD_LENGTH > WORD_BITS {
        return Err(BossError::invalid_parameter(
            "alphabet_size",
            format!(
                "alphabet size {alphabet_size} needs {bits} bits per symbol; \
                 words of length {MAX_WORD_LENGTH} do not fit in \
                 {WORD_BITS} bits"
            ),
        ));
    }
    Ok(())
}


/// Check a word length requested at fit time.
#[inline(always)]
pub(crate) fn word_length(word_length: usize) -> Result<()> {
    if !(2..=MAX_WORD_LENGTH).contains(&word_length) {
        return Err(BossError::invalid_parameter(
            "word_length",
            format!(
                "word length must be in [2, {MAX_WORD_LENGTH}]. \
                 got {word_length}"
            ),
        ));
    }
    Ok(())
}


/// Check the relative accuracy threshold.
#[inline(always)]
pub(crate) fn correct_threshold(threshold: f64) -> Result<()> {
    if !(0f64..=1f64).contains(&threshold) {
        return Err(BossError::invalid_parameter(
            "correct_threshold",
            format!("threshold must be in [0, 1]. got {threshold}"),
        ));
    }
    Ok(())
}


/// Number of bits needed to store one symbol of the alphabet.
#[inline(always)]
pub(crate) fn bits_per_symbol(alphabet_size: usize) -> usize {
    let mut bits = 1;
    while (1_usize << bits) < alphabet_size {
        bits += 1;
    }
    bits
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_symbol() {
        assert_eq!(bits_per_symbol(2), 1);
        assert_eq!(bits_per_symbol(3), 2);
        assert_eq!(bits_per_symbol(4), 2);
        assert_eq!(bits_per_symbol(5), 3);
        assert_eq!(bits_per_symbol(16), 4);
    }

    #[test]
    fn test_alphabet_size() {
        assert!(alphabet_size(4).is_ok());
        assert!(alphabet_size(16).is_ok());
        assert!(alphabet_size(1).is_err());
        assert!(alphabet_size(17).is_err());
    }

    #[test]
    fn test_window_size() {
        assert!(window_size(8, 16).is_ok());
        assert!(window_size(16, 16).is_ok());
        assert!(window_size(0, 16).is_err());
        assert!(window_size(17, 16).is_err());
    }

    #[test]
    fn test_word_length() {
        assert!(word_length(2).is_ok());
        assert!(word_length(16).is_ok());
        assert!(word_length(1).is_err());
        assert!(word_length(17).is_err());
    }

    #[test]
    fn test_correct_threshold() {
        assert!(correct_threshold(0.92).is_ok());
        assert!(correct_threshold(1.5).is_err());
        assert!(correct_threshold(-0.1).is_err());
    }
}
