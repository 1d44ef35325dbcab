//! Default values shared by the models and the parameter search.

/// Longest word a model ever produces.
/// Shorter words are derived by truncating words of this length.
pub const MAX_WORD_LENGTH:           usize = 16;
/// Word lengths tried for every window size, longest first.
pub const DEFAULT_WORD_LENGTHS: [usize; 5] = [16, 14, 12, 10, 8];
/// Number of symbols per position.
pub const DEFAULT_ALPHABET_SIZE:     usize = 4;
/// Normalization options tried by the search.
pub const DEFAULT_NORMALIZE_OPTIONS: [bool; 2] = [true, false];

/// Smallest window size tried by the search.
pub const MIN_WINDOW_SIZE:           usize = 10;
/// Largest window size relative to the series length.
pub const MAX_WINDOW_PROPORTION:       f64 = 1.0;
/// At most `series_length * WINDOW_SEARCH_PROPORTION` window sizes are tried.
pub const WINDOW_SEARCH_PROPORTION:    f64 = 0.25;

/// A configuration is kept only if its accuracy is at least
/// `CORRECT_THRESHOLD` times the best accuracy seen so far.
pub const CORRECT_THRESHOLD:           f64 = 0.92;

/// Fourier coefficients are rounded to `1 / ROUNDING_FACTOR`
/// before the breakpoints are learned.
pub const ROUNDING_FACTOR:             f64 = 100.0;

/// Packed words hold at most this many bits.
pub const WORD_BITS:                 usize = 64;

pub(crate) const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
pub(crate) const MEMBER_FILE_PREFIX:  &str = "boss_member_";
pub(crate) const DEFAULT_STORAGE_DIR: &str = "boss_members";
