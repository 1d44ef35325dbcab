//! Multiple Coefficient Binning (MCB).
//!
//! Learns, for every Fourier coefficient position,
//! `alphabet_size` equi-depth bins over the coefficients
//! of the disjoint windows of all training series.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    Dataset,
    constants::ROUNDING_FACTOR,
    transform::{Dft, disjoint_windows},
};


/// Breakpoints indexed by `[coefficient position][bin index]`.
/// Each row has `alphabet_size` non-decreasing entries
/// and the last entry is `+∞`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BreakpointRepr", into = "BreakpointRepr")]
pub struct BreakpointTable {
    rows: Vec<Vec<f64>>,
    alphabet_size: usize,
}


impl BreakpointTable {
    /// Learn the breakpoints from the disjoint windows of every series
    /// in `dataset`.
    pub fn fit(
        dataset: &Dataset,
        window_size: usize,
        word_length: usize,
        alphabet_size: usize,
        normalize: bool,
    ) -> Self
    {
        let dft = Dft::new(window_size, word_length, normalize);
        let n_series = dataset.shape().0;

        let dfts = (0..n_series).into_par_iter()
            .map(|i| {
                let windows = disjoint_windows(&dataset[i], window_size);
                dft.transform_all(&windows)
            })
            .collect::<Vec<_>>();

        let coefficients = dfts.into_iter()
            .flatten()
            .collect::<Vec<_>>();

        Self::from_coefficients(&coefficients, word_length, alphabet_size)
    }


    /// Learn the breakpoints from the pooled coefficient vectors.
    /// Each vector must have at least `word_length` values.
    pub fn from_coefficients(
        coefficients: &[Vec<f64>],
        word_length: usize,
        alphabet_size: usize,
    ) -> Self
    {
        let n_windows = coefficients.len();
        let depth = n_windows as f64 / alphabet_size as f64;

        let rows = (0..word_length).map(|letter| {
                let mut column = coefficients.iter()
                    .map(|dft| round(dft[letter]))
                    .collect::<Vec<_>>();
                column.sort_by(|a, b| a.total_cmp(b));

                let mut row = Vec::with_capacity(alphabet_size);
                let mut bin_index = 0.0;
                for _ in 0..alphabet_size - 1 {
                    bin_index += depth;
                    let ix = (bin_index as usize).min(n_windows - 1);
                    row.push(column[ix]);
                }
                row.push(f64::INFINITY);
                row
            })
            .collect();

        Self { rows, alphabet_size }
    }


    /// Returns the symbol of `value` at coefficient `position`:
    /// the first bin whose boundary is greater than or equal to `value`.
    /// Values not comparable to any boundary fall into the top bin.
    #[inline(always)]
    pub fn symbol(&self, position: usize, value: f64) -> usize {
        self.rows[position].iter()
            .position(|bp| value <= *bp)
            .unwrap_or(self.alphabet_size - 1)
    }


    /// Returns the breakpoints of coefficient `position`.
    pub fn row(&self, position: usize) -> &[f64] {
        &self.rows[position][..]
    }


    /// Returns the number of coefficient positions.
    pub fn word_length(&self) -> usize {
        self.rows.len()
    }


    /// Returns the number of bins per position.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }
}


/// Round to two decimals to damp noise in the coefficients.
#[inline(always)]
fn round(value: f64) -> f64 {
    (value * ROUNDING_FACTOR).round() / ROUNDING_FACTOR
}


// JSON has no infinity, so only the finite cut points are stored.
#[derive(Serialize, Deserialize)]
struct BreakpointRepr {
    alphabet_size: usize,
    cuts: Vec<Vec<f64>>,
}


impl From<BreakpointTable> for BreakpointRepr {
    fn from(table: BreakpointTable) -> Self {
        let cuts = table.rows.into_iter()
            .map(|mut row| { row.pop(); row })
            .collect();
        Self { alphabet_size: table.alphabet_size, cuts }
    }
}


impl From<BreakpointRepr> for BreakpointTable {
    fn from(repr: BreakpointRepr) -> Self {
        let rows = repr.cuts.into_iter()
            .map(|mut row| { row.push(f64::INFINITY); row })
            .collect();
        Self { rows, alphabet_size: repr.alphabet_size }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equi_depth_cut_points() {
        let coefficients = (0..8)
            .map(|i| vec![i as f64, -(i as f64)])
            .collect::<Vec<_>>();
        let table = BreakpointTable::from_coefficients(&coefficients, 2, 4);

        assert_eq!(table.row(0), &[2.0, 4.0, 6.0, f64::INFINITY]);
        assert_eq!(table.row(1), &[-5.0, -3.0, -1.0, f64::INFINITY]);
    }

    #[test]
    fn symbols() {
        let coefficients = (0..8)
            .map(|i| vec![i as f64])
            .collect::<Vec<_>>();
        let table = BreakpointTable::from_coefficients(&coefficients, 1, 4);

        assert_eq!(table.symbol(0, -3.0), 0);
        assert_eq!(table.symbol(0, 2.0), 0);
        assert_eq!(table.symbol(0, 2.5), 1);
        assert_eq!(table.symbol(0, 6.0), 2);
        assert_eq!(table.symbol(0, 100.0), 3);
        assert_eq!(table.symbol(0, f64::NAN), 3);
    }

    #[test]
    fn coefficients_are_rounded() {
        let coefficients = vec![
            vec![0.123], vec![0.456], vec![0.789], vec![1.011],
        ];
        let table = BreakpointTable::from_coefficients(&coefficients, 1, 2);
        assert_eq!(table.row(0), &[0.79, f64::INFINITY]);
    }

    #[test]
    fn json_keeps_the_infinite_top_bin() {
        let coefficients = (0..6)
            .map(|i| vec![i as f64, 2.0 * i as f64])
            .collect::<Vec<_>>();
        let table = BreakpointTable::from_coefficients(&coefficients, 2, 3);

        let json = serde_json::to_string(&table).unwrap();
        let restored: BreakpointTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, restored);
        assert_eq!(restored.row(1).last(), Some(&f64::INFINITY));
    }
}
