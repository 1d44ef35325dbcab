//! Momentary Fourier transform over sliding windows.
//!
//! The DFT of the first window is computed directly.
//! Each following window (shifted by one sample) is obtained
//! by rotating the previous coefficients,
//! so that a window costs `O(word_length)` instead of `O(window_size)`.
use std::f64::consts::PI;

use super::dft::Dft;


/// Sliding-window Fourier transform of a whole series.
#[derive(Debug, Clone)]
pub struct Mft {
    window_size: usize,
    word_length: usize,
    dft: Dft,
    // Rotation factors `(re, im)` per retained coefficient.
    phis: Vec<(f64, f64)>,
    inverse_sqrt_window_size: f64,
}


impl Mft {
    /// Construct a new `Mft` producing `word_length` values per window.
    pub fn new(window_size: usize, word_length: usize, normalize: bool)
        -> Self
    {
        let start = usize::from(normalize);
        let n_coefficients = word_length.div_ceil(2);
        let phis = (start..start + n_coefficients)
            .map(|k| {
                let angle = 2.0 * PI * -(k as f64) / window_size as f64;
                (angle.cos(), -angle.sin())
            })
            .collect();

        Self {
            window_size,
            word_length,
            dft: Dft::new(window_size, word_length, normalize),
            phis,
            inverse_sqrt_window_size: 1.0 / (window_size as f64).sqrt(),
        }
    }


    /// Returns the scaled Fourier coefficients of every sliding window
    /// of `series`, in window order.
    /// Each vector has exactly `word_length` values.
    ///
    /// # Panics
    /// Panics if `window_size` is zero
    /// or longer than `series`.
    pub fn transform(&self, series: &[f64]) -> Vec<Vec<f64>> {
        let w = self.window_size;
        assert!(
            w > 0 && w <= series.len(),
            "window size {w} is not in [1, {}]", series.len(),
        );
        let n_windows = series.len() + 1 - w;
        let stds = sliding_std_devs(series, w);

        let mut transformed = Vec::with_capacity(n_windows);
        let mut mft = self.dft.transform_unscaled(&series[..w]);

        for t in 0..n_windows {
            if t > 0 {
                let diff = series[t + w - 1] - series[t - 1];
                mft.chunks_exact_mut(2)
                    .zip(&self.phis)
                    .for_each(|(coef, &(phi_re, phi_im))| {
                        let re = coef[0] + diff;
                        let im = coef[1];
                        coef[0] = re * phi_re - im * phi_im;
                        coef[1] = re * phi_im + phi_re * im;
                    });
            }

            let std = stds[t];
            let scale = if std > 0.0 { 1.0 / std } else { 1.0 };
            let factor = scale * self.inverse_sqrt_window_size;
            let coefficients = mft.iter()
                .take(self.word_length)
                .map(|v| v * factor)
                .collect::<Vec<_>>();
            transformed.push(coefficients);
        }
        transformed
    }


    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}


/// Standard deviation of every sliding window,
/// tracked with a rolling sum and sum of squares.
/// A constant window has standard deviation `0.0`.
pub(crate) fn sliding_std_devs(series: &[f64], window_size: usize)
    -> Vec<f64>
{
    let n_windows = series.len() + 1 - window_size;
    let r_window = 1.0 / window_size as f64;

    let mut sum = 0.0;
    let mut square_sum = 0.0;
    for x in &series[..window_size] {
        sum += x;
        square_sum += x * x;
    }

    let std_of = |sum: f64, square_sum: f64| {
        let mean = sum * r_window;
        let buf = square_sum * r_window - mean * mean;
        if buf > 0.0 { buf.sqrt() } else { 0.0 }
    };

    let mut stds = Vec::with_capacity(n_windows);
    stds.push(std_of(sum, square_sum));
    for w in 1..n_windows {
        let incoming = series[w + window_size - 1];
        let outgoing = series[w - 1];
        sum += incoming - outgoing;
        square_sum += incoming * incoming - outgoing * outgoing;
        stds.push(std_of(sum, square_sum));
    }
    stds
}
