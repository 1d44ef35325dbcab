//! Disjoint-window discrete Fourier transform.
//! Used only to learn the breakpoints of a model.
use std::f64::consts::PI;


/// Returns the disjoint windows of `series`.
/// There are `ceil(len / window_size)` windows.
/// The last window starts at `len - window_size`,
/// so that it overlaps its predecessor
/// when `len` is not a multiple of `window_size`.
///
/// # Panics
/// Panics if `window_size` is not in `[1, series.len()]`.
pub fn disjoint_windows(series: &[f64], window_size: usize) -> Vec<&[f64]> {
    let len = series.len();
    assert!(
        window_size > 0 && window_size <= len,
        "window size {window_size} is not in [1, {len}]",
    );
    let n_windows = len.div_ceil(window_size);

    (0..n_windows).map(|win| {
            let offset = (win * window_size).min(len - window_size);
            &series[offset..offset + window_size]
        })
        .collect()
}


/// Computes the first Fourier coefficients of a window directly.
#[derive(Debug, Clone, Copy)]
pub struct Dft {
    window_size: usize,
    n_coefficients: usize,
    start: usize,
    inverse_sqrt_window_size: f64,
}


impl Dft {
    /// Construct a new `Dft` that outputs `word_length` real values,
    /// i.e., `ceil(word_length / 2)` complex coefficients
    /// stored as `[re_0, im_0, re_1, im_1, ...]`.
    /// If `normalize` is `true`, the DC coefficient is skipped.
    pub fn new(window_size: usize, word_length: usize, normalize: bool)
        -> Self
    {
        Self {
            window_size,
            n_coefficients: word_length.div_ceil(2),
            start: usize::from(normalize),
            inverse_sqrt_window_size: 1.0 / (window_size as f64).sqrt(),
        }
    }


    /// Transform a window into its scaled Fourier coefficients.
    /// Every value is divided by `sqrt(window_size) * std(window)`.
    pub fn transform(&self, window: &[f64]) -> Vec<f64> {
        let factor = self.inverse_sqrt_window_size / std_dev(window);
        let mut dft = self.transform_unscaled(window);
        dft.iter_mut().for_each(|v| *v *= factor);
        dft
    }


    /// Transform every window of `windows`.
    pub fn transform_all(&self, windows: &[&[f64]]) -> Vec<Vec<f64>> {
        windows.iter()
            .map(|window| self.transform(window))
            .collect()
    }


    /// Fourier coefficients without any scaling.
    pub(crate) fn transform_unscaled(&self, window: &[f64]) -> Vec<f64> {
        let n = window.len() as f64;
        let two_pi = 2.0 * PI / n;

        let mut dft = Vec::with_capacity(2 * self.n_coefficients);
        for k in self.start..self.start + self.n_coefficients {
            let mut real = 0.0;
            let mut imag = 0.0;
            for (t, x) in window.iter().enumerate() {
                let angle = two_pi * (t * k) as f64;
                real += x * angle.cos();
                imag -= x * angle.sin();
            }
            dft.push(real);
            dft.push(imag);
        }
        dft
    }


    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}


/// Population standard deviation of `window`.
/// Returns `1.0` for a constant window.
#[inline(always)]
pub(crate) fn std_dev(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let (sum, square_sum) = window.iter()
        .fold((0.0, 0.0), |(s, ss), x| (s + x, ss + x * x));

    let mean = sum / n;
    let variance = square_sum / n - mean * mean;
    if variance > 0.0 { variance.sqrt() } else { 1.0 }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_and_last_offset() {
        let series = (0..10).map(|x| x as f64).collect::<Vec<_>>();

        let windows = disjoint_windows(&series, 4);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(windows[1], &[4.0, 5.0, 6.0, 7.0]);
        // The last window is anchored at `len - window_size`.
        assert_eq!(windows[2], &[6.0, 7.0, 8.0, 9.0]);

        let windows = disjoint_windows(&series, 5);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1], &[5.0, 6.0, 7.0, 8.0, 9.0]);

        let windows = disjoint_windows(&series, 10);
        assert_eq!(windows.len(), 1);
    }

    #[test]
    #[should_panic(expected = "window size 0")]
    fn zero_window_panics() {
        disjoint_windows(&[1.0, 2.0], 0);
    }

    #[test]
    #[should_panic(expected = "window size 3")]
    fn window_longer_than_series_panics() {
        disjoint_windows(&[1.0, 2.0], 3);
    }

    #[test]
    fn dc_coefficient_is_scaled_sum() {
        // mean 1.5, std 0.5
        let window = [1.0, 2.0, 1.0, 2.0];
        let dft = Dft::new(4, 2, false).transform(&window);
        assert_eq!(dft.len(), 2);
        let expected = 6.0 / (2.0 * 0.5);
        assert!((dft[0] - expected).abs() < 1e-12);
        assert!(dft[1].abs() < 1e-12);
    }

    #[test]
    fn normalize_skips_dc() {
        let window = [1.0, 2.0, 1.0, 2.0];
        let dft = Dft::new(4, 2, true).transform_unscaled(&window);
        // The first non-DC coefficient of a period-2 signal
        // over a window of 4 vanishes.
        assert!(dft[0].abs() < 1e-12);
        assert!(dft[1].abs() < 1e-12);
    }

    #[test]
    fn constant_window_falls_back_to_unit_std() {
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), 1.0);
        assert!((std_dev(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn odd_word_length_rounds_up() {
        let window = [1.0, 5.0, 2.0, 4.0, 3.0];
        let dft = Dft::new(5, 3, false).transform(&window);
        assert_eq!(dft.len(), 4);
    }
}
