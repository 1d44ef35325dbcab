//! This file provides some common functions
//! such as vote normalization and accuracy.


/// Normalize `items` so that `\| items \|_1 = 1`.
/// If every item is zero, `items` becomes the uniform distribution.
#[inline(always)]
pub(crate) fn normalize(items: &mut [f64]) {
    let z = items.iter()
        .map(|it| it.abs())
        .sum::<f64>();

    if z == 0.0 {
        let uni = 1.0 / items.len() as f64;
        items.iter_mut()
            .for_each(|item| { *item = uni; });
        return;
    }

    items.iter_mut()
        .for_each(|item| { *item /= z; });
}


/// Returns the index of the maximal item.
/// Ties are broken by the smallest index.
#[inline(always)]
pub(crate) fn argmax(items: &[f64]) -> usize {
    let mut best = 0;
    for (k, item) in items.iter().enumerate().skip(1) {
        if *item > items[best] {
            best = k;
        }
    }
    best
}


/// Fraction of `predictions` that equal `labels`.
/// A missing prediction counts as a mistake.
#[inline(always)]
pub(crate) fn accuracy<I>(predictions: I, labels: &[usize]) -> f64
    where I: IntoIterator<Item = Option<usize>>,
{
    if labels.is_empty() { return 0.0; }

    let correct = predictions.into_iter()
        .zip(labels)
        .filter(|(p, y)| *p == Some(**y))
        .count();
    correct as f64 / labels.len() as f64
}
