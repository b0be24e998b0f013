//! Finite-difference derivatives.

use std::ops::Range;

/// Estimates the gradient of `f` at `x` by central differences.
///
/// Each coordinate is perturbed by `step * max(1, |x_i|)`. Coordinates
/// outside `support` are assumed not to affect `f` and get a zero partial
/// derivative; `None` differentiates every coordinate.
pub(crate) fn central_difference<F>(
    f: F,
    x: &[f64],
    step: f64,
    support: Option<Range<usize>>,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut gradient = vec![0.0; x.len()];
    let mut shifted = x.to_vec();

    for i in support.unwrap_or(0..x.len()) {
        let h = step * x[i].abs().max(1.0);
        let up = x[i] + h;
        let down = x[i] - h;

        shifted[i] = up;
        let forward = f(&shifted);
        shifted[i] = down;
        let backward = f(&shifted);
        shifted[i] = x[i];

        gradient[i] = (forward - backward) / (up - down);
    }

    gradient
}

/// Returns the largest absolute component, or zero for an empty slice.
pub(crate) fn inf_norm(x: &[f64]) -> f64 {
    x.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

/// Returns the standard inner product of two equal-length slices.
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
