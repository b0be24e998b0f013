//! Shared problem fixtures for the end-to-end tests.

use finopt_core::{Constraint, VectorState};

/// Budget and non-negativity constraints for a fully invested, long-only
/// portfolio of `assets` assets.
#[must_use]
pub fn long_only(assets: usize) -> Vec<Constraint<VectorState>> {
    let mut constraints = vec![Constraint::budget()];
    constraints.extend(Constraint::non_negativity(assets));
    constraints
}

/// Requires every component to lie in `[0, 1]`.
#[must_use]
pub fn unit_box(dimension: usize) -> Vec<Constraint<VectorState>> {
    let mut constraints = Constraint::non_negativity(dimension);
    constraints.extend((0..dimension).map(|i| Constraint::upper_bound(i, 1.0)));
    constraints
}

/// Requires `coefficients · x <= limit`.
#[must_use]
pub fn linear_limit(coefficients: Vec<f64>, limit: f64) -> Constraint<VectorState> {
    Constraint::inequality(move |x: &VectorState| {
        coefficients.iter().zip(x.iter()).map(|(c, xi)| c * xi).sum::<f64>() - limit
    })
    .labelled("linear_limit")
}

/// Returns `xᵀ Σ x` for a dense covariance matrix.
#[must_use]
pub fn quadratic_form(x: &VectorState, covariance: &[Vec<f64>]) -> f64 {
    covariance
        .iter()
        .enumerate()
        .map(|(i, row)| x[i] * row.iter().zip(x.iter()).map(|(s, xj)| s * xj).sum::<f64>())
        .sum()
}
