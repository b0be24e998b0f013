use crate::VectorSpace;

/// A scalar objective over a state.
///
/// Closures of the form `Fn(&V) -> f64` implement this trait directly, in
/// which case solvers estimate gradients by central finite differences. Wrap
/// a value function and its analytic gradient in [`WithGradient`] to skip
/// the finite-difference evaluations.
///
/// Objectives must be pure: the same state always yields the same value.
pub trait Objective<V: VectorSpace> {
    /// Computes the objective value at `x`.
    fn value(&self, x: &V) -> f64;

    /// Computes the analytic gradient at `x`, if one is available.
    ///
    /// The returned vector must have the same dimension as `x`.
    fn gradient(&self, _x: &V) -> Option<V> {
        None
    }
}

impl<V, F> Objective<V> for F
where
    V: VectorSpace,
    F: Fn(&V) -> f64,
{
    fn value(&self, x: &V) -> f64 {
        self(x)
    }
}

/// An objective with an analytic gradient.
#[derive(Debug, Clone, Copy)]
pub struct WithGradient<F, G> {
    pub value: F,
    pub gradient: G,
}

impl<F, G> WithGradient<F, G> {
    /// Pairs a value function with its gradient.
    pub fn new(value: F, gradient: G) -> Self {
        Self { value, gradient }
    }
}

impl<V, F, G> Objective<V> for WithGradient<F, G>
where
    V: VectorSpace,
    F: Fn(&V) -> f64,
    G: Fn(&V) -> V,
{
    fn value(&self, x: &V) -> f64 {
        (self.value)(x)
    }

    fn gradient(&self, x: &V) -> Option<V> {
        Some((self.gradient)(x))
    }
}
