/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Feasible and stationary within the configured tolerances.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// No descent direction remained while the iterate was not yet
    /// stationary or feasible.
    Stalled,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a penalty solve.
#[derive(Debug, Clone)]
pub struct Solution<V> {
    /// Final solver status.
    pub status: Status,

    /// Final iterate.
    pub x: V,

    /// Objective value at `x`.
    pub objective: f64,

    /// Largest constraint violation at `x`.
    pub max_violation: f64,

    /// ∞-norm of the Lagrangian gradient at `x`.
    pub gradient_norm: f64,

    /// Outer iteration count when the solver finished.
    pub iters: usize,
}

impl<V> Solution<V> {
    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}
