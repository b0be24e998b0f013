use crate::penalty::Status;

/// The result of a multi-period solve.
#[derive(Debug, Clone)]
pub struct Solution<V> {
    /// Final solver status.
    pub status: Status,

    /// Optimized state of every period, first period first.
    pub trajectory: Vec<V>,

    /// Undiscounted objective of every period.
    pub period_objectives: Vec<f64>,

    /// `Σₜ δᵗ · period_objectives[t]`.
    pub total_objective: f64,

    /// Largest violation over all expanded constraints.
    pub max_violation: f64,

    /// Outer iteration count when the solver finished.
    pub iters: usize,

    /// Number of periods in the horizon.
    pub number_of_periods: usize,

    /// Per-period discount factor `δ`.
    pub discount_factor: f64,
}

impl<V> Solution<V> {
    /// Returns the final period's state.
    #[must_use]
    pub fn terminal_state(&self) -> Option<&V> {
        self.trajectory.last()
    }

    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}
