use finopt_core::VectorState;

use crate::penalty::Status;

/// The result of a robust solve.
#[derive(Debug, Clone)]
pub struct Solution<V> {
    /// Final solver status.
    pub status: Status,

    /// Robust solution.
    pub x: V,

    /// Worst objective at `x` over the final samples and the model's cuts.
    pub worst_case_objective: f64,

    /// Parameters attaining `worst_case_objective`.
    pub worst_case_parameters: VectorState,

    /// Objective at `x` under the nominal parameters.
    pub nominal_objective: f64,

    /// Largest violation of the caller's constraints at `x`.
    pub max_violation: f64,

    /// Worst-case iterations performed.
    pub iters: usize,

    /// Parameter vectors in the final model, nominal first.
    pub active_scenarios: Vec<VectorState>,
}

impl<V> Solution<V> {
    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}
