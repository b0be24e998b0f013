use crate::{penalty::Status, scenario::ScenarioOutcome};

/// The result of a sampled expected-value solve.
#[derive(Debug, Clone)]
pub struct Solution<V> {
    /// Final solver status.
    pub status: Status,

    /// Optimized state.
    pub x: V,

    /// Sample mean of the objective at `x`.
    pub expected_objective: f64,

    /// Objective of every drawn scenario at `x`.
    pub outcomes: Vec<ScenarioOutcome>,

    /// Probability-weighted variance of the scenario objectives.
    pub objective_variance: f64,

    /// Square root of `objective_variance`.
    pub objective_std_dev: f64,

    /// `objective_std_dev / √n` over the `n` scenarios with positive
    /// probability, the Monte Carlo error of `expected_objective`.
    pub standard_error: f64,

    /// Number of scenarios the solve was given.
    pub number_of_scenarios: usize,

    /// Largest constraint violation at `x`.
    pub max_violation: f64,

    /// Outer iteration count when the solver finished.
    pub iters: usize,
}

impl<V> Solution<V> {
    /// Returns `true` if the solver converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Returns the outcome of the scenario called `name`.
    ///
    /// If several scenarios share a name, the first one is returned.
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.name == name)
    }

    /// Returns the objective of the scenario called `name`.
    #[must_use]
    pub fn objective_for(&self, name: &str) -> Option<f64> {
        self.scenario(name).map(|outcome| outcome.objective)
    }
}
