use finopt_core::VectorState;

/// Actions an observer can take during a robust solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and report the current candidate.
    StopEarly,
}

/// Emitted once per worst-case iteration, after sampling.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a, V> {
    /// Iteration number, starting at one.
    pub iteration: usize,

    /// Current candidate solution.
    pub x: &'a V,

    /// Worst objective among this iteration's samples.
    pub worst_case_objective: f64,

    /// Sample attaining `worst_case_objective`.
    pub worst_case_parameters: &'a VectorState,

    /// Worst objective over the parameters already in the model.
    pub model_objective: f64,

    /// Number of parameter vectors in the model.
    pub active_scenarios: usize,
}
