use finopt_core::Observer;
use tracing::info;

use crate::traits::{HasIteration, HasObjective};

/// An observer that emits an `info` event every `every` iterations.
///
/// Each event carries `solver`, `iteration`, and `objective` fields. Install
/// a `tracing` subscriber to see them. `TracingObserver` never requests an
/// action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingObserver {
    solver: &'static str,
    every: usize,
}

impl TracingObserver {
    /// Creates an observer that logs every iteration under `solver`.
    #[must_use]
    pub fn new(solver: &'static str) -> Self {
        Self { solver, every: 1 }
    }

    /// Logs only every `every`th iteration; zero is treated as one.
    #[must_use]
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    /// Returns `true` if `iteration` is logged.
    #[must_use]
    pub fn logs(&self, iteration: usize) -> bool {
        iteration % self.every == 0
    }
}

impl<E, A> Observer<E, A> for TracingObserver
where
    E: HasIteration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let iteration = event.iteration();
        if self.logs(iteration) {
            info!(
                solver = self.solver,
                iteration,
                objective = event.objective(),
                "solver progress"
            );
        }
        None
    }
}
