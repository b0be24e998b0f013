//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so one
//! observer can watch the penalty, multi-period, scenario, stochastic, and
//! robust solvers alike.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events that carry an outer iteration number
//! - [`HasObjective`] — events that carry an objective value
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use finopt_core::Observer;
//! use finopt_observers::traits::{CanStopEarly, HasIteration};
//!
//! struct IterationBudget {
//!     limit: usize,
//! }
//!
//! impl<E: HasIteration, A: CanStopEarly> Observer<E, A> for IterationBudget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.iteration() >= self.limit).then(A::stop_early)
//!     }
//! }
//! ```

use finopt_solvers::{penalty, robust};

/// An event that carries the solver's outer iteration number.
pub trait HasIteration {
    /// Returns the iteration number, starting at one.
    fn iteration(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- penalty::Event, shared by the multi-period, scenario, and stochastic solvers ---

impl HasIteration for penalty::Event<'_> {
    fn iteration(&self) -> usize {
        self.iteration
    }
}

impl HasObjective for penalty::Event<'_> {
    fn objective(&self) -> f64 {
        self.objective
    }
}

// --- robust::Event ---

impl<V> HasIteration for robust::Event<'_, V> {
    fn iteration(&self) -> usize {
        self.iteration
    }
}

/// The worst objective among the iteration's samples.
impl<V> HasObjective for robust::Event<'_, V> {
    fn objective(&self) -> f64 {
        self.worst_case_objective
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for penalty::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for robust::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
