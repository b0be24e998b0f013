//! Augmented Lagrangian solver for constrained nonlinear problems.
//!
//! # Algorithm
//!
//! The solver minimizes the Powell–Hestenes–Rockafellar augmented Lagrangian
//!
//! ```text
//! L(x) = s·f(x) + Σ_eq [λ h(x) + ρ/2 h(x)²]
//!               + Σ_ineq (1/2ρ) [max(0, μ + ρ g(x))² − μ²]
//! ```
//!
//! where `s` is `+1` when minimizing and `−1` when maximizing. Each outer
//! iteration minimizes `L` with a BFGS inner loop and an Armijo backtracking
//! line search, then updates the multipliers (`λ ← λ + ρh`,
//! `μ ← max(0, μ + ρg)`) and grows the penalty `ρ` if the violation did not
//! shrink enough.
//!
//! Objective gradients come from [`Objective::gradient`] when available and
//! from central finite differences otherwise. Constraint gradients are always
//! finite differences and are skipped for inactive inequalities.
//!
//! # Stopping
//!
//! The solve converges once the largest violation is within
//! `constraint_tolerance` and either the Lagrangian gradient is within
//! `gradient_tolerance` or both the relative objective change and the
//! relative step are within `tolerance`. Non-convergence is reported through
//! [`Status`], not as an error.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per outer iteration. Observers can return
//! [`Action::StopEarly`] to halt and keep the current iterate.

mod action;
mod bfgs;
mod config;
mod error;
mod event;
mod line_search;
mod merit;
mod search;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

pub(crate) use search::solve;

use finopt_core::{Constraint, Goal, Objective, Observer, VectorSpace};

use crate::program::StateProgram;

/// Optimizes `objective` subject to `constraints`, starting from `initial`.
///
/// The observer receives an [`Event`] after every outer iteration.
///
/// # Errors
///
/// Returns an error if `initial` has no components, if an analytic gradient
/// has the wrong dimension, or if the objective is not finite at `initial`.
pub fn optimize<V, F, Obs>(
    goal: Goal,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
    observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Objective<V>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let x0 = initial.to_vec();
    V::try_from_slice(&x0)?;

    let program = StateProgram::new(objective, constraints, x0.len());
    let outcome = solve(goal, &program, x0, config, observer)?;

    Ok(Solution {
        status: outcome.status,
        x: V::from_slice(&outcome.x),
        objective: outcome.objective,
        max_violation: outcome.max_violation,
        gradient_norm: outcome.gradient_norm,
        iters: outcome.iters,
    })
}

/// Optimizes without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_unobserved<V, F>(
    goal: Goal,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Objective<V>,
{
    optimize(goal, objective, constraints, initial, config, ())
}

/// Finds a constrained minimum without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn minimize_unobserved<V, F>(
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Objective<V>,
{
    optimize(Goal::Minimize, objective, constraints, initial, config, ())
}

/// Finds a constrained maximum without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn maximize_unobserved<V, F>(
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Objective<V>,
{
    optimize(Goal::Maximize, objective, constraints, initial, config, ())
}
