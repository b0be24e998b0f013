//! Multi-period trajectory optimization.
//!
//! A trajectory holds one state per period. The solver treats the whole
//! trajectory as a single decision vector, the concatenation of every
//! period's state, and hands it to the [`penalty`](crate::penalty) engine.
//!
//! The objective is period-aware, `f(t, x_t)`, and the total objective is
//! discounted:
//!
//! ```text
//! total = Σₜ δᵗ f(t, x_t),   δ = 1 / (1 + discount_rate)
//! ```
//!
//! Use [`stationary`] to lift a period-agnostic objective.
//!
//! [`PeriodConstraint`] covers per-period, terminal, transition, whole-path,
//! and cumulative constraints. Each expanded residual only reads the periods
//! it names, so finite-difference gradients only perturb those blocks.
//!
//! With a single period the problem and its solution coincide with a
//! [`penalty`](crate::penalty) solve of the same objective and constraints.

mod config;
mod constraint;
mod error;
mod program;
mod solution;


pub use config::{Config, ConfigError};
pub use constraint::{PeriodConstraint, all_satisfied};
pub use error::Error;
pub use solution::Solution;

pub use crate::penalty::{Action, Event, Status};

use finopt_core::{DimensionMismatch, Goal, Observer, VectorSpace};

use crate::penalty;

use program::TrajectoryProgram;

/// Lifts a period-agnostic objective to a period-aware one.
pub fn stationary<V, F>(objective: F) -> impl Fn(usize, &V) -> f64
where
    F: Fn(&V) -> f64,
{
    move |_: usize, x: &V| objective(x)
}

/// Optimizes a trajectory that starts with `initial` in every period.
///
/// The observer receives a [`penalty::Event`] per outer iteration, with the
/// joint decision vector as `x`.
///
/// # Errors
///
/// Returns an error if `initial` has no components or the objective is not
/// finite at the initial trajectory.
pub fn optimize<V, F, Obs>(
    goal: Goal,
    objective: &F,
    constraints: &[PeriodConstraint<V>],
    initial: &V,
    config: &Config,
    observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(usize, &V) -> f64,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let initial = vec![initial.clone(); config.number_of_periods()];
    optimize_trajectory(goal, objective, constraints, &initial, config, observer)
}

/// Optimizes from a replicated initial state without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_unobserved<V, F>(
    goal: Goal,
    objective: &F,
    constraints: &[PeriodConstraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(usize, &V) -> f64,
{
    optimize(goal, objective, constraints, initial, config, ())
}

/// Optimizes starting from a full initial trajectory.
///
/// # Errors
///
/// Returns an error if `initial` does not have `number_of_periods` states,
/// if the states differ in dimension, or if the underlying solve fails.
pub fn optimize_trajectory<V, F, Obs>(
    goal: Goal,
    objective: &F,
    constraints: &[PeriodConstraint<V>],
    initial: &[V],
    config: &Config,
    observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(usize, &V) -> f64,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let periods = config.number_of_periods();
    if initial.len() != periods {
        return Err(Error::TrajectoryLength {
            expected: periods,
            actual: initial.len(),
        });
    }

    let dimension = initial[0].dimension();
    let mut x0 = Vec::with_capacity(periods * dimension);
    for (period, state) in initial.iter().enumerate() {
        if state.dimension() != dimension {
            return Err(Error::PeriodDimension {
                period,
                source: DimensionMismatch {
                    expected: dimension,
                    actual: state.dimension(),
                },
            });
        }
        x0.extend_from_slice(state.as_slice());
    }

    let program = TrajectoryProgram::new(
        objective,
        constraints,
        periods,
        dimension,
        config.discount_factor(),
        config.solver().finite_difference_step(),
    );
    let outcome = penalty::solve(goal, &program, x0, config.solver(), observer)?;

    let trajectory = program.trajectory(&outcome.x);
    let period_objectives = program.period_objectives(&outcome.x);

    Ok(Solution {
        status: outcome.status,
        trajectory,
        period_objectives,
        total_objective: outcome.objective,
        max_violation: outcome.max_violation,
        iters: outcome.iters,
        number_of_periods: periods,
        discount_factor: config.discount_factor(),
    })
}
