//! Worst-case optimization over an uncertainty set.
//!
//! # Algorithm
//!
//! The solver keeps a growing model of "active" parameter vectors, starting
//! with the nominal parameters, and alternates two steps:
//!
//! 1. Solve the epigraph problem over the active set with the
//!    [`penalty`](crate::penalty) engine: optimize `t` subject to
//!    `s·(f(x, p) − t) ≤ 0` for every active `p` plus the caller's
//!    constraints.
//! 2. Sample the uncertainty set at the new candidate and find the worst
//!    sample. If it is no worse than the model's worst case (within
//!    `tolerance`), the candidate is robust over the samples and the solve
//!    converges. Otherwise the worst sample joins the active set.
//!
//! The solve converges only if the last epigraph solve converged too. When
//! the caller's constraints cannot be met, the epigraph status (`MaxIters` or
//! `Stalled`) is reported together with the remaining `max_violation`.
//!
//! Sample evaluation runs on the rayon pool when the `parallel` feature is
//! enabled; results are collected in sample order, so parallel and serial
//! runs agree.
//!
//! "Worst" follows the goal: the largest value when minimizing and the
//! smallest when maximizing.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration after sampling. Observers
//! can return [`Action::StopEarly`] to keep the current candidate.

mod config;
mod error;
mod event;
mod program;
mod solution;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Action, Event};
pub use solution::Solution;

pub use crate::penalty::Status;

use finopt_core::{Constraint, Goal, Observer, VectorSpace, VectorState, max_violation};
use tracing::{debug, warn};

use crate::{
    penalty,
    sampling::{evaluate_all, rng_from_seed},
    uncertainty::{BoxUncertainty, DiscreteUncertainty, UncertaintySet},
};

use program::EpigraphProgram;

/// Finds the solution whose worst case over `set` is best.
///
/// `objective(x, p)` evaluates a candidate under parameters `p`.
///
/// # Errors
///
/// Returns an error if `set` reports a nominal point of the wrong dimension,
/// if the objective is not finite at a sampled point, or if an epigraph
/// solve fails.
pub fn optimize<V, U, F, Obs>(
    goal: Goal,
    set: &U,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    U: UncertaintySet,
    F: Fn(&V, &VectorState) -> f64 + Sync,
    Obs: for<'a> Observer<Event<'a, V>, Action>,
{
    let mut rng = rng_from_seed(config.seed());
    let nominal = set.nominal();
    if nominal.dimension() != set.dimension() {
        return Err(Error::NominalDimension {
            set: set.dimension(),
            nominal: nominal.dimension(),
        });
    }

    let mut active = vec![nominal.clone()];
    let mut epigraph = solve_epigraph(goal, objective, constraints, &active, initial, config)?;
    let mut samples = Vec::new();

    for iteration in 1..=config.max_iterations() {
        samples = set.sample_points(config.samples_per_iteration(), &mut rng);
        let x = &epigraph.x;
        let values = evaluate_at(objective, x, &samples);
        let Some((index, worst)) = goal.worst(&values) else {
            return finish(
                goal,
                objective,
                constraints,
                epigraph,
                &nominal,
                active,
                &samples,
                Status::Converged,
                iteration,
            );
        };
        if !worst.is_finite() {
            return Err(Error::NonFiniteObjective {
                parameters: samples[index].clone(),
                value: worst,
            });
        }

        let model_values = evaluate_at(objective, x, &active);
        let model = goal.worst(&model_values).map_or(worst, |(_, value)| value);

        debug!(
            iteration,
            worst_case_objective = worst,
            model_objective = model,
            active_scenarios = active.len(),
            "robust iteration"
        );

        let event = Event {
            iteration,
            x,
            worst_case_objective: worst,
            worst_case_parameters: &samples[index],
            model_objective: model,
            active_scenarios: active.len(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return finish(
                goal,
                objective,
                constraints,
                epigraph,
                &nominal,
                active,
                &samples,
                Status::StoppedByObserver,
                iteration,
            );
        }

        let slack = config.tolerance() * (1.0 + model.abs());
        if goal.transform(worst) <= goal.transform(model) + slack {
            return finish(
                goal,
                objective,
                constraints,
                epigraph,
                &nominal,
                active,
                &samples,
                Status::Converged,
                iteration,
            );
        }

        active.push(samples[index].clone());
        epigraph = solve_epigraph(goal, objective, constraints, &active, &epigraph.x, config)?;
    }

    warn!(
        max_iterations = config.max_iterations(),
        active_scenarios = active.len(),
        "robust solver reached the iteration limit"
    );
    finish(
        goal,
        objective,
        constraints,
        epigraph,
        &nominal,
        active,
        &samples,
        Status::MaxIters,
        config.max_iterations(),
    )
}

/// Finds a robust solution without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_unobserved<V, U, F>(
    goal: Goal,
    set: &U,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    U: UncertaintySet,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    optimize(goal, set, objective, constraints, initial, config, ())
}

/// Builds a [`BoxUncertainty`] and finds a robust solution over it.
///
/// # Errors
///
/// Returns an error if the box is malformed or the solve fails.
pub fn optimize_box<V, F>(
    goal: Goal,
    nominal: VectorState,
    deviations: VectorState,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    let set = BoxUncertainty::new(nominal, deviations)?;
    optimize(goal, &set, objective, constraints, initial, config, ())
}

/// Builds a [`DiscreteUncertainty`] and finds a robust solution over it.
///
/// The first point is treated as nominal. Every point is evaluated each
/// iteration, so the reported worst case is exact.
///
/// # Errors
///
/// Returns an error if the point list is malformed or the solve fails.
pub fn optimize_discrete<V, F>(
    goal: Goal,
    points: Vec<VectorState>,
    objective: &F,
    constraints: &[Constraint<V>],
    initial: &V,
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    let set = DiscreteUncertainty::new(points)?;
    optimize(goal, &set, objective, constraints, initial, config, ())
}

fn evaluate_at<V, F>(objective: &F, x: &V, points: &[VectorState]) -> Vec<f64>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    evaluate_all(points, |p| objective(x, p))
}

/// A candidate from an epigraph solve and the status that solve ended with.
struct Epigraph<V> {
    x: V,
    status: Status,
}

/// Solves the epigraph problem over `active`, starting from `x` and the
/// worst value over `active` at `x`.
fn solve_epigraph<V, F>(
    goal: Goal,
    objective: &F,
    constraints: &[Constraint<V>],
    active: &[VectorState],
    x: &V,
    config: &Config,
) -> Result<Epigraph<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    let values = evaluate_at(objective, x, active);
    let t = goal.worst(&values).map_or(f64::NAN, |(_, value)| value);

    let mut z = x.to_vec();
    z.push(t);

    let program = EpigraphProgram::new(goal, objective, constraints, active, x.dimension());
    let outcome = penalty::solve(goal, &program, z, config.solver(), ())?;
    if outcome.status != Status::Converged {
        warn!(
            status = ?outcome.status,
            max_violation = outcome.max_violation,
            active_scenarios = active.len(),
            "epigraph solve did not converge"
        );
    }

    Ok(Epigraph {
        x: V::from_slice(&outcome.x[..x.dimension()]),
        status: outcome.status,
    })
}

/// Evaluates the final candidate over the last samples and the active set.
///
/// A `Converged` outer status is downgraded to the epigraph status when the
/// last epigraph solve did not converge.
#[allow(clippy::too_many_arguments)]
fn finish<V, F>(
    goal: Goal,
    objective: &F,
    constraints: &[Constraint<V>],
    epigraph: Epigraph<V>,
    nominal: &VectorState,
    active: Vec<VectorState>,
    samples: &[VectorState],
    status: Status,
    iters: usize,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64 + Sync,
{
    let Epigraph { x, status: inner } = epigraph;
    let status = if status == Status::Converged { inner } else { status };

    let candidates: Vec<VectorState> = active.iter().chain(samples).cloned().collect();
    let values = evaluate_at(objective, &x, &candidates);

    // The nominal point is always active, so `candidates` is never empty.
    let (index, worst_case_objective) = goal.worst(&values).unwrap_or((0, f64::NAN));
    if !worst_case_objective.is_finite() {
        return Err(Error::NonFiniteObjective {
            parameters: candidates[index].clone(),
            value: worst_case_objective,
        });
    }

    Ok(Solution {
        status,
        nominal_objective: objective(&x, nominal),
        max_violation: max_violation(constraints, &x),
        x,
        worst_case_objective,
        worst_case_parameters: candidates[index].clone(),
        iters,
        active_scenarios: active,
    })
}
