//! Expected-value optimization over a finite set of scenarios.
//!
//! Each [`Scenario`] carries a probability and named parameters. The solver
//! optimizes the probability-weighted mean
//!
//! ```text
//! E[f](x) = Σᵢ (pᵢ / Σⱼ pⱼ) · f(x, sᵢ)
//! ```
//!
//! with the [`penalty`](crate::penalty) engine, subject to constraints that
//! hold in every scenario. Scenarios with zero probability are excluded from
//! the expectation but still reported in [`Solution::outcomes`].
//!
//! Per-scenario evaluation runs on the rayon pool when the `parallel`
//! feature is enabled.
//!
//! [`ScenarioGenerator`] produces equally likely scenarios from common
//! distributions or by resampling history.

mod error;
mod expectation;
mod generator;
mod solution;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use generator::{GeneratorError, ScenarioGenerator, parameter_key, scenario_name};
pub use solution::{ScenarioOutcome, Solution};

pub use crate::penalty::{Action, Config, Event, Status};

use finopt_core::{Constraint, Goal, Observer, Scenario, VectorSpace};
use tracing::debug;

use crate::{penalty, sampling::evaluate_all};

use expectation::Expectation;

/// Optimizes the expected objective over `scenarios`.
///
/// The observer receives a [`penalty::Event`] per outer iteration, where
/// `objective` is the expected value.
///
/// # Errors
///
/// Returns an error if `scenarios` is empty, if a probability lies outside
/// `[0, 1]`, if the probabilities sum to zero, or if the solve fails.
pub fn optimize<V, F, Obs>(
    goal: Goal,
    objective: &F,
    scenarios: &[Scenario],
    initial: &V,
    constraints: &[Constraint<V>],
    config: &Config,
    observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &Scenario) -> f64 + Sync,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let expectation = Expectation::new(objective, scenarios)?;
    let expected = |x: &V| expectation.mean(&expectation.values(x));

    let solution = penalty::optimize(goal, &expected, constraints, initial, config, observer)?;

    let values = expectation.values(&solution.x);
    let expected_objective = expectation.mean(&values);
    let objective_variance = expectation.variance(&values, expected_objective);

    let objectives = evaluate_all(scenarios, |scenario| objective(&solution.x, scenario));
    let outcomes = scenarios
        .iter()
        .zip(objectives)
        .map(|(scenario, objective)| ScenarioOutcome {
            name: scenario.name.clone(),
            probability: scenario.probability,
            objective,
        })
        .collect();

    debug!(
        scenarios = scenarios.len(),
        expected_objective,
        objective_variance,
        "scenario solve finished"
    );

    Ok(Solution {
        status: solution.status,
        x: solution.x,
        expected_objective,
        outcomes,
        objective_variance,
        objective_std_dev: objective_variance.sqrt(),
        max_violation: solution.max_violation,
        iters: solution.iters,
    })
}

/// Optimizes the expected objective without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_unobserved<V, F>(
    goal: Goal,
    objective: &F,
    scenarios: &[Scenario],
    initial: &V,
    constraints: &[Constraint<V>],
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &Scenario) -> f64 + Sync,
{
    optimize(goal, objective, scenarios, initial, constraints, config, ())
}

/// Optimizes over scenarios that each fix a single parameter.
///
/// Every `(name, probability, value)` entry becomes a scenario whose only
/// parameter is `parameter = value`.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_weighted<V, F>(
    goal: Goal,
    outcomes: &[(&str, f64, f64)],
    parameter: &str,
    objective: &F,
    initial: &V,
    constraints: &[Constraint<V>],
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &Scenario) -> f64 + Sync,
{
    let scenarios: Vec<Scenario> = outcomes
        .iter()
        .map(|&(name, probability, value)| {
            Scenario::new(name, probability).with_parameter(parameter, value)
        })
        .collect();

    optimize(goal, objective, &scenarios, initial, constraints, config, ())
}
