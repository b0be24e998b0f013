//! Sample-average optimization of an expected objective.
//!
//! The solver draws `number_of_scenarios` equally likely parameter maps from
//! a caller-supplied generator and optimizes their sample mean through the
//! [`scenario`](crate::scenario) solver. The report adds the Monte Carlo
//! standard error of the expected objective.
//!
//! Draws use a [`StdRng`] seeded from [`Config::with_seed`], so a seeded
//! solve is reproducible.

mod config;
mod error;
mod solution;


pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::Solution;

pub use crate::penalty::{Action, Event, Status};

use finopt_core::{Constraint, Goal, Observer, Parameters, Scenario, VectorSpace};
use rand::rngs::StdRng;

use crate::scenario::{self, ScenarioGenerator};

/// Draws scenarios from `generator` and optimizes their sample mean.
///
/// # Errors
///
/// Returns an error if the underlying scenario solve fails.
pub fn optimize<V, F, G, Obs>(
    goal: Goal,
    objective: &F,
    generator: G,
    initial: &V,
    constraints: &[Constraint<V>],
    config: &Config,
    observer: Obs,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &Scenario) -> f64 + Sync,
    G: FnMut(&mut StdRng) -> Parameters,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let scenarios =
        ScenarioGenerator::new(config.seed()).generate(config.number_of_scenarios(), generator);
    optimize_with_scenarios(goal, objective, &scenarios, initial, constraints, config, observer)
}

/// Draws scenarios and optimizes without observer support.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_unobserved<V, F, G>(
    goal: Goal,
    objective: &F,
    generator: G,
    initial: &V,
    constraints: &[Constraint<V>],
    config: &Config,
) -> Result<Solution<V>, Error>
where
    V: VectorSpace,
    F: Fn(&V, &Scenario) -> f64 + Sync,
    G: FnMut(&mut StdRng) -> Parameters,
{
    optimize(goal, objective, generator, initial, constraints, config, ())
}

/// Optimizes over a pre-generated scenario list.
///
/// `config.number_of_scenarios()` and `config.seed()` are not used; the
/// standard error is based on the scenarios with positive probability.
///
/// # Errors
///
/// Returns an error if `scenarios` is empty or the scenario solve fails.
pub fn optimize_with_scenarios<V, F, Obs>(
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
    if scenarios.is_empty() {
        return Err(Error::NoScenarios);
    }

    let solution = scenario::optimize(
        goal,
        objective,
        scenarios,
        initial,
        constraints,
        config.solver(),
        observer,
    )?;

    let weighted = scenarios.iter().filter(|s| s.probability > 0.0).count();
    let standard_error = solution.objective_std_dev / (weighted as f64).sqrt();

    Ok(Solution {
        status: solution.status,
        x: solution.x,
        expected_objective: solution.expected_objective,
        outcomes: solution.outcomes,
        objective_variance: solution.objective_variance,
        objective_std_dev: solution.objective_std_dev,
        standard_error,
        number_of_scenarios: scenarios.len(),
        max_violation: solution.max_violation,
        iters: solution.iters,
    })
}
