use finopt_core::{Goal, Observer};
use tracing::{debug, warn};

use crate::{
    gradient::{dot, inf_norm},
    program::Program,
};

use super::{
    Action, Config, Error, Event, Status,
    bfgs::InverseHessian,
    line_search::backtrack,
    merit::Merit,
};

/// Outer rounds with a stalled, motionless inner solve before giving up.
const STALL_LIMIT: usize = 2;

/// The flattened result of a penalty solve.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) status: Status,
    pub(crate) x: Vec<f64>,
    pub(crate) objective: f64,
    pub(crate) max_violation: f64,
    pub(crate) gradient_norm: f64,
    pub(crate) iters: usize,
}

/// Solves `program` from `initial` with the augmented Lagrangian method.
///
/// Every solver in the crate funnels into this function.
pub(crate) fn solve<P, Obs>(
    goal: Goal,
    program: &P,
    initial: Vec<f64>,
    config: &Config,
    mut observer: Obs,
) -> Result<Outcome, Error>
where
    P: Program,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    if program.dimension() == 0 {
        return Err(Error::EmptyState);
    }
    debug_assert_eq!(initial.len(), program.dimension());

    let initial_objective = program.objective(&initial);
    if !initial_objective.is_finite() {
        return Err(Error::NonFiniteObjective {
            value: initial_objective,
        });
    }

    let mut merit = Merit::new(program, goal, config);
    let mut x = initial;
    let mut objective = initial_objective;
    let mut previous_violation = program.max_violation(&x);
    let mut gradient_norm = f64::INFINITY;
    let mut stalled_rounds = 0;

    for iteration in 1..=config.max_iterations() {
        let inner = minimize_merit(&merit, x.clone(), config)?;

        let residuals = merit.residuals(&inner.x);
        let violation = residuals
            .iter()
            .enumerate()
            .map(|(j, &r)| program.constraint_kind(j).violation(r))
            .fold(0.0, f64::max);
        let next_objective = program.objective(&inner.x);

        let change = (next_objective - objective).abs() / objective.abs().max(1.0);
        let moved: Vec<f64> = inner.x.iter().zip(&x).map(|(a, b)| a - b).collect();
        let step = inf_norm(&moved) / inf_norm(&x).max(1.0);

        x = inner.x;
        objective = next_objective;

        // The inner gradient with the old multipliers equals the Lagrangian
        // gradient with the updated ones.
        gradient_norm = inner.gradient_norm;
        let penalty = merit.penalty();

        debug!(
            iteration,
            objective,
            max_violation = violation,
            gradient_norm,
            penalty,
            inner_iterations = inner.iterations,
            "penalty outer iteration"
        );

        let event = Event {
            iteration,
            x: &x,
            objective,
            max_violation: violation,
            gradient_norm,
            penalty,
        };
        let outcome = |status| Outcome {
            status,
            x: x.clone(),
            objective,
            max_violation: violation,
            gradient_norm,
            iters: iteration,
        };

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(outcome(Status::StoppedByObserver));
        }

        let feasible = violation <= config.constraint_tolerance();
        let stationary = gradient_norm <= config.gradient_tolerance()
            || (iteration > 1 && change <= config.tolerance() && step <= config.tolerance());
        if feasible && stationary {
            return Ok(outcome(Status::Converged));
        }

        if inner.stalled && step == 0.0 {
            stalled_rounds += 1;
            if stalled_rounds >= STALL_LIMIT {
                warn!(
                    iteration,
                    max_violation = violation,
                    gradient_norm,
                    "penalty solver stalled: no descent direction"
                );
                return Ok(outcome(Status::Stalled));
            }
        } else {
            stalled_rounds = 0;
        }

        merit.update_multipliers(&residuals);
        if violation > 0.25 * previous_violation {
            merit.grow_penalty();
        }
        previous_violation = violation;
    }

    warn!(
        max_iterations = config.max_iterations(),
        max_violation = previous_violation,
        "penalty solver reached the iteration limit"
    );

    Ok(Outcome {
        status: Status::MaxIters,
        x,
        objective,
        max_violation: previous_violation,
        gradient_norm,
        iters: config.max_iterations(),
    })
}

/// The result of one inner minimization.
struct Inner {
    x: Vec<f64>,
    gradient_norm: f64,
    iterations: usize,
    stalled: bool,
}

/// Minimizes the merit function with BFGS for fixed multipliers.
fn minimize_merit<P: Program>(
    merit: &Merit<'_, P>,
    mut x: Vec<f64>,
    config: &Config,
) -> Result<Inner, Error> {
    let (mut value, mut gradient) = merit.value_and_gradient(&x)?;
    let mut hessian = InverseHessian::identity(x.len());
    let mut iterations = 0;
    let mut stalled = false;

    while iterations < config.max_inner_iterations() {
        if inf_norm(&gradient) <= config.gradient_tolerance() {
            break;
        }

        let mut direction = hessian.direction(&gradient);
        let mut slope = dot(&gradient, &direction);
        if !(slope < -config.min_derivative()) {
            hessian.reset();
            direction = gradient.iter().map(|g| -g).collect();
            slope = dot(&gradient, &direction);
            if !(slope < -config.min_derivative()) {
                stalled = true;
                break;
            }
        }

        let alpha = if hessian.is_fresh() {
            (1.0 / inf_norm(&direction)).min(1.0)
        } else {
            1.0
        };

        let Some(step) = backtrack(|p| merit.value(p), &x, value, &direction, slope, alpha) else {
            if hessian.is_fresh() {
                stalled = true;
                break;
            }
            hessian.reset();
            continue;
        };
        iterations += 1;

        let (_, next_gradient) = merit.value_and_gradient(&step.x)?;
        let s: Vec<f64> = step.x.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = next_gradient.iter().zip(&gradient).map(|(a, b)| a - b).collect();
        hessian.update(&s, &y);

        let change = (value - step.value).abs() / value.abs().max(1.0);
        let moved = inf_norm(&s) / inf_norm(&x).max(1.0);

        x = step.x;
        value = step.value;
        gradient = next_gradient;

        if change <= config.tolerance() && moved <= config.tolerance() {
            break;
        }
    }

    Ok(Inner {
        gradient_norm: inf_norm(&gradient),
        x,
        iterations,
        stalled,
    })
}
