use approx::assert_relative_eq;

use finopt_core::{Constraint, Goal, VectorState};

use crate::uncertainty::{EllipsoidalUncertainty, UncertaintyError};

use super::{
    Action, Config, Error, Event, Status, optimize, optimize_box, optimize_discrete,
    optimize_unobserved,
};

fn portfolio_constraints(assets: usize) -> Vec<Constraint<VectorState>> {
    let mut constraints = vec![Constraint::budget()];
    constraints.extend(Constraint::non_negativity(assets));
    constraints
}

fn portfolio_return(w: &VectorState, returns: &VectorState) -> f64 {
    w.dot(returns)
}

#[test]
fn box_worst_case_prefers_the_safest_asset() {
    // Asset 0 leads nominally, but its worst case of 0.05 trails asset 1's
    // 0.09, so the robust portfolio holds asset 1.
    let config = Config::new(20, 16, 1e-6).unwrap().with_seed(1);

    let solution = optimize_box(
        Goal::Maximize,
        VectorState::from([0.14, 0.12, 0.08]),
        VectorState::from([0.09, 0.03, 0.01]),
        &portfolio_return,
        &portfolio_constraints(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &config,
    )
    .unwrap();

    assert!(solution.converged());
    assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[2], 0.0, epsilon = 1e-4);
    assert_relative_eq!(solution.worst_case_objective, 0.09, epsilon = 1e-4);
    assert_relative_eq!(solution.nominal_objective, 0.12, epsilon = 1e-4);
    assert_relative_eq!(solution.worst_case_parameters[1], 0.09, epsilon = 1e-12);
    assert!(solution.worst_case_objective <= solution.nominal_objective);
    assert!(solution.active_scenarios.len() >= 2);
    assert!(solution.max_violation <= 1e-6);
}

#[test]
fn zero_width_box_is_the_nominal_problem() {
    let nominal = VectorState::from([0.10, 0.15, 0.12]);
    let config = Config::new(10, 8, 1e-6).unwrap().with_seed(3);

    let solution = optimize_box(
        Goal::Maximize,
        nominal,
        VectorState::zeros(3),
        &portfolio_return,
        &portfolio_constraints(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &config,
    )
    .unwrap();

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 1);
    assert_eq!(solution.worst_case_objective, solution.nominal_objective);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-4);
}

#[test]
fn discrete_worst_case_is_exact() {
    // min_x max_p (x - p)² over p ∈ {1, 3} is attained at x = 2.
    let objective = |x: &VectorState, p: &VectorState| (x[0] - p[0]).powi(2);
    let points = vec![VectorState::from([1.0]), VectorState::from([3.0])];

    let solution = optimize_discrete(
        Goal::Minimize,
        points.clone(),
        &objective,
        &[],
        &VectorState::zeros(1),
        &Config::default(),
    )
    .unwrap();

    assert!(solution.converged());
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-4);
    assert_relative_eq!(solution.worst_case_objective, 1.0, epsilon = 1e-4);

    let exact = points
        .iter()
        .map(|p| objective(&solution.x, p))
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(solution.worst_case_objective, exact);
    assert_eq!(solution.nominal_objective, objective(&solution.x, &points[0]));
}

#[test]
fn observer_can_stop_after_the_nominal_solve() {
    let objective = |x: &VectorState, p: &VectorState| (x[0] - p[0]).powi(2);
    let points = vec![VectorState::from([1.0]), VectorState::from([3.0])];
    let set = crate::uncertainty::DiscreteUncertainty::new(points).unwrap();

    let mut seen = Vec::new();
    let observer = |event: &Event<'_, VectorState>| {
        seen.push((event.iteration, event.active_scenarios));
        Some(Action::StopEarly)
    };

    let solution = optimize(
        Goal::Minimize,
        &set,
        &objective,
        &[],
        &VectorState::zeros(1),
        &Config::default(),
        observer,
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 1);
    assert_eq!(seen, vec![(1, 1)]);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-4);
    assert_relative_eq!(solution.worst_case_objective, 4.0, epsilon = 1e-3);
}

#[test]
fn seeded_runs_are_reproducible() {
    let set = EllipsoidalUncertainty::new(
        VectorState::from([0.10, 0.12]),
        vec![vec![0.0004, 0.0001], vec![0.0001, 0.0009]],
        2.0,
    )
    .unwrap();
    let objective = |w: &VectorState, p: &VectorState| w.dot(p) - 0.5 * w.dot(w);
    let config = Config::new(10, 32, 1e-6).unwrap().with_seed(7);

    let run = || {
        optimize_unobserved(
            Goal::Maximize,
            &set,
            &objective,
            &[],
            &VectorState::zeros(2),
            &config,
        )
        .unwrap()
    };
    let (a, b) = (run(), run());

    assert_eq!(a.x, b.x);
    assert_eq!(a.iters, b.iters);
    assert_eq!(a.worst_case_objective, b.worst_case_objective);
    assert!(a.worst_case_objective <= a.nominal_objective + 1e-9);
}

#[test]
fn malformed_boxes_are_rejected() {
    let result = optimize_box(
        Goal::Maximize,
        VectorState::from([0.10, 0.12]),
        VectorState::from([0.01]),
        &portfolio_return,
        &portfolio_constraints(2),
        &VectorState::from([0.5, 0.5]),
        &Config::default(),
    );

    assert!(matches!(
        result,
        Err(Error::Uncertainty(UncertaintyError::Dimension { .. }))
    ));
}

#[test]
fn non_finite_samples_are_reported() {
    let objective = |x: &VectorState, p: &VectorState| x[0] * x[0] + p[0].ln();
    let points = vec![VectorState::from([1.0]), VectorState::from([-1.0])];

    let result = optimize_discrete(
        Goal::Minimize,
        points,
        &objective,
        &[],
        &VectorState::from([0.5]),
        &Config::default(),
    );

    match result {
        Err(Error::NonFiniteObjective { parameters, value }) => {
            assert_eq!(parameters, VectorState::from([-1.0]));
            assert!(value.is_nan());
        }
        other => panic!("expected a non-finite objective error, got {other:?}"),
    }
}

#[test]
fn contradictory_constraints_are_not_converged() {
    // x = 1 and x = 2 cannot both hold, so no candidate is feasible.
    let constraints = vec![
        Constraint::equality(|x: &VectorState| x[0] - 1.0),
        Constraint::equality(|x: &VectorState| x[0] - 2.0),
    ];
    let points = vec![VectorState::from([1.0]), VectorState::from([0.5])];

    let solution = optimize_discrete(
        Goal::Minimize,
        points,
        &|x: &VectorState, p: &VectorState| x[0] * p[0],
        &constraints,
        &VectorState::from([1.5]),
        &Config::default(),
    )
    .unwrap();

    assert!(!solution.converged());
    assert!(matches!(solution.status, Status::MaxIters | Status::Stalled));
    assert!(solution.max_violation > 0.25);
}

#[test]
fn iteration_limit_is_reported() {
    // The nominal solve holds asset 0, whose worst case is far below the
    // model, so one iteration is never enough.
    let config = Config::new(1, 16, 1e-6).unwrap().with_seed(5);

    let solution = optimize_box(
        Goal::Maximize,
        VectorState::from([0.14, 0.12, 0.08]),
        VectorState::from([0.09, 0.03, 0.01]),
        &portfolio_return,
        &portfolio_constraints(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &config,
    )
    .unwrap();

    assert_eq!(solution.status, Status::MaxIters);
    assert!(!solution.converged());
    assert_eq!(solution.iters, 1);
    assert_eq!(solution.active_scenarios.len(), 2);
}
