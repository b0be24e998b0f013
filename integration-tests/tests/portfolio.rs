use approx::assert_relative_eq;

use finopt_core::{Chain, Goal, VectorState};
use finopt_observers::{History, Target, TracingObserver};
use finopt_solvers::{
    penalty::{self, Config, Status},
    robust,
    uncertainty::EllipsoidalUncertainty,
};
use integration_tests::{long_only, quadratic_form};

const RETURNS: [f64; 3] = [0.10, 0.15, 0.12];
const VARIANCES: [f64; 3] = [0.04, 0.09, 0.0625];

fn diagonal(values: &[f64]) -> Vec<Vec<f64>> {
    (0..values.len())
        .map(|i| (0..values.len()).map(|j| if i == j { values[i] } else { 0.0 }).collect())
        .collect()
}

#[test]
fn maximum_return_concentrates_on_the_best_asset() {
    let returns = VectorState::from(RETURNS);
    let solution = penalty::maximize_unobserved(
        &|w: &VectorState| w.dot(&returns),
        &long_only(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &Config::default(),
    )
    .unwrap();

    assert!(solution.converged());
    assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-4);
    assert_relative_eq!(solution.x[2], 0.0, epsilon = 1e-4);
    assert_relative_eq!(solution.objective, 0.15, epsilon = 1e-4);
}

#[test]
fn mean_variance_matches_the_stationarity_conditions() {
    // Maximize μᵀw − wᵀΣw with Σ diagonal. With every weight positive,
    // μᵢ − 2σᵢ²wᵢ = ν for all i, and the budget fixes ν.
    let covariance = diagonal(&VARIANCES);
    let returns = VectorState::from(RETURNS);
    let objective = |w: &VectorState| w.dot(&returns) - quadratic_form(w, &covariance);

    let curvature: Vec<f64> = VARIANCES.iter().map(|s| 2.0 * s).collect();
    let nu = (RETURNS.iter().zip(&curvature).map(|(m, c)| m / c).sum::<f64>() - 1.0)
        / curvature.iter().map(|c| 1.0 / c).sum::<f64>();

    let mut history = History::new();
    let observer = Chain::new(&mut history, TracingObserver::new("penalty").every(5));
    let solution = penalty::optimize(
        Goal::Maximize,
        &objective,
        &long_only(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &Config::default(),
        observer,
    )
    .unwrap();

    assert!(solution.converged());
    for i in 0..3 {
        assert_relative_eq!(solution.x[i], (RETURNS[i] - nu) / curvature[i], epsilon = 1e-4);
    }

    assert_eq!(history.len(), solution.iters);
    assert_eq!(history.last().unwrap().iteration, solution.iters);
    assert_relative_eq!(history.last().unwrap().objective, solution.objective);
}

#[test]
fn target_observer_stops_a_good_enough_solve() {
    let returns = VectorState::from(RETURNS);
    let solution = penalty::optimize(
        Goal::Maximize,
        &|w: &VectorState| w.dot(&returns),
        &long_only(3),
        &VectorState::from([1.0 / 3.0; 3]),
        &Config::default(),
        Target::new(Goal::Maximize, 0.14),
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.objective >= 0.14);
}

#[test]
fn ellipsoidal_robust_portfolio_diversifies() {
    // Nominally asset 1 earns more, but its return is far less certain. The
    // worst case of wᵀp over the ellipsoid is wᵀc − r·√(wᵀΣw).
    let center = VectorState::from([0.10, 0.12]);
    let covariance = diagonal(&[0.0004, 0.0025]);
    let radius = 2.0;
    let set = EllipsoidalUncertainty::new(center.clone(), covariance.clone(), radius).unwrap();

    let config = robust::Config::new(30, 64, 1e-4).unwrap().with_seed(11);
    let mut history = History::new();
    let solution = robust::optimize(
        Goal::Maximize,
        &set,
        &|w: &VectorState, p: &VectorState| w.dot(p),
        &long_only(2),
        &VectorState::from([0.5, 0.5]),
        &config,
        &mut history,
    )
    .unwrap();

    let exact_worst =
        |w: &VectorState| w.dot(&center) - radius * quadratic_form(w, &covariance).sqrt();

    // Sampled points lie in the set, so sampling never understates the worst case.
    assert!(exact_worst(&solution.x) <= solution.worst_case_objective + 1e-9);
    assert!(solution.worst_case_objective <= solution.nominal_objective);

    // Holding asset 1 alone has an exact worst case of 0.02, asset 0 alone 0.06.
    assert!(solution.x[0] > 0.6);
    assert!(exact_worst(&solution.x) > 0.05);

    assert_eq!(history.len(), solution.iters);
}
