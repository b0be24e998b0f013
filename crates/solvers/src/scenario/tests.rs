use approx::assert_relative_eq;

use finopt_core::{Constraint, Goal, Scenario, VectorState};

use super::{
    Action, Config, Error, Event, ScenarioGenerator, Status, optimize, optimize_unobserved,
    optimize_weighted,
};

fn market() -> Vec<Scenario> {
    vec![
        Scenario::new("Bull", 0.30).with_parameter("return", 0.20),
        Scenario::new("Base", 0.50).with_parameter("return", 0.10),
        Scenario::new("Bear", 0.20).with_parameter("return", -0.05),
    ]
}

fn single_asset_constraints() -> Vec<Constraint<VectorState>> {
    vec![Constraint::upper_bound(0, 1.0), Constraint::non_negative(0)]
}

fn holding_return(w: &VectorState, s: &Scenario) -> f64 {
    w[0] * s["return"]
}

#[test]
fn expected_value_of_market_scenarios() {
    let solution = optimize_unobserved(
        Goal::Maximize,
        &holding_return,
        &market(),
        &VectorState::from([0.5]),
        &single_asset_constraints(),
        &Config::default(),
    )
    .unwrap();

    assert!(solution.converged());
    let weight = solution.x[0];
    assert_relative_eq!(weight, 1.0, epsilon = 1e-4);
    assert_relative_eq!(
        solution.expected_objective,
        weight * (0.30 * 0.20 + 0.50 * 0.10 + 0.20 * -0.05),
        epsilon = 1e-12
    );

    // Deviations from the 0.10 mean are 0.10, 0, and -0.15.
    let variance = weight * weight * (0.30 * 0.01 + 0.20 * 0.0225);
    assert_relative_eq!(solution.objective_variance, variance, epsilon = 1e-9);
    assert_relative_eq!(solution.objective_std_dev, variance.sqrt(), epsilon = 1e-9);

    assert_relative_eq!(solution.objective_for("Bull").unwrap(), weight * 0.20);
    assert_eq!(solution.scenario("Bear").unwrap().probability, 0.20);
    assert_eq!(solution.objective_for("Crash"), None);
}

#[test]
fn weighted_outcomes_match_explicit_scenarios() {
    let constraints = single_asset_constraints();
    let weighted = optimize_weighted(
        Goal::Maximize,
        &[("Bull", 0.30, 0.20), ("Base", 0.50, 0.10), ("Bear", 0.20, -0.05)],
        "return",
        &holding_return,
        &VectorState::from([0.5]),
        &constraints,
        &Config::default(),
    )
    .unwrap();
    let explicit = optimize_unobserved(
        Goal::Maximize,
        &holding_return,
        &market(),
        &VectorState::from([0.5]),
        &constraints,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(weighted.x, explicit.x);
    assert_eq!(weighted.expected_objective, explicit.expected_objective);
    assert_eq!(weighted.outcomes, explicit.outcomes);
}

#[test]
fn single_scenario_has_zero_variance() {
    let scenarios = vec![Scenario::new("only", 0.4).with_parameter("target", 2.0)];
    let objective = |x: &VectorState, s: &Scenario| (x[0] - s["target"]).powi(2);

    let solution = optimize_unobserved(
        Goal::Minimize,
        &objective,
        &scenarios,
        &VectorState::zeros(1),
        &[],
        &Config::default(),
    )
    .unwrap();

    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-5);
    assert_eq!(solution.objective_variance, 0.0);
    assert_eq!(solution.objective_std_dev, 0.0);
    assert_eq!(solution.expected_objective, solution.outcomes[0].objective);
}

#[test]
fn zero_probability_scenario_changes_nothing() {
    let objective = |x: &VectorState, s: &Scenario| (x[0] - s["target"]).powi(2);
    let base = vec![
        Scenario::new("low", 0.5).with_parameter("target", 1.0),
        Scenario::new("high", 0.5).with_parameter("target", 3.0),
    ];
    let mut with_ghost = base.clone();
    with_ghost.insert(1, Scenario::new("ghost", 0.0).with_parameter("target", 1000.0));

    let solve = |scenarios: &[Scenario]| {
        optimize_unobserved(
            Goal::Minimize,
            &objective,
            scenarios,
            &VectorState::zeros(1),
            &[],
            &Config::default(),
        )
        .unwrap()
    };
    let (without, with) = (solve(&base), solve(&with_ghost));

    assert_eq!(without.x, with.x);
    assert_eq!(without.iters, with.iters);
    assert_eq!(without.expected_objective, with.expected_objective);
    assert_eq!(without.objective_variance, with.objective_variance);
    assert_relative_eq!(with.x[0], 2.0, epsilon = 1e-5);

    let ghost = with.scenario("ghost").unwrap();
    assert_eq!(ghost.probability, 0.0);
    assert_relative_eq!(ghost.objective, 998.0 * 998.0, max_relative = 1e-6);
}

#[test]
fn generated_scenarios_feed_the_solver() {
    let scenarios = ScenarioGenerator::new(Some(17))
        .normal(500, &[0.08], &[0.02])
        .unwrap();
    let objective = |x: &VectorState, s: &Scenario| (x[0] - s["param_0"]).powi(2);

    let solution = optimize_unobserved(
        Goal::Minimize,
        &objective,
        &scenarios,
        &VectorState::zeros(1),
        &[],
        &Config::default(),
    )
    .unwrap();

    // The minimizer of a mean squared distance is the sample mean.
    let mean = scenarios.iter().map(|s| s["param_0"]).sum::<f64>() / 500.0;
    assert_relative_eq!(solution.x[0], mean, epsilon = 1e-5);
    assert_relative_eq!(solution.objective_variance.sqrt(), solution.objective_std_dev);
}

#[test]
fn observer_sees_expected_objective() {
    let mut objectives = Vec::new();
    let observer = |event: &Event<'_>| {
        objectives.push(event.objective);
        Some(Action::StopEarly)
    };

    let solution = optimize(
        Goal::Maximize,
        &holding_return,
        &market(),
        &VectorState::from([0.5]),
        &single_asset_constraints(),
        &Config::default(),
        observer,
    )
    .unwrap();

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(objectives.len(), 1);
}

#[test]
fn invalid_probabilities_are_rejected() {
    let scenarios = vec![
        Scenario::new("a", 0.5).with_parameter("return", 0.1),
        Scenario::new("b", -0.1).with_parameter("return", 0.2),
    ];

    let result = optimize_unobserved(
        Goal::Maximize,
        &holding_return,
        &scenarios,
        &VectorState::from([0.5]),
        &[],
        &Config::default(),
    );

    assert_eq!(
        result.unwrap_err(),
        Error::Probability {
            name: "b".to_string(),
            probability: -0.1
        }
    );
}
