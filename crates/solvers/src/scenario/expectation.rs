use finopt_core::{Scenario, VectorSpace};

use crate::sampling::evaluate_all;

use super::Error;

/// Probability weights over the scenarios that carry any.
///
/// Zero-probability scenarios are dropped here, so they never reach the
/// objective and cannot shift the optimum.
pub(super) struct Expectation<'a, F> {
    objective: &'a F,
    scenarios: Vec<&'a Scenario>,
    weights: Vec<f64>,
}

impl<'a, F> Expectation<'a, F> {
    /// Validates the probabilities and normalizes them by their total.
    pub(super) fn new(objective: &'a F, scenarios: &'a [Scenario]) -> Result<Self, Error> {
        if scenarios.is_empty() {
            return Err(Error::NoScenarios);
        }
        if let Some(scenario) = scenarios
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.probability))
        {
            return Err(Error::Probability {
                name: scenario.name.clone(),
                probability: scenario.probability,
            });
        }

        let total: f64 = scenarios.iter().map(|s| s.probability).sum();
        if total <= 0.0 {
            return Err(Error::ZeroTotalProbability);
        }

        let (scenarios, weights) = scenarios
            .iter()
            .filter(|s| s.probability > 0.0)
            .map(|s| (s, s.probability / total))
            .unzip();

        Ok(Self {
            objective,
            scenarios,
            weights,
        })
    }

    /// Evaluates the objective under every weighted scenario.
    pub(super) fn values<V>(&self, x: &V) -> Vec<f64>
    where
        V: VectorSpace,
        F: Fn(&V, &Scenario) -> f64 + Sync,
    {
        evaluate_all(&self.scenarios, |scenario: &&Scenario| {
            (self.objective)(x, scenario)
        })
    }

    pub(super) fn mean(&self, values: &[f64]) -> f64 {
        self.weights.iter().zip(values).map(|(w, v)| w * v).sum()
    }

    pub(super) fn variance(&self, values: &[f64], mean: f64) -> f64 {
        self.weights
            .iter()
            .zip(values)
            .map(|(w, v)| w * (v - mean).powi(2))
            .sum()
    }
}
