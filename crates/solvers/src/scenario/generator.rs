use rand::{Rng, distr::Uniform, rngs::StdRng};
use rand_distr::{Distribution, Exp, LogNormal, Normal, Triangular};
use thiserror::Error;
use tracing::debug;

use finopt_core::{DimensionMismatch, Parameters, Scenario};

use crate::sampling::rng_from_seed;

/// Errors that can occur when generating scenarios.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("at least one scenario must be generated")]
    NoScenarios,

    #[error("at least one parameter is required")]
    NoParameters,

    #[error("{what}: {source}")]
    Dimension {
        what: &'static str,
        #[source]
        source: DimensionMismatch,
    },

    #[error("invalid {distribution} parameters for param_{index}")]
    Distribution {
        distribution: &'static str,
        index: usize,
    },

    #[error("bootstrap history is empty")]
    EmptyHistory,
}

/// Returns the key of parameter `index`, `param_{index}`.
#[must_use]
pub fn parameter_key(index: usize) -> String {
    format!("param_{index}")
}

/// Returns the name of scenario `index`, counting from `scenario_1`.
#[must_use]
pub fn scenario_name(index: usize) -> String {
    format!("scenario_{}", index + 1)
}

/// Draws equally likely scenarios from simple distributions.
///
/// Every generated scenario has probability `1 / count` and is named
/// `scenario_1`, `scenario_2`, and so on. Component `i` of a draw is stored
/// under [`parameter_key(i)`](parameter_key).
///
/// A seeded generator produces the same scenarios on every run.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    rng: StdRng,
}

impl ScenarioGenerator {
    /// Creates a generator seeded with `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }

    /// Draws each component from an independent normal distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if the slices are empty or differ
    /// in length, if a mean is not finite, or if a standard deviation is
    /// negative or not finite.
    pub fn normal(
        &mut self,
        count: usize,
        means: &[f64],
        std_devs: &[f64],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        check_shape(count, means.len())?;
        check_length("std_devs", means.len(), std_devs.len())?;
        let distributions = build("normal", means.iter().zip(std_devs), |(&m, &s)| {
            if !m.is_finite() || !is_scale(s) {
                return None;
            }
            Normal::new(m, s).ok()
        })?;

        Ok(self.draw_independent(count, &distributions))
    }

    /// Draws each component uniformly from `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if the slices are empty or differ
    /// in length, or if a bound is not finite or `lower > upper`.
    pub fn uniform(
        &mut self,
        count: usize,
        lower: &[f64],
        upper: &[f64],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        check_shape(count, lower.len())?;
        check_length("upper", lower.len(), upper.len())?;
        let distributions = build("uniform", lower.iter().zip(upper), |(&lo, &hi)| {
            Uniform::new_inclusive(lo, hi).ok()
        })?;

        Ok(self.draw_independent(count, &distributions))
    }

    /// Draws each component from a log-normal distribution whose logarithm
    /// has mean `mu` and standard deviation `sigma`.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if the slices are empty or differ
    /// in length, if a `mu` is not finite, or if a `sigma` is negative or not
    /// finite.
    pub fn lognormal(
        &mut self,
        count: usize,
        mu: &[f64],
        sigma: &[f64],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        check_shape(count, mu.len())?;
        check_length("sigma", mu.len(), sigma.len())?;
        let distributions = build("lognormal", mu.iter().zip(sigma), |(&m, &s)| {
            if !m.is_finite() || !is_scale(s) {
                return None;
            }
            LogNormal::new(m, s).ok()
        })?;

        Ok(self.draw_independent(count, &distributions))
    }

    /// Draws each component from an exponential distribution with the given
    /// rate, so component `i` has mean `1 / rates[i]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if `rates` is empty, or if a rate
    /// is not finite and positive.
    pub fn exponential(
        &mut self,
        count: usize,
        rates: &[f64],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        check_shape(count, rates.len())?;
        let distributions = build("exponential", rates.iter(), |&rate| {
            if !rate.is_finite() || rate <= 0.0 {
                return None;
            }
            Exp::new(rate).ok()
        })?;

        Ok(self.draw_independent(count, &distributions))
    }

    /// Draws each component from a triangular distribution.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if the slices are empty or differ
    /// in length, or unless `min <= mode <= max` with `min < max`.
    pub fn triangular(
        &mut self,
        count: usize,
        min: &[f64],
        mode: &[f64],
        max: &[f64],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        check_shape(count, min.len())?;
        check_length("mode", min.len(), mode.len())?;
        check_length("max", min.len(), max.len())?;
        let bounds = min.iter().zip(mode).zip(max);
        let distributions = build("triangular", bounds, |((&lo, &m), &hi)| {
            Triangular::new(lo, hi, m).ok()
        })?;

        Ok(self.draw_independent(count, &distributions))
    }

    /// Resamples whole rows of `history` with replacement.
    ///
    /// Each row is one historical observation; drawing rows keeps the
    /// cross-parameter dependence of the data.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, if `history` is empty, if its
    /// rows are empty, or if the rows differ in length.
    pub fn bootstrap(
        &mut self,
        count: usize,
        history: &[Vec<f64>],
    ) -> Result<Vec<Scenario>, GeneratorError> {
        let first = history.first().ok_or(GeneratorError::EmptyHistory)?;
        check_shape(count, first.len())?;
        for row in &history[1..] {
            check_length("history row", first.len(), row.len())?;
        }

        Ok(self.generate(count, |rng| {
            let row = &history[rng.random_range(0..history.len())];
            to_parameters(row.iter().copied())
        }))
    }

    /// Builds `count` scenarios from a caller-supplied draw.
    ///
    /// Returns an empty list when `count` is zero.
    pub fn generate<G>(&mut self, count: usize, mut draw: G) -> Vec<Scenario>
    where
        G: FnMut(&mut StdRng) -> Parameters,
    {
        let probability = if count == 0 { 0.0 } else { 1.0 / count as f64 };
        let scenarios: Vec<Scenario> = (0..count)
            .map(|index| {
                Scenario::with_parameters(scenario_name(index), probability, draw(&mut self.rng))
            })
            .collect();

        debug!(count, "generated scenarios");
        scenarios
    }

    fn draw_independent<D>(&mut self, count: usize, distributions: &[D]) -> Vec<Scenario>
    where
        D: Distribution<f64>,
    {
        self.generate(count, |rng| {
            to_parameters(distributions.iter().map(|d| d.sample(rng)))
        })
    }
}

fn to_parameters(values: impl Iterator<Item = f64>) -> Parameters {
    values
        .enumerate()
        .map(|(index, value)| (parameter_key(index), value))
        .collect()
}

/// A standard deviation must be finite and non-negative.
fn is_scale(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_shape(count: usize, parameters: usize) -> Result<(), GeneratorError> {
    if count == 0 {
        return Err(GeneratorError::NoScenarios);
    }
    if parameters == 0 {
        return Err(GeneratorError::NoParameters);
    }
    Ok(())
}

fn check_length(what: &'static str, expected: usize, actual: usize) -> Result<(), GeneratorError> {
    if expected == actual {
        Ok(())
    } else {
        Err(GeneratorError::Dimension {
            what,
            source: DimensionMismatch { expected, actual },
        })
    }
}

/// Builds one distribution per component, reporting the first invalid one.
fn build<I, T, D>(
    distribution: &'static str,
    parameters: I,
    make: impl Fn(T) -> Option<D>,
) -> Result<Vec<D>, GeneratorError>
where
    I: Iterator<Item = T>,
{
    parameters
        .enumerate()
        .map(|(index, p)| make(p).ok_or(GeneratorError::Distribution { distribution, index }))
        .collect()
}
