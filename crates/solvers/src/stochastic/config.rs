use thiserror::Error;

use crate::penalty;

/// Configuration for the stochastic solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    number_of_scenarios: usize,
    seed: Option<u64>,
    solver: penalty::Config,
}

/// Errors that can occur when validating a stochastic solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number_of_scenarios must be at least one")]
    NumberOfScenarios,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_scenarios: 1000,
            seed: None,
            solver: penalty::Config::default(),
        }
    }
}

impl Config {
    /// Creates a config that draws `number_of_scenarios` scenarios.
    ///
    /// # Errors
    ///
    /// Returns an error if `number_of_scenarios` is zero.
    pub fn new(number_of_scenarios: usize) -> Result<Self, ConfigError> {
        if number_of_scenarios == 0 {
            return Err(ConfigError::NumberOfScenarios);
        }

        Ok(Self {
            number_of_scenarios,
            ..Self::default()
        })
    }

    /// Seeds the scenario draws so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the settings of the underlying penalty solver.
    #[must_use]
    pub fn with_solver(mut self, solver: penalty::Config) -> Self {
        self.solver = solver;
        self
    }

    #[must_use]
    pub fn number_of_scenarios(&self) -> usize {
        self.number_of_scenarios
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn solver(&self) -> &penalty::Config {
        &self.solver
    }
}
