use thiserror::Error;

use crate::penalty;

/// Configuration for the robust solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iterations: usize,
    samples_per_iteration: usize,
    tolerance: f64,
    seed: Option<u64>,
    solver: penalty::Config,
}

/// Errors that can occur when validating a robust solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iterations must be at least one")]
    MaxIterations,

    #[error("samples_per_iteration must be at least one")]
    SamplesPerIteration,

    #[error("tolerance must be finite and non-negative")]
    Tolerance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            samples_per_iteration: 100,
            tolerance: 1e-6,
            seed: None,
            solver: penalty::Config::default(),
        }
    }
}

impl Config {
    /// Creates a config with an unseeded sampler and default solver settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` or `samples_per_iteration` is zero,
    /// or if `tolerance` is negative or not finite.
    pub fn new(
        max_iterations: usize,
        samples_per_iteration: usize,
        tolerance: f64,
    ) -> Result<Self, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        if samples_per_iteration == 0 {
            return Err(ConfigError::SamplesPerIteration);
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            max_iterations,
            samples_per_iteration,
            tolerance,
            ..Self::default()
        })
    }

    /// Seeds the sampler so runs are reproducible.
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

    /// Returns the maximum number of worst-case iterations.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the number of points drawn per iteration.
    #[must_use]
    pub fn samples_per_iteration(&self) -> usize {
        self.samples_per_iteration
    }

    /// Returns the relative tolerance on worst-case improvement.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the sampler seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the penalty solver settings.
    #[must_use]
    pub fn solver(&self) -> &penalty::Config {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_fields() {
        assert_eq!(Config::new(0, 10, 1e-6), Err(ConfigError::MaxIterations));
        assert_eq!(Config::new(5, 0, 1e-6), Err(ConfigError::SamplesPerIteration));
        assert_eq!(Config::new(5, 10, -1e-6), Err(ConfigError::Tolerance));

        let config = Config::new(5, 10, 1e-6).unwrap().with_seed(42);
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.samples_per_iteration(), 10);
    }
}
