use thiserror::Error;

use crate::penalty;

/// Configuration for the multi-period solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    number_of_periods: usize,
    discount_rate: f64,
    solver: penalty::Config,
}

/// Errors that can occur when validating a multi-period solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number_of_periods must be at least one")]
    NumberOfPeriods,

    #[error("discount_rate must be finite and greater than -1")]
    DiscountRate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_periods: 1,
            discount_rate: 0.0,
            solver: penalty::Config::default(),
        }
    }
}

impl Config {
    /// Creates a config for a horizon of `number_of_periods` discounted at
    /// `discount_rate` per period.
    ///
    /// # Errors
    ///
    /// Returns an error if `number_of_periods` is zero or `discount_rate` is
    /// not greater than -1.
    pub fn new(number_of_periods: usize, discount_rate: f64) -> Result<Self, ConfigError> {
        if number_of_periods == 0 {
            return Err(ConfigError::NumberOfPeriods);
        }
        if !discount_rate.is_finite() || discount_rate <= -1.0 {
            return Err(ConfigError::DiscountRate);
        }

        Ok(Self {
            number_of_periods,
            discount_rate,
            solver: penalty::Config::default(),
        })
    }

    /// Replaces the settings of the underlying penalty solver.
    #[must_use]
    pub fn with_solver(mut self, solver: penalty::Config) -> Self {
        self.solver = solver;
        self
    }

    /// Returns the number of periods in the horizon.
    #[must_use]
    pub fn number_of_periods(&self) -> usize {
        self.number_of_periods
    }

    /// Returns the per-period discount rate.
    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Returns `1 / (1 + discount_rate)`.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        1.0 / (1.0 + self.discount_rate)
    }

    /// Returns the penalty solver settings.
    #[must_use]
    pub fn solver(&self) -> &penalty::Config {
        &self.solver
    }
}
