use thiserror::Error;

/// Configuration for the penalty solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iterations: usize,
    max_inner_iterations: usize,
    tolerance: f64,
    gradient_tolerance: f64,
    constraint_tolerance: f64,
    min_derivative: f64,
    initial_penalty: f64,
    penalty_growth: f64,
    max_penalty: f64,
    finite_difference_step: f64,
}

/// Errors that can occur when validating a penalty solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iterations must be at least one")]
    MaxIterations,

    #[error("max_inner_iterations must be at least one")]
    MaxInnerIterations,

    #[error("tolerance must be finite and non-negative")]
    Tolerance,

    #[error("gradient_tolerance must be finite and non-negative")]
    GradientTolerance,

    #[error("constraint_tolerance must be finite and non-negative")]
    ConstraintTolerance,

    #[error("min_derivative must be finite and non-negative")]
    MinDerivative,

    #[error("initial_penalty must be finite and positive")]
    InitialPenalty,

    #[error("penalty_growth must be finite and greater than one")]
    PenaltyGrowth,

    #[error("max_penalty must be finite and at least initial_penalty")]
    MaxPenalty,

    #[error("finite_difference_step must be finite and positive")]
    FiniteDifferenceStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_inner_iterations: 500,
            tolerance: 1e-9,
            gradient_tolerance: 1e-6,
            constraint_tolerance: 1e-6,
            min_derivative: 1e-14,
            initial_penalty: 10.0,
            penalty_growth: 10.0,
            max_penalty: 1e10,
            finite_difference_step: 1e-6,
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl Config {
    /// Creates a config with the given iteration limit and tolerance.
    ///
    /// The remaining settings take their default values and can be refined
    /// with the `with_*` methods.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero or `tolerance` is negative
    /// or non-finite.
    pub fn new(max_iterations: usize, tolerance: f64) -> Result<Self, ConfigError> {
        Self::default()
            .with_max_iterations(max_iterations)?
            .with_tolerance(tolerance)
    }

    /// Sets the maximum number of outer (multiplier update) iterations.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    /// Sets the maximum number of quasi-Newton steps per outer iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_inner_iterations` is zero.
    pub fn with_max_inner_iterations(
        mut self,
        max_inner_iterations: usize,
    ) -> Result<Self, ConfigError> {
        if max_inner_iterations == 0 {
            return Err(ConfigError::MaxInnerIterations);
        }
        self.max_inner_iterations = max_inner_iterations;
        Ok(self)
    }

    /// Sets the relative tolerance on objective change and step size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tolerance` is negative or non-finite.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        if !non_negative(tolerance) {
            return Err(ConfigError::Tolerance);
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Sets the tolerance on the Lagrangian gradient's largest component.
    ///
    /// # Errors
    ///
    /// Returns an error if `gradient_tolerance` is negative or non-finite.
    pub fn with_gradient_tolerance(mut self, gradient_tolerance: f64) -> Result<Self, ConfigError> {
        if !non_negative(gradient_tolerance) {
            return Err(ConfigError::GradientTolerance);
        }
        self.gradient_tolerance = gradient_tolerance;
        Ok(self)
    }

    /// Sets the largest constraint violation accepted at convergence.
    ///
    /// # Errors
    ///
    /// Returns an error if `constraint_tolerance` is negative or non-finite.
    pub fn with_constraint_tolerance(
        mut self,
        constraint_tolerance: f64,
    ) -> Result<Self, ConfigError> {
        if !non_negative(constraint_tolerance) {
            return Err(ConfigError::ConstraintTolerance);
        }
        self.constraint_tolerance = constraint_tolerance;
        Ok(self)
    }

    /// Sets the smallest descent slope treated as a usable direction.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_derivative` is negative or non-finite.
    pub fn with_min_derivative(mut self, min_derivative: f64) -> Result<Self, ConfigError> {
        if !non_negative(min_derivative) {
            return Err(ConfigError::MinDerivative);
        }
        self.min_derivative = min_derivative;
        Ok(self)
    }

    /// Sets the penalty schedule: starting weight, growth factor, and cap.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial` is not positive, `growth` is not greater
    /// than one, or `max` is smaller than `initial`.
    pub fn with_penalty(mut self, initial: f64, growth: f64, max: f64) -> Result<Self, ConfigError> {
        if !initial.is_finite() || initial <= 0.0 {
            return Err(ConfigError::InitialPenalty);
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(ConfigError::PenaltyGrowth);
        }
        if !max.is_finite() || max < initial {
            return Err(ConfigError::MaxPenalty);
        }
        self.initial_penalty = initial;
        self.penalty_growth = growth;
        self.max_penalty = max;
        Ok(self)
    }

    /// Sets the relative perturbation used for finite-difference gradients.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not positive and finite.
    pub fn with_finite_difference_step(mut self, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::FiniteDifferenceStep);
        }
        self.finite_difference_step = step;
        Ok(self)
    }

    /// Returns the maximum number of outer iterations.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the maximum number of inner steps per outer iteration.
    #[must_use]
    pub fn max_inner_iterations(&self) -> usize {
        self.max_inner_iterations
    }

    /// Returns the relative tolerance on objective change and step size.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the gradient tolerance.
    #[must_use]
    pub fn gradient_tolerance(&self) -> f64 {
        self.gradient_tolerance
    }

    /// Returns the constraint tolerance.
    #[must_use]
    pub fn constraint_tolerance(&self) -> f64 {
        self.constraint_tolerance
    }

    /// Returns the smallest usable descent slope.
    #[must_use]
    pub fn min_derivative(&self) -> f64 {
        self.min_derivative
    }

    /// Returns the starting penalty weight.
    #[must_use]
    pub fn initial_penalty(&self) -> f64 {
        self.initial_penalty
    }

    /// Returns the penalty growth factor.
    #[must_use]
    pub fn penalty_growth(&self) -> f64 {
        self.penalty_growth
    }

    /// Returns the penalty cap.
    #[must_use]
    pub fn max_penalty(&self) -> f64 {
        self.max_penalty
    }

    /// Returns the finite-difference step.
    #[must_use]
    pub fn finite_difference_step(&self) -> f64 {
        self.finite_difference_step
    }
}
