use finopt_core::{ConstraintKind, Goal};

use crate::{gradient::central_difference, program::Program};

use super::{Config, Error};

/// The augmented Lagrangian of a program for fixed multipliers and penalty.
///
/// ```text
/// L(x) = s·f(x) + Σ_eq [λ h(x) + ρ/2 h(x)²]
///               + Σ_ineq (1/2ρ) [max(0, μ + ρ g(x))² − μ²]
/// ```
pub(super) struct Merit<'p, P> {
    program: &'p P,
    sign: f64,
    multipliers: Vec<f64>,
    penalty: f64,
    max_penalty: f64,
    growth: f64,
    step: f64,
}

impl<'p, P: Program> Merit<'p, P> {
    pub(super) fn new(program: &'p P, goal: Goal, config: &Config) -> Self {
        Self {
            program,
            sign: goal.sign(),
            multipliers: vec![0.0; program.constraint_count()],
            penalty: config.initial_penalty(),
            max_penalty: config.max_penalty(),
            growth: config.penalty_growth(),
            step: config.finite_difference_step(),
        }
    }

    pub(super) fn penalty(&self) -> f64 {
        self.penalty
    }

    pub(super) fn grow_penalty(&mut self) {
        self.penalty = (self.penalty * self.growth).min(self.max_penalty);
    }

    /// Evaluates every constraint residual at `x`.
    pub(super) fn residuals(&self, x: &[f64]) -> Vec<f64> {
        (0..self.program.constraint_count())
            .map(|j| self.program.residual(j, x))
            .collect()
    }

    /// Applies the first-order multiplier update for the given residuals.
    pub(super) fn update_multipliers(&mut self, residuals: &[f64]) {
        for (j, &residual) in residuals.iter().enumerate() {
            let kind = self.program.constraint_kind(j);
            self.multipliers[j] = self.coefficient(j, kind, residual);
        }
    }

    /// Returns the merit value at `x`.
    pub(super) fn value(&self, x: &[f64]) -> f64 {
        let objective = self.sign * self.program.objective(x);
        let residuals = self.residuals(x);
        objective + self.constraint_terms(&residuals)
    }

    /// Returns the merit value and its gradient at `x`.
    pub(super) fn value_and_gradient(&self, x: &[f64]) -> Result<(f64, Vec<f64>), Error> {
        let objective = self.sign * self.program.objective(x);
        let residuals = self.residuals(x);
        let value = objective + self.constraint_terms(&residuals);

        let mut gradient = match self.program.objective_gradient(x) {
            Some(analytic) if analytic.len() != x.len() => {
                return Err(Error::GradientDimension {
                    expected: x.len(),
                    actual: analytic.len(),
                });
            }
            Some(analytic) => analytic,
            None => central_difference(|p| self.program.objective(p), x, self.step, None),
        };
        for g in &mut gradient {
            *g *= self.sign;
        }

        for (j, &residual) in residuals.iter().enumerate() {
            let kind = self.program.constraint_kind(j);
            let coefficient = self.coefficient(j, kind, residual);
            if coefficient == 0.0 {
                continue;
            }

            let support = self.program.support(j);
            let start = support.as_ref().map_or(0, |range| range.start);
            let partials = central_difference(
                |p| self.program.residual(j, p),
                x,
                self.step,
                support.clone(),
            );
            let end = support.map_or(x.len(), |range| range.end);
            for i in start..end {
                gradient[i] += coefficient * partials[i];
            }
        }

        Ok((value, gradient))
    }

    /// Returns the weight on constraint `j`'s gradient in the merit gradient.
    ///
    /// This is also the updated multiplier estimate.
    fn coefficient(&self, j: usize, kind: ConstraintKind, residual: f64) -> f64 {
        let shifted = self.multipliers[j] + self.penalty * residual;
        match kind {
            ConstraintKind::Equality => shifted,
            ConstraintKind::Inequality => shifted.max(0.0),
        }
    }

    fn constraint_terms(&self, residuals: &[f64]) -> f64 {
        let rho = self.penalty;
        residuals
            .iter()
            .enumerate()
            .map(|(j, &r)| {
                let multiplier = self.multipliers[j];
                match self.program.constraint_kind(j) {
                    ConstraintKind::Equality => multiplier * r + 0.5 * rho * r * r,
                    ConstraintKind::Inequality => {
                        let active = (multiplier + rho * r).max(0.0);
                        (active * active - multiplier * multiplier) / (2.0 * rho)
                    }
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// min x² + y² subject to x + y = 1 and x ≤ 0.2.
    struct Toy;

    impl Program for Toy {
        fn dimension(&self) -> usize {
            2
        }

        fn objective(&self, x: &[f64]) -> f64 {
            x[0] * x[0] + x[1] * x[1]
        }

        fn constraint_count(&self) -> usize {
            2
        }

        fn constraint_kind(&self, index: usize) -> ConstraintKind {
            [ConstraintKind::Equality, ConstraintKind::Inequality][index]
        }

        fn residual(&self, index: usize, x: &[f64]) -> f64 {
            match index {
                0 => x[0] + x[1] - 1.0,
                _ => x[0] - 0.2,
            }
        }
    }

    #[test]
    fn value_matches_closed_form() {
        let merit = Merit::new(&Toy, Goal::Minimize, &Config::default());
        let x = [0.5, 1.0];

        // f = 1.25, h = 0.5, g = 0.3, ρ = 10, multipliers zero.
        let expected = 1.25 + 0.5 * 10.0 * 0.25 + (3.0_f64 * 3.0) / 20.0;
        assert_relative_eq!(merit.value(&x), expected, epsilon = 1e-12);
    }

    #[test]
    fn gradient_agrees_with_finite_differences_of_value() {
        let mut merit = Merit::new(&Toy, Goal::Maximize, &Config::default());
        merit.update_multipliers(&[0.3, -0.1]);

        let x = [0.4, 0.3];
        let (value, gradient) = merit.value_and_gradient(&x).unwrap();
        let numeric = central_difference(|p| merit.value(p), &x, 1e-6, None);

        assert_relative_eq!(value, merit.value(&x));
        for (analytic, numeric) in gradient.iter().zip(&numeric) {
            assert_relative_eq!(analytic, numeric, epsilon = 1e-6);
        }
    }

    #[test]
    fn inactive_inequalities_keep_zero_multipliers() {
        let mut merit = Merit::new(&Toy, Goal::Minimize, &Config::default());
        merit.update_multipliers(&[0.1, -0.5]);

        assert_relative_eq!(merit.multipliers[0], 1.0);
        assert_eq!(merit.multipliers[1], 0.0);
    }

    #[test]
    fn penalty_growth_is_capped() {
        let config = Config::default().with_penalty(1.0, 10.0, 50.0).unwrap();
        let mut merit = Merit::new(&Toy, Goal::Minimize, &config);

        merit.grow_penalty();
        assert_eq!(merit.penalty(), 10.0);
        merit.grow_penalty();
        assert_eq!(merit.penalty(), 50.0);
    }
}
