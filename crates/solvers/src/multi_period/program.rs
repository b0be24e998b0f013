use std::{marker::PhantomData, ops::Range};

use finopt_core::{ConstraintKind, VectorSpace};

use crate::{gradient::central_difference, program::Program};

use super::PeriodConstraint;

/// One expanded residual: which constraint, and which of its residuals.
#[derive(Debug, Clone, Copy)]
struct Row {
    constraint: usize,
    index: usize,
}

/// A trajectory problem flattened into consecutive per-period blocks.
pub(super) struct TrajectoryProgram<'a, V, F> {
    objective: &'a F,
    constraints: &'a [PeriodConstraint<V>],
    rows: Vec<Row>,
    periods: usize,
    dimension: usize,
    weights: Vec<f64>,
    step: f64,
    state: PhantomData<V>,
}

impl<'a, V, F> TrajectoryProgram<'a, V, F>
where
    V: VectorSpace,
    F: Fn(usize, &V) -> f64,
{
    pub(super) fn new(
        objective: &'a F,
        constraints: &'a [PeriodConstraint<V>],
        periods: usize,
        dimension: usize,
        discount_factor: f64,
        step: f64,
    ) -> Self {
        let rows = constraints
            .iter()
            .enumerate()
            .flat_map(|(constraint, c)| {
                (0..c.residual_count(periods)).map(move |index| Row { constraint, index })
            })
            .collect();

        Self {
            objective,
            constraints,
            rows,
            periods,
            dimension,
            weights: discount_weights(discount_factor, periods),
            step,
            state: PhantomData,
        }
    }

    fn block(&self, t: usize) -> Range<usize> {
        t * self.dimension..(t + 1) * self.dimension
    }

    fn state(&self, x: &[f64], t: usize) -> V {
        V::from_slice(&x[self.block(t)])
    }

    /// Splits a joint decision vector into per-period states.
    pub(super) fn trajectory(&self, x: &[f64]) -> Vec<V> {
        (0..self.periods).map(|t| self.state(x, t)).collect()
    }

    /// Returns the undiscounted objective of every period.
    pub(super) fn period_objectives(&self, x: &[f64]) -> Vec<f64> {
        (0..self.periods)
            .map(|t| (self.objective)(t, &self.state(x, t)))
            .collect()
    }
}

/// Returns `δᵗ` for `t` in `0..periods`.
pub(super) fn discount_weights(discount_factor: f64, periods: usize) -> Vec<f64> {
    (0..periods)
        .scan(1.0, |weight, _| {
            let current = *weight;
            *weight *= discount_factor;
            Some(current)
        })
        .collect()
}

impl<V, F> Program for TrajectoryProgram<'_, V, F>
where
    V: VectorSpace,
    F: Fn(usize, &V) -> f64,
{
    fn dimension(&self) -> usize {
        self.periods * self.dimension
    }

    fn objective(&self, x: &[f64]) -> f64 {
        self.period_objectives(x)
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| weight * value)
            .sum()
    }

    /// The objective is separable by period, so each block is differenced
    /// against its own period's objective only.
    fn objective_gradient(&self, x: &[f64]) -> Option<Vec<f64>> {
        let mut gradient = Vec::with_capacity(x.len());
        for t in 0..self.periods {
            let weight = self.weights[t];
            let partials = central_difference(
                |block| (self.objective)(t, &V::from_slice(block)),
                &x[self.block(t)],
                self.step,
                None,
            );
            gradient.extend(partials.into_iter().map(|g| weight * g));
        }
        Some(gradient)
    }

    fn constraint_count(&self) -> usize {
        self.rows.len()
    }

    fn constraint_kind(&self, index: usize) -> ConstraintKind {
        self.constraints[self.rows[index].constraint].kind()
    }

    fn residual(&self, index: usize, x: &[f64]) -> f64 {
        let Row { constraint, index } = self.rows[index];
        self.constraints[constraint].residual_with(index, self.periods, |t| self.state(x, t))
    }

    fn support(&self, index: usize) -> Option<Range<usize>> {
        let Row { constraint, index } = self.rows[index];
        let periods = self.constraints[constraint].periods(index, self.periods);
        Some(periods.start * self.dimension..periods.end * self.dimension)
    }
}
