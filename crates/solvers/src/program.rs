use std::ops::Range;

use finopt_core::{Constraint, ConstraintKind, Objective, VectorSpace};

/// A constrained problem over a flat vector of decision variables.
///
/// Every solver in this crate reduces its problem to a `Program`: the
/// multi-period solver concatenates per-period states, the robust solver
/// appends an epigraph variable, and the scenario solver folds the
/// probability-weighted sum into a single objective. The penalty engine only
/// ever sees this trait.
pub(crate) trait Program {
    /// Returns the number of decision variables.
    fn dimension(&self) -> usize;

    /// Evaluates the objective.
    fn objective(&self, x: &[f64]) -> f64;

    /// Evaluates the analytic objective gradient, if one is available.
    fn objective_gradient(&self, _x: &[f64]) -> Option<Vec<f64>> {
        None
    }

    /// Returns the number of constraints.
    fn constraint_count(&self) -> usize;

    /// Returns the kind of constraint `index`.
    fn constraint_kind(&self, index: usize) -> ConstraintKind;

    /// Evaluates the residual of constraint `index`.
    fn residual(&self, index: usize, x: &[f64]) -> f64;

    /// Returns the range of variables constraint `index` depends on.
    ///
    /// `None` means the constraint may depend on every variable.
    fn support(&self, _index: usize) -> Option<Range<usize>> {
        None
    }

    /// Returns the largest constraint violation at `x`.
    fn max_violation(&self, x: &[f64]) -> f64 {
        (0..self.constraint_count())
            .map(|j| self.constraint_kind(j).violation(self.residual(j, x)))
            .fold(0.0, f64::max)
    }
}

/// A single-state problem built from an [`Objective`] and [`Constraint`]s.
pub(crate) struct StateProgram<'a, V, F> {
    objective: &'a F,
    constraints: &'a [Constraint<V>],
    dimension: usize,
}

impl<'a, V, F> StateProgram<'a, V, F>
where
    V: VectorSpace,
    F: Objective<V>,
{
    pub(crate) fn new(objective: &'a F, constraints: &'a [Constraint<V>], dimension: usize) -> Self {
        Self {
            objective,
            constraints,
            dimension,
        }
    }
}

impl<V, F> Program for StateProgram<'_, V, F>
where
    V: VectorSpace,
    F: Objective<V>,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn objective(&self, x: &[f64]) -> f64 {
        self.objective.value(&V::from_slice(x))
    }

    fn objective_gradient(&self, x: &[f64]) -> Option<Vec<f64>> {
        self.objective
            .gradient(&V::from_slice(x))
            .map(|gradient| gradient.to_vec())
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    fn constraint_kind(&self, index: usize) -> ConstraintKind {
        self.constraints[index].kind()
    }

    fn residual(&self, index: usize, x: &[f64]) -> f64 {
        self.constraints[index].residual(&V::from_slice(x))
    }
}
