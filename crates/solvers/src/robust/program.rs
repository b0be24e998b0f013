use std::{marker::PhantomData, ops::Range};

use finopt_core::{Constraint, ConstraintKind, Goal, VectorSpace, VectorState};

use crate::program::Program;

/// The epigraph of the worst case over a finite set of parameter cuts.
///
/// Variables are `(x, t)`. The objective is `t` in the caller's direction
/// and each cut `p` adds `s·(f(x, p) − t) ≤ 0`, so `t` bounds every cut from
/// the unfavourable side. User constraints only read `x`.
pub(super) struct EpigraphProgram<'a, V, F> {
    objective: &'a F,
    constraints: &'a [Constraint<V>],
    cuts: &'a [VectorState],
    sign: f64,
    dimension: usize,
    state: PhantomData<V>,
}

impl<'a, V, F> EpigraphProgram<'a, V, F>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64,
{
    pub(super) fn new(
        goal: Goal,
        objective: &'a F,
        constraints: &'a [Constraint<V>],
        cuts: &'a [VectorState],
        dimension: usize,
    ) -> Self {
        Self {
            objective,
            constraints,
            cuts,
            sign: goal.sign(),
            dimension,
            state: PhantomData,
        }
    }

    fn state(&self, z: &[f64]) -> V {
        V::from_slice(&z[..self.dimension])
    }
}

impl<V, F> Program for EpigraphProgram<'_, V, F>
where
    V: VectorSpace,
    F: Fn(&V, &VectorState) -> f64,
{
    fn dimension(&self) -> usize {
        self.dimension + 1
    }

    fn objective(&self, z: &[f64]) -> f64 {
        z[self.dimension]
    }

    fn objective_gradient(&self, z: &[f64]) -> Option<Vec<f64>> {
        let mut gradient = vec![0.0; z.len()];
        gradient[self.dimension] = 1.0;
        Some(gradient)
    }

    fn constraint_count(&self) -> usize {
        self.cuts.len() + self.constraints.len()
    }

    fn constraint_kind(&self, index: usize) -> ConstraintKind {
        match index.checked_sub(self.cuts.len()) {
            None => ConstraintKind::Inequality,
            Some(j) => self.constraints[j].kind(),
        }
    }

    fn residual(&self, index: usize, z: &[f64]) -> f64 {
        let x = self.state(z);
        match index.checked_sub(self.cuts.len()) {
            None => {
                let value = (self.objective)(&x, &self.cuts[index]);
                self.sign * (value - z[self.dimension])
            }
            Some(j) => self.constraints[j].residual(&x),
        }
    }

    fn support(&self, index: usize) -> Option<Range<usize>> {
        (index >= self.cuts.len()).then_some(0..self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuts_bound_the_epigraph_variable_from_the_unfavourable_side() {
        let objective = |x: &VectorState, p: &VectorState| x[0] * p[0];
        let cuts = [VectorState::from([1.0]), VectorState::from([3.0])];
        let constraints = [Constraint::budget()];

        let program = EpigraphProgram::new(Goal::Minimize, &objective, &constraints, &cuts, 1);
        let z = [2.0, 5.0];

        assert_eq!(program.dimension(), 2);
        assert_eq!(program.objective(&z), 5.0);
        assert_eq!(program.constraint_count(), 3);
        assert_eq!(program.residual(0, &z), 2.0 - 5.0);
        assert_eq!(program.residual(1, &z), 6.0 - 5.0);
        assert_eq!(program.residual(2, &z), 1.0);
        assert_eq!(program.constraint_kind(2), ConstraintKind::Equality);
        assert_eq!(program.support(0), None);
        assert_eq!(program.support(2), Some(0..1));

        let program = EpigraphProgram::new(Goal::Maximize, &objective, &constraints, &cuts, 1);
        assert_eq!(program.residual(1, &z), 5.0 - 6.0);
    }
}
