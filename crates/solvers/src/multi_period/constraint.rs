use std::{fmt, ops::Range, sync::Arc};

use finopt_core::{ConstraintKind, VectorSpace};

type PeriodFn<V> = Arc<dyn Fn(usize, &V) -> f64 + Send + Sync>;
type StateFn<V> = Arc<dyn Fn(&V) -> f64 + Send + Sync>;
type TransitionFn<V> = Arc<dyn Fn(usize, &V, &V) -> f64 + Send + Sync>;
type TrajectoryFn<V> = Arc<dyn Fn(&[V]) -> f64 + Send + Sync>;

/// A constraint over a trajectory of per-period states.
///
/// Each variant expands to one or more scalar residuals once the horizon is
/// known. Equality residuals must vanish and inequality residuals must be
/// non-positive, as for [`Constraint`](finopt_core::Constraint).
pub enum PeriodConstraint<V> {
    /// `residual(t, x_t)` at every period `t`.
    EachPeriod {
        kind: ConstraintKind,
        residual: PeriodFn<V>,
    },

    /// `residual(x_last)` at the final period only.
    Terminal {
        kind: ConstraintKind,
        residual: StateFn<V>,
    },

    /// `residual(t, x_t, x_{t+1})` for every consecutive pair of periods.
    Transition {
        kind: ConstraintKind,
        residual: TransitionFn<V>,
    },

    /// `residual(trajectory)` over the whole horizon.
    Trajectory {
        kind: ConstraintKind,
        residual: TrajectoryFn<V>,
    },

    /// `Σ_{s ≤ t} metric(x_s) ≤ maximum` for every period `t`.
    Cumulative { metric: StateFn<V>, maximum: f64 },
}

impl<V> Clone for PeriodConstraint<V> {
    fn clone(&self) -> Self {
        match self {
            Self::EachPeriod { kind, residual } => Self::EachPeriod {
                kind: *kind,
                residual: Arc::clone(residual),
            },
            Self::Terminal { kind, residual } => Self::Terminal {
                kind: *kind,
                residual: Arc::clone(residual),
            },
            Self::Transition { kind, residual } => Self::Transition {
                kind: *kind,
                residual: Arc::clone(residual),
            },
            Self::Trajectory { kind, residual } => Self::Trajectory {
                kind: *kind,
                residual: Arc::clone(residual),
            },
            Self::Cumulative { metric, maximum } => Self::Cumulative {
                metric: Arc::clone(metric),
                maximum: *maximum,
            },
        }
    }
}

impl<V> fmt::Debug for PeriodConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cumulative { maximum, .. } => f
                .debug_struct("Cumulative")
                .field("maximum", maximum)
                .finish_non_exhaustive(),
            _ => {
                let name = match self {
                    Self::EachPeriod { .. } => "EachPeriod",
                    Self::Terminal { .. } => "Terminal",
                    Self::Transition { .. } => "Transition",
                    _ => "Trajectory",
                };
                f.debug_struct(name)
                    .field("kind", &self.kind())
                    .finish_non_exhaustive()
            }
        }
    }
}

impl<V> PeriodConstraint<V> {
    /// Returns whether the expanded residuals are equalities or inequalities.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::EachPeriod { kind, .. }
            | Self::Terminal { kind, .. }
            | Self::Transition { kind, .. }
            | Self::Trajectory { kind, .. } => *kind,
            Self::Cumulative { .. } => ConstraintKind::Inequality,
        }
    }

    /// Applies `residual(t, x_t)` at every period.
    pub fn each_period<F>(residual: F, kind: ConstraintKind) -> Self
    where
        F: Fn(usize, &V) -> f64 + Send + Sync + 'static,
    {
        Self::EachPeriod {
            kind,
            residual: Arc::new(residual),
        }
    }

    /// Applies `residual(x_last)` to the final period's state.
    pub fn terminal<F>(residual: F, kind: ConstraintKind) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self::Terminal {
            kind,
            residual: Arc::new(residual),
        }
    }

    /// Couples consecutive periods through `residual(t, x_t, x_{t+1})`.
    pub fn transition<F>(residual: F, kind: ConstraintKind) -> Self
    where
        F: Fn(usize, &V, &V) -> f64 + Send + Sync + 'static,
    {
        Self::Transition {
            kind,
            residual: Arc::new(residual),
        }
    }

    /// Applies `residual(trajectory)` to the whole horizon.
    pub fn trajectory<F>(residual: F, kind: ConstraintKind) -> Self
    where
        F: Fn(&[V]) -> f64 + Send + Sync + 'static,
    {
        Self::Trajectory {
            kind,
            residual: Arc::new(residual),
        }
    }

    /// Bounds the running sum of `metric` at every period by `maximum`.
    pub fn cumulative_limit<F>(metric: F, maximum: f64) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self::Cumulative {
            metric: Arc::new(metric),
            maximum,
        }
    }

    /// Returns the number of scalar residuals over `periods` periods.
    #[must_use]
    pub fn residual_count(&self, periods: usize) -> usize {
        if periods == 0 {
            return 0;
        }
        match self {
            Self::EachPeriod { .. } | Self::Cumulative { .. } => periods,
            Self::Terminal { .. } | Self::Trajectory { .. } => 1,
            Self::Transition { .. } => periods - 1,
        }
    }

    /// Returns the periods residual `index` reads.
    pub(super) fn periods(&self, index: usize, periods: usize) -> Range<usize> {
        match self {
            Self::EachPeriod { .. } => index..index + 1,
            Self::Terminal { .. } => periods - 1..periods,
            Self::Transition { .. } => index..index + 2,
            Self::Trajectory { .. } => 0..periods,
            Self::Cumulative { .. } => 0..index + 1,
        }
    }
}

impl<V: VectorSpace> PeriodConstraint<V> {
    /// Requires the components of every period's state to sum to one.
    #[must_use]
    pub fn budget_each_period() -> Self {
        Self::each_period(
            |_, x: &V| x.as_slice().iter().sum::<f64>() - 1.0,
            ConstraintKind::Equality,
        )
    }

    /// Requires every component of every period's state to be non-negative.
    #[must_use]
    pub fn non_negativity_each_period(dimension: usize) -> Vec<Self> {
        (0..dimension)
            .map(|i| Self::each_period(move |_, x: &V| -x.as_slice()[i], ConstraintKind::Inequality))
            .collect()
    }

    /// Bounds the total absolute change between consecutive states by `limit`.
    #[must_use]
    pub fn turnover_limit(limit: f64) -> Self {
        Self::transition(
            move |_, current: &V, next: &V| {
                let turnover: f64 = current
                    .as_slice()
                    .iter()
                    .zip(next.as_slice())
                    .map(|(a, b)| (b - a).abs())
                    .sum();
                turnover - limit
            },
            ConstraintKind::Inequality,
        )
    }

    /// Requires the mean of `metric` over the horizon to be at least
    /// `minimum_average`.
    #[must_use]
    pub fn average_constraint<F>(metric: F, minimum_average: f64) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self::trajectory(
            move |states: &[V]| {
                let total: f64 = states.iter().map(&metric).sum();
                minimum_average - total / states.len() as f64
            },
            ConstraintKind::Inequality,
        )
    }

    /// Evaluates residual `index`, reading period states through `state`.
    pub(super) fn residual_with<S>(&self, index: usize, periods: usize, state: S) -> f64
    where
        S: Fn(usize) -> V,
    {
        match self {
            Self::EachPeriod { residual, .. } => residual(index, &state(index)),
            Self::Terminal { residual, .. } => residual(&state(periods - 1)),
            Self::Transition { residual, .. } => residual(index, &state(index), &state(index + 1)),
            Self::Trajectory { residual, .. } => {
                let states: Vec<V> = (0..periods).map(state).collect();
                residual(&states)
            }
            Self::Cumulative { metric, maximum } => {
                (0..=index).map(|t| metric(&state(t))).sum::<f64>() - maximum
            }
        }
    }

    /// Evaluates every expanded residual on `trajectory`.
    #[must_use]
    pub fn residuals(&self, trajectory: &[V]) -> Vec<f64> {
        let periods = trajectory.len();
        (0..self.residual_count(periods))
            .map(|index| self.residual_with(index, periods, |t| trajectory[t].clone()))
            .collect()
    }

    /// Returns `true` if every expanded residual holds within `epsilon`.
    #[must_use]
    pub fn is_satisfied(&self, trajectory: &[V], epsilon: f64) -> bool {
        let kind = self.kind();
        self.residuals(trajectory)
            .into_iter()
            .all(|r| kind.is_satisfied(r, epsilon))
    }

    /// Returns the largest violation over the expanded residuals.
    #[must_use]
    pub fn max_violation(&self, trajectory: &[V]) -> f64 {
        let kind = self.kind();
        self.residuals(trajectory)
            .into_iter()
            .map(|r| kind.violation(r))
            .fold(0.0, f64::max)
    }
}

/// Returns `true` if every constraint holds on `trajectory` within `epsilon`.
#[must_use]
pub fn all_satisfied<V: VectorSpace>(
    constraints: &[PeriodConstraint<V>],
    trajectory: &[V],
    epsilon: f64,
) -> bool {
    constraints
        .iter()
        .all(|c| c.is_satisfied(trajectory, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use finopt_core::VectorState;

    fn path() -> Vec<VectorState> {
        vec![
            VectorState::from([0.5, 0.5]),
            VectorState::from([0.8, 0.2]),
            VectorState::from([0.6, 0.4]),
        ]
    }

    #[test]
    fn expansion_counts_follow_the_horizon() {
        let each = PeriodConstraint::<VectorState>::budget_each_period();
        let turnover = PeriodConstraint::<VectorState>::turnover_limit(1.0);
        let terminal = PeriodConstraint::terminal(|x: &VectorState| x[0], ConstraintKind::Equality);

        assert_eq!(each.residual_count(4), 4);
        assert_eq!(turnover.residual_count(4), 3);
        assert_eq!(turnover.residual_count(1), 0);
        assert_eq!(terminal.residual_count(4), 1);
        assert_eq!(terminal.residual_count(0), 0);
    }

    #[test]
    fn turnover_is_checked_per_consecutive_pair() {
        // Turnovers are 0.6 and 0.4.
        let tight = PeriodConstraint::turnover_limit(0.5);
        let loose = PeriodConstraint::turnover_limit(0.6);

        let residuals = tight.residuals(&path());
        assert_relative_eq!(residuals[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(residuals[1], -0.1, epsilon = 1e-12);

        assert!(!tight.is_satisfied(&path(), 1e-9));
        assert!(loose.is_satisfied(&path(), 1e-9));
        assert_relative_eq!(tight.max_violation(&path()), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn budget_and_non_negativity_hold_on_a_valid_path() {
        let mut constraints = vec![PeriodConstraint::budget_each_period()];
        constraints.extend(PeriodConstraint::non_negativity_each_period(2));

        assert!(all_satisfied(&constraints, &path(), 1e-12));

        let mut short = path();
        short[1] = VectorState::from([1.2, -0.2]);
        assert!(!all_satisfied(&constraints, &short, 1e-12));
    }

    #[test]
    fn average_and_cumulative_aggregate_the_metric() {
        let first = |x: &VectorState| x[0];

        // Mean of the first component is 19/30.
        assert!(PeriodConstraint::average_constraint(first, 0.6).is_satisfied(&path(), 0.0));
        assert!(!PeriodConstraint::average_constraint(first, 0.7).is_satisfied(&path(), 0.0));

        // Running sums are 0.5, 1.3, 1.9.
        let cumulative = PeriodConstraint::cumulative_limit(first, 1.5);
        let residuals = cumulative.residuals(&path());
        assert_relative_eq!(residuals[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(residuals[1], -0.2, epsilon = 1e-12);
        assert_relative_eq!(residuals[2], 0.4, epsilon = 1e-12);
        assert_relative_eq!(cumulative.max_violation(&path()), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn terminal_and_transition_read_the_right_periods() {
        let terminal = PeriodConstraint::terminal(|x: &VectorState| x[1] - 0.4, ConstraintKind::Equality);
        assert!(terminal.is_satisfied(&path(), 1e-12));

        let seen = PeriodConstraint::transition(
            |t, current: &VectorState, next: &VectorState| {
                assert!(t < 2);
                next[0] - current[0]
            },
            ConstraintKind::Inequality,
        );
        let residuals = seen.residuals(&path());
        assert_eq!(residuals.len(), 2);
        assert_relative_eq!(residuals[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(residuals[1], -0.2, epsilon = 1e-12);
    }
}
