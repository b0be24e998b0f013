use std::{fmt, sync::Arc};

use crate::VectorSpace;

/// Whether a constraint residual must vanish or merely stay non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    /// Satisfied when the residual is zero.
    Equality,

    /// Satisfied when the residual is less than or equal to zero.
    Inequality,
}

impl ConstraintKind {
    /// Returns `true` if the residual meets this kind's condition within `epsilon`.
    #[must_use]
    pub fn is_satisfied(self, residual: f64, epsilon: f64) -> bool {
        self.violation(residual) <= epsilon
    }

    /// Returns how far the residual is from satisfying this kind.
    ///
    /// Non-finite residuals are reported as an infinite violation.
    #[must_use]
    pub fn violation(self, residual: f64) -> f64 {
        if residual.is_nan() {
            return f64::INFINITY;
        }
        match self {
            Self::Equality => residual.abs(),
            Self::Inequality => residual.max(0.0),
        }
    }
}

type Residual<V> = Arc<dyn Fn(&V) -> f64 + Send + Sync>;

/// A constraint over a single state.
///
/// Constraints are plain values: a [`ConstraintKind`] paired with a pure
/// residual function. Equality constraints require `residual(x) == 0` and
/// inequality constraints require `residual(x) <= 0`. Cloning is cheap since
/// the residual function is shared.
pub struct Constraint<V> {
    kind: ConstraintKind,
    residual: Residual<V>,
    label: Option<String>,
}

impl<V> Clone for Constraint<V> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            residual: Arc::clone(&self.residual),
            label: self.label.clone(),
        }
    }
}

impl<V> fmt::Debug for Constraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<V> Constraint<V> {
    /// Creates a constraint of the given kind.
    pub fn new<F>(kind: ConstraintKind, residual: F) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self {
            kind,
            residual: Arc::new(residual),
            label: None,
        }
    }

    /// Creates an equality constraint: `residual(x) == 0`.
    pub fn equality<F>(residual: F) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self::new(ConstraintKind::Equality, residual)
    }

    /// Creates an inequality constraint: `residual(x) <= 0`.
    pub fn inequality<F>(residual: F) -> Self
    where
        F: Fn(&V) -> f64 + Send + Sync + 'static,
    {
        Self::new(ConstraintKind::Inequality, residual)
    }

    /// Attaches a label used in diagnostics.
    #[must_use]
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the constraint kind.
    #[must_use]
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Returns `true` for equality constraints.
    #[must_use]
    pub fn is_equality(&self) -> bool {
        self.kind == ConstraintKind::Equality
    }

    /// Returns the label, if one was attached.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Evaluates the residual at `x`.
    pub fn residual(&self, x: &V) -> f64 {
        (self.residual)(x)
    }

    /// Returns the violation at `x`: `|r|` for equality, `max(0, r)` for inequality.
    pub fn violation(&self, x: &V) -> f64 {
        self.kind.violation(self.residual(x))
    }

    /// Returns `true` if the constraint holds at `x` within `epsilon`.
    pub fn is_satisfied(&self, x: &V, epsilon: f64) -> bool {
        self.kind.is_satisfied(self.residual(x), epsilon)
    }
}

impl<V: VectorSpace> Constraint<V> {
    /// Requires the components to sum to one.
    #[must_use]
    pub fn budget() -> Self {
        Self::equality(|x: &V| x.as_slice().iter().sum::<f64>() - 1.0).labelled("budget")
    }

    /// Requires `x[index] >= 0`.
    #[must_use]
    pub fn non_negative(index: usize) -> Self {
        Self::inequality(move |x: &V| -x.as_slice()[index])
            .labelled(format!("non_negative[{index}]"))
    }

    /// Requires every one of the first `dimension` components to be non-negative.
    #[must_use]
    pub fn non_negativity(dimension: usize) -> Vec<Self> {
        (0..dimension).map(Self::non_negative).collect()
    }

    /// Requires `x[index] >= minimum`.
    #[must_use]
    pub fn lower_bound(index: usize, minimum: f64) -> Self {
        Self::inequality(move |x: &V| minimum - x.as_slice()[index])
            .labelled(format!("lower_bound[{index}]"))
    }

    /// Requires `x[index] <= maximum`.
    #[must_use]
    pub fn upper_bound(index: usize, maximum: f64) -> Self {
        Self::inequality(move |x: &V| x.as_slice()[index] - maximum)
            .labelled(format!("upper_bound[{index}]"))
    }
}

/// Returns `true` if every constraint holds at `x` within `epsilon`.
pub fn all_satisfied<V>(constraints: &[Constraint<V>], x: &V, epsilon: f64) -> bool {
    constraints.iter().all(|c| c.is_satisfied(x, epsilon))
}

/// Returns the largest violation across `constraints`, or zero if there are none.
pub fn max_violation<V>(constraints: &[Constraint<V>], x: &V) -> f64 {
    constraints
        .iter()
        .map(|c| c.violation(x))
        .fold(0.0, f64::max)
}
