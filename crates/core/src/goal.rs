/// Defines the optimization direction.
///
/// Solvers always minimize internally. [`Goal::transform`] maps an objective
/// value to the internal score, so a single algorithm serves both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    /// Minimize the objective.
    #[default]
    Minimize,

    /// Maximize the objective.
    Maximize,
}

impl Goal {
    /// Transforms an objective value for internal minimization.
    ///
    /// - [`Goal::Minimize`]: returns the value unchanged
    /// - [`Goal::Maximize`]: negates the value
    #[inline]
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Self::Minimize => value,
            Self::Maximize => -value,
        }
    }

    /// Returns the sign applied by [`Goal::transform`].
    #[inline]
    #[must_use]
    pub fn sign(self) -> f64 {
        self.transform(1.0)
    }

    /// Returns `true` if `a` is strictly better than `b` for this goal.
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.transform(a) < self.transform(b)
    }

    /// Returns `true` if `a` is strictly worse than `b` for this goal.
    #[must_use]
    pub fn is_worse(self, a: f64, b: f64) -> bool {
        self.transform(a) > self.transform(b)
    }

    /// Returns the index and value of the worst entry in `values`.
    ///
    /// For [`Goal::Minimize`] the worst value is the largest; for
    /// [`Goal::Maximize`] it is the smallest. NaN is treated as worse than
    /// any number. Ties keep the earliest index. Returns `None` if `values`
    /// is empty.
    #[must_use]
    pub fn worst(self, values: &[f64]) -> Option<(usize, f64)> {
        let mut worst: Option<(usize, f64)> = None;
        for (index, &value) in values.iter().enumerate() {
            let replace = match worst {
                None => true,
                Some((_, current)) if current.is_nan() => false,
                Some(_) if value.is_nan() => true,
                Some((_, current)) => self.is_worse(value, current),
            };
            if replace {
                worst = Some((index, value));
            }
        }
        worst
    }
}
