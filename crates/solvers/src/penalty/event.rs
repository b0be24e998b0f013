/// Emitted once per outer (multiplier update) iteration.
///
/// `x` is the flattened iterate after the inner minimization. For
/// multi-period and scenario problems it is the joint decision vector the
/// engine works on.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Outer iteration number, starting at one.
    pub iteration: usize,

    /// Current iterate.
    pub x: &'a [f64],

    /// Objective value at `x`, in the caller's direction.
    pub objective: f64,

    /// Largest constraint violation at `x`.
    pub max_violation: f64,

    /// ∞-norm of the Lagrangian gradient at `x`.
    pub gradient_norm: f64,

    /// Penalty weight used for this iteration.
    pub penalty: f64,
}
