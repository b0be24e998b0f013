use finopt_core::DimensionMismatch;

/// Errors that can occur during a penalty solve.
///
/// Failing to converge is not an error; it is reported through
/// [`Status`](super::Status).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("initial state has no components")]
    EmptyState,

    #[error(transparent)]
    Dimension(#[from] DimensionMismatch),

    #[error("objective gradient has {actual} components, expected {expected}")]
    GradientDimension { expected: usize, actual: usize },

    #[error("objective is not finite at the initial point: {value}")]
    NonFiniteObjective { value: f64 },
}
