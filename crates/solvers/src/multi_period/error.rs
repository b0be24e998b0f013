use finopt_core::DimensionMismatch;

use crate::penalty;

/// Errors that can occur during a multi-period solve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("initial trajectory has {actual} periods, expected {expected}")]
    TrajectoryLength { expected: usize, actual: usize },

    #[error("period {period}: {source}")]
    PeriodDimension {
        period: usize,
        #[source]
        source: DimensionMismatch,
    },

    #[error(transparent)]
    Solver(#[from] penalty::Error),
}
