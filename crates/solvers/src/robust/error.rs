use finopt_core::VectorState;

use crate::{penalty, uncertainty::UncertaintyError};

/// Errors that can occur during a robust solve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("objective is not finite at parameters {parameters:?}: {value}")]
    NonFiniteObjective {
        parameters: VectorState,
        value: f64,
    },

    #[error("uncertainty set has dimension {set}, nominal parameters have {nominal}")]
    NominalDimension { set: usize, nominal: usize },

    #[error(transparent)]
    Uncertainty(#[from] UncertaintyError),

    #[error(transparent)]
    Solver(#[from] penalty::Error),
}
