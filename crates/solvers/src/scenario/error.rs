use crate::penalty;

/// Errors that can occur during a scenario solve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no scenarios were supplied")]
    NoScenarios,

    #[error("scenario '{name}' has probability {probability}, expected a value in [0, 1]")]
    Probability { name: String, probability: f64 },

    #[error("scenario probabilities sum to zero")]
    ZeroTotalProbability,

    #[error(transparent)]
    Solver(#[from] penalty::Error),
}
