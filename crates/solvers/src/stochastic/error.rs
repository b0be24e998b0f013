use crate::scenario;

/// Errors that can occur during a stochastic solve.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("scenario list is empty")]
    NoScenarios,

    #[error(transparent)]
    Scenario(#[from] scenario::Error),
}
