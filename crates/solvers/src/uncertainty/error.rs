use finopt_core::DimensionMismatch;

/// Errors that can occur when constructing an uncertainty set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UncertaintyError {
    #[error("uncertainty set has no dimensions")]
    Empty,

    #[error("{what}: {source}")]
    Dimension {
        what: &'static str,
        #[source]
        source: DimensionMismatch,
    },

    #[error("nominal component {index} is not finite")]
    NonFiniteNominal { index: usize },

    #[error("deviation {index} must be finite and non-negative, got {value}")]
    Deviation { index: usize, value: f64 },

    #[error("covariance must be finite and symmetric")]
    Asymmetric,

    #[error("covariance is not positive definite")]
    NotPositiveDefinite,

    #[error("radius must be finite and non-negative, got {0}")]
    Radius(f64),
}

pub(super) fn check_dimension(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), UncertaintyError> {
    if expected == actual {
        Ok(())
    } else {
        Err(UncertaintyError::Dimension {
            what,
            source: DimensionMismatch { expected, actual },
        })
    }
}

pub(super) fn check_nominal(nominal: &[f64]) -> Result<(), UncertaintyError> {
    if nominal.is_empty() {
        return Err(UncertaintyError::Empty);
    }
    match nominal.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(UncertaintyError::NonFiniteNominal { index }),
        None => Ok(()),
    }
}
