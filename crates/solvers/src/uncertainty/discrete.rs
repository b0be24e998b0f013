use rand::Rng;

use finopt_core::VectorState;

use super::{
    UncertaintySet,
    error::{UncertaintyError, check_dimension, check_nominal},
};

/// A finite list of candidate parameter vectors.
///
/// The first point is the nominal one.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteUncertainty {
    points: Vec<VectorState>,
}

impl DiscreteUncertainty {
    /// Creates a set from its points; the first is the nominal point.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no points, if the first point is empty
    /// or not finite, or if the points differ in dimension.
    pub fn new(points: Vec<VectorState>) -> Result<Self, UncertaintyError> {
        let first = points.first().ok_or(UncertaintyError::Empty)?;
        check_nominal(first.as_slice())?;
        for point in &points[1..] {
            check_dimension("point", first.dimension(), point.dimension())?;
        }
        Ok(Self { points })
    }

    /// Returns every point in the set.
    #[must_use]
    pub fn points(&self) -> &[VectorState] {
        &self.points
    }
}

impl UncertaintySet for DiscreteUncertainty {
    fn dimension(&self) -> usize {
        self.points[0].dimension()
    }

    fn nominal(&self) -> VectorState {
        self.points[0].clone()
    }

    fn contains(&self, point: &VectorState) -> bool {
        self.points.contains(point)
    }

    /// Returns every point, whatever `count` is.
    fn sample_points<R: Rng + ?Sized>(&self, _count: usize, _rng: &mut R) -> Vec<VectorState> {
        self.points.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::StdRng};

    fn scenarios() -> DiscreteUncertainty {
        DiscreteUncertainty::new(vec![
            VectorState::from([0.10]),
            VectorState::from([0.20]),
            VectorState::from([-0.05]),
        ])
        .unwrap()
    }

    #[test]
    fn membership_is_exact() {
        let set = scenarios();

        assert!(set.contains(&VectorState::from([0.20])));
        assert!(!set.contains(&VectorState::from([0.2000001])));
        assert_eq!(set.nominal(), VectorState::from([0.10]));
    }

    #[test]
    fn sampling_returns_every_point() {
        let set = scenarios();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(set.sample_points(1, &mut rng), set.points());
        assert_eq!(set.sample_points(100, &mut rng).len(), 3);
    }

    #[test]
    fn rejects_empty_and_ragged_sets() {
        assert_eq!(DiscreteUncertainty::new(vec![]), Err(UncertaintyError::Empty));
        assert!(matches!(
            DiscreteUncertainty::new(vec![VectorState::zeros(1), VectorState::zeros(2)]),
            Err(UncertaintyError::Dimension { .. })
        ));
    }
}
