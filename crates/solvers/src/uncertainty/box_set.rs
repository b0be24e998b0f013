use rand::Rng;

use finopt_core::VectorState;

use super::{
    UncertaintySet,
    error::{UncertaintyError, check_dimension, check_nominal},
};

/// Largest dimension for which every corner is enumerated.
pub const MAX_ENUMERATED_DIMENSION: usize = 12;

/// A symmetric hyperrectangle `nominal ± deviations`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxUncertainty {
    nominal: VectorState,
    deviations: VectorState,
    lower: VectorState,
    upper: VectorState,
}

impl BoxUncertainty {
    /// Creates a box around `nominal` with per-component half-widths.
    ///
    /// # Errors
    ///
    /// Returns an error if `nominal` is empty or not finite, if the dimensions
    /// differ, or if a deviation is negative or not finite.
    pub fn new(nominal: VectorState, deviations: VectorState) -> Result<Self, UncertaintyError> {
        check_nominal(nominal.as_slice())?;
        check_dimension("deviations", nominal.dimension(), deviations.dimension())?;
        if let Some((index, &value)) = deviations
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(UncertaintyError::Deviation { index, value });
        }

        let lower = nominal.iter().zip(&deviations).map(|(c, d)| c - d).collect();
        let upper = nominal.iter().zip(&deviations).map(|(c, d)| c + d).collect();

        Ok(Self {
            nominal,
            deviations,
            lower,
            upper,
        })
    }

    /// Returns the per-component half-widths.
    #[must_use]
    pub fn deviations(&self) -> &VectorState {
        &self.deviations
    }

    /// Returns `nominal - deviations`.
    #[must_use]
    pub fn lower_bounds(&self) -> &VectorState {
        &self.lower
    }

    /// Returns `nominal + deviations`.
    #[must_use]
    pub fn upper_bounds(&self) -> &VectorState {
        &self.upper
    }

    /// Returns the corner selecting the upper bound wherever `upper(i)` holds.
    fn corner(&self, upper: impl Fn(usize) -> bool) -> VectorState {
        (0..self.dimension())
            .map(|i| if upper(i) { self.upper[i] } else { self.lower[i] })
            .collect()
    }
}

impl UncertaintySet for BoxUncertainty {
    fn dimension(&self) -> usize {
        self.nominal.dimension()
    }

    fn nominal(&self) -> VectorState {
        self.nominal.clone()
    }

    fn contains(&self, point: &VectorState) -> bool {
        point.dimension() == self.dimension()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(p, (lo, hi))| lo <= p && p <= hi)
    }

    /// Returns every corner, then uniform interior points up to `count`.
    ///
    /// Above [`MAX_ENUMERATED_DIMENSION`] the corners are too many to list and
    /// `count` random corners are returned instead.
    fn sample_points<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<VectorState> {
        let dimension = self.dimension();

        if dimension > MAX_ENUMERATED_DIMENSION {
            return (0..count)
                .map(|_| {
                    let bits: Vec<bool> = (0..dimension).map(|_| rng.random()).collect();
                    self.corner(|i| bits[i])
                })
                .collect();
        }

        let corners = 1_usize << dimension;
        let mut points: Vec<VectorState> = (0..corners)
            .map(|k| self.corner(|i| (k >> i) & 1 == 1))
            .collect();

        while points.len() < count {
            let point = self
                .lower
                .iter()
                .zip(&self.upper)
                .map(|(lo, hi)| lo + (hi - lo) * rng.random::<f64>())
                .collect();
            points.push(point);
        }

        points
    }
}
