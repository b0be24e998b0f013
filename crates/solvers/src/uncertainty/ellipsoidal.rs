use rand::Rng;
use rand_distr::StandardNormal;

use finopt_core::VectorState;

use super::{
    UncertaintySet,
    error::{UncertaintyError, check_dimension, check_nominal},
};

/// Relative slack on the containment test, so sampled boundary points count
/// as members despite rounding.
const BOUNDARY_SLACK: f64 = 1e-9;

/// The ellipsoid `(p − c)ᵀ Σ⁻¹ (p − c) ≤ r²`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidalUncertainty {
    nominal: VectorState,
    covariance: Vec<Vec<f64>>,
    radius: f64,
    /// Lower Cholesky factor of the covariance, row-major.
    factor: Vec<f64>,
}

impl EllipsoidalUncertainty {
    /// Creates an ellipsoid centered at `nominal`.
    ///
    /// # Errors
    ///
    /// Returns an error if `nominal` is empty or not finite, if `covariance`
    /// is not a square matrix of matching dimension, if it is not symmetric
    /// positive definite, or if `radius` is negative or not finite.
    pub fn new(
        nominal: VectorState,
        covariance: Vec<Vec<f64>>,
        radius: f64,
    ) -> Result<Self, UncertaintyError> {
        check_nominal(nominal.as_slice())?;
        let n = nominal.dimension();
        check_dimension("covariance rows", n, covariance.len())?;
        for row in &covariance {
            check_dimension("covariance columns", n, row.len())?;
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(UncertaintyError::Radius(radius));
        }

        for i in 0..n {
            for j in 0..i {
                let (a, b) = (covariance[i][j], covariance[j][i]);
                let scale = a.abs().max(b.abs()).max(1.0);
                if !a.is_finite() || !b.is_finite() || (a - b).abs() > 1e-12 * scale {
                    return Err(UncertaintyError::Asymmetric);
                }
            }
        }

        let factor = cholesky(&covariance).ok_or(UncertaintyError::NotPositiveDefinite)?;

        Ok(Self {
            nominal,
            covariance,
            radius,
            factor,
        })
    }

    /// Returns the covariance matrix.
    #[must_use]
    pub fn covariance(&self) -> &[Vec<f64>] {
        &self.covariance
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the squared Mahalanobis distance of `point` from the center.
    ///
    /// Solves `L z = p − c` by forward substitution, so `|z|² = (p − c)ᵀ Σ⁻¹ (p − c)`.
    #[must_use]
    pub fn mahalanobis_squared(&self, point: &VectorState) -> f64 {
        let n = self.dimension();
        let mut z = vec![0.0; n];
        for i in 0..n {
            let row = &self.factor[i * n..i * n + i];
            let partial: f64 = row.iter().zip(&z).map(|(l, zj)| l * zj).sum();
            z[i] = (point[i] - self.nominal[i] - partial) / self.factor[i * n + i];
        }
        z.iter().map(|v| v * v).sum()
    }
}

/// Returns the row-major lower Cholesky factor, or `None` if `matrix` is not
/// positive definite.
fn cholesky(matrix: &[Vec<f64>]) -> Option<Vec<f64>> {
    let n = matrix.len();
    let mut factor = vec![0.0; n * n];

    for i in 0..n {
        for j in 0..=i {
            let partial: f64 = (0..j).map(|k| factor[i * n + k] * factor[j * n + k]).sum();
            let value = matrix[i][j] - partial;
            if i == j {
                if !(value > 0.0) {
                    return None;
                }
                factor[i * n + i] = value.sqrt();
            } else {
                factor[i * n + j] = value / factor[j * n + j];
            }
        }
    }

    Some(factor)
}

impl UncertaintySet for EllipsoidalUncertainty {
    fn dimension(&self) -> usize {
        self.nominal.dimension()
    }

    fn nominal(&self) -> VectorState {
        self.nominal.clone()
    }

    fn contains(&self, point: &VectorState) -> bool {
        if point.dimension() != self.dimension() {
            return false;
        }
        let limit = self.radius * self.radius;
        self.mahalanobis_squared(point) <= limit * (1.0 + BOUNDARY_SLACK) + f64::EPSILON
    }

    /// Returns `count` points on the boundary, `c + r L u` with `u` uniform on
    /// the unit sphere.
    fn sample_points<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<VectorState> {
        let n = self.dimension();
        let mut points = Vec::with_capacity(count);

        while points.len() < count {
            let u: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
            let norm = u.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }

            let point = (0..n)
                .map(|i| {
                    let row = &self.factor[i * n..=i * n + i];
                    let lu: f64 = row.iter().zip(&u).map(|(l, ui)| l * ui).sum();
                    self.nominal[i] + self.radius * lu / norm
                })
                .collect();
            points.push(point);
        }

        points
    }
}
