use crate::gradient::dot;

/// Dense BFGS approximation of the inverse Hessian.
///
/// Stored row-major. After a reset the matrix is the identity; the first
/// accepted update rescales it by `sᵀy / yᵀy` before applying the rank-two
/// correction.
#[derive(Debug, Clone)]
pub(super) struct InverseHessian {
    dimension: usize,
    matrix: Vec<f64>,
    fresh: bool,
}

impl InverseHessian {
    pub(super) fn identity(dimension: usize) -> Self {
        let mut hessian = Self {
            dimension,
            matrix: vec![0.0; dimension * dimension],
            fresh: true,
        };
        hessian.reset();
        hessian
    }

    /// Returns `true` if no update has been applied since the last reset.
    pub(super) fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub(super) fn reset(&mut self) {
        let n = self.dimension;
        self.matrix.fill(0.0);
        for i in 0..n {
            self.matrix[i * n + i] = 1.0;
        }
        self.fresh = true;
    }

    /// Returns the quasi-Newton direction `−H g`.
    pub(super) fn direction(&self, gradient: &[f64]) -> Vec<f64> {
        self.apply(gradient).into_iter().map(|v| -v).collect()
    }

    /// Applies the BFGS update for step `s` and gradient change `y`.
    ///
    /// Returns `false` and leaves the matrix unchanged if the curvature
    /// condition `sᵀy > 0` does not hold with some margin.
    pub(super) fn update(&mut self, s: &[f64], y: &[f64]) -> bool {
        let sy = dot(s, y);
        let s_norm = dot(s, s).sqrt();
        let y_norm = dot(y, y).sqrt();
        if !(sy > 1e-10 * s_norm * y_norm) {
            return false;
        }

        if self.fresh {
            let scale = sy / dot(y, y);
            for v in &mut self.matrix {
                *v *= scale;
            }
        }

        let n = self.dimension;
        let hy = self.apply(y);
        let yhy = dot(y, &hy);
        let rho = 1.0 / sy;
        let curvature = rho * rho * yhy + rho;

        for i in 0..n {
            for j in 0..n {
                self.matrix[i * n + j] +=
                    curvature * s[i] * s[j] - rho * (hy[i] * s[j] + s[i] * hy[j]);
            }
        }

        self.fresh = false;
        true
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        self.matrix
            .chunks_exact(self.dimension.max(1))
            .map(|row| dot(row, v))
            .collect()
    }
}
