use std::ops::{Add, Index, Mul, Neg, Sub};

use thiserror::Error;

/// A state had a different number of components than expected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("dimension mismatch: expected {expected}, got {actual}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// A finite-dimensional real vector.
///
/// Solvers only see states through this trait: they flatten a state into a
/// slice, work on the raw components, and rebuild states with
/// [`VectorSpace::from_slice`]. Implementations are immutable values and
/// every operation returns a new instance.
///
/// Operations combining two vectors (`add`, `sub`, `dot`, `step`) panic if
/// the dimensions differ. A mismatch is a programming error, so it fails
/// fast instead of truncating or padding.
///
/// States are plain numeric values, so the trait requires `Send + Sync +
/// 'static`; objective and constraint closures over them can then be shared
/// across sample-evaluation threads.
pub trait VectorSpace: Clone + Send + Sync + 'static {
    /// Returns the components in order.
    fn as_slice(&self) -> &[f64];

    /// Builds a vector from raw components.
    ///
    /// # Panics
    ///
    /// Panics if the type has a fixed dimension that differs from
    /// `components.len()`. Use [`VectorSpace::try_from_slice`] to check first.
    fn from_slice(components: &[f64]) -> Self;

    /// Returns the compile-time dimension, if the type has one.
    fn fixed_dimension() -> Option<usize> {
        None
    }

    /// Builds a vector from raw components, checking the dimension.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`] if the type has a fixed dimension that
    /// differs from `components.len()`.
    fn try_from_slice(components: &[f64]) -> Result<Self, DimensionMismatch> {
        match Self::fixed_dimension() {
            Some(expected) if expected != components.len() => Err(DimensionMismatch {
                expected,
                actual: components.len(),
            }),
            _ => Ok(Self::from_slice(components)),
        }
    }

    /// Returns the number of components.
    fn dimension(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns the components as an owned `Vec`.
    fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }

    /// Returns the componentwise sum.
    #[must_use]
    fn add(&self, other: &Self) -> Self {
        zip_with(self.as_slice(), other.as_slice(), |a, b| a + b)
    }

    /// Returns the componentwise difference.
    #[must_use]
    fn sub(&self, other: &Self) -> Self {
        zip_with(self.as_slice(), other.as_slice(), |a, b| a - b)
    }

    /// Returns the vector scaled by `factor`.
    #[must_use]
    fn scale(&self, factor: f64) -> Self {
        let scaled: Vec<f64> = self.as_slice().iter().map(|v| v * factor).collect();
        Self::from_slice(&scaled)
    }

    /// Returns the value after stepping along `direction` by `delta`.
    #[must_use]
    fn step(&self, direction: &Self, delta: f64) -> Self {
        zip_with(self.as_slice(), direction.as_slice(), |x, d| x + d * delta)
    }

    /// Returns the standard inner product.
    fn dot(&self, other: &Self) -> f64 {
        dot(self.as_slice(), other.as_slice())
    }

    /// Returns the Euclidean norm.
    fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

fn zip_with<V: VectorSpace>(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> V {
    assert_eq!(a.len(), b.len(), "vector dimensions must match");
    let combined: Vec<f64> = a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect();
    V::from_slice(&combined)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// A dense real vector with a dimension fixed at construction.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorState(Vec<f64>);

impl VectorState {
    /// Creates a state from its components.
    #[must_use]
    pub fn new(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// Creates a state of `dimension` zeros.
    #[must_use]
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Returns the components in order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the components as an owned `Vec`.
    ///
    /// A state built from a `Vec` returns exactly that `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.clone()
    }

    /// Consumes the state and returns its components.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Iterates over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Returns the component at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Returns the sum of all components.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Returns the standard inner product.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        dot(&self.0, &other.0)
    }
}

impl VectorSpace for VectorState {
    fn as_slice(&self) -> &[f64] {
        &self.0
    }

    fn from_slice(components: &[f64]) -> Self {
        Self(components.to_vec())
    }
}

impl<const N: usize> VectorSpace for [f64; N] {
    fn as_slice(&self) -> &[f64] {
        self
    }

    fn from_slice(components: &[f64]) -> Self {
        let mut array = [0.0; N];
        array.copy_from_slice(components);
        array
    }

    fn fixed_dimension() -> Option<usize> {
        Some(N)
    }
}

impl From<Vec<f64>> for VectorState {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

impl From<&[f64]> for VectorState {
    fn from(components: &[f64]) -> Self {
        Self(components.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for VectorState {
    fn from(components: [f64; N]) -> Self {
        Self(components.to_vec())
    }
}

impl From<VectorState> for Vec<f64> {
    fn from(state: VectorState) -> Self {
        state.0
    }
}

impl FromIterator<f64> for VectorState {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for VectorState {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a VectorState {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Add for &VectorState {
    type Output = VectorState;

    fn add(self, rhs: &VectorState) -> VectorState {
        VectorSpace::add(self, rhs)
    }
}

impl Add for VectorState {
    type Output = VectorState;

    fn add(self, rhs: VectorState) -> VectorState {
        &self + &rhs
    }
}

impl Sub for &VectorState {
    type Output = VectorState;

    fn sub(self, rhs: &VectorState) -> VectorState {
        VectorSpace::sub(self, rhs)
    }
}

impl Sub for VectorState {
    type Output = VectorState;

    fn sub(self, rhs: VectorState) -> VectorState {
        &self - &rhs
    }
}

impl Mul<f64> for &VectorState {
    type Output = VectorState;

    fn mul(self, factor: f64) -> VectorState {
        self.scale(factor)
    }
}

impl Mul<f64> for VectorState {
    type Output = VectorState;

    fn mul(self, factor: f64) -> VectorState {
        self.scale(factor)
    }
}

impl Neg for VectorState {
    type Output = VectorState;

    fn neg(self) -> VectorState {
        self.scale(-1.0)
    }
}
