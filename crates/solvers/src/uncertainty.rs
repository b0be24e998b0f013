//! Parameter uncertainty sets for robust optimization.
//!
//! An [`UncertaintySet`] describes the parameter vectors a robust solution
//! must tolerate. Three shapes are provided:
//!
//! - [`BoxUncertainty`] — independent symmetric intervals around a nominal
//! - [`EllipsoidalUncertainty`] — a covariance-shaped ellipsoid
//! - [`DiscreteUncertainty`] — an explicit finite list of points

mod box_set;
mod discrete;
mod ellipsoidal;
mod error;

pub use box_set::{BoxUncertainty, MAX_ENUMERATED_DIMENSION};
pub use discrete::DiscreteUncertainty;
pub use ellipsoidal::EllipsoidalUncertainty;
pub use error::UncertaintyError;

use rand::Rng;

use finopt_core::VectorState;

/// A set of parameter vectors with a containment test and a sampler.
pub trait UncertaintySet {
    /// Returns the dimension of the parameter vectors.
    fn dimension(&self) -> usize;

    /// Returns the nominal parameters.
    fn nominal(&self) -> VectorState;

    /// Returns `true` if `point` belongs to the set.
    ///
    /// Points of the wrong dimension never belong.
    fn contains(&self, point: &VectorState) -> bool;

    /// Draws points from the set for worst-case search.
    ///
    /// Shapes decide how `count` is honored; see each implementation.
    fn sample_points<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<VectorState>;
}
