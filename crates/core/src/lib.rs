//! Core traits and types for the Finopt optimization engine.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`VectorSpace`] and [`VectorState`] — finite-dimensional real states
//! - [`Constraint`] — an equality or inequality residual over a state
//! - [`Objective`] — a scalar objective with an optional analytic gradient
//! - [`Goal`] — the optimization direction
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`Scenario`] — a named, probability-weighted set of parameters

mod constraint;
mod goal;
mod objective;
mod observer;
mod scenario;
mod vector;

pub use constraint::{Constraint, ConstraintKind, all_satisfied, max_violation};
pub use goal::Goal;
pub use objective::{Objective, WithGradient};
pub use observer::{Chain, Observer};
pub use scenario::{Parameters, Scenario};
pub use vector::{DimensionMismatch, VectorSpace, VectorState};
