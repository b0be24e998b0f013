//! Reusable observers for the Finopt solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across every solver in `finopt-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasObjective`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`History`] — records `(iteration, objective)` pairs
//! - [`TracingObserver`] — emits `tracing` progress events
//! - [`Target`] — stops once the objective reaches a target
//!
//! Combine them with [`Chain`](finopt_core::Chain).
//!
//! [`Observer`]: finopt_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly

mod history;
mod target;
mod tracing_observer;

pub mod traits;

pub use history::{History, Record};
pub use target::Target;
pub use tracing_observer::TracingObserver;
