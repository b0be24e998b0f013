//! Solvers for constrained, multi-period, robust, and stochastic problems.
//!
//! Every solver reduces its problem to a flat vector of decision variables
//! and hands it to the augmented Lagrangian engine in [`penalty`]:
//!
//! - [`penalty`] — constrained nonlinear optimization over a single state
//! - [`multi_period`] — trajectories of states linked by period, transition,
//!   and path constraints, with discounting
//! - [`robust`] — worst-case optimization over an [`uncertainty`] set
//! - [`scenario`] — expected-value optimization over weighted scenarios,
//!   plus a seeded [`ScenarioGenerator`](scenario::ScenarioGenerator)
//! - [`stochastic`] — sample-average optimization over generated scenarios

mod gradient;
mod program;
mod sampling;

pub mod multi_period;
pub mod penalty;
pub mod robust;
pub mod scenario;
pub mod stochastic;
pub mod uncertainty;
