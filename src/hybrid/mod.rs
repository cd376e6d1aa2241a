//! The hybrid store bridging the finite-domain solver and the
//! relational engine (C11/C12, SPEC_FULL §4.9): a single `UnifiedStore`
//! keyed by one shared `VarId` space, propagated to a joint fixed point
//! by a small set of `SolverPlugin`s.
//!
//! Crossing between the two engines is always explicit: a caller wires
//! a `FdPlugin` (covering the variables it wants modeled as finite
//! domains) and a `RelationalPlugin` into a `HybridSolver`, rather than
//! relying on automatic widening between `fd::Model` and the relational
//! engine's own `State<U, E>`.

pub mod plugin;
pub mod store;

pub use plugin::{FdPlugin, HybridSolver, PluginOutcome, RelationalPlugin, SolverPlugin};
pub use store::{CheckResult, RelationalConstraint, UnifiedStore};
