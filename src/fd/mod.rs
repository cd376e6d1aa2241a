//! Finite-domain constraint solving: bitset domains (`crate::domain`), an
//! immutable model, a copy-on-write search state, a fixed-point propagation
//! engine, a catalog of global constraints, and sequential/parallel
//! backtracking search with optimization.
//!
//! Grounded on `state/mod.rs`'s existing `resolve_storable_domain`/
//! `run_constraints` fixed-point discipline, generalized into an explicit
//! `PropagationConstraint` trait so the catalog in `fd::constraints` is not
//! hardcoded into the state type the way the teacher's legacy
//! `state/constraint/fd.rs` was.

pub mod constraints;
pub mod model;
pub mod propagate;
pub mod search;
pub mod state;

pub use model::{FdVariable, Model, ModelBuilder, SolverConfig, ValueHeuristic, VarId, VariableHeuristic};
pub use propagate::{run_to_fixpoint, PropagationOutcome};
pub use search::{solve, solve_optimal, Assignment, Objective, OptimizeOptions, OptimizeOutcome};
pub use state::{SolverState, StateHandle};

use std::fmt;

/// A constraint participating in finite-domain propagation.
///
/// Implementations must be deterministic (same `(model, state)` in implies
/// the same result out) and monotone (the returned domains are never a
/// superset of the input domains for variables in `scope()`).
pub trait PropagationConstraint: fmt::Debug {
    /// Stable name, used in diagnostics and tracing spans.
    fn name(&self) -> &'static str;

    /// Variables this constraint reads or prunes. The propagation engine
    /// uses this to decide when the constraint needs to be re-run.
    fn scope(&self) -> Vec<VarId>;

    /// Narrow `state` given `model`'s current domains. Returning
    /// `PropagationOutcome::NoChange` must mean exactly that: the engine
    /// uses this to detect quiescence without re-diffing domains itself.
    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome;
}
