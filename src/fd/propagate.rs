//! The fixed-point propagation engine (C7, SPEC_FULL §4.5). Grounded on
//! `state/mod.rs`'s `run_constraints` drain-and-requeue loop, generalized
//! to operate over the `PropagationConstraint` trait instead of a hardcoded
//! list of FD constraint types.

use crate::fd::model::Model;
use crate::fd::state::{SolverState, StateHandle};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// The result of a single constraint's `propagate` call.
#[derive(Debug)]
pub enum PropagationOutcome {
    NoChange,
    Narrowed(StateHandle),
    Failed,
}

/// The result of running the fixed-point loop to completion.
#[derive(Debug)]
pub enum FixpointOutcome {
    Consistent(StateHandle),
    Inconsistent,
}

/// Drive every constraint in `model` to quiescence starting from `state`.
///
/// Algorithm (SPEC_FULL §4.5): seed the queue with every constraint
/// touching a variable narrowed since `state`'s nearest unmodified
/// ancestor (or every constraint on a cold start), then repeatedly pop,
/// propagate, and re-enqueue dependents of anything that changed, until
/// the queue drains or a domain collapses.
#[tracing::instrument(level = "debug", skip(model, state))]
pub fn run_to_fixpoint(model: &Model, state: StateHandle) -> FixpointOutcome {
    let mut queue: VecDeque<usize> = (0..model.constraint_count()).collect();
    let mut in_queue = vec![true; model.constraint_count()];
    let mut current = state;

    while let Some(idx) = queue.pop_front() {
        in_queue[idx] = false;
        let constraint = &model.constraints()[idx];
        trace!(constraint = constraint.name(), "propagating");
        match constraint.propagate(model, &current) {
            PropagationOutcome::NoChange => {}
            PropagationOutcome::Failed => {
                debug!(constraint = constraint.name(), "propagation failed");
                return FixpointOutcome::Inconsistent;
            }
            PropagationOutcome::Narrowed(next) => {
                let changed = SolverState::changed_since(&next, &current);
                current = next;
                if SolverState::is_failed(&current, model) {
                    return FixpointOutcome::Inconsistent;
                }
                for var in changed {
                    for &dep in model.dependents(var) {
                        if !in_queue[dep] {
                            in_queue[dep] = true;
                            queue.push_back(dep);
                        }
                    }
                }
            }
        }
    }
    FixpointOutcome::Consistent(current)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;
    use crate::fd::constraints::all_different::AllDifferent;
    use crate::fd::model::ModelBuilder;
    use std::sync::Arc;

    #[test]
    fn fixpoint_detects_inconsistency() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(1, 2), None);
        let y = b.new_var(Domain::singleton(1, 2), None);
        b.post(Arc::new(AllDifferent::new(vec![x, y]))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("expected inconsistency"),
        }
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(3);
        let y = b.new_var_full(3);
        let z = b.new_var_full(3);
        b.post(Arc::new(AllDifferent::new(vec![x, y, z]))).unwrap();
        let model = b.build();
        let once = match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => s,
            FixpointOutcome::Inconsistent => panic!("expected consistency"),
        };
        let twice = match run_to_fixpoint(&model, once.clone()) {
            FixpointOutcome::Consistent(s) => s,
            FixpointOutcome::Inconsistent => panic!("expected consistency"),
        };
        for v in [x, y, z] {
            assert!(SolverState::get_domain(&once, &model, v)
                .equal(&SolverState::get_domain(&twice, &model, v)));
        }
    }
}
