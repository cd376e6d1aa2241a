//! `Regular(vars, numStates, start, accept, δ)`: forward/backward DFA
//! filtering, pruning each position to the symbols that lie on some path
//! from `start` through that position to an accepting state.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use std::collections::HashSet;

/// `delta[state][symbol] = Some(next_state)`; `symbol` is 1-indexed to
/// match the bitset universe.
#[derive(Debug)]
pub struct Regular {
    vars: Vec<VarId>,
    num_states: usize,
    start: usize,
    accept: HashSet<usize>,
    delta: Vec<Vec<Option<usize>>>,
}

impl Regular {
    pub fn new(
        vars: Vec<VarId>,
        num_states: usize,
        start: usize,
        accept: HashSet<usize>,
        delta: Vec<Vec<Option<usize>>>,
    ) -> Self {
        Regular {
            vars,
            num_states,
            start,
            accept,
            delta,
        }
    }

    fn symbol_range(&self, model: &Model) -> i64 {
        self.vars
            .iter()
            .map(|&v| model.initial_domain(v).max_value())
            .max()
            .unwrap_or(0)
    }
}

impl PropagationConstraint for Regular {
    fn name(&self) -> &'static str {
        "regular"
    }

    fn scope(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let n = self.vars.len();
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let max_symbol = self.symbol_range(model);

        // Forward pass: reachable[i] = set of states reachable after
        // reading positions 0..i.
        let mut reachable: Vec<HashSet<usize>> = vec![HashSet::new(); n + 1];
        reachable[0].insert(self.start);
        for i in 0..n {
            for &q in &reachable[i].clone() {
                for symbol in domains[i].iter() {
                    if let Some(next) = self.delta[q].get(symbol as usize - 1).copied().flatten() {
                        reachable[i + 1].insert(next);
                    }
                }
            }
        }
        if reachable[n].is_disjoint(&self.accept) {
            return PropagationOutcome::Failed;
        }

        // Backward pass: coreachable[i] = set of states from which an
        // accepting state is reachable reading positions i..n.
        let mut coreachable: Vec<HashSet<usize>> = vec![HashSet::new(); n + 1];
        coreachable[n] = self.accept.clone();
        for i in (0..n).rev() {
            for q in 0..self.num_states {
                for symbol in domains[i].iter() {
                    if let Some(next) = self.delta[q].get(symbol as usize - 1).copied().flatten() {
                        if coreachable[i + 1].contains(&next) {
                            coreachable[i].insert(q);
                        }
                    }
                }
            }
        }

        let mut current = state.clone();
        for i in 0..n {
            let mut new_dom = Domain::empty(max_symbol.max(domains[i].max_value()));
            for symbol in domains[i].iter() {
                let supported = reachable[i].iter().any(|&q| {
                    self.delta[q]
                        .get(symbol as usize - 1)
                        .copied()
                        .flatten()
                        .map(|next| coreachable[i + 1].contains(&next))
                        .unwrap_or(false)
                });
                if supported {
                    new_dom = new_dom.union(&Domain::singleton(symbol, new_dom.max_value()));
                }
            }
            if new_dom.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !new_dom.equal(&domains[i]) {
                current = SolverState::set_domain(&current, model, self.vars[i], new_dom);
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

    /// DFA over alphabet {1,2} accepting strings ending in `1`, length 3.
    /// States: 0 = start/"last was 2 or none", 1 = "last was 1" (accepting).
    fn ends_with_one_dfa() -> (usize, usize, HashSet<usize>, Vec<Vec<Option<usize>>>) {
        let delta = vec![
            vec![Some(1), Some(0)], // state 0: symbol1->state1, symbol2->state0
            vec![Some(1), Some(0)], // state 1: symbol1->state1, symbol2->state0
        ];
        let mut accept = HashSet::new();
        accept.insert(1);
        (2, 0, accept, delta)
    }

    #[test]
    fn ends_with_one_prunes_last_position() {
        let mut b = ModelBuilder::new();
        let vars: Vec<_> = (0..3).map(|_| b.new_var_full(2)).collect();
        let (num_states, start, accept, delta) = ends_with_one_dfa();
        b.post(Arc::new(Regular::new(vars.clone(), num_states, start, accept, delta)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let last = SolverState::get_domain(&s, &model, vars[2]);
                assert_eq!(last.singleton_value(), Some(1));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
