//! `Count(vars, value, k)`: the number of `vars` equal to `value` equals
//! `k - 1` (k is 1-indexed like the rest of the bitset universe). Built
//! directly from mandatory/possible occurrence counting, the same
//! technique `BoolSum` uses.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Count {
    vars: Vec<VarId>,
    value: i64,
    k: VarId,
}

impl Count {
    pub fn new(vars: Vec<VarId>, value: i64, k: VarId) -> Self {
        Count { vars, value, k }
    }
}

impl PropagationConstraint for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.vars.clone();
        s.push(self.k);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let k_dom = SolverState::get_domain(state, model, self.k);

        let mandatory = domains.iter().filter(|d| d.singleton_value() == Some(self.value)).count() as i64;
        let possible = domains.iter().filter(|d| d.has(self.value)).count() as i64;

        let new_k = k_dom.remove_below(mandatory + 1).remove_above(possible + 1);
        if new_k.is_empty() {
            return PropagationOutcome::Failed;
        }
        let min_count = new_k.min().unwrap() - 1;
        let max_count = new_k.max().unwrap() - 1;

        let mut current = state.clone();
        if !new_k.equal(&k_dom) {
            current = SolverState::set_domain(&current, model, self.k, new_k);
        }

        for (i, &var_id) in self.vars.iter().enumerate() {
            let d = &domains[i];
            if d.is_singleton() {
                continue;
            }
            if possible == min_count && d.has(self.value) {
                let nd = Domain::singleton(self.value, d.max_value());
                current = SolverState::set_domain(&current, model, var_id, nd);
            } else if mandatory == max_count && d.has(self.value) {
                let nd = d.remove(self.value);
                if nd.is_empty() {
                    return PropagationOutcome::Failed;
                }
                current = SolverState::set_domain(&current, model, var_id, nd);
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
    fn exact_count_forces_remaining() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(5, 5), None);
        let y = b.new_var_full(5);
        let z = b.new_var_full(5);
        let k = b.new_var(Domain::singleton(2, 4), None); // count == 1
        b.post(Arc::new(Count::new(vec![x, y, z], 5, k))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert!(!SolverState::get_domain(&s, &model, y).has(5));
                assert!(!SolverState::get_domain(&s, &model, z).has(5));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
