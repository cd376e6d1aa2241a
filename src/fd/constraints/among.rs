//! `Among(vars, S, k)`: the count of `vars` taking a value in `S` equals
//! `k - 1`. A direct generalization of `Count` from a single value to a
//! value set.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Among {
    vars: Vec<VarId>,
    set: Domain,
    k: VarId,
}

impl Among {
    pub fn new(vars: Vec<VarId>, set: Domain, k: VarId) -> Self {
        Among { vars, set, k }
    }

    fn intersects(&self, d: &Domain) -> bool {
        !d.intersect(&self.set).is_empty()
    }

    fn inside_set(&self, d: &Domain) -> bool {
        d.is_subset(&self.set)
    }
}

impl PropagationConstraint for Among {
    fn name(&self) -> &'static str {
        "among"
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

        let mandatory = domains.iter().filter(|d| self.inside_set(d)).count() as i64;
        let possible = domains.iter().filter(|d| self.intersects(d)).count() as i64;

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
            if self.inside_set(d) || d.is_disjoint(&self.set) {
                continue; // already classified, not mixed
            }
            if possible == min_count {
                let nd = d.intersect(&self.set);
                current = SolverState::set_domain(&current, model, var_id, nd);
            } else if mandatory == max_count {
                let nd = d.difference(&self.set);
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
    fn saturated_possible_forces_membership() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let y = b.new_var(Domain::singleton(4, 5), None);
        let k = b.new_var(Domain::singleton(2, 2), None); // count == 1
        let set = Domain::from_values([1, 2], 5);
        b.post(Arc::new(Among::new(vec![x, y], set, k))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dx = SolverState::get_domain(&s, &model, x);
                assert!(dx.is_subset(&Domain::from_values([1, 2], 5)));
                assert!(!dx.has(3) && !dx.has(4) && !dx.has(5));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
