//! `DistinctCount(vars, D+1)`: the number of distinct values taken by
//! `vars` equals `D` (the result variable is `D + 1`, matching the
//! positive-bitset convention used throughout the catalog). Computed
//! directly from the possible/mandatory "is this value used" occurrence
//! counts per value in the union of all variable domains, the same
//! mandatory/possible technique `Count`/`GCC` use per-value rather than
//! the reified-used-flag/XOR gadget construction the catalog describes
//! abstractly.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use std::collections::HashSet;

#[derive(Debug)]
pub struct DistinctCount {
    vars: Vec<VarId>,
    n_values: VarId,
}

impl DistinctCount {
    pub fn new(vars: Vec<VarId>, n_values: VarId) -> Self {
        DistinctCount { vars, n_values }
    }
}

impl PropagationConstraint for DistinctCount {
    fn name(&self) -> &'static str {
        "distinct_count"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.vars.clone();
        s.push(self.n_values);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<_> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let dn = SolverState::get_domain(state, model, self.n_values);

        // A value is "mandatory used" if some variable is singleton on it.
        let mandatory_values: HashSet<i64> = domains
            .iter()
            .filter_map(|d| d.singleton_value())
            .collect();
        // A value is "possibly used" if it appears in any variable's domain.
        let possible_values: HashSet<i64> = domains.iter().flat_map(|d| d.iter()).collect();

        let min_distinct = mandatory_values.len() as i64;
        let max_distinct = possible_values.len() as i64;

        let new_n = dn.remove_below(min_distinct + 1).remove_above(max_distinct + 1);
        if new_n.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_n.equal(&dn) {
            current = SolverState::set_domain(&current, model, self.n_values, new_n.clone());
        }

        // If the max admissible distinct count is already pinned to the
        // number of mandatory values, no non-singleton variable may
        // introduce a value outside the mandatory set (that would push
        // the distinct count past the bound).
        let n_max = new_n.max().unwrap() - 1;
        if n_max == min_distinct {
            for (i, &var_id) in self.vars.iter().enumerate() {
                let d = &domains[i];
                if d.is_singleton() {
                    continue;
                }
                let restricted = crate::domain::Domain::from_values(
                    d.iter().filter(|v| mandatory_values.contains(v)),
                    d.max_value(),
                );
                if restricted.is_empty() {
                    // This variable must take a value; if none of its
                    // possible values are mandatory ones, distinctness
                    // would be forced upward, contradicting the bound.
                    return PropagationOutcome::Failed;
                }
                if !restricted.equal(d) {
                    current = SolverState::set_domain(&current, model, var_id, restricted);
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
    use crate::domain::Domain;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn bounds_distinct_count_from_mandatory_and_possible() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(1, 5), None);
        let y = b.new_var(Domain::from_values([1, 2], 5), None);
        let n = b.new_var_full(10);
        b.post(Arc::new(DistinctCount::new(vec![x, y], n))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dn = SolverState::get_domain(&s, &model, n);
                assert_eq!(dn.min(), Some(2)); // at least 1 distinct value + 1
                assert_eq!(dn.max(), Some(3)); // at most 2 distinct values + 1
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn pins_remaining_vars_to_mandatory_set_when_bound_saturates() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(1, 5), None);
        let y = b.new_var(Domain::from_values([1, 2], 5), None);
        let n = b.new_var(Domain::singleton(2, 10), None); // exactly 1 distinct value
        b.post(Arc::new(DistinctCount::new(vec![x, y], n))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(1));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
