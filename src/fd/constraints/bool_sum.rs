//! `BoolSum(boolVars, total)`: booleans are 1-indexed domains over `{1,2}`
//! (`1` = false, `2` = true); `total` encodes `count_of_true + 1` so it too
//! lives in the positive bitset universe. Standard 0/1 aggregation bounds
//! propagation: narrow `total` to `[mandatory, possible]` true-counts, then
//! force remaining undecided booleans once the count is pinned at either
//! extreme.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use crate::domain::Domain;

const FALSE: i64 = 1;
const TRUE: i64 = 2;

#[derive(Debug)]
pub struct BoolSum {
    bool_vars: Vec<VarId>,
    total: VarId,
}

impl BoolSum {
    pub fn new(bool_vars: Vec<VarId>, total: VarId) -> Self {
        BoolSum { bool_vars, total }
    }
}

impl PropagationConstraint for BoolSum {
    fn name(&self) -> &'static str {
        "bool_sum"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.bool_vars.clone();
        s.push(self.total);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .bool_vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let total_dom = SolverState::get_domain(state, model, self.total);

        let mandatory = domains.iter().filter(|d| d.singleton_value() == Some(TRUE)).count() as i64;
        let possible = domains.iter().filter(|d| d.has(TRUE)).count() as i64;

        let new_total = total_dom
            .remove_below(mandatory + 1)
            .remove_above(possible + 1);
        if new_total.is_empty() {
            return PropagationOutcome::Failed;
        }
        let min_count = new_total.min().unwrap() - 1;
        let max_count = new_total.max().unwrap() - 1;

        let mut current = state.clone();
        if !new_total.equal(&total_dom) {
            current = SolverState::set_domain(&current, model, self.total, new_total);
        }

        for (i, &var_id) in self.bool_vars.iter().enumerate() {
            let d = &domains[i];
            if d.is_singleton() {
                continue;
            }
            let forced = if possible == min_count && d.has(TRUE) {
                // Every still-possible true is now required true.
                Some(TRUE)
            } else if mandatory == max_count && d.has(TRUE) {
                // No slack left for more trues: force this one false.
                Some(FALSE)
            } else {
                None
            };
            if let Some(v) = forced {
                let nd = Domain::singleton(v, d.max_value());
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
    fn pins_all_true_when_count_saturates_possible() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(2);
        let y = b.new_var_full(2);
        let total = b.new_var(Domain::singleton(3, 3), None); // count = 2
        b.post(Arc::new(BoolSum::new(vec![x, y], total))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x).singleton_value(), Some(TRUE));
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(TRUE));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn forces_false_when_mandatory_saturates_max() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(TRUE, 2), None);
        let y = b.new_var_full(2);
        let total = b.new_var(Domain::singleton(2, 2), None); // count = 1
        b.post(Arc::new(BoolSum::new(vec![x, y], total))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(FALSE));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
