//! `Sequence(vars, S, k, minCount, maxCount)`: every window of `k`
//! consecutive `vars` contains between `minCount` and `maxCount`
//! elements whose value falls in `S`. Computed as a sliding window of
//! mandatory/possible-in-`S` occurrence counts, the direct equivalent of
//! the catalog's "`InSetReified` booleans under a per-window `BoolSum`"
//! construction.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Sequence {
    vars: Vec<VarId>,
    set: Vec<i64>,
    window: usize,
    min_count: i64,
    max_count: i64,
}

impl Sequence {
    pub fn new(vars: Vec<VarId>, set: Vec<i64>, window: usize, min_count: i64, max_count: i64) -> Self {
        assert!(window > 0 && window <= vars.len());
        Sequence {
            vars,
            set,
            window,
            min_count,
            max_count,
        }
    }
}

impl PropagationConstraint for Sequence {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn scope(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<_> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let n = self.vars.len();
        let mut current = state.clone();

        for start in 0..=(n - self.window) {
            let win = &domains[start..start + self.window];
            let mandatory = win
                .iter()
                .filter(|d| d.singleton_value().map(|v| self.set.contains(&v)).unwrap_or(false))
                .count() as i64;
            let possible = win
                .iter()
                .filter(|d| d.iter().any(|v| self.set.contains(&v)))
                .count() as i64;

            if mandatory > self.max_count || possible < self.min_count {
                return PropagationOutcome::Failed;
            }

            // If every possible-in-S slot is already required to reach
            // min_count, force the undecided-but-possible slots into S;
            // if mandatory already saturates max_count, force every
            // remaining undecided slot out of S.
            if possible == self.min_count || mandatory == self.max_count {
                for (i, d) in win.iter().enumerate() {
                    if d.is_singleton() {
                        continue;
                    }
                    let var_id = self.vars[start + i];
                    let in_set_possible = d.iter().any(|v| self.set.contains(&v));
                    if !in_set_possible {
                        continue;
                    }
                    let new_d = if possible == self.min_count {
                        crate::domain::Domain::from_values(
                            d.iter().filter(|v| self.set.contains(v)),
                            d.max_value(),
                        )
                    } else {
                        crate::domain::Domain::from_values(
                            d.iter().filter(|v| !self.set.contains(v)),
                            d.max_value(),
                        )
                    };
                    if new_d.is_empty() {
                        return PropagationOutcome::Failed;
                    }
                    if !new_d.equal(d) {
                        current = SolverState::set_domain(&current, model, var_id, new_d);
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
    use crate::domain::Domain;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn forces_remaining_slots_when_min_count_saturates() {
        let mut b = ModelBuilder::new();
        let x0 = b.new_var(Domain::singleton(1, 5), None); // in S
        let x1 = b.new_var_full(5);
        let x2 = b.new_var(Domain::singleton(4, 5), None); // not in S
        b.post(Arc::new(Sequence::new(vec![x0, x1, x2], vec![1, 2], 2, 1, 2)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                // Window [x1, x2] has x2 out of S, so possible-in-S in
                // that window is just x1; min_count=1 forces x1 into S.
                let dx1 = SolverState::get_domain(&s, &model, x1);
                assert!(dx1.has(1) && dx1.has(2));
                assert!(!dx1.has(3) && !dx1.has(4) && !dx1.has(5));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn detects_infeasible_window() {
        let mut b = ModelBuilder::new();
        let x0 = b.new_var(Domain::singleton(4, 5), None);
        let x1 = b.new_var(Domain::singleton(5, 5), None);
        b.post(Arc::new(Sequence::new(vec![x0, x1], vec![1, 2], 2, 1, 2)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("neither value is in S"),
        }
    }
}
