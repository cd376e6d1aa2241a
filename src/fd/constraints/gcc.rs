//! `GCC(vars, minCount[], maxCount[])`: per-value cardinality bounds.
//! Bounds-consistent via mandatory/possible occurrence counts per value;
//! prunes a value from every still-undecided variable once its possible
//! count has been driven down to its required minimum (every occurrence is
//! needed) or saturates at its maximum (no more room).

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Gcc {
    vars: Vec<VarId>,
    /// (value, min_count, max_count) triples.
    bounds: Vec<(i64, u32, u32)>,
}

impl Gcc {
    pub fn new(vars: Vec<VarId>, bounds: Vec<(i64, u32, u32)>) -> Self {
        Gcc { vars, bounds }
    }
}

impl PropagationConstraint for Gcc {
    fn name(&self) -> &'static str {
        "gcc"
    }

    fn scope(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let mut current = state.clone();

        for &(value, min_count, max_count) in &self.bounds {
            let mandatory = domains.iter().filter(|d| d.singleton_value() == Some(value)).count() as u32;
            let possible = domains.iter().filter(|d| d.has(value)).count() as u32;

            if mandatory > max_count || possible < min_count {
                return PropagationOutcome::Failed;
            }
            if possible == min_count && possible > mandatory {
                for (i, &var_id) in self.vars.iter().enumerate() {
                    let d = SolverState::get_domain(&current, model, var_id);
                    if !d.is_singleton() && d.has(value) {
                        let nd = Domain::singleton(value, d.max_value());
                        current = SolverState::set_domain(&current, model, var_id, nd);
                    }
                }
            } else if mandatory == max_count && possible > mandatory {
                for (i, &var_id) in self.vars.iter().enumerate() {
                    let d = SolverState::get_domain(&current, model, var_id);
                    if !d.is_singleton() && d.has(value) {
                        let nd = d.remove(value);
                        if nd.is_empty() {
                            return PropagationOutcome::Failed;
                        }
                        current = SolverState::set_domain(&current, model, var_id, nd);
                    }
                    let _ = i;
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
    fn min_count_forces_assignment() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(3);
        let y = b.new_var_full(3);
        // value 1 must appear at least 2 times among {x,y}: forces both to 1.
        b.post(Arc::new(Gcc::new(vec![x, y], vec![(1, 2, 2)]))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x).singleton_value(), Some(1));
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(1));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
