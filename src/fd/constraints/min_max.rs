//! `Min/Max-of-array(vars, R)`: bounds-consistent linkage between an
//! array and a variable tracking its extremum. For `Min`: `R ∈
//! [min_i min(X_i) .. min_i max(X_i)]` and every `X_i >= R`. For `Max`
//! the dual holds with `X_i <= R`.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxKind {
    Min,
    Max,
}

#[derive(Debug)]
pub struct MinMaxOfArray {
    vars: Vec<VarId>,
    result: VarId,
    kind: MinMaxKind,
}

impl MinMaxOfArray {
    pub fn new(vars: Vec<VarId>, result: VarId, kind: MinMaxKind) -> Self {
        assert!(!vars.is_empty(), "min/max of an empty array is undefined");
        MinMaxOfArray { vars, result, kind }
    }
}

impl PropagationConstraint for MinMaxOfArray {
    fn name(&self) -> &'static str {
        match self.kind {
            MinMaxKind::Min => "min_of_array",
            MinMaxKind::Max => "max_of_array",
        }
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.vars.clone();
        s.push(self.result);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let dr = SolverState::get_domain(state, model, self.result);

        let (r_lo, r_hi) = match self.kind {
            MinMaxKind::Min => (
                domains.iter().filter_map(|d| d.min()).min(),
                domains.iter().filter_map(|d| d.max()).min(),
            ),
            MinMaxKind::Max => (
                domains.iter().filter_map(|d| d.min()).max(),
                domains.iter().filter_map(|d| d.max()).max(),
            ),
        };
        let (r_lo, r_hi) = match (r_lo, r_hi) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => return PropagationOutcome::Failed,
        };

        let new_r = dr.remove_below(r_lo).remove_above(r_hi);
        if new_r.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_r.equal(&dr) {
            current = SolverState::set_domain(&current, model, self.result, new_r.clone());
        }

        for (i, &var_id) in self.vars.iter().enumerate() {
            let d = &domains[i];
            let narrowed = match self.kind {
                MinMaxKind::Min => d.remove_below(new_r.min().unwrap()),
                MinMaxKind::Max => d.remove_above(new_r.max().unwrap()),
            };
            if narrowed.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !narrowed.equal(d) {
                current = SolverState::set_domain(&current, model, var_id, narrowed);
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
    fn min_links_bounds() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::from_range(3, 7, 10), None);
        let y = b.new_var(Domain::from_range(5, 9, 10), None);
        let r = b.new_var_full(10);
        b.post(Arc::new(MinMaxOfArray::new(vec![x, y], r, MinMaxKind::Min)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dr = SolverState::get_domain(&s, &model, r);
                assert_eq!(dr.min(), Some(3));
                assert_eq!(dr.max(), Some(7));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn max_forces_lower_bound_on_members() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(10);
        let r = b.new_var(Domain::singleton(8, 10), None);
        b.post(Arc::new(MinMaxOfArray::new(vec![x], r, MinMaxKind::Max)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x).max(), Some(8));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
