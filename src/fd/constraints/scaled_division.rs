//! `ScaledDivision(d, k, q)`: `q = floor(d / k)` for a constant positive
//! divisor `k`. Arc-consistent integer division primitive, the dual of
//! `Scale`: forward, each dividend projects to exactly one quotient;
//! backward, each admissible quotient expands to a `k`-wide band of
//! dividends.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct ScaledDivision {
    d: VarId,
    k: i64,
    q: VarId,
}

impl ScaledDivision {
    pub fn new(d: VarId, k: i64, q: VarId) -> Self {
        assert!(k > 0, "ScaledDivision's divisor must be positive");
        ScaledDivision { d, k, q }
    }
}

impl PropagationConstraint for ScaledDivision {
    fn name(&self) -> &'static str {
        "scaled_division"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.d, self.q]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dd = SolverState::get_domain(state, model, self.d);
        let dq = SolverState::get_domain(state, model, self.q);

        let projected_q = Domain::from_values(dd.iter().map(|v| v.div_euclid(self.k)), dq.max_value());
        let new_q = dq.intersect(&projected_q);
        if new_q.is_empty() {
            return PropagationOutcome::Failed;
        }

        let projected_d = Domain::from_values(
            new_q.iter().flat_map(|q| (q * self.k)..(q * self.k + self.k)),
            dd.max_value(),
        );
        let new_d = dd.intersect(&projected_d);
        if new_d.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_d.equal(&dd) {
            current = SolverState::set_domain(&current, model, self.d, new_d);
        }
        if !new_q.equal(&dq) {
            current = SolverState::set_domain(&current, model, self.q, new_q);
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
    fn divides_forward() {
        let mut b = ModelBuilder::new();
        let d = b.new_var(Domain::from_range(6, 8, 20), None);
        let q = b.new_var_full(20);
        b.post(Arc::new(ScaledDivision::new(d, 3, q))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, q).singleton_value(), Some(2));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
