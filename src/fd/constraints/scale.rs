//! `Scale(x, k, r)`: `r = k * x` for a constant integer `k != 0`.
//! Arc-consistent: projects `x`'s domain forward by multiplication and
//! `r`'s domain backward by exact division, discarding values that don't
//! divide evenly.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Scale {
    x: VarId,
    k: i64,
    r: VarId,
}

impl Scale {
    pub fn new(x: VarId, k: i64, r: VarId) -> Self {
        assert_ne!(k, 0, "Scale's constant factor must be non-zero");
        Scale { x, k, r }
    }
}

impl PropagationConstraint for Scale {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.x, self.r]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);
        let dr = SolverState::get_domain(state, model, self.r);

        let projected_r = Domain::from_values(dx.iter().map(|v| v * self.k), dr.max_value());
        let new_r = dr.intersect(&projected_r);
        if new_r.is_empty() {
            return PropagationOutcome::Failed;
        }

        let projected_x = Domain::from_values(
            new_r.iter().filter(|v| v % self.k == 0).map(|v| v / self.k),
            dx.max_value(),
        );
        let new_x = dx.intersect(&projected_x);
        if new_x.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_x.equal(&dx) {
            current = SolverState::set_domain(&current, model, self.x, new_x);
        }
        if !new_r.equal(&dr) {
            current = SolverState::set_domain(&current, model, self.r, new_r);
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
    fn forward_and_backward_narrow() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(3, 10), None);
        let r = b.new_var_full(30);
        b.post(Arc::new(Scale::new(x, 3, r))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, r).singleton_value(), Some(9));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn rejects_values_not_divisible() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let r = b.new_var(Domain::from_values([1, 2, 4, 5], 10), None);
        b.post(Arc::new(Scale::new(x, 3, r))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("3x can never land on 1,2,4,5 within range"),
        }
    }
}
