//! `Modulo(x, m, r)`: `r = x mod m` for a constant positive modulus `m`.
//! Arc-consistent: forward projects each `x` to its remainder; backward
//! expands each admissible remainder to every `x` value congruent to it
//! within the domain's universe.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Modulo {
    x: VarId,
    m: i64,
    r: VarId,
}

impl Modulo {
    pub fn new(x: VarId, m: i64, r: VarId) -> Self {
        assert!(m > 0, "Modulo's modulus must be positive");
        Modulo { x, m, r }
    }
}

impl PropagationConstraint for Modulo {
    fn name(&self) -> &'static str {
        "modulo"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.x, self.r]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);
        let dr = SolverState::get_domain(state, model, self.r);

        let projected_r = Domain::from_values(dx.iter().map(|v| v.rem_euclid(self.m)), dr.max_value());
        let new_r = dr.intersect(&projected_r);
        if new_r.is_empty() {
            return PropagationOutcome::Failed;
        }

        let new_x = Domain::from_values(
            dx.iter().filter(|v| new_r.has(v.rem_euclid(self.m))),
            dx.max_value(),
        );
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
    fn remainder_narrows_both_ways() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::from_values([4, 9], 10), None);
        let r = b.new_var(Domain::singleton(1, 10), None); // x mod 4 == 1
        b.post(Arc::new(Modulo::new(x, 4, r))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x).singleton_value(), Some(9));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
