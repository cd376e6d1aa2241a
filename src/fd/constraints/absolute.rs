//! `Absolute(srcOffset, x, abs)`: `abs = |x - off|` for a constant `off`.
//! Symmetric backward propagation: every admissible `abs` value `a`
//! expands to the two candidates `off - a` and `off + a` on the `x` side.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Absolute {
    off: i64,
    x: VarId,
    abs: VarId,
}

impl Absolute {
    pub fn new(off: i64, x: VarId, abs: VarId) -> Self {
        Absolute { off, x, abs }
    }
}

impl PropagationConstraint for Absolute {
    fn name(&self) -> &'static str {
        "absolute"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.x, self.abs]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);
        let dabs = SolverState::get_domain(state, model, self.abs);

        let projected_abs =
            Domain::from_values(dx.iter().map(|v| (v - self.off).abs()), dabs.max_value());
        let new_abs = dabs.intersect(&projected_abs);
        if new_abs.is_empty() {
            return PropagationOutcome::Failed;
        }

        let new_x = Domain::from_values(
            new_abs.iter().flat_map(|a| [self.off - a, self.off + a]),
            dx.max_value(),
        );
        let new_x = dx.intersect(&new_x);
        if new_x.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_x.equal(&dx) {
            current = SolverState::set_domain(&current, model, self.x, new_x);
        }
        if !new_abs.equal(&dabs) {
            current = SolverState::set_domain(&current, model, self.abs, new_abs);
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
        let x = b.new_var(Domain::from_values([2, 7, 8], 10), None);
        let abs = b.new_var(Domain::singleton(3, 10), None); // |x - 5| == 3
        b.post(Arc::new(Absolute::new(5, x, abs))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let nx = SolverState::get_domain(&s, &model, x);
                assert!(!nx.has(7));
                assert!(nx.has(2) && nx.has(8));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
