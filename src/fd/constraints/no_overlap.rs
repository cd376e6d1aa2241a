//! `NoOverlap(start[], dur[])`: modeled directly as `Cumulative` with unit
//! demands and capacity 1.

use crate::fd::constraints::cumulative::{Cumulative, Task};
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct NoOverlap {
    inner: Cumulative,
}

impl NoOverlap {
    pub fn new(starts: Vec<VarId>, durations: Vec<i64>) -> Self {
        assert_eq!(starts.len(), durations.len());
        let tasks = starts
            .into_iter()
            .zip(durations)
            .map(|(start, duration)| Task {
                start,
                duration,
                demand: 1,
            })
            .collect();
        NoOverlap {
            inner: Cumulative::new(tasks, 1),
        }
    }
}

impl PropagationConstraint for NoOverlap {
    fn name(&self) -> &'static str {
        "no_overlap"
    }

    fn scope(&self) -> Vec<VarId> {
        self.inner.scope()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        self.inner.propagate(model, state)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn two_long_tasks_cannot_fit_in_a_short_window() {
        let mut b = ModelBuilder::new();
        let s0 = b.new_var_full(2);
        let s1 = b.new_var_full(2);
        b.post(Arc::new(NoOverlap::new(vec![s0, s1], vec![2, 2])))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("expected overlap failure"),
        }
    }
}
