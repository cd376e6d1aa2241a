//! `ElementValues(index, values[], result)`: `result = values[index]` for a
//! fixed array of constants. Arc-consistent via forward/backward lookup
//! over the fixed table.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct ElementValues {
    index: VarId,
    /// 1-indexed: `values[0]` corresponds to `index == 1`.
    values: Vec<i64>,
    result: VarId,
}

impl ElementValues {
    pub fn new(index: VarId, values: Vec<i64>, result: VarId) -> Self {
        ElementValues {
            index,
            values,
            result,
        }
    }
}

impl PropagationConstraint for ElementValues {
    fn name(&self) -> &'static str {
        "element"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.index, self.result]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let index_dom = SolverState::get_domain(state, model, self.index);
        let result_dom = SolverState::get_domain(state, model, self.result);

        let new_index = Domain::from_values(
            index_dom.iter().filter(|&i| {
                self.values
                    .get(i as usize - 1)
                    .map(|v| result_dom.has(*v))
                    .unwrap_or(false)
            }),
            index_dom.max_value(),
        );
        if new_index.is_empty() {
            return PropagationOutcome::Failed;
        }

        let new_result = Domain::from_values(
            new_index.iter().filter_map(|i| self.values.get(i as usize - 1).copied()),
            result_dom.max_value(),
        );
        if new_result.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_index.equal(&index_dom) {
            current = SolverState::set_domain(&current, model, self.index, new_index);
        }
        if !new_result.equal(&result_dom) {
            current = SolverState::set_domain(&current, model, self.result, new_result);
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
    fn lookup_narrows_both_directions() {
        let mut b = ModelBuilder::new();
        let idx = b.new_var(Domain::singleton(2, 3), None);
        let res = b.new_var_full(30);
        b.post(Arc::new(ElementValues::new(idx, vec![10, 20, 30], res)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, res).singleton_value(), Some(20));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
