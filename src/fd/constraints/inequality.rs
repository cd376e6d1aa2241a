//! `Inequality(x, y, kind)`: bounds-consistency for `<`, `<=`, `>`, `>=`;
//! for `!=`, removal only happens once one side is a singleton.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InequalityKind {
    Lt,
    Le,
    Gt,
    Ge,
    Ne,
}

#[derive(Debug)]
pub struct Inequality {
    x: VarId,
    y: VarId,
    kind: InequalityKind,
}

impl Inequality {
    pub fn new(x: VarId, y: VarId, kind: InequalityKind) -> Self {
        Inequality { x, y, kind }
    }
}

impl PropagationConstraint for Inequality {
    fn name(&self) -> &'static str {
        "inequality"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.x, self.y]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);
        let dy = SolverState::get_domain(state, model, self.y);
        let (mut nx, mut ny) = (dx.clone(), dy.clone());

        match self.kind {
            InequalityKind::Lt => {
                if let Some(max_y) = dy.max() {
                    nx = nx.remove_above(max_y - 1);
                }
                if let Some(min_x) = dx.min() {
                    ny = ny.remove_below(min_x + 1);
                }
            }
            InequalityKind::Le => {
                if let Some(max_y) = dy.max() {
                    nx = nx.remove_above(max_y);
                }
                if let Some(min_x) = dx.min() {
                    ny = ny.remove_below(min_x);
                }
            }
            InequalityKind::Gt => {
                if let Some(min_y) = dy.min() {
                    nx = nx.remove_below(min_y + 1);
                }
                if let Some(max_x) = dx.max() {
                    ny = ny.remove_above(max_x - 1);
                }
            }
            InequalityKind::Ge => {
                if let Some(min_y) = dy.min() {
                    nx = nx.remove_below(min_y);
                }
                if let Some(max_x) = dx.max() {
                    ny = ny.remove_above(max_x);
                }
            }
            InequalityKind::Ne => {
                if let Some(v) = dy.singleton_value() {
                    nx = nx.remove(v);
                }
                if let Some(v) = dx.singleton_value() {
                    ny = ny.remove(v);
                }
            }
        }

        if nx.is_empty() || ny.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !nx.equal(&dx) {
            current = SolverState::set_domain(&current, model, self.x, nx);
        }
        if !ny.equal(&dy) {
            current = SolverState::set_domain(&current, model, self.y, ny);
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
    fn lt_prunes_bounds() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(10);
        let y = b.new_var_full(10);
        b.post(Arc::new(Inequality::new(x, y, InequalityKind::Lt)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x).max(), Some(9));
                assert_eq!(SolverState::get_domain(&s, &model, y).min(), Some(2));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn ne_requires_singleton() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(crate::domain::Domain::singleton(3, 5), None);
        let y = b.new_var_full(5);
        b.post(Arc::new(Inequality::new(x, y, InequalityKind::Ne)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert!(!SolverState::get_domain(&s, &model, y).has(3));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
