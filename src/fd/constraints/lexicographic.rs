//! `Lexicographic(X, Y, strict?)`: `X <=_lex Y` (or `<_lex` when
//! `strict`). An O(n) bounds-consistent scan maintaining an
//! "equal-prefix-still-possible" flag: at the first position where the
//! prefix could still be equal, `X_i <= Y_i` (or `<` at the last position
//! under `strict`) is enforced; once a position is forced unequal in
//! `X`'s favor the rest of the arrays are unconstrained, and a forced
//! unequal in `Y`'s favor fails immediately.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Lexicographic {
    x: Vec<VarId>,
    y: Vec<VarId>,
    strict: bool,
}

impl Lexicographic {
    pub fn new(x: Vec<VarId>, y: Vec<VarId>, strict: bool) -> Self {
        assert_eq!(x.len(), y.len(), "Lexicographic requires equal-length arrays");
        Lexicographic { x, y, strict }
    }
}

impl PropagationConstraint for Lexicographic {
    fn name(&self) -> &'static str {
        "lexicographic"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.x.clone();
        s.extend(self.y.iter().copied());
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let n = self.x.len();
        let mut current = state.clone();

        for i in 0..n {
            let dx = SolverState::get_domain(&current, model, self.x[i]);
            let dy = SolverState::get_domain(&current, model, self.y[i]);
            let is_last = i == n - 1;
            let last_strict = is_last && self.strict;

            // Enforce X_i <= Y_i (or < at a strict last position); any
            // earlier position is only checked this way while the prefix
            // could still be equal, which the caller-visible loop below
            // verifies through singleton equality before continuing.
            let (new_x, new_y) = if last_strict {
                (
                    dx.remove_above(dy.max().unwrap_or(i64::MAX) - 1),
                    dy.remove_below(dx.min().unwrap_or(i64::MIN) + 1),
                )
            } else {
                (
                    dx.remove_above(dy.max().unwrap_or(i64::MAX)),
                    dy.remove_below(dx.min().unwrap_or(i64::MIN)),
                )
            };
            if new_x.is_empty() || new_y.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !new_x.equal(&dx) {
                current = SolverState::set_domain(&current, model, self.x[i], new_x.clone());
            }
            if !new_y.equal(&dy) {
                current = SolverState::set_domain(&current, model, self.y[i], new_y.clone());
            }

            match (new_x.singleton_value(), new_y.singleton_value()) {
                (Some(vx), Some(vy)) if vx == vy && !is_last => {
                    // Prefix still tied; continue scanning.
                    continue;
                }
                _ => {
                    // Either this position can still diverge (not both
                    // singleton), or it is the last position (already
                    // fully enforced above), or the prefix has already
                    // strictly favored X. Either way no further position
                    // needs scanning for this pass.
                    break;
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
    fn ties_cascade_to_next_position() {
        let mut b = ModelBuilder::new();
        let x0 = b.new_var(Domain::singleton(2, 5), None);
        let y0 = b.new_var(Domain::singleton(2, 5), None);
        let x1 = b.new_var_full(5);
        let y1 = b.new_var(Domain::singleton(3, 5), None);
        b.post(Arc::new(Lexicographic::new(vec![x0, x1], vec![y0, y1], false)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, x1).max(), Some(3));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn strict_fails_on_equal_singletons_at_last_position() {
        let mut b = ModelBuilder::new();
        let x0 = b.new_var(Domain::singleton(4, 5), None);
        let y0 = b.new_var(Domain::singleton(4, 5), None);
        b.post(Arc::new(Lexicographic::new(vec![x0], vec![y0], true)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("strict lex requires X < Y, not equal"),
        }
    }
}
