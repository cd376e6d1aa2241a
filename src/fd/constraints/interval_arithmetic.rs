//! `IntervalArithmetic(x, [lo, hi], op, y?)`: maps interval operations
//! onto bounds-consistent domain transforms. `Contains`/`Intersect` are
//! unary (clip `x` to `[lo, hi]`); `Union`, `Sum`, `Diff` are binary and
//! require `y`.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalOp {
    Contains,
    Intersect,
    Union,
    Sum,
    Diff,
}

#[derive(Debug)]
pub struct IntervalArithmetic {
    x: VarId,
    lo: i64,
    hi: i64,
    op: IntervalOp,
    y: Option<VarId>,
}

impl IntervalArithmetic {
    /// Unary form: `Contains`/`Intersect` only.
    pub fn unary(x: VarId, lo: i64, hi: i64, op: IntervalOp) -> Self {
        assert!(
            matches!(op, IntervalOp::Contains | IntervalOp::Intersect),
            "this operation requires a second operand `y`"
        );
        IntervalArithmetic {
            x,
            lo,
            hi,
            op,
            y: None,
        }
    }

    /// Binary form: `Union`/`Sum`/`Diff` narrow `y` against `x`'s interval
    /// combined with `[lo, hi]`.
    pub fn binary(x: VarId, lo: i64, hi: i64, op: IntervalOp, y: VarId) -> Self {
        assert!(
            matches!(op, IntervalOp::Union | IntervalOp::Sum | IntervalOp::Diff),
            "this operation is unary; use `IntervalArithmetic::unary`"
        );
        IntervalArithmetic {
            x,
            lo,
            hi,
            op,
            y: Some(y),
        }
    }
}

impl PropagationConstraint for IntervalArithmetic {
    fn name(&self) -> &'static str {
        "interval_arithmetic"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = vec![self.x];
        if let Some(y) = self.y {
            s.push(y);
        }
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);

        match self.op {
            IntervalOp::Contains => {
                // `[lo, hi]` must contain `x`; clip `x` to the interval.
                let new_x = dx.remove_below(self.lo).remove_above(self.hi);
                if new_x.is_empty() {
                    return PropagationOutcome::Failed;
                }
                if new_x.equal(&dx) {
                    PropagationOutcome::NoChange
                } else {
                    PropagationOutcome::Narrowed(SolverState::set_domain(
                        state, model, self.x, new_x,
                    ))
                }
            }
            IntervalOp::Intersect => {
                let bound = Domain::from_range(self.lo, self.hi, dx.max_value());
                let new_x = dx.intersect(&bound);
                if new_x.is_empty() {
                    return PropagationOutcome::Failed;
                }
                if new_x.equal(&dx) {
                    PropagationOutcome::NoChange
                } else {
                    PropagationOutcome::Narrowed(SolverState::set_domain(
                        state, model, self.x, new_x,
                    ))
                }
            }
            IntervalOp::Union | IntervalOp::Sum | IntervalOp::Diff => {
                let y = self.y.expect("binary interval op requires y");
                let dy = SolverState::get_domain(state, model, y);
                let new_y = match self.op {
                    IntervalOp::Union => {
                        let bound = Domain::from_range(
                            self.lo.min(dx.min().unwrap_or(self.lo)),
                            self.hi.max(dx.max().unwrap_or(self.hi)),
                            dy.max_value(),
                        );
                        dy.intersect(&bound)
                    }
                    IntervalOp::Sum => {
                        let lo = self.lo + dx.min().unwrap_or(0);
                        let hi = self.hi + dx.max().unwrap_or(0);
                        dy.remove_below(lo).remove_above(hi)
                    }
                    IntervalOp::Diff => {
                        let lo = self.lo - dx.max().unwrap_or(0);
                        let hi = self.hi - dx.min().unwrap_or(0);
                        dy.remove_below(lo).remove_above(hi)
                    }
                    _ => unreachable!(),
                };
                if new_y.is_empty() {
                    return PropagationOutcome::Failed;
                }
                if new_y.equal(&dy) {
                    PropagationOutcome::NoChange
                } else {
                    PropagationOutcome::Narrowed(SolverState::set_domain(state, model, y, new_y))
                }
            }
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
    fn intersect_clips_domain() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(10);
        b.post(Arc::new(IntervalArithmetic::unary(x, 3, 6, IntervalOp::Intersect)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dx = SolverState::get_domain(&s, &model, x);
                assert_eq!(dx.min(), Some(3));
                assert_eq!(dx.max(), Some(6));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn sum_narrows_y() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(2, 20), None);
        let y = b.new_var_full(20);
        b.post(Arc::new(IntervalArithmetic::binary(x, 5, 5, IntervalOp::Sum, y)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(7));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
