//! `Arithmetic(src, dst, offset)`: `dst = src + offset`. Bidirectional
//! arc-consistency by transforming one domain by the offset and
//! intersecting it into the other, in both directions.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Arithmetic {
    src: VarId,
    dst: VarId,
    offset: i64,
}

impl Arithmetic {
    pub fn new(src: VarId, dst: VarId, offset: i64) -> Self {
        Arithmetic { src, dst, offset }
    }

    fn shift(domain: &Domain, by: i64, max_value: i64) -> Domain {
        Domain::from_values(domain.iter().map(|v| v + by), max_value)
    }
}

impl PropagationConstraint for Arithmetic {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.src, self.dst]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let src_dom = SolverState::get_domain(state, model, self.src);
        let dst_dom = SolverState::get_domain(state, model, self.dst);

        let projected_dst = Self::shift(&src_dom, self.offset, dst_dom.max_value());
        let new_dst = dst_dom.intersect(&projected_dst);
        if new_dst.is_empty() {
            return PropagationOutcome::Failed;
        }

        let projected_src = Self::shift(&new_dst, -self.offset, src_dom.max_value());
        let new_src = src_dom.intersect(&projected_src);
        if new_src.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_src.equal(&src_dom) {
            current = SolverState::set_domain(&current, model, self.src, new_src);
        }
        if !new_dst.equal(&dst_dom) {
            current = SolverState::set_domain(&current, model, self.dst, new_dst);
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
    fn narrows_both_sides() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(2, 10), None);
        let y = b.new_var_full(10);
        b.post(Arc::new(Arithmetic::new(x, y, 2))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(4));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
