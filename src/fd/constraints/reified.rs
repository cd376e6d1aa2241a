//! Boolean reifiers (SPEC_FULL §4.6): a 1-indexed boolean (`1` = false,
//! `2` = true) that tracks whether some condition holds, propagated
//! bidirectionally between the condition and the boolean.
//!
//! `ReifiedConstraint` is the generic wrapper over an arbitrary inner
//! `PropagationConstraint`: when the boolean is forced true it drives the
//! inner constraint; when forced false it is a documented
//! under-approximation (it does not enforce the inner constraint's
//! negation — see SPEC_FULL §9). When the boolean is undecided, an
//! inner propagation failure still proves the constraint cannot hold and
//! forces the boolean false; success proves nothing generically about
//! entailment, matching the catalog's stated limitation.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use std::sync::Arc;

pub const BOOL_FALSE: i64 = 1;
pub const BOOL_TRUE: i64 = 2;

/// `b = 2 ⇔ v ∈ S`.
#[derive(Debug)]
pub struct InSetReified {
    v: VarId,
    set: Vec<i64>,
    b: VarId,
}

impl InSetReified {
    pub fn new(v: VarId, set: Vec<i64>, b: VarId) -> Self {
        InSetReified { v, set, b }
    }
}

impl PropagationConstraint for InSetReified {
    fn name(&self) -> &'static str {
        "in_set_reified"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.v, self.b]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dv = SolverState::get_domain(state, model, self.v);
        let db = SolverState::get_domain(state, model, self.b);

        let any_in_set = dv.iter().any(|x| self.set.contains(&x));
        let any_outside = dv.iter().any(|x| !self.set.contains(&x));

        let mut new_b = db.clone();
        if !any_in_set {
            new_b = new_b.remove(BOOL_TRUE);
        }
        if !any_outside {
            new_b = new_b.remove(BOOL_FALSE);
        }
        if new_b.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_b.equal(&db) {
            current = SolverState::set_domain(&current, model, self.b, new_b.clone());
        }

        let new_v = match new_b.singleton_value() {
            Some(BOOL_TRUE) => Domain::from_values(dv.iter().filter(|x| self.set.contains(x)), dv.max_value()),
            Some(BOOL_FALSE) => Domain::from_values(dv.iter().filter(|x| !self.set.contains(x)), dv.max_value()),
            _ => dv.clone(),
        };
        if new_v.is_empty() {
            return PropagationOutcome::Failed;
        }
        if !new_v.equal(&dv) {
            current = SolverState::set_domain(&current, model, self.v, new_v);
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}

/// `b = 2 ⇔ v == t` for a constant `t`.
#[derive(Debug)]
pub struct ValueEqualsReified {
    v: VarId,
    t: i64,
    b: VarId,
}

impl ValueEqualsReified {
    pub fn new(v: VarId, t: i64, b: VarId) -> Self {
        ValueEqualsReified { v, t, b }
    }
}

impl PropagationConstraint for ValueEqualsReified {
    fn name(&self) -> &'static str {
        "value_equals_reified"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.v, self.b]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        InSetReified::new(self.v, vec![self.t], self.b).propagate(model, state)
    }
}

/// `b = 2 ⇔ x == y`, both finite-domain variables. Short-circuits on
/// singleton and disjoint domains.
#[derive(Debug)]
pub struct EqualityReified {
    x: VarId,
    y: VarId,
    b: VarId,
}

impl EqualityReified {
    pub fn new(x: VarId, y: VarId, b: VarId) -> Self {
        EqualityReified { x, y, b }
    }
}

impl PropagationConstraint for EqualityReified {
    fn name(&self) -> &'static str {
        "equality_reified"
    }

    fn scope(&self) -> Vec<VarId> {
        vec![self.x, self.y, self.b]
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let dx = SolverState::get_domain(state, model, self.x);
        let dy = SolverState::get_domain(state, model, self.y);
        let db = SolverState::get_domain(state, model, self.b);

        let mut new_b = db.clone();
        if dx.is_disjoint(&dy) {
            new_b = new_b.remove(BOOL_TRUE);
        }
        if let (Some(vx), Some(vy)) = (dx.singleton_value(), dy.singleton_value()) {
            if vx == vy {
                new_b = new_b.remove(BOOL_FALSE);
            } else {
                new_b = new_b.remove(BOOL_TRUE);
            }
        }
        if new_b.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        if !new_b.equal(&db) {
            current = SolverState::set_domain(&current, model, self.b, new_b.clone());
        }

        let (new_x, new_y) = match new_b.singleton_value() {
            Some(BOOL_TRUE) => {
                let shared = dx.intersect(&dy);
                (shared.clone(), shared)
            }
            Some(BOOL_FALSE) => {
                let mut nx = dx.clone();
                let mut ny = dy.clone();
                if let Some(vy) = dy.singleton_value() {
                    nx = nx.remove(vy);
                }
                if let Some(vx) = dx.singleton_value() {
                    ny = ny.remove(vx);
                }
                (nx, ny)
            }
            _ => (dx.clone(), dy.clone()),
        };
        if new_x.is_empty() || new_y.is_empty() {
            return PropagationOutcome::Failed;
        }
        if !new_x.equal(&dx) {
            current = SolverState::set_domain(&current, model, self.x, new_x);
        }
        if !new_y.equal(&dy) {
            current = SolverState::set_domain(&current, model, self.y, new_y);
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}

/// Generic reification wrapper over an arbitrary inner constraint. See
/// the module doc comment for the documented under-approximation of
/// negation.
#[derive(Debug)]
pub struct ReifiedConstraint {
    inner: Arc<dyn PropagationConstraint + Send + Sync>,
    b: VarId,
}

impl ReifiedConstraint {
    pub fn new(inner: Arc<dyn PropagationConstraint + Send + Sync>, b: VarId) -> Self {
        ReifiedConstraint { inner, b }
    }
}

impl PropagationConstraint for ReifiedConstraint {
    fn name(&self) -> &'static str {
        "reified"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.inner.scope();
        s.push(self.b);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let db = SolverState::get_domain(state, model, self.b);
        match db.singleton_value() {
            Some(BOOL_TRUE) => self.inner.propagate(model, state),
            Some(BOOL_FALSE) => PropagationOutcome::NoChange,
            _ => match self.inner.propagate(model, state) {
                PropagationOutcome::Failed => {
                    let new_b = db.remove(BOOL_TRUE);
                    if new_b.is_empty() {
                        PropagationOutcome::Failed
                    } else {
                        PropagationOutcome::Narrowed(SolverState::set_domain(
                            state, model, self.b, new_b,
                        ))
                    }
                }
                _ => PropagationOutcome::NoChange,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::constraints::all_different::AllDifferent;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn in_set_reified_forces_member_when_true() {
        let mut b = ModelBuilder::new();
        let v = b.new_var_full(5);
        let flag = b.new_var(Domain::singleton(BOOL_TRUE, 2), None);
        b.post(Arc::new(InSetReified::new(v, vec![2, 3], flag)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dv = SolverState::get_domain(&s, &model, v);
                assert!(!dv.has(1) && !dv.has(4) && !dv.has(5));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn equality_reified_short_circuits_on_disjoint() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::from_values([1, 2], 5), None);
        let y = b.new_var(Domain::from_values([3, 4], 5), None);
        let flag = b.new_var_full(2);
        b.post(Arc::new(EqualityReified::new(x, y, flag))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(
                    SolverState::get_domain(&s, &model, flag).singleton_value(),
                    Some(BOOL_FALSE)
                );
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }

    #[test]
    fn generic_wrapper_forces_false_when_inner_infeasible() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(1, 2), None);
        let y = b.new_var(Domain::singleton(1, 2), None);
        let flag = b.new_var_full(2);
        let inner: Arc<dyn PropagationConstraint + Send + Sync> = Arc::new(AllDifferent::new(vec![x, y]));
        b.post(Arc::new(ReifiedConstraint::new(inner, flag))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert_eq!(
                    SolverState::get_domain(&s, &model, flag).singleton_value(),
                    Some(BOOL_FALSE)
                );
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
