//! `UnifiedStore` (C11, SPEC_FULL §3/§4.9): the immutable hybrid store
//! carrying relational bindings, FD domains, and pending relational
//! constraints over one shared `VarId` space.
//!
//! Grounded on `state::State`'s `Rc<SMap>`/`Rc<ConstraintStore>`
//! clone-on-write discipline: each `with_*` method returns a new
//! `UnifiedStore` sharing unchanged `Rc`-wrapped maps with its
//! predecessor and copying only the map that actually changed (via
//! `Rc::make_mut`), the same mechanism `state/mod.rs` uses instead of an
//! explicit parent-link spine.

use crate::error::{CoreError, CoreResult};
use crate::term::{Term, VarId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::domain::Domain;

/// The outcome of checking a `RelationalConstraint` against the store's
/// current bindings (SPEC_FULL §4.8's add-time validation, generalized
/// to the hybrid store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Satisfied,
    Violated,
    Pending,
}

/// A relational constraint pending over `UnifiedStore` bindings. Unlike
/// the legacy `state::Constraint<U, E>` (tied to `LTerm<U, E>`), this
/// trait operates on the engine-agnostic `Term`/`VarId` pair the tabling
/// and hybrid layers share.
pub trait RelationalConstraint: fmt::Debug {
    fn name(&self) -> &'static str;
    fn scope(&self) -> Vec<VarId>;
    fn check(&self, bindings: &HashMap<VarId, Term>) -> CheckResult;
}

/// Immutable hybrid store: relational bindings, FD domains, and pending
/// relational constraints, all keyed by the same `VarId` space so the
/// cross-side promotion law (SPEC_FULL §4.9, §8 property 9) can compare
/// entries in the two maps directly.
#[derive(Debug, Clone)]
pub struct UnifiedStore {
    relational_bindings: Rc<HashMap<VarId, Term>>,
    fd_domains: Rc<HashMap<VarId, Domain>>,
    constraints: Rc<Vec<Rc<dyn RelationalConstraint>>>,
    changed_vars: Rc<HashSet<VarId>>,
    depth: u32,
}

impl Default for UnifiedStore {
    fn default() -> Self {
        UnifiedStore::new()
    }
}

impl UnifiedStore {
    pub fn new() -> Self {
        UnifiedStore {
            relational_bindings: Rc::new(HashMap::new()),
            fd_domains: Rc::new(HashMap::new()),
            constraints: Rc::new(Vec::new()),
            changed_vars: Rc::new(HashSet::new()),
            depth: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn relational_binding(&self, v: VarId) -> Option<&Term> {
        self.relational_bindings.get(&v)
    }

    pub fn relational_bindings(&self) -> &HashMap<VarId, Term> {
        &self.relational_bindings
    }

    pub fn fd_domain(&self, v: VarId) -> Option<&Domain> {
        self.fd_domains.get(&v)
    }

    pub fn fd_domains(&self) -> &HashMap<VarId, Domain> {
        &self.fd_domains
    }

    pub fn constraints(&self) -> &[Rc<dyn RelationalConstraint>] {
        &self.constraints
    }

    pub fn changed_vars(&self) -> &HashSet<VarId> {
        &self.changed_vars
    }

    /// Follow a chain of variable bindings until an unbound variable or a
    /// non-variable term is reached, mirroring `SMap::walk` (C3) but over
    /// the hybrid store's `Term`/`VarId` pair.
    pub fn walk(&self, term: &Term) -> Term {
        let mut current = term.clone();
        loop {
            match &current {
                Term::Var(id) => match self.relational_bindings.get(id) {
                    Some(next) => current = next.clone(),
                    None => return current,
                },
                _ => return current,
            }
        }
    }

    /// Bind `v` to `term`. Fails if `v` is already bound to a
    /// structurally different term (this is assignment, not
    /// unification-with-occurs-check; callers needing full unification
    /// compose this with `crate::state::unify_rec` on the relational
    /// side and promote the result here).
    pub fn with_relational_binding(&self, v: VarId, term: Term) -> CoreResult<UnifiedStore> {
        if let Some(existing) = self.relational_bindings.get(&v) {
            if *existing == term {
                return Ok(self.clone());
            }
            return Err(CoreError::add_time_validation(format!(
                "variable {} already bound to {}, cannot rebind to {}",
                v, existing, term
            )));
        }
        let mut next = self.clone();
        Rc::make_mut(&mut next.relational_bindings).insert(v, term);
        Rc::make_mut(&mut next.changed_vars).insert(v);
        next.depth += 1;
        Ok(next)
    }

    /// Narrow `v`'s FD domain to `domain`. The caller is responsible for
    /// checking `domain.is_empty()` (this mirrors `Domain`'s own
    /// contract: failure surfaces only at the call site).
    pub fn with_fd_domain(&self, v: VarId, domain: Domain) -> UnifiedStore {
        if self.fd_domains.get(&v) == Some(&domain) {
            return self.clone();
        }
        let mut next = self.clone();
        Rc::make_mut(&mut next.fd_domains).insert(v, domain);
        Rc::make_mut(&mut next.changed_vars).insert(v);
        next.depth += 1;
        next
    }

    /// Add-time validation per SPEC_FULL §4.8: violated constraints are
    /// rejected and never stored; satisfied ones are dropped immediately;
    /// pending ones are retained for reactivation once their variables
    /// become bound.
    pub fn with_constraint(&self, constraint: Rc<dyn RelationalConstraint>) -> CoreResult<UnifiedStore> {
        match constraint.check(&self.relational_bindings) {
            CheckResult::Violated => Err(CoreError::add_time_validation(format!(
                "constraint {} violated by current bindings",
                constraint.name()
            ))),
            CheckResult::Satisfied => Ok(self.clone()),
            CheckResult::Pending => {
                let mut next = self.clone();
                Rc::make_mut(&mut next.constraints).push(constraint);
                next.depth += 1;
                Ok(next)
            }
        }
    }

    /// Replace the constraint list wholesale (used by `RelationalPlugin`
    /// after re-evaluating pending constraints).
    pub fn with_constraints(&self, constraints: Vec<Rc<dyn RelationalConstraint>>) -> UnifiedStore {
        let mut next = self.clone();
        next.constraints = Rc::new(constraints);
        next.depth += 1;
        next
    }

    /// Clear the changed-vars set, used between joint-fixed-point rounds
    /// so each plugin only re-examines variables touched since its own
    /// last run (SPEC_FULL §4.9's change tracking).
    pub fn clear_changed(&self) -> UnifiedStore {
        let mut next = self.clone();
        next.changed_vars = Rc::new(HashSet::new());
        next
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    struct AlwaysPending(Vec<VarId>);
    impl RelationalConstraint for AlwaysPending {
        fn name(&self) -> &'static str {
            "always_pending"
        }
        fn scope(&self) -> Vec<VarId> {
            self.0.clone()
        }
        fn check(&self, bindings: &HashMap<VarId, Term>) -> CheckResult {
            if self.0.iter().all(|v| bindings.contains_key(v)) {
                CheckResult::Satisfied
            } else {
                CheckResult::Pending
            }
        }
    }

    #[test]
    fn walk_follows_binding_chain() {
        let store = UnifiedStore::new()
            .with_relational_binding(1, Term::var(2))
            .unwrap()
            .with_relational_binding(2, Term::number(42))
            .unwrap();
        assert_eq!(store.walk(&Term::var(1)), Term::number(42));
    }

    #[test]
    fn rebinding_to_a_different_term_fails() {
        let store = UnifiedStore::new()
            .with_relational_binding(1, Term::number(1))
            .unwrap();
        assert!(store.with_relational_binding(1, Term::number(2)).is_err());
    }

    #[test]
    fn pending_constraint_is_retained_until_satisfied() {
        let store = UnifiedStore::new()
            .with_constraint(Rc::new(AlwaysPending(vec![1])))
            .unwrap();
        assert_eq!(store.constraints().len(), 1);
        let bound = store.with_relational_binding(1, Term::number(1)).unwrap();
        let kept: Vec<_> = bound
            .constraints()
            .iter()
            .filter(|c| c.check(bound.relational_bindings()) != CheckResult::Satisfied)
            .cloned()
            .collect();
        assert!(kept.is_empty());
    }

    #[test]
    fn fd_domain_set_is_a_noop_when_unchanged() {
        let store = UnifiedStore::new().with_fd_domain(1, Domain::full(5));
        let same = store.with_fd_domain(1, Domain::full(5));
        assert_eq!(store.depth(), same.depth());
    }
}
