//! The copy-on-write search state: an `Rc`-linked spine of per-variable
//! domain overrides over an immutable `Model`. Grounded directly on
//! `state/mod.rs`'s `Rc<SMap>`/`Rc<ConstraintStore>` discipline, specialized
//! to a single-purpose domain-override chain (SPEC_FULL §4.4).

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use std::rc::Rc;

#[derive(Debug)]
struct Node {
    parent: StateHandle,
    modified_var: VarId,
    modified_domain: Domain,
    depth: u32,
}

/// `None` means "no overrides yet; read straight from `Model`'s initial
/// domains". This is the search state's root.
pub type StateHandle = Option<Rc<Node>>;

/// Namespace for the free functions operating on a `StateHandle`. Kept as a
/// unit struct (mirroring the teacher's module-as-namespace style) rather
/// than a type that itself stores data, since the handle is the value type.
#[derive(Debug)]
pub struct SolverState;

impl SolverState {
    pub fn root() -> StateHandle {
        None
    }

    pub fn depth(state: &StateHandle) -> u32 {
        state.as_ref().map(|n| n.depth).unwrap_or(0)
    }

    /// Read the current domain of `var`, walking the spine until a node
    /// overriding it is found, falling back to the model's initial domain.
    pub fn get_domain(state: &StateHandle, model: &Model, var: VarId) -> Domain {
        let mut cur = state;
        loop {
            match cur {
                Some(node) if node.modified_var == var => return node.modified_domain.clone(),
                Some(node) => cur = &node.parent,
                None => return model.initial_domain(var).clone(),
            }
        }
    }

    /// Narrow `var`'s domain to `new_domain`. Returns the same handle
    /// unchanged if `new_domain` equals the variable's current domain
    /// (propagation relies on this no-op detection for quiescence).
    pub fn set_domain(
        state: &StateHandle,
        model: &Model,
        var: VarId,
        new_domain: Domain,
    ) -> StateHandle {
        let current = Self::get_domain(state, model, var);
        if current.equal(&new_domain) {
            return state.clone();
        }
        Some(Rc::new(Node {
            parent: state.clone(),
            modified_var: var,
            modified_domain: new_domain,
            depth: Self::depth(state) + 1,
        }))
    }

    /// True once every variable's domain is a singleton.
    pub fn is_complete(state: &StateHandle, model: &Model) -> bool {
        (0..model.num_variables()).all(|v| Self::get_domain(state, model, v).is_singleton())
    }

    /// True if any variable's domain is empty.
    pub fn is_failed(state: &StateHandle, model: &Model) -> bool {
        (0..model.num_variables()).any(|v| Self::get_domain(state, model, v).is_empty())
    }

    /// Collect the set of variable ids touched since `since` (exclusive),
    /// walking back to (but not including) that ancestor. Used by the
    /// propagation engine to seed its work queue after a branching step.
    pub fn changed_since(state: &StateHandle, since: &StateHandle) -> Vec<VarId> {
        let since_depth = Self::depth(since);
        let mut out = Vec::new();
        let mut cur = state;
        while let Some(node) = cur {
            if node.depth <= since_depth {
                break;
            }
            out.push(node.modified_var);
            cur = &node.parent;
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::model::ModelBuilder;

    #[test]
    fn unmodified_reads_initial_domain() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let model = b.build();
        let root = SolverState::root();
        assert!(SolverState::get_domain(&root, &model, x).equal(&Domain::full(5)));
    }

    #[test]
    fn set_domain_is_idempotent_noop_detection() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let model = b.build();
        let root = SolverState::root();
        let d = Domain::full(5);
        let s2 = SolverState::set_domain(&root, &model, x, d);
        assert!(s2.is_none(), "setting to the unchanged domain is a no-op");
    }

    #[test]
    fn spine_narrows_and_chains() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let model = b.build();
        let s0 = SolverState::root();
        let s1 = SolverState::set_domain(&s0, &model, x, Domain::from_range(2, 4, 5));
        let s2 = SolverState::set_domain(&s1, &model, x, Domain::singleton(3, 5));
        assert_eq!(SolverState::get_domain(&s2, &model, x).singleton_value(), Some(3));
        assert_eq!(SolverState::depth(&s2), 2);
        assert_eq!(SolverState::changed_since(&s2, &s0), vec![x, x]);
    }
}
