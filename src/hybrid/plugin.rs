//! `SolverPlugin` protocol and the joint fixed point over a
//! `UnifiedStore` (C12, SPEC_FULL §4.9). Grounded on `fd::propagate`'s
//! `run_to_fixpoint` drain-and-requeue loop: `HybridSolver` runs the same
//! shape of loop one level up, treating whole plugins as the thing being
//! driven to quiescence instead of individual constraints.

use crate::domain::Domain;
use crate::error::{CoreError, CoreResult};
use crate::fd::model::Model;
use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
use crate::fd::state::SolverState;
use crate::hybrid::store::{CheckResult, UnifiedStore};
use crate::term::{Term, VarId};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, trace};

/// The outcome of a single plugin's pass over a `UnifiedStore`.
#[derive(Debug)]
pub enum PluginOutcome {
    Unchanged,
    Changed(UnifiedStore),
    Failed,
}

/// A participant in the joint fixed point (SPEC_FULL §4.9's plugin
/// protocol). `can_handle` lets `HybridSolver` skip plugins that have
/// nothing newly relevant to look at.
pub trait SolverPlugin {
    fn name(&self) -> &'static str;
    fn can_handle(&self, store: &UnifiedStore) -> bool;
    fn propagate(&self, store: &UnifiedStore) -> PluginOutcome;
}

/// Bridges the finite-domain propagation engine into the hybrid store.
/// Holds a fixed FD `Model` and the two-way mapping between hybrid
/// `VarId`s (shared with the relational side) and the model's own dense
/// `fd::model::VarId`s.
pub struct FdPlugin {
    model: Arc<Model>,
    to_fd: HashMap<VarId, crate::fd::model::VarId>,
    to_hybrid: HashMap<crate::fd::model::VarId, VarId>,
}

impl FdPlugin {
    pub fn new(model: Arc<Model>, var_map: HashMap<VarId, crate::fd::model::VarId>) -> Self {
        let to_hybrid = var_map.iter().map(|(&h, &f)| (f, h)).collect();
        FdPlugin {
            model,
            to_fd: var_map,
            to_hybrid,
        }
    }
}

impl SolverPlugin for FdPlugin {
    fn name(&self) -> &'static str {
        "fd"
    }

    fn can_handle(&self, store: &UnifiedStore) -> bool {
        store.changed_vars().iter().any(|v| self.to_fd.contains_key(v))
    }

    fn propagate(&self, store: &UnifiedStore) -> PluginOutcome {
        let mut state = SolverState::root();

        // Seed the FD state from whatever the store already knows, and
        // forward-promote any relational binding that has resolved to a
        // concrete number (the forward half of the promotion law: a
        // relationally-ground variable narrows its FD twin to a
        // singleton).
        for (&hybrid_var, &fd_var) in self.to_fd.iter() {
            let mut domain = store
                .fd_domain(hybrid_var)
                .cloned()
                .unwrap_or_else(|| self.model.initial_domain(fd_var).clone());

            if let Some(term) = store.relational_binding(hybrid_var) {
                if let Term::Number(n) = store.walk(term) {
                    let singleton = Domain::singleton(n as i64, domain.max_value());
                    domain = domain.intersect(&singleton);
                }
            }

            if domain.is_empty() {
                return PluginOutcome::Failed;
            }
            state = SolverState::set_domain(&state, &self.model, fd_var, domain);
        }

        let after = match run_to_fixpoint(&self.model, state) {
            FixpointOutcome::Inconsistent => return PluginOutcome::Failed,
            FixpointOutcome::Consistent(s) => s,
        };

        let mut next = store.clone();
        let mut changed = false;
        for (&fd_var, &hybrid_var) in self.to_hybrid.iter() {
            let narrowed = SolverState::get_domain(&after, &self.model, fd_var);
            if store.fd_domain(hybrid_var) != Some(&narrowed) {
                trace!(var = hybrid_var, "fd plugin narrowed domain");
                next = next.with_fd_domain(hybrid_var, narrowed);
                changed = true;
            }
        }

        if changed {
            PluginOutcome::Changed(next)
        } else {
            PluginOutcome::Unchanged
        }
    }
}

/// Re-evaluates pending relational constraints and promotes FD
/// singletons into relational bindings (the backward half of the
/// promotion law: an FD variable narrowed to one value becomes a ground
/// relational binding).
pub struct RelationalPlugin;

impl SolverPlugin for RelationalPlugin {
    fn name(&self) -> &'static str {
        "relational"
    }

    fn can_handle(&self, store: &UnifiedStore) -> bool {
        !store.constraints().is_empty() || !store.changed_vars().is_empty()
    }

    fn propagate(&self, store: &UnifiedStore) -> PluginOutcome {
        let mut next = store.clone();
        let mut changed = false;

        for (&var, domain) in store.fd_domains().iter() {
            if let Some(value) = domain.singleton_value() {
                let term = Term::number(value as isize);
                match store.relational_binding(var) {
                    Some(existing) if *existing == term => {}
                    Some(existing) => {
                        debug!(var, "fd singleton conflicts with existing relational binding");
                        let _ = existing;
                        return PluginOutcome::Failed;
                    }
                    None => match next.with_relational_binding(var, term) {
                        Ok(updated) => {
                            next = updated;
                            changed = true;
                        }
                        Err(_) => return PluginOutcome::Failed,
                    },
                }
            }
        }

        let mut kept = Vec::new();
        for constraint in store.constraints().iter() {
            match constraint.check(next.relational_bindings()) {
                CheckResult::Violated => return PluginOutcome::Failed,
                CheckResult::Satisfied => changed = true,
                CheckResult::Pending => kept.push(constraint.clone()),
            }
        }
        if kept.len() != store.constraints().len() {
            next = next.with_constraints(kept);
        }

        if changed {
            PluginOutcome::Changed(next)
        } else {
            PluginOutcome::Unchanged
        }
    }
}

/// Drives every registered plugin to a joint fixed point (SPEC_FULL
/// §4.9). Mirrors `fd::propagate::run_to_fixpoint`'s drain-and-requeue
/// shape one level up: instead of an FD work queue of constraint
/// indices, this loops over plugins until a full round changes nothing.
pub struct HybridSolver {
    plugins: Vec<Rc<dyn SolverPlugin>>,
    max_rounds: u32,
}

impl HybridSolver {
    pub fn new(plugins: Vec<Rc<dyn SolverPlugin>>) -> Self {
        HybridSolver {
            plugins,
            max_rounds: 1024,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Run every plugin in turn, re-running any plugin whose
    /// `can_handle` now reports relevant changes, until a full round
    /// leaves the store untouched. Returns `Ok(None)` on inconsistency
    /// (recoverable control flow, not a `CoreError`), `Err` only if the
    /// round cap is exhausted without reaching quiescence.
    pub fn propagate(&self, store: UnifiedStore) -> CoreResult<Option<UnifiedStore>> {
        let mut current = store;
        for round in 0..self.max_rounds {
            let mut round_changed = false;
            for plugin in self.plugins.iter() {
                if !plugin.can_handle(&current) {
                    continue;
                }
                match plugin.propagate(&current) {
                    PluginOutcome::Failed => return Ok(None),
                    PluginOutcome::Unchanged => {}
                    PluginOutcome::Changed(next) => {
                        current = next;
                        round_changed = true;
                    }
                }
            }
            if !round_changed {
                debug!(round, "hybrid joint fixed point reached");
                return Ok(Some(current.clear_changed()));
            }
            current = current.clear_changed();
        }
        Err(CoreError::ResourceExhausted {
            resource: "hybrid propagation rounds",
            limit: self.max_rounds as u64,
        })
    }

    /// The explicit adapter a goal composed under a local, `LTerm`-based
    /// `ConstraintStore` must go through to see FD-side pruning from a
    /// surrounding hybrid solver, rather than a local store silently
    /// widening into the hybrid one. `contribute` is the caller's
    /// translation of whatever bindings/constraints the goal posts into
    /// this `UnifiedStore`'s `Term`/`VarId` space (the two term
    /// representations are intentionally decoupled, see `crate::term`);
    /// `run_goal` applies that contribution and then drives the joint
    /// fixed point exactly as `propagate` does.
    pub fn run_goal<F>(&self, store: UnifiedStore, contribute: F) -> CoreResult<Option<UnifiedStore>>
    where
        F: FnOnce(&UnifiedStore) -> CoreResult<UnifiedStore>,
    {
        let contributed = contribute(&store)?;
        self.propagate(contributed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::constraints::arithmetic::Arithmetic;
    use crate::fd::model::ModelBuilder;

    #[test]
    fn singleton_promotes_across_the_store() {
        // FD var x, domain {1..10}; Arithmetic(x, y, +2); relational bind
        // x := 2. After hybrid propagation y's FD domain and relational
        // binding both settle on 4.
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(10);
        let y = b.new_var_full(10);
        b.post(Arc::new(Arithmetic::new(x, y, 2))).unwrap();
        let model = Arc::new(b.build());

        let hybrid_x: VarId = 1;
        let hybrid_y: VarId = 2;
        let mut var_map = HashMap::new();
        var_map.insert(hybrid_x, x);
        var_map.insert(hybrid_y, y);

        let fd_plugin: Rc<dyn SolverPlugin> = Rc::new(FdPlugin::new(model, var_map));
        let rel_plugin: Rc<dyn SolverPlugin> = Rc::new(RelationalPlugin);
        let solver = HybridSolver::new(vec![fd_plugin, rel_plugin]);

        let store = UnifiedStore::new()
            .with_relational_binding(hybrid_x, Term::number(2))
            .unwrap();
        let result = solver.propagate(store).unwrap().expect("consistent");

        assert_eq!(result.fd_domain(hybrid_y).and_then(|d| d.singleton_value()), Some(4));
        assert_eq!(result.relational_binding(hybrid_y), Some(&Term::number(4)));
    }

    #[test]
    fn conflicting_binding_fails() {
        let mut b = ModelBuilder::new();
        let x = b.new_var(crate::domain::Domain::singleton(5, 10), None);
        let model = Arc::new(b.build());
        let hybrid_x: VarId = 1;
        let mut var_map = HashMap::new();
        var_map.insert(hybrid_x, x);
        let fd_plugin: Rc<dyn SolverPlugin> = Rc::new(FdPlugin::new(model, var_map));
        let rel_plugin: Rc<dyn SolverPlugin> = Rc::new(RelationalPlugin);
        let solver = HybridSolver::new(vec![fd_plugin, rel_plugin]);

        let store = UnifiedStore::new()
            .with_relational_binding(hybrid_x, Term::number(9))
            .unwrap();
        assert!(solver.propagate(store).unwrap().is_none());
    }

    #[test]
    fn run_goal_applies_contribution_before_propagating() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(10);
        let y = b.new_var_full(10);
        b.post(Arc::new(Arithmetic::new(x, y, 2))).unwrap();
        let model = Arc::new(b.build());

        let hybrid_x: VarId = 1;
        let hybrid_y: VarId = 2;
        let mut var_map = HashMap::new();
        var_map.insert(hybrid_x, x);
        var_map.insert(hybrid_y, y);

        let fd_plugin: Rc<dyn SolverPlugin> = Rc::new(FdPlugin::new(model, var_map));
        let rel_plugin: Rc<dyn SolverPlugin> = Rc::new(RelationalPlugin);
        let solver = HybridSolver::new(vec![fd_plugin, rel_plugin]);

        let result = solver
            .run_goal(UnifiedStore::new(), |s| {
                s.with_relational_binding(hybrid_x, Term::number(2))
            })
            .unwrap()
            .expect("consistent");

        assert_eq!(result.fd_domain(hybrid_y).and_then(|d| d.singleton_value()), Some(4));
    }
}
