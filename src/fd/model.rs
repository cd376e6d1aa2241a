//! The immutable `Model`: a catalog of finite-domain variables, posted
//! constraints, and solver configuration. Grounded on the `IntegerVariable`/
//! model-registration shape used by the Munchkin CP solver sources in the
//! retrieval pack (`other_examples/`), adapted to this crate's `Arc`-based,
//! non-async idiom (constraints must be `Send + Sync` so a `Model` can be
//! shared across parallel search workers behind an `Arc`).

use crate::domain::Domain;
use crate::error::{CoreError, CoreResult};
use crate::fd::PropagationConstraint;
use std::sync::Arc;

/// Dense index identifying a finite-domain variable within a `Model`.
pub type VarId = usize;

#[derive(Debug, Clone)]
pub struct FdVariable {
    pub id: VarId,
    pub initial_domain: Domain,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableHeuristic {
    FirstUnbound,
    MinDomain,
    DomDeg,
    Impact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHeuristic {
    Ascending,
    Descending,
    ObjectiveImproving,
    RandomSeeded,
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub variable_heuristic: VariableHeuristic,
    pub value_heuristic: ValueHeuristic,
    pub random_seed: u64,
    pub num_workers: usize,
    pub work_queue_size: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            variable_heuristic: VariableHeuristic::FirstUnbound,
            value_heuristic: ValueHeuristic::Ascending,
            random_seed: 0,
            num_workers: 1,
            work_queue_size: 1024,
        }
    }
}

/// An immutable catalog of variables and posted constraints. Immutable once
/// search begins; shared across parallel workers via `Arc` at the call
/// site (the search engine wraps it in `Arc` for its worker pool).
#[derive(Debug)]
pub struct Model {
    variables: Vec<FdVariable>,
    constraints: Vec<Arc<dyn PropagationConstraint + Send + Sync>>,
    /// For each variable, indices into `constraints` whose scope includes it.
    dependents: Vec<Vec<usize>>,
    pub config: SolverConfig,
}

impl Model {
    pub fn variables(&self) -> &[FdVariable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Arc<dyn PropagationConstraint + Send + Sync>] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn initial_domain(&self, var: VarId) -> &Domain {
        &self.variables[var].initial_domain
    }

    pub fn dependents(&self, var: VarId) -> &[usize] {
        &self.dependents[var]
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

pub struct ModelBuilder {
    variables: Vec<FdVariable>,
    constraints: Vec<Arc<dyn PropagationConstraint + Send + Sync>>,
    config: SolverConfig,
}

impl ModelBuilder {
    pub fn new() -> Self {
        ModelBuilder {
            variables: Vec::new(),
            constraints: Vec::new(),
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Create a variable with domain `1..=max_value`.
    pub fn new_var_full(&mut self, max_value: i64) -> VarId {
        self.new_var(Domain::full(max_value), None)
    }

    /// Create a variable with an explicit initial domain.
    pub fn new_var(&mut self, initial_domain: Domain, name: Option<String>) -> VarId {
        let id = self.variables.len();
        self.variables.push(FdVariable {
            id,
            initial_domain,
            name,
        });
        id
    }

    /// Create a variable ranging over an explicit list of values.
    pub fn new_var_from_values(&mut self, values: &[i64], max_value: i64) -> VarId {
        self.new_var(Domain::from_values(values.iter().copied(), max_value), None)
    }

    /// Post a constraint. Validated immediately against the declared
    /// variable count (arity/out-of-range checks); posting never mutates
    /// domains (domain effects only appear once propagation runs).
    pub fn post(&mut self, constraint: Arc<dyn PropagationConstraint + Send + Sync>) -> CoreResult<()> {
        for v in constraint.scope() {
            if v >= self.variables.len() {
                return Err(CoreError::configuration(format!(
                    "constraint {} references out-of-range variable {}",
                    constraint.name(),
                    v
                )));
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn build(self) -> Model {
        let mut dependents = vec![Vec::new(); self.variables.len()];
        for (idx, c) in self.constraints.iter().enumerate() {
            for v in c.scope() {
                dependents[v].push(idx);
            }
        }
        Model {
            variables: self.variables,
            constraints: self.constraints,
            dependents,
            config: self.config,
        }
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_out_of_range_scope() {
        use crate::fd::constraints::inequality::{Inequality, InequalityKind};
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let bad = Arc::new(Inequality::new(x, 99, InequalityKind::Lt));
        assert!(b.post(bad).is_err());
    }

    #[test]
    fn dependents_index_matches_scope() {
        use crate::fd::constraints::inequality::{Inequality, InequalityKind};
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(5);
        let y = b.new_var_full(5);
        b.post(Arc::new(Inequality::new(x, y, InequalityKind::Lt)))
            .unwrap();
        let model = b.build();
        assert_eq!(model.dependents(x), &[0]);
        assert_eq!(model.dependents(y), &[0]);
    }
}
