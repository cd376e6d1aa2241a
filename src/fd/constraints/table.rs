//! `Table(vars, rows)`: generalized arc-consistency via one filtering pass
//! that discards rows incompatible with current domains, then intersects
//! each variable's domain with the surviving rows' column values.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct Table {
    vars: Vec<VarId>,
    rows: Vec<Vec<i64>>,
}

impl Table {
    pub fn new(vars: Vec<VarId>, rows: Vec<Vec<i64>>) -> Self {
        for row in &rows {
            assert_eq!(row.len(), vars.len());
        }
        Table { vars, rows }
    }
}

impl PropagationConstraint for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn scope(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();

        let surviving: Vec<&Vec<i64>> = self
            .rows
            .iter()
            .filter(|row| row.iter().zip(&domains).all(|(v, d)| d.has(*v)))
            .collect();
        if surviving.is_empty() {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        for (i, &var_id) in self.vars.iter().enumerate() {
            let mut supported = Domain::empty(domains[i].max_value());
            for row in &surviving {
                supported = supported.union(&Domain::singleton(row[i], supported.max_value()));
            }
            if supported.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !supported.equal(&domains[i]) {
                current = SolverState::set_domain(&current, model, var_id, supported);
            }
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}
