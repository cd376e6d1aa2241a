//! `Cumulative(start[], dur[], dem[], cap)`: time-table filtering on
//! compulsory parts. Inconsistent if the resource profile ever exceeds
//! capacity; prunes start times whose placement would overflow a time
//! point covered by another task's compulsory part.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub start: VarId,
    pub duration: i64,
    pub demand: i64,
}

#[derive(Debug)]
pub struct Cumulative {
    tasks: Vec<Task>,
    capacity: i64,
}

impl Cumulative {
    pub fn new(tasks: Vec<Task>, capacity: i64) -> Self {
        Cumulative { tasks, capacity }
    }

    /// Compulsory part of a task given its start domain: the time window
    /// `[max_start, min_start + duration)` that every feasible placement
    /// must cover, if any (empty when duration <= slack).
    fn compulsory_part(task: &Task, start_dom: &Domain) -> Option<(i64, i64)> {
        let min_start = start_dom.min()?;
        let max_start = start_dom.max()?;
        let lo = max_start;
        let hi = min_start + task.duration;
        if lo < hi {
            Some((lo, hi))
        } else {
            None
        }
    }
}

impl PropagationConstraint for Cumulative {
    fn name(&self) -> &'static str {
        "cumulative"
    }

    fn scope(&self) -> Vec<VarId> {
        self.tasks.iter().map(|t| t.start).collect()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let start_domains: Vec<Domain> = self
            .tasks
            .iter()
            .map(|t| SolverState::get_domain(state, model, t.start))
            .collect();

        // Build the resource usage profile from compulsory parts.
        let mut profile: HashMap<i64, i64> = HashMap::new();
        for (task, dom) in self.tasks.iter().zip(&start_domains) {
            if let Some((lo, hi)) = Self::compulsory_part(task, dom) {
                let mut t = lo;
                while t < hi {
                    *profile.entry(t).or_insert(0) += task.demand;
                    t += 1;
                }
            }
        }
        if profile.values().any(|&usage| usage > self.capacity) {
            return PropagationOutcome::Failed;
        }

        let mut current = state.clone();
        for (i, task) in self.tasks.iter().enumerate() {
            let dom = &start_domains[i];
            let mut new_dom = dom.clone();
            for candidate_start in dom.iter() {
                let end = candidate_start + task.duration;
                let mut overflow = false;
                let mut t = candidate_start;
                while t < end {
                    let existing = *profile.get(&t).unwrap_or(&0);
                    // Subtract this task's own compulsory contribution at t
                    // (if any) before checking, to avoid self-double-count.
                    let self_contrib = Self::compulsory_part(task, dom)
                        .filter(|(lo, hi)| t >= *lo && t < *hi)
                        .map(|_| task.demand)
                        .unwrap_or(0);
                    if existing - self_contrib + task.demand > self.capacity {
                        overflow = true;
                        break;
                    }
                    t += 1;
                }
                if overflow {
                    new_dom = new_dom.remove(candidate_start);
                }
            }
            if new_dom.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !new_dom.equal(dom) {
                current = SolverState::set_domain(&current, model, task.start, new_dom);
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
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn overload_is_inconsistent() {
        let mut b = ModelBuilder::new();
        let starts: Vec<_> = (0..3).map(|_| b.new_var_full(3)).collect();
        let tasks = starts
            .iter()
            .map(|&s| Task {
                start: s,
                duration: 4,
                demand: 3,
            })
            .collect();
        b.post(Arc::new(Cumulative::new(tasks, 5))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("expected overload failure"),
        }
    }

    #[test]
    fn fits_within_capacity() {
        let mut b = ModelBuilder::new();
        let s0 = b.new_var(Domain::singleton(1, 10), None);
        let s1 = b.new_var(Domain::singleton(5, 10), None);
        let tasks = vec![
            Task {
                start: s0,
                duration: 3,
                demand: 2,
            },
            Task {
                start: s1,
                duration: 3,
                demand: 2,
            },
        ];
        b.post(Arc::new(Cumulative::new(tasks, 2))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(_) => {}
            FixpointOutcome::Inconsistent => panic!("expected consistency"),
        }
    }
}
