//! SLG resolution: table-driven evaluation with producer/consumer sharing
//! and cycle fixpoints.
//!
//! A first caller for a given call pattern spawns a producer thread that
//! drives the underlying goal and feeds answers into the table. Later
//! callers for the same pattern, and callers that arrive while the first
//! is still running, attach as consumers that replay the trie from their
//! own cursor and then block on `wait_change_since` for more. Cycles
//! (a subgoal calling back into one of its own callers) are detected via a
//! caller/callee dependency graph and resolved with a bounded synchronous
//! fixpoint over the cycle's strongly connected component.

use crate::error::{CoreError, CoreResult};
use crate::tabling::{Answer, CallPattern, EntryStatus, PredicateId, Subgoal, SubgoalId, SubgoalTable};
use crate::term::Term;
use std::collections::{HashMap, HashSet};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Producer closures drive a subgoal to completion, inserting answers as
/// they're found and calling `set_status(Complete)` (or `Failed`) when
/// done. They run on their own thread and must not block on anything but
/// the subgoal machinery itself.
pub type Producer = Arc<dyn Fn(&Arc<Subgoal>) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct SlgConfig {
    pub max_table_size: usize,
    pub max_answers_per_subgoal: usize,
    pub max_fixpoint_iterations: u32,
    pub enable_parallel_producers: bool,
    pub enable_subsumption_checking: bool,
    pub enforce_stratification: bool,
    pub debug_wfs: bool,
}

impl Default for SlgConfig {
    fn default() -> SlgConfig {
        SlgConfig {
            max_table_size: 10_000,
            max_answers_per_subgoal: 10_000,
            max_fixpoint_iterations: 1_000,
            enable_parallel_producers: true,
            enable_subsumption_checking: false,
            enforce_stratification: true,
            debug_wfs: false,
        }
    }
}

pub struct SlgEngine {
    pub table: Arc<SubgoalTable>,
    config: SlgConfig,
    deps: Mutex<HashMap<SubgoalId, HashSet<SubgoalId>>>,
    producers: Mutex<HashMap<SubgoalId, Producer>>,
}

impl SlgEngine {
    pub fn new(config: SlgConfig) -> SlgEngine {
        SlgEngine {
            table: Arc::new(SubgoalTable::new()),
            config,
            deps: Mutex::new(HashMap::new()),
            producers: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SlgConfig {
        &self.config
    }

    /// Evaluates `pattern`, spawning a producer if this is the first call
    /// for it. `caller` records a caller -> callee dependency edge used for
    /// cycle detection. Returns the shared subgoal entry plus a channel
    /// delivering its answers in insertion order starting from whatever is
    /// already present.
    pub fn evaluate(
        &self,
        pattern: CallPattern,
        caller: Option<SubgoalId>,
        producer: Producer,
    ) -> CoreResult<(Arc<Subgoal>, mpsc::Receiver<Term>)> {
        if self.table.len() >= self.config.max_table_size {
            return Err(CoreError::ResourceExhausted {
                resource: "subgoal table",
                limit: self.config.max_table_size as u64,
            });
        }

        let (subgoal, hit) = self.table.get_or_create(pattern);

        if let Some(caller_id) = caller {
            self.deps
                .lock()
                .unwrap()
                .entry(caller_id)
                .or_default()
                .insert(subgoal.id);
            if let Some(caller_subgoal) = self.table.get_by_id(caller_id) {
                caller_subgoal.add_dependency(subgoal.id);
            }
        }

        if !hit {
            self.producers.lock().unwrap().insert(subgoal.id, producer.clone());
            let spawned = subgoal.clone();
            thread::spawn(move || {
                producer(&spawned);
            });
        } else if self.cycle_detected(caller, subgoal.id) {
            self.resolve_cycle(subgoal.id);
        }

        let (tx, rx) = mpsc::channel();
        let consumer_subgoal = subgoal.clone();
        let max_answers = self.config.max_answers_per_subgoal;
        thread::spawn(move || {
            let mut delivered = 0usize;
            let mut seq = 0u64;
            loop {
                while delivered < consumer_subgoal.answer_count() && delivered < max_answers {
                    if let Some(answer) = consumer_subgoal.answer_at(delivered) {
                        if tx.send(answer.term).is_err() {
                            return;
                        }
                    }
                    delivered += 1;
                }
                let status = consumer_subgoal.status();
                if matches!(
                    status,
                    EntryStatus::Complete | EntryStatus::Failed | EntryStatus::Invalidated
                ) && delivered >= consumer_subgoal.answer_count()
                {
                    return;
                }
                seq = consumer_subgoal.wait_change_since(seq);
            }
        });

        Ok((subgoal, rx))
    }

    fn cycle_detected(&self, caller: Option<SubgoalId>, callee: SubgoalId) -> bool {
        let caller = match caller {
            Some(c) => c,
            None => return false,
        };
        let deps = self.deps.lock().unwrap();
        reachable(&deps, callee, caller)
    }

    /// Runs a bounded synchronous fixpoint over the cycle containing
    /// `start`: repeatedly re-invoke every producer reachable in the same
    /// strongly connected component until a full pass inserts no new
    /// answers, then mark every entry in it `Complete`.
    fn resolve_cycle(&self, start: SubgoalId) {
        let deps = self.deps.lock().unwrap().clone();
        let nodes: Vec<SubgoalId> = deps.keys().cloned().chain(std::iter::once(start)).collect();
        let sccs = crate::slg::scc::tarjan_scc(&nodes, &deps);
        let component = match sccs.into_iter().find(|c| c.contains(&start) && c.len() > 1) {
            Some(c) => c,
            None => return,
        };

        let producers = self.producers.lock().unwrap();
        for _ in 0..self.config.max_fixpoint_iterations {
            let mut any_new = false;
            for &id in &component {
                if let Some(producer) = producers.get(&id) {
                    if let Some(subgoal) = self.subgoal_by_id(id) {
                        let before = subgoal.answer_count();
                        producer(&subgoal);
                        if subgoal.answer_count() > before {
                            any_new = true;
                        }
                    }
                }
            }
            if !any_new {
                break;
            }
        }
        for &id in &component {
            if let Some(subgoal) = self.subgoal_by_id(id) {
                if subgoal.status() == EntryStatus::Active {
                    subgoal.set_status(EntryStatus::Complete);
                }
            }
        }
    }

    fn subgoal_by_id(&self, id: SubgoalId) -> Option<Arc<Subgoal>> {
        self.table.get_by_id(id)
    }

    pub fn invalidate_relation(&self, predicate_id: PredicateId) {
        self.table.invalidate_relation(predicate_id);
    }

    pub fn invalidate_all(&self) {
        self.table.invalidate_all();
        self.deps.lock().unwrap().clear();
        self.producers.lock().unwrap().clear();
    }

    pub fn stats(&self) -> EngineStats {
        let (total_evaluations, total_answers, cache_hits, cache_misses, cached_subgoals, hit_ratio) =
            self.table.stats();
        EngineStats {
            total_evaluations,
            total_answers,
            cache_hits,
            cache_misses,
            cached_subgoals,
            hit_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    pub total_evaluations: u64,
    pub total_answers: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cached_subgoals: usize,
    pub hit_ratio: f64,
}

fn reachable(
    edges: &HashMap<SubgoalId, HashSet<SubgoalId>>,
    from: SubgoalId,
    to: SubgoalId,
) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(succs) = edges.get(&node) {
            stack.extend(succs.iter().cloned());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabling::EntryStatus;

    #[test]
    fn first_call_spawns_a_producer_and_delivers_answers() {
        let engine = SlgEngine::new(SlgConfig::default());
        let pattern = CallPattern::new(1, &[Term::var(0)]);
        let (_subgoal, rx) = engine
            .evaluate(
                pattern,
                None,
                Arc::new(|subgoal| {
                    subgoal.insert_answer(Answer::unconditional(Term::number(1)));
                    subgoal.insert_answer(Answer::unconditional(Term::number(2)));
                    subgoal.set_status(EntryStatus::Complete);
                }),
            )
            .unwrap();

        let mut results: Vec<Term> = rx.iter().collect();
        results.sort_by_key(|t| format!("{}", t));
        assert_eq!(results, vec![Term::number(1), Term::number(2)]);
    }

    #[test]
    fn repeat_call_reuses_existing_entry_without_a_new_producer() {
        let engine = SlgEngine::new(SlgConfig::default());
        let pattern = CallPattern::new(1, &[Term::var(0)]);
        let (first, _rx1) = engine
            .evaluate(
                pattern.clone(),
                None,
                Arc::new(|subgoal| {
                    subgoal.insert_answer(Answer::unconditional(Term::number(1)));
                    subgoal.set_status(EntryStatus::Complete);
                }),
            )
            .unwrap();
        let (second, rx2) = engine
            .evaluate(pattern, None, Arc::new(|_| {}))
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(rx2.iter().collect::<Vec<_>>(), vec![Term::number(1)]);
    }
}
