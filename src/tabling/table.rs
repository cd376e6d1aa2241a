//! The subgoal table: one entry per canonical call pattern, shared between
//! a producer thread and any number of consumers.

use crate::tabling::pattern::{CallPattern, PredicateId};
use crate::tabling::trie::{Answer, AnswerTrie, SubgoalId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Active,
    Complete,
    Failed,
    Invalidated,
}

struct SubgoalState {
    status: EntryStatus,
    depends_on: HashSet<SubgoalId>,
}

/// One tabled call: its answer trie plus the synchronization state a
/// producer and its consumers coordinate through.
///
/// `event_seq` is bumped, under the same `state` lock, on every answer
/// insert and every status change, then broadcast via `condvar`. Consumers
/// never poll on a timer: they wait on `condvar` for `event_seq` to move
/// past the value they last observed.
pub struct Subgoal {
    pub id: SubgoalId,
    pub pattern: CallPattern,
    state: Mutex<SubgoalState>,
    condvar: Condvar,
    event_seq: AtomicU64,
    trie: RwLock<AnswerTrie>,
    /// Shared with the owning `SubgoalTable`; bumped once per answer actually
    /// inserted (not once per producer run), so `stats().total_answers`
    /// reflects real answer counts across every subgoal.
    table_answer_count: Arc<AtomicU64>,
}

impl Subgoal {
    fn new(id: SubgoalId, pattern: CallPattern, table_answer_count: Arc<AtomicU64>) -> Subgoal {
        Subgoal {
            id,
            pattern,
            state: Mutex::new(SubgoalState {
                status: EntryStatus::Active,
                depends_on: HashSet::new(),
            }),
            condvar: Condvar::new(),
            event_seq: AtomicU64::new(0),
            trie: RwLock::new(AnswerTrie::new()),
            table_answer_count,
        }
    }

    pub fn status(&self) -> EntryStatus {
        self.state.lock().unwrap().status
    }

    pub fn set_status(&self, status: EntryStatus) {
        let mut guard = self.state.lock().unwrap();
        guard.status = status;
        self.event_seq.fetch_add(1, Ordering::SeqCst);
        self.condvar.notify_all();
    }

    pub fn add_dependency(&self, callee: SubgoalId) {
        self.state.lock().unwrap().depends_on.insert(callee);
    }

    pub fn dependencies(&self) -> HashSet<SubgoalId> {
        self.state.lock().unwrap().depends_on.clone()
    }

    /// Returns `true` if this was a new answer (event_seq bumped).
    pub fn insert_answer(&self, answer: Answer) -> bool {
        let inserted = self.trie.write().unwrap().insert(answer);
        if inserted {
            self.table_answer_count.fetch_add(1, Ordering::Relaxed);
            self.event_seq.fetch_add(1, Ordering::SeqCst);
            let _guard = self.state.lock().unwrap();
            self.condvar.notify_all();
        }
        inserted
    }

    pub fn answer_count(&self) -> usize {
        self.trie.read().unwrap().len()
    }

    pub fn answer_at(&self, idx: usize) -> Option<Answer> {
        self.trie.read().unwrap().get(idx).cloned()
    }

    pub fn has_unconditional_answer(&self) -> bool {
        self.trie.read().unwrap().has_unconditional_answer()
    }

    pub fn retain_and_simplify(
        &self,
        changed: SubgoalId,
        changed_is_true: bool,
    ) -> Vec<crate::term::Term> {
        let retracted = self
            .trie
            .write()
            .unwrap()
            .retain_and_simplify(changed, changed_is_true);
        if !retracted.is_empty() {
            self.event_seq.fetch_add(1, Ordering::SeqCst);
            self.condvar.notify_all();
        }
        retracted
    }

    pub fn event_seq(&self) -> u64 {
        self.event_seq.load(Ordering::SeqCst)
    }

    /// Blocks until `event_seq` advances past `since`, then returns the new
    /// value. Never held across another wait: the lock backing this condvar
    /// is only ever taken here and in `set_status`/`insert_answer`, neither
    /// of which waits on anything else.
    pub fn wait_change_since(&self, since: u64) -> u64 {
        let mut guard = self.state.lock().unwrap();
        loop {
            let seq = self.event_seq.load(Ordering::SeqCst);
            if seq != since {
                return seq;
            }
            guard = self.condvar.wait(guard).unwrap();
        }
    }
}

#[derive(Debug, Default)]
pub struct TableStats {
    pub total_evaluations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl TableStats {
    pub fn cached_subgoals(&self, count: usize) -> usize {
        count
    }

    pub fn hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

pub struct SubgoalTable {
    entries: RwLock<HashMap<CallPattern, Arc<Subgoal>>>,
    next_id: AtomicU64,
    stats: Mutex<TableStats>,
    /// Total answers ever inserted across every subgoal, including ones
    /// since evicted by invalidation. Shared into each `Subgoal` so
    /// `insert_answer` can count real answers instead of producer runs.
    total_answers: Arc<AtomicU64>,
}

impl SubgoalTable {
    pub fn new() -> SubgoalTable {
        SubgoalTable {
            entries: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            stats: Mutex::new(TableStats::default()),
            total_answers: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Looks up `pattern`, returning the existing entry plus whether it was
    /// a cache hit, or creates and registers a fresh `Active` entry.
    pub fn get_or_create(&self, pattern: CallPattern) -> (Arc<Subgoal>, bool) {
        {
            let entries = self.entries.read().unwrap();
            if let Some(existing) = entries.get(&pattern) {
                let mut stats = self.stats.lock().unwrap();
                stats.cache_hits += 1;
                return (existing.clone(), true);
            }
        }
        let mut entries = self.entries.write().unwrap();
        if let Some(existing) = entries.get(&pattern) {
            let mut stats = self.stats.lock().unwrap();
            stats.cache_hits += 1;
            return (existing.clone(), true);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let subgoal = Arc::new(Subgoal::new(id, pattern.clone(), self.total_answers.clone()));
        entries.insert(pattern, subgoal.clone());
        let mut stats = self.stats.lock().unwrap();
        stats.cache_misses += 1;
        stats.total_evaluations += 1;
        (subgoal, false)
    }

    pub fn get(&self, pattern: &CallPattern) -> Option<Arc<Subgoal>> {
        self.entries.read().unwrap().get(pattern).cloned()
    }

    pub fn get_by_id(&self, id: SubgoalId) -> Option<Arc<Subgoal>> {
        self.entries
            .read()
            .unwrap()
            .values()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<Arc<Subgoal>> {
        self.entries.read().unwrap().values().cloned().collect()
    }

    pub fn invalidate_relation(&self, predicate_id: PredicateId) {
        let entries = self.entries.read().unwrap();
        for subgoal in entries.values() {
            if subgoal.pattern.predicate_id() == predicate_id {
                subgoal.set_status(EntryStatus::Invalidated);
            }
        }
        drop(entries);
        self.entries
            .write()
            .unwrap()
            .retain(|k, _| k.predicate_id() != predicate_id);
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write().unwrap();
        for subgoal in entries.values() {
            subgoal.set_status(EntryStatus::Invalidated);
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn stats(&self) -> (u64, u64, u64, u64, usize, f64) {
        let stats = self.stats.lock().unwrap();
        (
            stats.total_evaluations,
            self.total_answers.load(Ordering::Relaxed),
            stats.cache_hits,
            stats.cache_misses,
            self.len(),
            stats.hit_ratio(),
        )
    }
}

impl Default for SubgoalTable {
    fn default() -> SubgoalTable {
        SubgoalTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    #[test]
    fn repeat_lookups_of_the_same_pattern_are_cache_hits() {
        let table = SubgoalTable::new();
        let pattern = CallPattern::new(1, &[Term::var(0)]);
        let (first, hit1) = table.get_or_create(pattern.clone());
        assert!(!hit1);
        let (second, hit2) = table.get_or_create(pattern);
        assert!(hit2);
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn status_change_bumps_event_seq_and_wakes_waiters() {
        let table = SubgoalTable::new();
        let pattern = CallPattern::new(1, &[Term::var(0)]);
        let (subgoal, _) = table.get_or_create(pattern);
        let before = subgoal.event_seq();
        subgoal.set_status(EntryStatus::Complete);
        assert_ne!(before, subgoal.event_seq());
        assert_eq!(subgoal.status(), EntryStatus::Complete);
    }

    #[test]
    fn stats_count_one_answer_per_insert_not_per_producer_run() {
        let table = SubgoalTable::new();
        let pattern = CallPattern::new(1, &[Term::var(0)]);
        let (subgoal, _) = table.get_or_create(pattern);
        subgoal.insert_answer(Answer::unconditional(Term::number(1)));
        subgoal.insert_answer(Answer::unconditional(Term::number(2)));
        subgoal.insert_answer(Answer::unconditional(Term::number(2)));
        let (_, total_answers, _, _, _, _) = table.stats();
        assert_eq!(total_answers, 2);
    }

    #[test]
    fn invalidate_relation_only_evicts_matching_predicate() {
        let table = SubgoalTable::new();
        let p1 = CallPattern::new(1, &[Term::var(0)]);
        let p2 = CallPattern::new(2, &[Term::var(0)]);
        table.get_or_create(p1.clone());
        table.get_or_create(p2.clone());
        table.invalidate_relation(1);
        assert!(table.get(&p1).is_none());
        assert!(table.get(&p2).is_some());
    }
}
