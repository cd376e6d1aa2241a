//! Answer storage for a tabled subgoal.
//!
//! Each stored answer carries a `DelaySet`: the set of negated subgoals its
//! truth is conditional on. An empty delay set means the answer is
//! unconditionally true. See `crate::wfs` for how delay sets are resolved.

use crate::term::Term;
use std::collections::{BTreeSet, HashSet};

pub type SubgoalId = u64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelaySet(BTreeSet<SubgoalId>);

impl DelaySet {
    pub fn empty() -> DelaySet {
        DelaySet(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, id: SubgoalId) {
        self.0.insert(id);
    }

    pub fn remove(&mut self, id: SubgoalId) {
        self.0.remove(&id);
    }

    pub fn contains(&self, id: SubgoalId) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubgoalId> {
        self.0.iter()
    }
}

impl FromIterator<SubgoalId> for DelaySet {
    fn from_iter<I: IntoIterator<Item = SubgoalId>>(iter: I) -> DelaySet {
        DelaySet(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub term: Term,
    pub delay: DelaySet,
}

impl Answer {
    pub fn unconditional(term: Term) -> Answer {
        Answer {
            term,
            delay: DelaySet::empty(),
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.delay.is_empty()
    }
}

/// Content-addressed, insertion-ordered set of answers for one subgoal.
///
/// Uniqueness is by `term` alone: two answers for the same term with
/// different delay sets are still the same answer (the second insert
/// strengthens nothing and is rejected as already-present).
#[derive(Debug, Default)]
pub struct AnswerTrie {
    answers: Vec<Answer>,
    seen: HashSet<Term>,
}

impl AnswerTrie {
    pub fn new() -> AnswerTrie {
        AnswerTrie {
            answers: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Returns `true` if this is a newly inserted answer.
    pub fn insert(&mut self, answer: Answer) -> bool {
        if self.seen.contains(&answer.term) {
            return false;
        }
        self.seen.insert(answer.term.clone());
        self.answers.push(answer);
        true
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Answer> {
        self.answers.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter()
    }

    pub fn has_unconditional_answer(&self) -> bool {
        self.answers.iter().any(Answer::is_unconditional)
    }

    /// Applies a WFS truth-change for `changed` to every stored answer:
    /// drop `changed` from delay sets if `changed` resolved to `True` (its
    /// negation assumption now holds), or retract the answer entirely if
    /// `changed` resolved to `False` (the assumption it depended on failed).
    /// Returns the terms of any answers retracted this call.
    pub fn retain_and_simplify(&mut self, changed: SubgoalId, changed_is_true: bool) -> Vec<Term> {
        let mut retracted = Vec::new();
        let mut kept = Vec::with_capacity(self.answers.len());
        for mut answer in self.answers.drain(..) {
            if answer.delay.contains(changed) {
                if changed_is_true {
                    answer.delay.remove(changed);
                    kept.push(answer);
                } else {
                    retracted.push(answer.term.clone());
                    self.seen.remove(&answer.term);
                    continue;
                }
            } else {
                kept.push(answer);
            }
        }
        self.answers = kept;
        retracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_term_insert_is_rejected() {
        let mut trie = AnswerTrie::new();
        assert!(trie.insert(Answer::unconditional(Term::number(1))));
        assert!(!trie.insert(Answer::unconditional(Term::number(1))));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn truth_change_clears_or_retracts_conditional_answers() {
        let mut trie = AnswerTrie::new();
        let mut delayed = Answer::unconditional(Term::number(1));
        delayed.delay.insert(7);
        trie.insert(delayed);
        trie.insert(Answer::unconditional(Term::number(2)));

        let retracted = trie.retain_and_simplify(7, true);
        assert!(retracted.is_empty());
        assert!(trie.get(0).unwrap().is_unconditional());

        let mut delayed2 = Answer::unconditional(Term::number(3));
        delayed2.delay.insert(8);
        trie.insert(delayed2);
        let retracted = trie.retain_and_simplify(8, false);
        assert_eq!(retracted, vec![Term::number(3)]);
        assert_eq!(trie.len(), 2);
    }
}
