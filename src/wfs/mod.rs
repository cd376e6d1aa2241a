//! Well-founded semantics for negation over tabled predicates.
//!
//! Every stored answer carries a delay set (`crate::tabling::DelaySet`): the
//! subgoals whose negation it tentatively assumed true. An answer with an
//! empty delay set is unconditional. The truth of `not(G)` is computed from
//! `G`'s subgoal entry:
//!
//! - `False` once `G` has at least one unconditional answer — the goal
//!   holds outright, so its negation cannot.
//! - `True` once `G` is `Complete` and has produced no answers at all
//!   (conditional or not) — the goal provably fails, so its negation holds.
//! - `Undefined` otherwise: `G` is still `Active`, or it is `Complete` but
//!   some of its answers remain conditional (their delay sets haven't been
//!   fully cleared or retracted). A `Complete` goal whose only answers are
//!   conditional does not let negation conclude either way without
//!   resolving those dependencies first, so it stays `Undefined` rather
//!   than being treated as `False`.
//!
//! Stratification: when predicates are assigned strata, a negation over a
//! higher-stratum predicate must wait for all lower-stratum subgoals it
//! depends on to reach `Complete` before it is evaluated. Intra-stratum
//! cycles through negation are allowed but resolve to `Undefined` rather
//! than raising an error, unless `enforce_stratification` is set, in which
//! case attempting to evaluate a negation before its dependencies have
//! settled is a configuration error.

use crate::error::{CoreError, CoreResult};
use crate::tabling::{EntryStatus, PredicateId, Subgoal, SubgoalId, SubgoalTable};
use crate::term::Term;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truth {
    True,
    False,
    Undefined,
}

pub fn truth_of(subgoal: &Subgoal) -> Truth {
    if subgoal.has_unconditional_answer() {
        return Truth::False;
    }
    match subgoal.status() {
        EntryStatus::Complete => {
            if subgoal.answer_count() == 0 {
                Truth::True
            } else {
                Truth::Undefined
            }
        }
        EntryStatus::Active | EntryStatus::Invalidated | EntryStatus::Failed => Truth::Undefined,
    }
}

/// Propagates a truth change for `changed` to every subgoal in `table`,
/// dropping `changed` from delay sets it satisfies and retracting answers
/// it contradicts. Per-pass order is ascending `SubgoalId` so that multiple
/// simultaneous flips are applied deterministically and re-derivation
/// (an answer simplified this pass potentially flipping another subgoal's
/// truth) converges rather than depending on iteration order.
pub fn simplify_on_truth_change(
    table: &SubgoalTable,
    changed: SubgoalId,
    new_truth: Truth,
) -> Vec<(SubgoalId, Term)> {
    if new_truth == Truth::Undefined {
        return Vec::new();
    }
    let changed_is_true = new_truth == Truth::True;
    let mut subgoals = table.snapshot();
    subgoals.sort_by_key(|s| s.id);

    let mut retractions = Vec::new();
    for subgoal in subgoals {
        for term in subgoal.retain_and_simplify(changed, changed_is_true) {
            retractions.push((subgoal.id, term));
        }
    }
    retractions
}

/// Stratification assignment: predicate id -> stratum. Higher strata may
/// negate lower strata; negation within the same stratum is only sound if
/// it does not form a genuine dependency cycle.
#[derive(Debug, Clone, Default)]
pub struct Stratification {
    strata: HashMap<PredicateId, i32>,
}

impl Stratification {
    pub fn new() -> Stratification {
        Stratification {
            strata: HashMap::new(),
        }
    }

    pub fn assign(&mut self, predicate_id: PredicateId, stratum: i32) {
        self.strata.insert(predicate_id, stratum);
    }

    pub fn stratum_of(&self, predicate_id: PredicateId) -> i32 {
        *self.strata.get(&predicate_id).unwrap_or(&0)
    }

    /// Checks that `negator` (evaluating a negation of `negated`) respects
    /// stratification: `negated` must be in a stratum no higher than
    /// `negator`'s. On violation, returns a configuration error when
    /// `enforce` is set; otherwise the caller should treat the negation as
    /// `Truth::Undefined` instead of calling this at all.
    pub fn check(
        &self,
        negator: PredicateId,
        negated: PredicateId,
        enforce: bool,
    ) -> CoreResult<()> {
        if self.stratum_of(negated) > self.stratum_of(negator) {
            if enforce {
                return Err(CoreError::configuration(format!(
                    "negation of predicate {} from predicate {} violates stratification",
                    negated, negator
                )));
            }
        }
        Ok(())
    }
}

/// Deterministic handshake for evaluating `not(subgoal)` without racing the
/// producer: capture `subgoal`'s event sequence before consulting its
/// status, so a producer that completes between the status check and the
/// wait cannot be missed. Waits for either a real answer/status change or
/// the subgoal's own `Active` announcement, whichever comes first, and
/// returns as soon as the truth value is no longer `Undefined` or the
/// subgoal has reached a terminal status.
pub fn negate_blocking(subgoal: &Arc<Subgoal>) -> Truth {
    let mut seq = subgoal.event_seq();
    loop {
        let truth = truth_of(subgoal);
        if truth != Truth::Undefined {
            return truth;
        }
        if matches!(
            subgoal.status(),
            EntryStatus::Complete | EntryStatus::Failed | EntryStatus::Invalidated
        ) {
            return truth_of(subgoal);
        }
        seq = subgoal.wait_change_since(seq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabling::{Answer, CallPattern};

    #[test]
    fn complete_with_no_answers_is_true() {
        let table = SubgoalTable::new();
        let (subgoal, _) = table.get_or_create(CallPattern::new(1, &[]));
        subgoal.set_status(EntryStatus::Complete);
        assert_eq!(truth_of(&subgoal), Truth::True);
    }

    #[test]
    fn unconditional_answer_is_false() {
        let table = SubgoalTable::new();
        let (subgoal, _) = table.get_or_create(CallPattern::new(1, &[]));
        subgoal.insert_answer(Answer::unconditional(Term::number(1)));
        assert_eq!(truth_of(&subgoal), Truth::False);
    }

    #[test]
    fn complete_with_only_conditional_answers_is_undefined() {
        let table = SubgoalTable::new();
        let (subgoal, _) = table.get_or_create(CallPattern::new(1, &[]));
        let mut conditional = Answer::unconditional(Term::number(1));
        conditional.delay.insert(99);
        subgoal.insert_answer(conditional);
        subgoal.set_status(EntryStatus::Complete);
        assert_eq!(truth_of(&subgoal), Truth::Undefined);
    }

    #[test]
    fn active_subgoal_is_undefined() {
        let table = SubgoalTable::new();
        let (subgoal, _) = table.get_or_create(CallPattern::new(1, &[]));
        assert_eq!(truth_of(&subgoal), Truth::Undefined);
    }

    #[test]
    fn truth_change_propagates_across_the_table() {
        let table = SubgoalTable::new();
        let (dependent, _) = table.get_or_create(CallPattern::new(1, &[]));
        let mut conditional = Answer::unconditional(Term::number(1));
        conditional.delay.insert(42);
        dependent.insert_answer(conditional);

        let retractions = simplify_on_truth_change(&table, 42, Truth::True);
        assert!(retractions.is_empty());
        assert!(dependent.answer_at(0).unwrap().is_unconditional());
    }

    #[test]
    fn stratification_violation_is_reported_when_enforced() {
        let mut strata = Stratification::new();
        strata.assign(1, 0);
        strata.assign(2, 1);
        assert!(strata.check(1, 2, true).is_err());
        assert!(strata.check(2, 1, true).is_ok());
        assert!(strata.check(1, 2, false).is_ok());
    }
}
