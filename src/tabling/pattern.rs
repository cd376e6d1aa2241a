//! Canonical call patterns (SPEC_FULL §4.10): subgoal calls that are
//! structurally equal up to a consistent renaming of their logic variables
//! hash and compare equal, so repeat calls hit the same table entry.

use crate::term::{Term, VarId};
use std::collections::HashMap;
use std::fmt::Write as _;

pub type PredicateId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallPattern {
    predicate_id: PredicateId,
    canonical: String,
}

impl CallPattern {
    pub fn new(predicate_id: PredicateId, args: &[Term]) -> CallPattern {
        let mut renaming = HashMap::new();
        let mut canonical = String::new();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                canonical.push(',');
            }
            write_canonical(arg, &mut renaming, &mut canonical);
        }
        CallPattern {
            predicate_id,
            canonical,
        }
    }

    pub fn predicate_id(&self) -> PredicateId {
        self.predicate_id
    }
}

fn write_canonical(term: &Term, renaming: &mut HashMap<VarId, usize>, out: &mut String) {
    match term {
        Term::Var(id) => {
            let next = renaming.len();
            let position = *renaming.entry(*id).or_insert(next);
            let _ = write!(out, "X{}", position);
        }
        Term::Atom(s) => {
            let _ = write!(out, "a:{}", s);
        }
        Term::Number(n) => {
            let _ = write!(out, "n:{}", n);
        }
        Term::Empty => out.push_str("()"),
        Term::Pair(h, t) => {
            out.push('(');
            write_canonical(h, renaming, out);
            out.push('.');
            write_canonical(t, renaming, out);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structurally_equal_calls_with_renamed_variables_match() {
        let a = CallPattern::new(1, &[Term::var(10), Term::var(11)]);
        let b = CallPattern::new(1, &[Term::var(99), Term::var(100)]);
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_variable_occurrence_is_distinguished_from_distinct_ones() {
        let shared = CallPattern::new(1, &[Term::var(10), Term::var(10)]);
        let distinct = CallPattern::new(1, &[Term::var(10), Term::var(11)]);
        assert_ne!(shared, distinct);
    }

    #[test]
    fn different_structure_does_not_match() {
        let a = CallPattern::new(1, &[Term::number(1)]);
        let b = CallPattern::new(1, &[Term::number(2)]);
        assert_ne!(a, b);

        let c = CallPattern::new(2, &[Term::number(1)]);
        assert_ne!(a, c);
    }
}
