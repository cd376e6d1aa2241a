//! A minimal, `Send`-safe structural term representation.
//!
//! `LTerm<U, E>` is `Rc`-based and tied to a single engine/user pair, which
//! makes it a poor fit for the tabling and SLG engines: producers run on
//! their own `std::thread`, and answers must cross that boundary to reach
//! waiting consumers. `Term` is the structural projection tabling actually
//! needs to store, hash, and compare, decoupled from any particular
//! `State<U, E>`.

use std::fmt;
use std::sync::Arc;

/// Process-unique variable identity, independent of any engine instance.
pub type VarId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Var(VarId),
    Atom(Arc<str>),
    Number(isize),
    Empty,
    Pair(Arc<Term>, Arc<Term>),
}

impl Term {
    pub fn var(id: VarId) -> Term {
        Term::Var(id)
    }

    pub fn atom(s: impl Into<Arc<str>>) -> Term {
        Term::Atom(s.into())
    }

    pub fn number(n: isize) -> Term {
        Term::Number(n)
    }

    pub fn cons(head: Term, tail: Term) -> Term {
        Term::Pair(Arc::new(head), Arc::new(tail))
    }

    pub fn list(items: impl IntoIterator<Item = Term>) -> Term {
        let mut items: Vec<Term> = items.into_iter().collect();
        let mut tail = Term::Empty;
        while let Some(item) = items.pop() {
            tail = Term::cons(item, tail);
        }
        tail
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Atom(_) | Term::Number(_) | Term::Empty => true,
            Term::Pair(h, t) => h.is_ground() && t.is_ground(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Var(id) => write!(f, "_{}", id),
            Term::Atom(s) => write!(f, "{}", s),
            Term::Number(n) => write!(f, "{}", n),
            Term::Empty => write!(f, "()"),
            Term::Pair(h, t) => write!(f, "({} . {})", h, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_round_trips_to_cons_chain() {
        let l = Term::list(vec![Term::number(1), Term::number(2), Term::number(3)]);
        assert_eq!(
            l,
            Term::cons(
                Term::number(1),
                Term::cons(Term::number(2), Term::cons(Term::number(3), Term::Empty))
            )
        );
    }

    #[test]
    fn ground_detection() {
        assert!(Term::list(vec![Term::number(1), Term::atom("a")]).is_ground());
        assert!(!Term::list(vec![Term::number(1), Term::var(0)]).is_ground());
    }
}
