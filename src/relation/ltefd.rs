//! Less-than-or-equal finite-domain constraint (bounds-consistent).
use crate::engine::Engine;
use crate::goal::Goal;
use crate::lterm::{LTerm, LTermInner};
use crate::solver::{Solve, Solver};
use crate::state::{Constraint, FiniteDomain, SResult, State};
use crate::stream::Stream;
use crate::user::User;
use std::rc::Rc;

#[derive(Debug)]
pub struct LessThanOrEqualFdConstraint<U, E>
where
    U: User,
    E: Engine<U>,
{
    u: LTerm<U, E>,
    v: LTerm<U, E>,
}

impl<U, E> LessThanOrEqualFdConstraint<U, E>
where
    U: User,
    E: Engine<U>,
{
    pub fn new(u: LTerm<U, E>, v: LTerm<U, E>) -> Rc<dyn Constraint<U, E>> {
        assert!(u.is_var() || u.is_number());
        assert!(v.is_var() || v.is_number());
        Rc::new(LessThanOrEqualFdConstraint { u, v })
    }
}

impl<U, E> Constraint<U, E> for LessThanOrEqualFdConstraint<U, E>
where
    U: User,
    E: Engine<U>,
{
    fn run(self: Rc<Self>, state: State<U, E>) -> SResult<U, E> {
        let smap = state.get_smap();
        let dstore = state.get_dstore();

        let uwalk = smap.walk(&self.u);
        let maybe_udomain = dstore.get(uwalk);

        let vwalk = smap.walk(&self.v);
        let maybe_vdomain = dstore.get(vwalk);

        match (maybe_udomain, maybe_vdomain) {
            (Some(udomain), Some(vdomain)) => {
                // u <= v: min(u) bounds v from below, max(v) bounds u from above.
                let vmax = vdomain.max();
                let umin = udomain.min();
                Ok(state
                    .process_domain(
                        uwalk,
                        Rc::new(udomain.copy_before(|u| vmax < *u).ok_or(())?),
                    )?
                    .process_domain(
                        vwalk,
                        Rc::new(vdomain.drop_before(|v| umin <= *v).ok_or(())?),
                    )?
                    .with_constraint(self))
            }
            (Some(udomain), None) if vwalk.is_number() => {
                let v = vwalk.get_number().unwrap();
                state.process_domain(uwalk, Rc::new(udomain.copy_before(|u| v < *u).ok_or(())?))
            }
            (None, Some(vdomain)) if uwalk.is_number() => {
                let u = uwalk.get_number().unwrap();
                state.process_domain(vwalk, Rc::new(vdomain.drop_before(|v| u <= *v).ok_or(())?))
            }
            (None, None) if uwalk.is_number() && vwalk.is_number() => {
                let u = uwalk.get_number().unwrap();
                let v = vwalk.get_number().unwrap();
                if u <= v {
                    Ok(state)
                } else {
                    Err(())
                }
            }
            _ => Ok(state.with_constraint(self)),
        }
    }

    fn operands(&self) -> Vec<LTerm<U, E>> {
        vec![self.u.clone(), self.v.clone()]
    }
}

impl<U, E> std::fmt::Display for LessThanOrEqualFdConstraint<U, E>
where
    U: User,
    E: Engine<U>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ltefd({:?}, {:?})", self.u, self.v)
    }
}

#[derive(Derivative)]
#[derivative(Debug(bound = "U: User"))]
pub struct LessThanOrEqualFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    u: LTerm<U, E>,
    v: LTerm<U, E>,
}

impl<U, E> LessThanOrEqualFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    pub fn new(u: LTerm<U, E>, v: LTerm<U, E>) -> Goal<U, E> {
        Goal::new(LessThanOrEqualFd { u, v })
    }
}

impl<U, E> Solve<U, E> for LessThanOrEqualFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    fn solve(&self, _solver: &Solver<U, E>, state: State<U, E>) -> Stream<U, E> {
        let c = LessThanOrEqualFdConstraint::new(self.u.clone(), self.v.clone());
        match c.run(state) {
            Ok(state) => Stream::unit(Box::new(state)),
            Err(_) => Stream::empty(),
        }
    }
}

/// `u <= v` over finite domains.
pub fn ltefd<U, E>(u: LTerm<U, E>, v: LTerm<U, E>) -> Goal<U, E>
where
    U: User,
    E: Engine<U>,
{
    LessThanOrEqualFd::new(u, v)
}

#[cfg(test)]
mod tests {
    use super::ltefd;
    use crate::prelude::*;
    use crate::relation::infd::{infd, infdrange};

    #[test]
    fn test_ltefd_1() {
        let query = proto_vulcan_query!(|q| {
            infdrange(q, #&(0..=10)),
            ltefd(q, 5),
        });
        let mut iter = query.run();
        for expected in 0..=5 {
            assert_eq!(iter.next().unwrap().q, expected);
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_ltefd_4() {
        let query = proto_vulcan_query!(|q| {
            |x, y| {
                q == [x, y],
                infd(x, #&[1, 2, 3]),
                infd(y, #&[0, 1, 2, 3, 4]),
                ltefd(x, y),
            }
        });
        let iter = query.run();
        let mut expected = vec![
            lterm!([1, 1]),
            lterm!([1, 2]),
            lterm!([1, 3]),
            lterm!([1, 4]),
            lterm!([2, 2]),
            lterm!([2, 3]),
            lterm!([2, 4]),
            lterm!([3, 3]),
            lterm!([3, 4]),
        ];
        iter.for_each(|r| {
            let n = r.q.clone();
            assert!(expected.contains(&n));
            expected.retain(|y| &n != y);
        });
        assert_eq!(expected.len(), 0);
    }
}
