//! `infd`/`infdrange`: associate a finite domain with one or more variables.
use crate::engine::Engine;
use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::relation::domfd::domfd;
use crate::state::FiniteDomain;
use crate::user::User;
use std::ops::RangeInclusive;

/// Associates the same domain, given as an explicit list of values, with `u`.
pub fn infd<U, E>(u: LTerm<U, E>, domain: &[isize]) -> Goal<U, E>
where
    U: User,
    E: Engine<U>,
{
    domfd(u, FiniteDomain::from(domain.to_vec()))
}

/// Associates the same domain, given as an inclusive range, with `u`.
pub fn infdrange<U, E>(u: LTerm<U, E>, domain: &RangeInclusive<isize>) -> Goal<U, E>
where
    U: User,
    E: Engine<U>,
{
    domfd(u, FiniteDomain::from(domain.clone()))
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::relation::infd::{infd, infdrange};

    #[test]
    fn test_infd_1() {
        let query = proto_vulcan_query!(|q| {
            |x, y| {
                q == [x, y],
                infd([x, y], #&[1]),
            }
        });
        let mut iter = query.run();
        assert_eq!(iter.next().unwrap().q, lterm!([1, 1]));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_infd_2() {
        let query = proto_vulcan_query!(|q| {
            infd(q, #&[1, 2, 3, 4]),
        });
        let mut iter = query.run();
        assert_eq!(iter.next().unwrap().q, 1);
        assert_eq!(iter.next().unwrap().q, 2);
        assert_eq!(iter.next().unwrap().q, 3);
        assert_eq!(iter.next().unwrap().q, 4);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_infd_3() {
        let query = proto_vulcan_query!(|q| {
            infd(q, #&[1, 2]),
            q != 1,
        });
        let mut iter = query.run();
        assert_eq!(iter.next().unwrap().q, 2);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_infd_5() {
        let query = proto_vulcan_query!(|x, y, z| {
            infd(x, #&[1, 2, 3]),
            infd(y, #&[3, 4, 5]),
            x == y,
            infd(z, #&[1, 3, 5, 7, 8]),
            infd(z, #&[5, 6]),
            z == 5,
        });
        let mut iter = query.run();
        let result = iter.next().unwrap();
        assert_eq!(result.x, 3);
        assert_eq!(result.y, 3);
        assert_eq!(result.z, 5);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_infd_6() {
        let query = proto_vulcan_query!(|x, y, z| {
            infd(x, #&[1, 2, 3]),
            infd(y, #&[3, 4, 5]),
            x == y,
            infd(z, #&[1, 3, 5, 7, 8]),
            infd(z, #&[5, 6]),
            z == x,
        });
        let mut iter = query.run();
        assert!(iter.next().is_none());
    }
}
