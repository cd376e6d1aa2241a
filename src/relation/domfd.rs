//! Constrains a variable (or each variable of a list) to a finite domain.
use crate::engine::Engine;
use crate::goal::Goal;
use crate::lterm::LTerm;
use crate::operator::all::All;
use crate::solver::{Solve, Solver};
use crate::state::{FiniteDomain, State};
use crate::stream::Stream;
use crate::user::User;
use std::rc::Rc;

#[derive(Derivative)]
#[derivative(Debug(bound = "U: User"))]
pub struct DomFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    x: LTerm<U, E>,
    domain: Rc<FiniteDomain>,
}

impl<U, E> DomFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    pub fn new(x: LTerm<U, E>, domain: FiniteDomain) -> Goal<U, E> {
        Goal::new(DomFd {
            x,
            domain: Rc::new(domain),
        })
    }
}

impl<U, E> Solve<U, E> for DomFd<U, E>
where
    U: User,
    E: Engine<U>,
{
    fn solve(&self, _solver: &Solver<U, E>, state: State<U, E>) -> Stream<U, E> {
        let xwalk = state.smap_ref().walk(&self.x).clone();
        match state.process_domain(&xwalk, Rc::clone(&self.domain)) {
            Ok(state) => Stream::unit(Box::new(state)),
            Err(_) => Stream::empty(),
        }
    }
}

/// Associates the same domain with `u`, or with every element of `u` if it is a list.
pub fn domfd<U, E>(u: LTerm<U, E>, domain: FiniteDomain) -> Goal<U, E>
where
    U: User,
    E: Engine<U>,
{
    if u.is_var() {
        DomFd::new(u, domain)
    } else if u.is_list() {
        let goals = u
            .iter()
            .map(|v| DomFd::new(v.clone(), domain.clone()))
            .collect();
        All::from_vec(goals)
    } else {
        unimplemented!("domfd target must be a variable or a list of variables")
    }
}
