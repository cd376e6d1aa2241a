//! `LinearSum(vars, coeffs, total)`: `sum(coeffs[i] * vars[i]) = total`.
//! Bounds-consistent via sign-aware ceil/floor division for each variable's
//! admissible interval, holding the others at their extremes.

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug)]
pub struct LinearSum {
    vars: Vec<VarId>,
    coeffs: Vec<i64>,
    total: VarId,
}

impl LinearSum {
    pub fn new(vars: Vec<VarId>, coeffs: Vec<i64>, total: VarId) -> Self {
        assert_eq!(vars.len(), coeffs.len());
        LinearSum {
            vars,
            coeffs,
            total,
        }
    }

    fn bounds(domain: &Domain, coeff: i64) -> (i64, i64) {
        let (lo, hi) = (domain.min().unwrap_or(0), domain.max().unwrap_or(0));
        if coeff >= 0 {
            (lo * coeff, hi * coeff)
        } else {
            (hi * coeff, lo * coeff)
        }
    }
}

impl PropagationConstraint for LinearSum {
    fn name(&self) -> &'static str {
        "linear_sum"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.vars.clone();
        s.push(self.total);
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();
        let total_dom = SolverState::get_domain(state, model, self.total);

        if domains.iter().any(|d| d.is_empty()) || total_dom.is_empty() {
            return PropagationOutcome::Failed;
        }

        let per_var_bounds: Vec<(i64, i64)> = domains
            .iter()
            .zip(self.coeffs.iter())
            .map(|(d, c)| Self::bounds(d, *c))
            .collect();
        let sum_lo: i64 = per_var_bounds.iter().map(|(lo, _)| lo).sum();
        let sum_hi: i64 = per_var_bounds.iter().map(|(_, hi)| hi).sum();

        let new_total = total_dom.remove_below(sum_lo).remove_above(sum_hi);
        if new_total.is_empty() {
            return PropagationOutcome::Failed;
        }
        let (t_lo, t_hi) = (new_total.min().unwrap(), new_total.max().unwrap());

        let mut current = state.clone();
        if !new_total.equal(&total_dom) {
            current = SolverState::set_domain(&current, model, self.total, new_total);
        }

        for (i, &var_id) in self.vars.iter().enumerate() {
            let coeff = self.coeffs[i];
            if coeff == 0 {
                continue;
            }
            // Others' combined bound contribution excluding var i.
            let others_lo: i64 = sum_lo - per_var_bounds[i].0;
            let others_hi: i64 = sum_hi - per_var_bounds[i].1;
            // coeff * x_i must land in [t_lo - others_hi, t_hi - others_lo].
            let raw_lo = t_lo - others_hi;
            let raw_hi = t_hi - others_lo;
            let (lo_i, hi_i) = if coeff > 0 {
                (div_ceil(raw_lo, coeff), div_floor(raw_hi, coeff))
            } else {
                (div_ceil(raw_hi, coeff), div_floor(raw_lo, coeff))
            };
            let dom_i = domains[i].remove_below(lo_i).remove_above(hi_i);
            if dom_i.is_empty() {
                return PropagationOutcome::Failed;
            }
            if !dom_i.equal(&domains[i]) {
                current = SolverState::set_domain(&current, model, var_id, dom_i);
            }
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}

fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    -div_floor(-a, b)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn minimize_like_sum_narrows_total() {
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(3);
        let y = b.new_var_full(3);
        let t = b.new_var(Domain::singleton(3, 10), None);
        b.post(Arc::new(LinearSum::new(vec![x, y], vec![1, 2], t)))
            .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                // x + 2y = 3 with x,y in {1..3}: only x=1,y=1 fits.
                assert_eq!(SolverState::get_domain(&s, &model, x).singleton_value(), Some(1));
                assert_eq!(SolverState::get_domain(&s, &model, y).singleton_value(), Some(1));
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
