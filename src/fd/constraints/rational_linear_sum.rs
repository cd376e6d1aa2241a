//! `RationalLinearSum`: `sum((num_i/den_i) * x_i) = total` for rational
//! coefficients. Scales every coefficient by the LCM of all denominators
//! and delegates to `LinearSum`; the result is recovered in native units
//! via an auxiliary `ScaledDivision` when the LCM scale is not 1.

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::StateHandle;
use crate::fd::constraints::linear_sum::LinearSum;
use crate::fd::constraints::scaled_division::ScaledDivision;
use crate::fd::PropagationConstraint;

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        0
    } else {
        (a / gcd(a, b)) * b
    }
}

/// A rational coefficient `numerator / denominator`.
#[derive(Debug, Clone, Copy)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "RationalLinearSum denominator must be non-zero");
        Rational {
            numerator,
            denominator,
        }
    }
}

/// `sum(coeffs[i] * vars[i]) = total`, where `coeffs` are rationals.
///
/// Built by scaling every term to a common integer denominator (the LCM
/// of all `coeffs[i].denominator` and `scale_total.denominator`) and
/// delegating to `LinearSum`; `total` is linked to the internal scaled
/// total via `ScaledDivision` when the LCM scale differs from 1.
#[derive(Debug)]
pub struct RationalLinearSum {
    inner_sum: LinearSum,
    inner_division: Option<ScaledDivision>,
}

impl RationalLinearSum {
    /// `vars[i] * coeffs[i]` summed equals `total * total_coeff`
    /// (`total_coeff` lets the total itself carry a rational scale, e.g.
    /// averaging). `scaled_total` is the auxiliary internal variable that
    /// carries the LCM-scaled sum; the caller creates it in the `Model`
    /// with a sufficiently large domain and wires it here.
    pub fn new(
        vars: Vec<VarId>,
        coeffs: Vec<Rational>,
        total: VarId,
        total_coeff: Rational,
        scaled_total: VarId,
    ) -> Self {
        assert_eq!(vars.len(), coeffs.len());
        let lcm_scale = coeffs
            .iter()
            .map(|c| c.denominator)
            .chain(std::iter::once(total_coeff.denominator))
            .fold(1i64, lcm);

        let int_coeffs: Vec<i64> = coeffs
            .iter()
            .map(|c| c.numerator * (lcm_scale / c.denominator))
            .collect();
        let total_scale = total_coeff.numerator * (lcm_scale / total_coeff.denominator);

        if total_scale == 1 {
            RationalLinearSum {
                inner_sum: LinearSum::new(vars, int_coeffs, total),
                inner_division: None,
            }
        } else {
            RationalLinearSum {
                inner_sum: LinearSum::new(vars, int_coeffs, scaled_total),
                inner_division: Some(ScaledDivision::new(scaled_total, total_scale, total)),
            }
        }
    }
}

impl PropagationConstraint for RationalLinearSum {
    fn name(&self) -> &'static str {
        "rational_linear_sum"
    }

    fn scope(&self) -> Vec<VarId> {
        let mut s = self.inner_sum.scope();
        if let Some(div) = &self.inner_division {
            s.extend(div.scope());
        }
        s
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        match self.inner_sum.propagate(model, state) {
            PropagationOutcome::Failed => PropagationOutcome::Failed,
            PropagationOutcome::NoChange => match &self.inner_division {
                Some(div) => div.propagate(model, state),
                None => PropagationOutcome::NoChange,
            },
            PropagationOutcome::Narrowed(next) => match &self.inner_division {
                Some(div) => match div.propagate(model, &next) {
                    PropagationOutcome::Failed => PropagationOutcome::Failed,
                    PropagationOutcome::NoChange => PropagationOutcome::Narrowed(next),
                    PropagationOutcome::Narrowed(next2) => PropagationOutcome::Narrowed(next2),
                },
                None => PropagationOutcome::Narrowed(next),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use crate::fd::state::SolverState;
    use std::sync::Arc;

    #[test]
    fn half_coefficients_scale_to_integers() {
        // (1/2)x + (1/2)y = total, x,y in {1..4}, total fixed to 3 => x+y == 6.
        let mut b = ModelBuilder::new();
        let x = b.new_var_full(4);
        let y = b.new_var_full(4);
        let total = b.new_var(Domain::singleton(3, 10), None);
        let scaled_total = b.new_var_full(20);
        b.post(Arc::new(RationalLinearSum::new(
            vec![x, y],
            vec![Rational::new(1, 2), Rational::new(1, 2)],
            total,
            Rational::new(1, 1),
            scaled_total,
        )))
        .unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                let dx = SolverState::get_domain(&s, &model, x);
                let dy = SolverState::get_domain(&s, &model, y);
                assert_eq!(dx.min().unwrap() + dy.max().unwrap(), 6);
            }
            FixpointOutcome::Inconsistent => panic!(),
        }
    }
}
