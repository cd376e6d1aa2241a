//! `Diffn(X[], Y[], W[], H[])`: pairwise non-overlapping rectangles.
//! Modeled as, for every pair, a disjunction of four inequalities (left-of,
//! right-of, below, above); each pair independently fails only when every
//! one of the four could no longer hold, in which case this propagator
//! reports inconsistency rather than searching the disjunction itself
//! (full disjunctive case-splitting is left to search, matching the
//! bounds-consistency level `Inequality` already provides pairwise).

use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;

#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: VarId,
    pub y: VarId,
    pub w: i64,
    pub h: i64,
}

#[derive(Debug)]
pub struct Diffn {
    rects: Vec<Rect>,
}

impl Diffn {
    pub fn new(rects: Vec<Rect>) -> Self {
        Diffn { rects }
    }

    /// Whether rectangles `a` (at domains `ax`,`ay`) and `b` could still
    /// avoid overlap under at least one of the four disjuncts.
    fn can_still_separate(
        a: &Rect,
        ax: i64,
        ay: i64,
        b: &Rect,
        bx: i64,
        by: i64,
    ) -> bool {
        ax + a.w <= bx || bx + b.w <= ax || ay + a.h <= by || by + b.h <= ay
    }
}

impl PropagationConstraint for Diffn {
    fn name(&self) -> &'static str {
        "diffn"
    }

    fn scope(&self) -> Vec<VarId> {
        self.rects.iter().flat_map(|r| vec![r.x, r.y]).collect()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        // Only a singleton-position check is performed here: once both
        // rectangles in a pair are pinned, verify they don't overlap.
        // Bound narrowing for the non-singleton case is left to the
        // `Inequality`/search layer, consistent with this constraint's
        // documented (reduced) consistency level.
        for i in 0..self.rects.len() {
            for j in (i + 1)..self.rects.len() {
                let a = &self.rects[i];
                let b = &self.rects[j];
                let ax = SolverState::get_domain(state, model, a.x);
                let ay = SolverState::get_domain(state, model, a.y);
                let bx = SolverState::get_domain(state, model, b.x);
                let by = SolverState::get_domain(state, model, b.y);
                if let (Some(ax), Some(ay), Some(bx), Some(by)) =
                    (ax.singleton_value(), ay.singleton_value(), bx.singleton_value(), by.singleton_value())
                {
                    if !Self::can_still_separate(a, ax, ay, b, bx, by) {
                        return PropagationOutcome::Failed;
                    }
                }
            }
        }
        PropagationOutcome::NoChange
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::Domain;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn pinned_overlap_fails() {
        let mut b = ModelBuilder::new();
        let x0 = b.new_var(Domain::singleton(1, 5), None);
        let y0 = b.new_var(Domain::singleton(1, 5), None);
        let x1 = b.new_var(Domain::singleton(1, 5), None);
        let y1 = b.new_var(Domain::singleton(1, 5), None);
        let rects = vec![
            Rect { x: x0, y: y0, w: 2, h: 2 },
            Rect { x: x1, y: y1, w: 2, h: 2 },
        ];
        b.post(Arc::new(Diffn::new(rects))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("expected overlap failure"),
        }
    }
}
