//! `AllDifferent`: arc-consistency via Régin's algorithm — maximum bipartite
//! matching between variables and values, then pruning edges that lie
//! outside every maximum matching (found via SCCs of the matching's
//! residual graph). Grounded on the propagator descriptions in the
//! Munchkin/`huub` CP solver sources (`other_examples/`).

use crate::domain::Domain;
use crate::fd::model::{Model, VarId};
use crate::fd::propagate::PropagationOutcome;
use crate::fd::state::{SolverState, StateHandle};
use crate::fd::PropagationConstraint;
use std::collections::HashMap;

#[derive(Debug)]
pub struct AllDifferent {
    vars: Vec<VarId>,
}

impl AllDifferent {
    pub fn new(vars: Vec<VarId>) -> Self {
        AllDifferent { vars }
    }
}

impl PropagationConstraint for AllDifferent {
    fn name(&self) -> &'static str {
        "all_different"
    }

    fn scope(&self) -> Vec<VarId> {
        self.vars.clone()
    }

    fn propagate(&self, model: &Model, state: &StateHandle) -> PropagationOutcome {
        let n = self.vars.len();
        let domains: Vec<Domain> = self
            .vars
            .iter()
            .map(|&v| SolverState::get_domain(state, model, v))
            .collect();

        // Value universe: all values appearing in any domain, indexed densely.
        let max_value = domains.iter().filter_map(|d| d.max()).max().unwrap_or(0);
        if max_value == 0 {
            return PropagationOutcome::NoChange;
        }
        let mut value_index: HashMap<i64, usize> = HashMap::new();
        for d in &domains {
            for v in d.iter() {
                let next = value_index.len();
                value_index.entry(v).or_insert(next);
            }
        }
        let m = value_index.len();
        let value_of: Vec<i64> = {
            let mut vs: Vec<(i64, usize)> = value_index.iter().map(|(k, v)| (*k, *v)).collect();
            vs.sort_by_key(|(_, idx)| *idx);
            vs.into_iter().map(|(k, _)| k).collect()
        };

        let adj: Vec<Vec<usize>> = domains
            .iter()
            .map(|d| d.iter().map(|v| value_index[&v]).collect())
            .collect();

        // Kuhn's algorithm: maximum bipartite matching, var -> value.
        let mut match_var = vec![None; n]; // var -> value idx
        let mut match_val = vec![None; m]; // value idx -> var
        for start in 0..n {
            let mut visited = vec![false; m];
            if !try_augment(start, &adj, &mut visited, &mut match_var, &mut match_val) {
                return PropagationOutcome::Failed;
            }
        }

        // Residual graph for consistency checking (Régin):
        // matched edge (x -> v_idx): direction v_idx -> x
        // unmatched edge (x -> v_idx): direction x -> v_idx
        // free value nodes act as sinks: edge v_idx -> SINK for unmatched values.
        let sink = n + m;
        let num_nodes = n + m + 1;
        let mut graph = vec![Vec::new(); num_nodes];
        for x in 0..n {
            for &v_idx in &adj[x] {
                if match_var[x] == Some(v_idx) {
                    graph[n + v_idx].push(x);
                } else {
                    graph[x].push(n + v_idx);
                }
            }
        }
        for v_idx in 0..m {
            if match_val[v_idx].is_none() {
                graph[n + v_idx].push(sink);
                graph[sink].push(n + v_idx);
            }
        }

        let sccs = tarjan_scc(&graph);
        let scc_of: Vec<usize> = {
            let mut out = vec![0; num_nodes];
            for (i, comp) in sccs.iter().enumerate() {
                for &node in comp {
                    out[node] = i;
                }
            }
            out
        };
        // Nodes reachable forward from `sink` are consistent endpoints too
        // (they can serve as the start of an augmenting alternation).
        let reachable_from_sink = bfs_reachable(&graph, sink);

        let mut current = state.clone();
        for (x, &var_id) in self.vars.iter().enumerate() {
            let mut new_dom = domains[x].clone();
            for &v_idx in &adj[x] {
                let is_matched = match_var[x] == Some(v_idx);
                let same_scc = scc_of[x] == scc_of[n + v_idx];
                let via_sink = reachable_from_sink.contains(&(n + v_idx))
                    && reachable_from_sink.contains(&x);
                if !is_matched && !same_scc && !via_sink {
                    new_dom = new_dom.remove(value_of[v_idx]);
                }
            }
            if !new_dom.equal(&domains[x]) {
                current = SolverState::set_domain(&current, model, var_id, new_dom);
            }
        }

        if SolverState::changed_since(&current, state).is_empty() {
            PropagationOutcome::NoChange
        } else {
            PropagationOutcome::Narrowed(current)
        }
    }
}

fn try_augment(
    x: usize,
    adj: &[Vec<usize>],
    visited: &mut [bool],
    match_var: &mut [Option<usize>],
    match_val: &mut [Option<usize>],
) -> bool {
    for &v_idx in &adj[x] {
        if visited[v_idx] {
            continue;
        }
        visited[v_idx] = true;
        if match_val[v_idx].is_none()
            || try_augment(match_val[v_idx].unwrap(), adj, visited, match_var, match_val)
        {
            match_var[x] = Some(v_idx);
            match_val[v_idx] = Some(x);
            return true;
        }
    }
    false
}

fn bfs_reachable(graph: &[Vec<usize>], start: usize) -> std::collections::HashSet<usize> {
    let mut seen = std::collections::HashSet::new();
    let mut queue = std::collections::VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        for &next in &graph[node] {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Minimal Tarjan SCC over an adjacency list, used here purely for
/// Régin-edge pruning. The tabling/SLG engine's SCC detection
/// (`tabling`/`slg`) operates over a different node type and is kept
/// separate rather than sharing this helper, since unifying them would
/// require a generic graph abstraction neither corpus member uses.
fn tarjan_scc(graph: &[Vec<usize>]) -> Vec<Vec<usize>> {
    struct Tarjan<'g> {
        graph: &'g [Vec<usize>],
        index_counter: usize,
        indices: Vec<Option<usize>>,
        low_links: Vec<usize>,
        on_stack: Vec<bool>,
        stack: Vec<usize>,
        result: Vec<Vec<usize>>,
    }
    impl<'g> Tarjan<'g> {
        fn visit(&mut self, v: usize) {
            self.indices[v] = Some(self.index_counter);
            self.low_links[v] = self.index_counter;
            self.index_counter += 1;
            self.stack.push(v);
            self.on_stack[v] = true;

            for &w in &self.graph[v] {
                if self.indices[w].is_none() {
                    self.visit(w);
                    self.low_links[v] = self.low_links[v].min(self.low_links[w]);
                } else if self.on_stack[w] {
                    self.low_links[v] = self.low_links[v].min(self.indices[w].unwrap());
                }
            }

            if self.low_links[v] == self.indices[v].unwrap() {
                let mut comp = Vec::new();
                loop {
                    let w = self.stack.pop().unwrap();
                    self.on_stack[w] = false;
                    comp.push(w);
                    if w == v {
                        break;
                    }
                }
                self.result.push(comp);
            }
        }
    }
    let n = graph.len();
    let mut t = Tarjan {
        graph,
        index_counter: 0,
        indices: vec![None; n],
        low_links: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        result: Vec::new(),
    };
    for v in 0..n {
        if t.indices[v].is_none() {
            t.visit(v);
        }
    }
    t.result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fd::model::ModelBuilder;
    use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
    use std::sync::Arc;

    #[test]
    fn three_vars_three_values_permutations() {
        let mut b = ModelBuilder::new();
        let vars: Vec<_> = (0..3).map(|_| b.new_var_full(3)).collect();
        b.post(Arc::new(AllDifferent::new(vars))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(_) => {}
            FixpointOutcome::Inconsistent => panic!("expected consistency"),
        }
    }

    #[test]
    fn pigeonhole_fails() {
        let mut b = ModelBuilder::new();
        let vars: Vec<_> = (0..3).map(|_| b.new_var_full(2)).collect();
        b.post(Arc::new(AllDifferent::new(vars))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Inconsistent => {}
            FixpointOutcome::Consistent(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn singleton_prunes_sibling() {
        use crate::domain::Domain;
        let mut b = ModelBuilder::new();
        let x = b.new_var(Domain::singleton(1, 3), None);
        let y = b.new_var_full(3);
        b.post(Arc::new(AllDifferent::new(vec![x, y]))).unwrap();
        let model = b.build();
        match run_to_fixpoint(&model, SolverState::root()) {
            FixpointOutcome::Consistent(s) => {
                assert!(!SolverState::get_domain(&s, &model, y).has(1));
            }
            FixpointOutcome::Inconsistent => panic!("expected consistency"),
        }
    }
}
