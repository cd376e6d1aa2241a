//! Tarjan's strongly-connected-components algorithm over the subgoal
//! caller/callee dependency graph, used to find cycles that must be
//! resolved by fixpoint iteration rather than straight-line evaluation.

use crate::tabling::SubgoalId;
use std::collections::HashMap;

struct TarjanState {
    index_counter: usize,
    stack: Vec<SubgoalId>,
    on_stack: HashMap<SubgoalId, bool>,
    index: HashMap<SubgoalId, usize>,
    lowlink: HashMap<SubgoalId, usize>,
    sccs: Vec<Vec<SubgoalId>>,
}

pub fn tarjan_scc(
    nodes: &[SubgoalId],
    edges: &HashMap<SubgoalId, std::collections::HashSet<SubgoalId>>,
) -> Vec<Vec<SubgoalId>> {
    let mut state = TarjanState {
        index_counter: 0,
        stack: Vec::new(),
        on_stack: HashMap::new(),
        index: HashMap::new(),
        lowlink: HashMap::new(),
        sccs: Vec::new(),
    };

    for &node in nodes {
        if !state.index.contains_key(&node) {
            strong_connect(node, nodes, edges, &mut state);
        }
    }

    state.sccs
}

fn strong_connect(
    v: SubgoalId,
    nodes: &[SubgoalId],
    edges: &HashMap<SubgoalId, std::collections::HashSet<SubgoalId>>,
    state: &mut TarjanState,
) {
    state.index.insert(v, state.index_counter);
    state.lowlink.insert(v, state.index_counter);
    state.index_counter += 1;
    state.stack.push(v);
    state.on_stack.insert(v, true);

    if let Some(successors) = edges.get(&v) {
        for &w in successors {
            if !nodes.contains(&w) {
                continue;
            }
            if !state.index.contains_key(&w) {
                strong_connect(w, nodes, edges, state);
                let w_low = state.lowlink[&w];
                let v_low = state.lowlink[&v];
                state.lowlink.insert(v, v_low.min(w_low));
            } else if *state.on_stack.get(&w).unwrap_or(&false) {
                let w_index = state.index[&w];
                let v_low = state.lowlink[&v];
                state.lowlink.insert(v, v_low.min(w_index));
            }
        }
    }

    if state.lowlink[&v] == state.index[&v] {
        let mut component = Vec::new();
        loop {
            let w = state.stack.pop().unwrap();
            state.on_stack.insert(w, false);
            component.push(w);
            if w == v {
                break;
            }
        }
        state.sccs.push(component);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_set(pairs: &[(SubgoalId, SubgoalId)]) -> HashMap<SubgoalId, std::collections::HashSet<SubgoalId>> {
        let mut edges: HashMap<SubgoalId, std::collections::HashSet<SubgoalId>> = HashMap::new();
        for &(from, to) in pairs {
            edges.entry(from).or_default().insert(to);
        }
        edges
    }

    #[test]
    fn acyclic_graph_yields_singleton_components() {
        let nodes = vec![1, 2, 3];
        let edges = edge_set(&[(1, 2), (2, 3)]);
        let sccs = tarjan_scc(&nodes, &edges);
        assert_eq!(sccs.len(), 3);
        assert!(sccs.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn mutual_recursion_forms_one_component() {
        let nodes = vec![1, 2, 3];
        let edges = edge_set(&[(1, 2), (2, 1), (2, 3)]);
        let sccs = tarjan_scc(&nodes, &edges);
        let cyclic = sccs.iter().find(|c| c.len() > 1).expect("a cycle exists");
        assert_eq!(cyclic.len(), 2);
        assert!(cyclic.contains(&1));
        assert!(cyclic.contains(&2));
    }
}
