//! Backtracking search over a `Model` (C9, SPEC_FULL §4.7): sequential
//! depth-first search with pluggable variable/value heuristics, plus a
//! parallel worker pool for the same search driven by a hand-rolled
//! `std::thread` pool rather than a task-stealing crate.
//!
//! `fd::state::StateHandle` is an `Rc`-linked spine and therefore not
//! `Send`; it cannot be handed from one thread to another directly. Each
//! parallel worker instead receives a small `Send`-safe work item (a
//! partial assignment: a list of `(VarId, value)` fixed choices) and
//! rebuilds its own local spine from the shared, `Arc`-wrapped `Model`,
//! matching the "`Rc` correct for per-worker spines, `Arc` for the shared
//! model" split the rest of this module follows.

use crate::domain::Domain;
use crate::fd::model::{Model, ValueHeuristic, VarId, VariableHeuristic};
use crate::fd::propagate::{run_to_fixpoint, FixpointOutcome};
use crate::fd::state::{SolverState, StateHandle};
use rand::seq::SliceRandom;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment(Vec<i64>);

impl Assignment {
    pub fn get(&self, var: VarId) -> i64 {
        self.0[var]
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Objective {
    pub var: VarId,
    pub minimize: bool,
}

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    pub time_limit: Option<Duration>,
    pub node_limit: Option<u64>,
    pub target_objective: Option<i64>,
    pub parallel_workers: usize,
    pub variable_heuristic: VariableHeuristic,
    pub value_heuristic: ValueHeuristic,
    pub random_seed: u64,
}

impl Default for OptimizeOptions {
    fn default() -> OptimizeOptions {
        OptimizeOptions {
            time_limit: None,
            node_limit: None,
            target_objective: None,
            parallel_workers: 1,
            variable_heuristic: VariableHeuristic::FirstUnbound,
            value_heuristic: ValueHeuristic::Ascending,
            random_seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizeOutcome {
    /// Search exhausted and `Assignment` is provably best for `Objective`.
    Optimal(Assignment, i64),
    /// A limit (time/nodes/cancellation) was hit with at least one solution found.
    Feasible(Assignment, i64),
    /// Search exhausted with no solution.
    Infeasible,
    /// A limit was hit before any solution was found.
    Cancelled,
}

/// Enumerate every solution to `model` via sequential depth-first search.
pub fn solve(model: &Model) -> Vec<Assignment> {
    let mut solutions = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(model.config.random_seed);
    if let FixpointOutcome::Consistent(root) = run_to_fixpoint(model, SolverState::root()) {
        dfs(model, root, None, &mut rng, &mut solutions, usize::MAX);
    }
    solutions
}

/// As `solve`, but stops early once `limit` solutions have been found and
/// observes `cancel` at every branch point, returning whatever was
/// collected so far.
pub fn solve_cancellable(
    model: &Model,
    cancel: &AtomicBool,
    limit: usize,
) -> Vec<Assignment> {
    let mut solutions = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(model.config.random_seed);
    if let FixpointOutcome::Consistent(root) = run_to_fixpoint(model, SolverState::root()) {
        dfs(model, root, Some(cancel), &mut rng, &mut solutions, limit);
    }
    solutions
}

/// Drive `model`'s search across `options.parallel_workers` OS threads,
/// collecting solutions from all of them. With one worker this reduces to
/// `solve`.
pub fn solve_parallel(
    model: Arc<Model>,
    num_workers: usize,
    cancel: Arc<AtomicBool>,
) -> mpsc::Receiver<Assignment> {
    let (tx, rx) = mpsc::channel();
    let num_workers = num_workers.max(1);

    let injector: Arc<Mutex<VecDeque<Vec<(VarId, i64)>>>> =
        Arc::new(Mutex::new(seed_work_items(&model)));

    for worker_id in 0..num_workers {
        let model = model.clone();
        let injector = injector.clone();
        let cancel = cancel.clone();
        let tx = tx.clone();
        thread::spawn(move || worker_loop(model, injector, cancel, tx, worker_id));
    }

    rx
}

fn worker_loop(
    model: Arc<Model>,
    injector: Arc<Mutex<VecDeque<Vec<(VarId, i64)>>>>,
    cancel: Arc<AtomicBool>,
    tx: mpsc::Sender<Assignment>,
    worker_id: usize,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(model.config.random_seed ^ (worker_id as u64));
    loop {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let item = {
            let mut guard = injector.lock().unwrap();
            guard.pop_front()
        };
        let fixed = match item {
            Some(fixed) => fixed,
            None => return,
        };

        let root = match apply_fixed(&model, &fixed) {
            Some(state) => state,
            None => continue,
        };

        let mut solutions = Vec::new();
        dfs(&model, root, Some(&cancel), &mut rng, &mut solutions, usize::MAX);
        for solution in solutions {
            if tx.send(solution).is_err() {
                return;
            }
        }
    }
}

fn apply_fixed(model: &Model, fixed: &[(VarId, i64)]) -> Option<StateHandle> {
    let mut state = match run_to_fixpoint(model, SolverState::root()) {
        FixpointOutcome::Consistent(s) => s,
        FixpointOutcome::Inconsistent => return None,
    };
    for &(var, value) in fixed {
        let max_value = model.initial_domain(var).max_value();
        let narrowed = SolverState::set_domain(&state, model, var, Domain::singleton(value, max_value));
        state = match run_to_fixpoint(model, narrowed) {
            FixpointOutcome::Consistent(s) => s,
            FixpointOutcome::Inconsistent => return None,
        };
    }
    Some(state)
}

/// Splits the root once on its first branching variable so parallel
/// workers have independent starting points without sharing a spine.
fn seed_work_items(model: &Model) -> VecDeque<Vec<(VarId, i64)>> {
    let mut items = VecDeque::new();
    let root = match run_to_fixpoint(model, SolverState::root()) {
        FixpointOutcome::Consistent(s) => s,
        FixpointOutcome::Inconsistent => return items,
    };
    if SolverState::is_complete(&root, model) {
        items.push_back(Vec::new());
        return items;
    }
    let var = match pick_variable(model, &root, model.config.variable_heuristic) {
        Some(v) => v,
        None => return items,
    };
    let domain = SolverState::get_domain(&root, model, var);
    for value in domain.iter() {
        items.push_back(vec![(var, value)]);
    }
    items
}

fn dfs(
    model: &Model,
    state: StateHandle,
    cancel: Option<&AtomicBool>,
    rng: &mut ChaCha8Rng,
    solutions: &mut Vec<Assignment>,
    limit: usize,
) {
    if solutions.len() >= limit {
        return;
    }
    if let Some(c) = cancel {
        if c.load(Ordering::Relaxed) {
            return;
        }
    }
    if SolverState::is_failed(&state, model) {
        return;
    }
    if SolverState::is_complete(&state, model) {
        solutions.push(extract_assignment(model, &state));
        return;
    }

    let var = match pick_variable(model, &state, model.config.variable_heuristic) {
        Some(v) => v,
        None => return,
    };
    let domain = SolverState::get_domain(&state, model, var);
    let max_value = domain.max_value();
    let values = ordered_values(&domain, model.config.value_heuristic, rng, true);

    for value in values {
        let narrowed = SolverState::set_domain(&state, model, var, Domain::singleton(value, max_value));
        if let FixpointOutcome::Consistent(next) = run_to_fixpoint(model, narrowed) {
            dfs(model, next, cancel, rng, solutions, limit);
        }
        if solutions.len() >= limit {
            return;
        }
        if let Some(c) = cancel {
            if c.load(Ordering::Relaxed) {
                return;
            }
        }
    }
}

fn pick_variable(model: &Model, state: &StateHandle, heuristic: VariableHeuristic) -> Option<VarId> {
    let unbound: Vec<VarId> = (0..model.num_variables())
        .filter(|&v| !SolverState::get_domain(state, model, v).is_singleton())
        .collect();
    if unbound.is_empty() {
        return None;
    }
    match heuristic {
        VariableHeuristic::FirstUnbound => unbound.first().copied(),
        VariableHeuristic::MinDomain => unbound
            .into_iter()
            .min_by_key(|&v| SolverState::get_domain(state, model, v).count()),
        VariableHeuristic::DomDeg => unbound.into_iter().min_by(|&a, &b| {
            let score = |v: VarId| {
                let degree = model.dependents(v).len().max(1);
                SolverState::get_domain(state, model, v).count() as f64 / degree as f64
            };
            score(a)
                .partial_cmp(&score(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        // No impact-tracking infrastructure is maintained across nodes;
        // approximated by domain size, same as MinDomain.
        VariableHeuristic::Impact => unbound
            .into_iter()
            .min_by_key(|&v| SolverState::get_domain(state, model, v).count()),
    }
}

fn ordered_values(
    domain: &Domain,
    heuristic: ValueHeuristic,
    rng: &mut ChaCha8Rng,
    minimize: bool,
) -> Vec<i64> {
    let mut values: Vec<i64> = domain.iter().collect();
    match heuristic {
        ValueHeuristic::Ascending => {}
        ValueHeuristic::Descending => values.reverse(),
        ValueHeuristic::ObjectiveImproving => {
            if !minimize {
                values.reverse();
            }
        }
        ValueHeuristic::RandomSeeded => values.shuffle(rng),
    }
    values
}

fn extract_assignment(model: &Model, state: &StateHandle) -> Assignment {
    let values = (0..model.num_variables())
        .map(|v| {
            SolverState::get_domain(state, model, v)
                .singleton_value()
                .expect("complete state has singleton domains")
        })
        .collect();
    Assignment(values)
}

/// Branch-and-bound optimization over `objective`. Dispatches to sequential
/// or parallel search depending on `options.parallel_workers`; takes `model`
/// behind an `Arc` unconditionally (rather than panicking when handed a bare
/// `&Model` under a parallel configuration) since that is the one handle
/// type valid for both paths.
pub fn solve_optimal(model: Arc<Model>, objective: Objective, options: OptimizeOptions) -> OptimizeOutcome {
    solve_optimal_arc(model, objective, options)
}

fn solve_optimal_sequential(model: &Model, objective: Objective, options: OptimizeOptions) -> OptimizeOutcome {
    let deadline = options.time_limit.map(|d| Instant::now() + d);
    let mut rng = ChaCha8Rng::seed_from_u64(options.random_seed);
    let mut best: Option<(Assignment, i64)> = None;
    let mut nodes = 0u64;
    let mut hit_limit = false;

    if let FixpointOutcome::Consistent(root) = run_to_fixpoint(model, SolverState::root()) {
        bound_dfs(
            model,
            root,
            objective,
            &options,
            deadline,
            &mut rng,
            &mut best,
            &mut nodes,
            &mut hit_limit,
        );
    }

    match (best, hit_limit) {
        (Some((assignment, value)), false) => OptimizeOutcome::Optimal(assignment, value),
        (Some((assignment, value)), true) => OptimizeOutcome::Feasible(assignment, value),
        (None, true) => OptimizeOutcome::Cancelled,
        (None, false) => OptimizeOutcome::Infeasible,
    }
}

/// Parallel-or-sequential branch-and-bound optimization for callers that
/// already hold `model` behind an `Arc` (as the shared, immutable-after-build
/// handle the rest of the search layer expects).
pub fn solve_optimal_arc(model: Arc<Model>, objective: Objective, options: OptimizeOptions) -> OptimizeOutcome {
    if options.parallel_workers <= 1 {
        return solve_optimal_sequential(&model, objective, options);
    }
    solve_optimal_parallel(model, objective, options)
}

fn solve_optimal_parallel(model: Arc<Model>, objective: Objective, options: OptimizeOptions) -> OptimizeOutcome {
    let cancel = Arc::new(AtomicBool::new(false));
    let best_bound = Arc::new(AtomicIsize::new(if objective.minimize {
        isize::MAX
    } else {
        isize::MIN
    }));
    let (tx, rx) = mpsc::channel::<(Assignment, i64)>();
    let deadline = options.time_limit.map(|d| Instant::now() + d);

    let injector: Arc<Mutex<VecDeque<Vec<(VarId, i64)>>>> =
        Arc::new(Mutex::new(seed_work_items(&model)));

    let mut handles = Vec::new();
    for worker_id in 0..options.parallel_workers.max(1) {
        let model = model.clone();
        let injector = injector.clone();
        let cancel = cancel.clone();
        let best_bound = best_bound.clone();
        let tx = tx.clone();
        let options = options.clone();
        handles.push(thread::spawn(move || {
            let mut rng = ChaCha8Rng::seed_from_u64(options.random_seed ^ (worker_id as u64));
            loop {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        cancel.store(true, Ordering::Relaxed);
                        return;
                    }
                }
                let item = injector.lock().unwrap().pop_front();
                let fixed = match item {
                    Some(fixed) => fixed,
                    None => return,
                };
                if let Some(root) = apply_fixed(&model, &fixed) {
                    let mut nodes = 0u64;
                    let mut hit_limit = false;
                    let mut local_best = None;
                    let mut local_options = options.clone();
                    local_options.parallel_workers = 1;
                    bound_dfs(
                        &model,
                        root,
                        objective,
                        &local_options,
                        deadline,
                        &mut rng,
                        &mut local_best,
                        &mut nodes,
                        &mut hit_limit,
                    );
                    if let Some((assignment, value)) = local_best {
                        update_best_bound(&best_bound, value, objective.minimize);
                        let _ = tx.send((assignment, value));
                    }
                    if hit_limit {
                        cancel.store(true, Ordering::Relaxed);
                    }
                }
            }
        }));
    }
    drop(tx);

    let mut best: Option<(Assignment, i64)> = None;
    for (assignment, value) in rx {
        let better = match &best {
            None => true,
            Some((_, current)) => {
                if objective.minimize {
                    value < *current
                } else {
                    value > *current
                }
            }
        };
        if better {
            best = Some((assignment, value));
        }
    }
    for handle in handles {
        let _ = handle.join();
    }

    let was_cancelled = cancel.load(Ordering::Relaxed);
    match (best, was_cancelled) {
        (Some((assignment, value)), false) => OptimizeOutcome::Optimal(assignment, value),
        (Some((assignment, value)), true) => OptimizeOutcome::Feasible(assignment, value),
        (None, true) => OptimizeOutcome::Cancelled,
        (None, false) => OptimizeOutcome::Infeasible,
    }
}

fn update_best_bound(cell: &AtomicIsize, value: i64, minimize: bool) {
    let value = value as isize;
    loop {
        let current = cell.load(Ordering::SeqCst);
        let improves = if minimize { value < current } else { value > current };
        if !improves {
            return;
        }
        if cell
            .compare_exchange(current, value, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn bound_dfs(
    model: &Model,
    state: StateHandle,
    objective: Objective,
    options: &OptimizeOptions,
    deadline: Option<Instant>,
    rng: &mut ChaCha8Rng,
    best: &mut Option<(Assignment, i64)>,
    nodes: &mut u64,
    hit_limit: &mut bool,
) {
    if let Some(limit) = options.node_limit {
        if *nodes >= limit {
            *hit_limit = true;
            return;
        }
    }
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            *hit_limit = true;
            return;
        }
    }
    *nodes += 1;

    if SolverState::is_failed(&state, model) {
        return;
    }

    let objective_domain = SolverState::get_domain(&state, model, objective.var);
    if let Some((_, best_value)) = best {
        let bound = if objective.minimize {
            objective_domain.min()
        } else {
            objective_domain.max()
        };
        if let Some(bound) = bound {
            let cannot_improve = if objective.minimize {
                bound >= *best_value
            } else {
                bound <= *best_value
            };
            if cannot_improve {
                return;
            }
        }
    }

    if SolverState::is_complete(&state, model) {
        let assignment = extract_assignment(model, &state);
        let value = assignment.get(objective.var);
        let improves = match best {
            None => true,
            Some((_, current)) => {
                if objective.minimize {
                    value < *current
                } else {
                    value > *current
                }
            }
        };
        if improves {
            *best = Some((assignment, value));
        }
        if let Some(target) = options.target_objective {
            if value == target {
                *hit_limit = true;
            }
        }
        return;
    }

    let var = match pick_variable(model, &state, options.variable_heuristic) {
        Some(v) => v,
        None => return,
    };
    let domain = SolverState::get_domain(&state, model, var);
    let max_value = domain.max_value();
    let values = ordered_values(&domain, options.value_heuristic, rng, objective.minimize);

    for value in values {
        let narrowed = SolverState::set_domain(&state, model, var, Domain::singleton(value, max_value));
        if let FixpointOutcome::Consistent(next) = run_to_fixpoint(model, narrowed) {
            bound_dfs(model, next, objective, options, deadline, rng, best, nodes, hit_limit);
        }
        if *hit_limit {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fd::constraints::all_different::AllDifferent;
    use crate::fd::model::ModelBuilder;

    fn four_queens_model() -> Model {
        let mut b = ModelBuilder::new();
        let vars: Vec<VarId> = (0..4).map(|_| b.new_var_full(4)).collect();
        b.post(Arc::new(AllDifferent::new(vars.clone()))).unwrap();
        b.build()
    }

    #[test]
    fn all_different_over_four_values_has_twenty_four_permutations() {
        let model = four_queens_model();
        let solutions = solve(&model);
        assert_eq!(solutions.len(), 24);
        for solution in &solutions {
            let mut values = solution.values().to_vec();
            values.sort_unstable();
            assert_eq!(values, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn solve_cancellable_stops_at_limit() {
        let model = four_queens_model();
        let cancel = AtomicBool::new(false);
        let solutions = solve_cancellable(&model, &cancel, 3);
        assert_eq!(solutions.len(), 3);
    }

    #[test]
    fn optimize_minimizes_the_objective_variable() {
        let mut b = ModelBuilder::new();
        let vars: Vec<VarId> = (0..3).map(|_| b.new_var_full(3)).collect();
        b.post(Arc::new(AllDifferent::new(vars.clone()))).unwrap();
        let model = b.build();
        let outcome = solve_optimal(
            Arc::new(model),
            Objective {
                var: vars[0],
                minimize: true,
            },
            OptimizeOptions::default(),
        );
        match outcome {
            OptimizeOutcome::Optimal(assignment, value) => {
                assert_eq!(value, 1);
                assert_eq!(assignment.get(vars[0]), 1);
            }
            other => panic!("expected optimal outcome, got {:?}", other),
        }
    }

    #[test]
    fn parallel_solve_finds_the_same_solution_count() {
        let model = Arc::new(four_queens_model());
        let cancel = Arc::new(AtomicBool::new(false));
        let rx = solve_parallel(model, 4, cancel);
        let solutions: Vec<Assignment> = rx.iter().collect();
        assert_eq!(solutions.len(), 24);
    }
}
