use std::collections::BTreeSet;

use proptest::prelude::*;
use searchlab::{
    local_search::{BeamSearch, HillClimbing, LocalSearch},
    problems::{scramble, ExplicitGraph, SlidingPuzzle},
    rng::RandomNumberGenerator,
    sat::random_k_sat,
    search::{search, FrontierPolicy},
};

const POLICIES: [FrontierPolicy; 5] = [
    FrontierPolicy::BreadthFirst,
    FrontierPolicy::DepthFirst,
    FrontierPolicy::UniformCost,
    FrontierPolicy::AStar,
    FrontierPolicy::GreedyBestFirst,
];

/// A graph on `num_nodes` nodes keeping the first cost given for each
/// ordered pair. Self-loops are allowed.
fn build_graph(num_nodes: usize, edges: &[(usize, usize, f64)]) -> ExplicitGraph {
    let mut graph = ExplicitGraph::new(num_nodes);
    let mut seen = BTreeSet::new();
    for &(from, to, cost) in edges {
        let (from, to) = (from % num_nodes, to % num_nodes);
        if seen.insert((from, to)) {
            graph.add_edge(from, to, cost).unwrap();
        }
    }
    graph
}

fn reachable_from(graph: &ExplicitGraph, start: usize) -> usize {
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for &(next, _) in graph.neighbors(node) {
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    seen.len()
}

fn edge_cost(graph: &ExplicitGraph, from: usize, to: usize) -> f64 {
    graph
        .neighbors(from)
        .iter()
        .find(|(target, _)| *target == to)
        .map(|(_, cost)| *cost)
        .unwrap_or(f64::NAN)
}

fn edges_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
    (2usize..9).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0.0f64..10.0), 0..24),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_path_cost_is_sum_of_step_costs((n, edges) in edges_strategy(), goal_seed in 0usize..64) {
        let graph = build_graph(n, &edges);
        let goal = goal_seed % n;

        for policy in POLICIES {
            let outcome = search(&graph.route(0, goal), policy).unwrap();
            if let Some(solution) = outcome.solution() {
                let summed: f64 = solution
                    .states
                    .windows(2)
                    .map(|pair| edge_cost(&graph, pair[0], pair[1]))
                    .sum();
                prop_assert!((solution.path_cost - summed).abs() < 1e-9);
                prop_assert_eq!(solution.states.len(), solution.actions.len() + 1);
                prop_assert!(solution.states.windows(2).all(|pair| pair[0] != pair[1]));
                prop_assert_eq!(solution.states.first(), Some(&0));
                prop_assert_eq!(solution.goal(), Some(&goal));
            }
        }
    }

    #[test]
    fn prop_explored_bounded_by_reachable_states((n, edges) in edges_strategy(), goal_seed in 0usize..64) {
        let graph = build_graph(n, &edges);
        let reachable = reachable_from(&graph, 0);
        let goal = goal_seed % n;

        for policy in POLICIES {
            let outcome = search(&graph.route(0, goal), policy).unwrap();
            prop_assert!(outcome.stats().nodes_explored <= reachable);
            prop_assert!(outcome.stats().nodes_explored >= 1);
            if !outcome.is_found() {
                prop_assert_eq!(outcome.stats().nodes_explored, reachable);
            }
        }
    }

    #[test]
    fn prop_uniform_cost_is_cheapest_and_bfs_shortest((n, edges) in edges_strategy(), goal_seed in 0usize..64) {
        let graph = build_graph(n, &edges);
        let route = graph.route(0, goal_seed % n);

        let bfs = search(&route, FrontierPolicy::BreadthFirst).unwrap();
        let ucs = search(&route, FrontierPolicy::UniformCost).unwrap();
        prop_assert_eq!(bfs.is_found(), ucs.is_found());
        if let (Some(shortest), Some(cheapest)) = (bfs.solution(), ucs.solution()) {
            prop_assert!(cheapest.path_cost <= shortest.path_cost + 1e-9);
            prop_assert!(shortest.len() <= cheapest.len());
        }
    }

    #[test]
    fn prop_sliding_puzzle_optimal_within_scramble_depth(seed in any::<u64>(), moves in 0usize..8) {
        let solved = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let goal = scramble(solved, moves, &mut RandomNumberGenerator::from_seed(seed));
        let puzzle = SlidingPuzzle::new(solved, goal).unwrap();

        let bfs = search(&puzzle, FrontierPolicy::BreadthFirst).unwrap();
        let astar = search(&puzzle, FrontierPolicy::AStar).unwrap();
        let shortest = bfs.solution().unwrap().len();
        prop_assert!(shortest <= moves);
        prop_assert_eq!(astar.solution().unwrap().len(), shortest);
    }

    #[test]
    fn prop_beam_width_one_matches_hill_climbing(formula_seed in any::<u64>(), seed in any::<u64>()) {
        let formula = random_k_sat(10, 42, 3, &mut RandomNumberGenerator::from_seed(formula_seed)).unwrap();
        let beam = BeamSearch::new(1, 200).unwrap();
        let hc = HillClimbing::new(200, 1).unwrap();

        let from_beam = beam.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
        let from_hc = hc.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
        prop_assert_eq!(from_beam, from_hc);
    }

    #[test]
    fn prop_local_search_is_deterministic(formula_seed in any::<u64>(), seed in any::<u64>()) {
        let formula = random_k_sat(12, 50, 3, &mut RandomNumberGenerator::from_seed(formula_seed)).unwrap();
        let hc = HillClimbing::new(100, 3).unwrap().with_clause_weighting(true);

        let a = hc.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
        let b = hc.solve(&formula, &mut RandomNumberGenerator::from_seed(seed));
        prop_assert_eq!(a.objective, formula.unsatisfied_count(&a.assignment));
        prop_assert_eq!(a, b);
    }
}
