use crate::error::{Result, SearchError};
use crate::search::{SearchProblem, Successor};

/// A directed graph with weighted edges, stored as adjacency lists.
///
/// Nodes are `0..num_nodes`. Edges leave a node in insertion order, which is
/// the order the search sees them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplicitGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl ExplicitGraph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a directed edge.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] for an unknown endpoint or a
    /// negative or non-finite cost.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) -> Result<()> {
        for node in [from, to] {
            if node >= self.num_nodes() {
                return Err(SearchError::MalformedInput(format!(
                    "Node {} does not exist in a graph of {} nodes",
                    node,
                    self.num_nodes()
                )));
            }
        }
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(SearchError::MalformedInput(format!(
                "Edge cost {} must be finite and non-negative",
                cost
            )));
        }
        self.adjacency[from].push((to, cost));
        Ok(())
    }

    /// Adds an edge in both directions.
    ///
    /// # Errors
    ///
    /// Same as [`ExplicitGraph::add_edge`].
    pub fn add_undirected_edge(&mut self, a: usize, b: usize, cost: f64) -> Result<()> {
        self.add_edge(a, b, cost)?;
        self.add_edge(b, a, cost)
    }

    /// Outgoing `(target, cost)` pairs of `node`.
    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A route-finding problem on this graph.
    pub fn route(&self, start: usize, goal: usize) -> Route<'_> {
        Route {
            graph: self,
            start,
            goal,
            estimates: None,
        }
    }
}

/// Find a path between two nodes of an [`ExplicitGraph`].
///
/// Actions are the nodes moved to.
#[derive(Debug, Clone)]
pub struct Route<'g> {
    graph: &'g ExplicitGraph,
    start: usize,
    goal: usize,
    estimates: Option<Vec<f64>>,
}

impl Route<'_> {
    /// Per-node estimates of the remaining cost, for informed policies.
    /// Nodes beyond the end of `estimates` get 0.
    pub fn with_estimates(mut self, estimates: Vec<f64>) -> Self {
        self.estimates = Some(estimates);
        self
    }
}

impl SearchProblem for Route<'_> {
    type State = usize;
    type Action = usize;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, node: &usize) -> bool {
        *node == self.goal
    }

    fn successors(&self, node: &usize) -> Vec<Successor<usize, usize>> {
        self.graph
            .neighbors(*node)
            .iter()
            .map(|&(to, cost)| Successor::new(to, to, cost))
            .collect()
    }

    fn heuristic(&self, node: &usize) -> f64 {
        self.estimates
            .as_ref()
            .and_then(|e| e.get(*node).copied())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{search, FrontierPolicy};

    /// A -> {B, C}, B -> {D, E}, C -> {F}, E -> {F}.
    fn tree() -> ExplicitGraph {
        let mut graph = ExplicitGraph::new(6);
        for (from, to) in [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (4, 5)] {
            graph.add_edge(from, to, 1.0).unwrap();
        }
        graph
    }

    #[test]
    fn test_breadth_first_route() {
        let graph = tree();
        let outcome = search(&graph.route(0, 5), FrontierPolicy::BreadthFirst).unwrap();
        assert_eq!(outcome.solution().unwrap().states, vec![0, 2, 5]);
    }

    #[test]
    fn test_uniform_cost_prefers_cheap_detour() {
        let mut graph = ExplicitGraph::new(3);
        graph.add_edge(0, 2, 10.0).unwrap();
        graph.add_edge(0, 1, 1.0).unwrap();
        graph.add_edge(1, 2, 1.0).unwrap();

        let bfs = search(&graph.route(0, 2), FrontierPolicy::BreadthFirst).unwrap();
        assert_eq!(bfs.solution().unwrap().path_cost, 10.0);

        let ucs = search(&graph.route(0, 2), FrontierPolicy::UniformCost).unwrap();
        let solution = ucs.solution().unwrap();
        assert_eq!(solution.states, vec![0, 1, 2]);
        assert_eq!(solution.path_cost, 2.0);
    }

    #[test]
    fn test_estimates_feed_the_heuristic() {
        let graph = tree();
        let route = graph.route(0, 5).with_estimates(vec![2.0, 2.0, 1.0]);
        assert_eq!(route.heuristic(&2), 1.0);
        assert_eq!(route.heuristic(&5), 0.0);

        let outcome = search(&route, FrontierPolicy::AStar).unwrap();
        assert_eq!(outcome.solution().unwrap().path_cost, 2.0);
    }

    #[test]
    fn test_unreachable_goal() {
        let graph = tree();
        let outcome = search(&graph.route(5, 0), FrontierPolicy::DepthFirst).unwrap();
        assert!(!outcome.is_found());
        assert_eq!(outcome.stats().nodes_explored, 1);
    }

    #[test]
    fn test_add_edge_validation() {
        let mut graph = ExplicitGraph::new(2);
        assert!(graph.add_edge(0, 2, 1.0).is_err());
        assert!(graph.add_edge(0, 1, -1.0).is_err());
        assert!(matches!(
            graph.add_edge(0, 1, f64::INFINITY),
            Err(SearchError::MalformedInput(_))
        ));
        graph.add_undirected_edge(0, 1, 3.0).unwrap();
        assert_eq!(graph.neighbors(1), &[(0, 3.0)]);
        assert!(graph.neighbors(7).is_empty());
    }
}
