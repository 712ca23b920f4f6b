use std::collections::HashSet;

use tracing::{debug, info, trace};

use super::frontier::{FifoFrontier, Frontier, FrontierPolicy, LifoFrontier, PriorityFrontier};
use super::node::{NodeArena, NodeId, SearchNode};
use super::problem::{SearchProblem, Successor};
use super::solution::{SearchOutcome, SearchStats, Solution};
use crate::error::{Result, SearchError};

/// Configuration of a search run.
///
/// ## Example
///
/// ```rust
/// use searchlab::search::{FrontierPolicy, SearchOptions};
///
/// let options = SearchOptions::new(FrontierPolicy::AStar).with_max_expansions(10_000);
/// assert_eq!(options.max_expansions(), Some(10_000));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    policy: FrontierPolicy,
    /// Stop with `NotFound` once this many states have been explored.
    max_expansions: Option<usize>,
    /// Largest depth limit iterative deepening tries.
    max_depth: Option<usize>,
}

impl SearchOptions {
    pub fn new(policy: FrontierPolicy) -> Self {
        Self {
            policy,
            max_expansions: None,
            max_depth: None,
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn policy(&self) -> FrontierPolicy {
        self.policy
    }

    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    fn validate(&self) -> Result<()> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::Configuration(
                "Expansion budget must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(FrontierPolicy::BreadthFirst)
    }
}

/// Runs graph searches over any [`SearchProblem`].
///
/// The engine keeps no state between runs; every call owns its frontier,
/// visited set, and node arena.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    options: SearchOptions,
}

enum DepthLimited {
    Found(NodeId),
    /// Some node sat exactly on the limit, so a deeper limit may help.
    Cutoff,
    /// The whole tree above the limit was explored.
    Exhausted,
    BudgetSpent,
}

/// A node on the current depth-first path and its successors not yet entered.
struct Frame<S, A> {
    node: NodeId,
    untried: std::vec::IntoIter<Successor<S, A>>,
}

impl SearchEngine {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Searches `problem` with the configured frontier policy.
    ///
    /// Returns `Ok(SearchOutcome::NotFound)` when the reachable state space is
    /// exhausted (or the expansion budget is spent) without reaching a goal.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedInput`] if the problem produces a
    /// negative or non-finite step cost, or a negative or non-finite
    /// heuristic value under an informed policy, and
    /// [`SearchError::Configuration`] for a zero expansion budget.
    pub fn search<P: SearchProblem>(
        &self,
        problem: &P,
    ) -> Result<SearchOutcome<P::State, P::Action>> {
        self.options.validate()?;
        match self.options.policy {
            FrontierPolicy::BreadthFirst => self.run(problem, FifoFrontier::new()),
            FrontierPolicy::DepthFirst => self.run(problem, LifoFrontier::new()),
            FrontierPolicy::UniformCost
            | FrontierPolicy::AStar
            | FrontierPolicy::GreedyBestFirst => self.run(problem, PriorityFrontier::new()),
        }
    }

    fn run<P, F>(&self, problem: &P, mut frontier: F) -> Result<SearchOutcome<P::State, P::Action>>
    where
        P: SearchProblem,
        F: Frontier,
    {
        let policy = self.options.policy;
        let informed = policy.is_informed();
        let mut arena: NodeArena<P::State, P::Action> = NodeArena::new();
        let mut visited: HashSet<P::State> = HashSet::new();
        let mut stats = SearchStats::default();

        let start = problem.initial_state();
        let h = if informed {
            checked_heuristic(problem, &start)?
        } else {
            0.0
        };
        let root = arena.insert(SearchNode::root(start, h));
        frontier.push(root, policy.priority(0.0, h));
        stats.observe_frontier(frontier.len());
        debug!(?policy, "Starting search");

        loop {
            if self.budget_spent(&stats) {
                debug!(explored = stats.nodes_explored, "Expansion budget spent");
                return Ok(SearchOutcome::NotFound(stats));
            }
            let Some(id) = frontier.pop() else {
                break;
            };

            if visited.contains(&arena.get(id).state) {
                stats.duplicates_pruned += 1;
                continue;
            }
            visited.insert(arena.get(id).state.clone());
            stats.nodes_explored += 1;

            let node = arena.get(id);
            trace!(
                depth = node.depth,
                g = node.path_cost,
                h = node.heuristic,
                "Expanding {:?}",
                node.state
            );

            if problem.is_goal(&node.state) {
                let path_cost = node.path_cost;
                let (states, actions) = arena.path_to(id);
                info!(
                    moves = actions.len(),
                    path_cost,
                    explored = stats.nodes_explored,
                    max_frontier = stats.max_frontier_size,
                    "Goal reached"
                );
                return Ok(SearchOutcome::Found(Solution {
                    states,
                    actions,
                    path_cost,
                    stats,
                }));
            }

            let successors = problem.successors(&node.state);
            for successor in successors {
                check_step_cost(&successor)?;
                let h = if informed {
                    checked_heuristic(problem, &successor.state)?
                } else {
                    0.0
                };
                let child = arena.insert_child(
                    id,
                    successor.state,
                    successor.action,
                    successor.cost,
                    h,
                );
                let child_node = arena.get(child);
                frontier.push(child, policy.priority(child_node.path_cost, h));
                stats.nodes_generated += 1;
            }
            stats.observe_frontier(frontier.len());
        }

        debug!(
            explored = stats.nodes_explored,
            max_frontier = stats.max_frontier_size,
            "Frontier exhausted without reaching a goal"
        );
        Ok(SearchOutcome::NotFound(stats))
    }

    /// Iterative deepening: depth-limited depth-first tree searches with
    /// limits 0, 1, 2, ... until one reaches a goal.
    ///
    /// A node whose depth equals the limit is goal-tested but not expanded.
    /// The first solution found is one of the shallowest. Statistics add up
    /// over all iterations, and `depth_limit` reports the limit of the last one.
    ///
    /// The run ends with `NotFound` when an iteration finishes without touching
    /// the limit (the space is exhausted), when the limit would exceed
    /// [`SearchOptions::max_depth`], or when the expansion budget is spent.
    /// Without a `max_depth`, a space with cycles and no reachable goal never
    /// terminates.
    ///
    /// Only the current path and the untried successors along it are kept, so
    /// memory grows with depth rather than with the size of the tree.
    ///
    /// # Errors
    ///
    /// Same as [`SearchEngine::search`] for step costs and configuration.
    pub fn iterative_deepening<P: SearchProblem>(
        &self,
        problem: &P,
    ) -> Result<SearchOutcome<P::State, P::Action>> {
        self.options.validate()?;
        let mut stats = SearchStats::default();
        let mut arena: NodeArena<P::State, P::Action> = NodeArena::new();
        let mut limit = 0;

        loop {
            if let Some(max_depth) = self.options.max_depth {
                if limit > max_depth {
                    debug!(max_depth, "Depth limit exceeded");
                    return Ok(SearchOutcome::NotFound(stats));
                }
            }
            stats.depth_limit = Some(limit);
            debug!(limit, "Exploring depth limit");
            arena.clear();

            match self.depth_limited(problem, limit, &mut arena, &mut stats)? {
                DepthLimited::Found(id) => {
                    let path_cost = arena.get(id).path_cost;
                    let (states, actions) = arena.path_to(id);
                    info!(
                        moves = actions.len(),
                        limit,
                        explored = stats.nodes_explored,
                        "Goal reached"
                    );
                    return Ok(SearchOutcome::Found(Solution {
                        states,
                        actions,
                        path_cost,
                        stats,
                    }));
                }
                DepthLimited::Cutoff => limit += 1,
                DepthLimited::Exhausted | DepthLimited::BudgetSpent => {
                    return Ok(SearchOutcome::NotFound(stats));
                }
            }
        }
    }

    /// One depth-bounded pass. The arena holds only the current path and each
    /// frame holds the successors of a path node still to be tried, so memory
    /// stays proportional to depth times branching factor.
    fn depth_limited<P: SearchProblem>(
        &self,
        problem: &P,
        limit: usize,
        arena: &mut NodeArena<P::State, P::Action>,
        stats: &mut SearchStats,
    ) -> Result<DepthLimited> {
        let mut frames: Vec<Frame<P::State, P::Action>> = Vec::new();
        let mut pending = 0;
        let mut cutoff = false;
        let mut entering = Some(arena.insert(SearchNode::root(problem.initial_state(), 0.0)));
        stats.observe_frontier(1);

        loop {
            if let Some(id) = entering.take() {
                if self.budget_spent(stats) {
                    return Ok(DepthLimited::BudgetSpent);
                }
                stats.nodes_explored += 1;

                let node = arena.get(id);
                if problem.is_goal(&node.state) {
                    return Ok(DepthLimited::Found(id));
                }
                if node.depth >= limit {
                    cutoff = true;
                    arena.truncate(id.index());
                } else {
                    let successors = problem.successors(&node.state);
                    for successor in &successors {
                        check_step_cost(successor)?;
                    }
                    stats.nodes_generated += successors.len();
                    pending += successors.len();
                    stats.observe_frontier(pending);
                    frames.push(Frame {
                        node: id,
                        untried: successors.into_iter(),
                    });
                }
            }

            let frame = match frames.last_mut() {
                Some(frame) => frame,
                None => break,
            };
            match frame.untried.next() {
                Some(successor) => {
                    pending -= 1;
                    entering = Some(arena.insert_child(
                        frame.node,
                        successor.state,
                        successor.action,
                        successor.cost,
                        0.0,
                    ));
                }
                None => {
                    let finished = frame.node;
                    frames.pop();
                    arena.truncate(finished.index());
                }
            }
        }

        Ok(if cutoff {
            DepthLimited::Cutoff
        } else {
            DepthLimited::Exhausted
        })
    }

    fn budget_spent(&self, stats: &SearchStats) -> bool {
        self.options
            .max_expansions
            .is_some_and(|limit| stats.nodes_explored >= limit)
    }
}

/// Searches `problem` under `policy` with no budget.
///
/// Shorthand for `SearchEngine::new(SearchOptions::new(policy)).search(problem)`.
pub fn search<P: SearchProblem>(
    problem: &P,
    policy: FrontierPolicy,
) -> Result<SearchOutcome<P::State, P::Action>> {
    SearchEngine::new(SearchOptions::new(policy)).search(problem)
}

/// Iterative deepening with no depth or expansion bound.
pub fn iterative_deepening<P: SearchProblem>(
    problem: &P,
) -> Result<SearchOutcome<P::State, P::Action>> {
    SearchEngine::default().iterative_deepening(problem)
}

fn check_step_cost<S, A: std::fmt::Debug>(successor: &Successor<S, A>) -> Result<()> {
    if successor.cost.is_finite() && successor.cost >= 0.0 {
        Ok(())
    } else {
        Err(SearchError::MalformedInput(format!(
            "Step cost {} for move {:?} must be finite and non-negative",
            successor.cost, successor.action
        )))
    }
}

fn checked_heuristic<P: SearchProblem>(problem: &P, state: &P::State) -> Result<f64> {
    let h = problem.heuristic(state);
    if h.is_finite() && h >= 0.0 {
        Ok(h)
    } else {
        Err(SearchError::MalformedInput(format!(
            "Heuristic {} for state {:?} must be finite and non-negative",
            h, state
        )))
    }
}
