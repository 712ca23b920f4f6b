/// Counters collected during one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// States removed from the frontier and expanded (or goal-tested) for the
    /// first time. Duplicates discarded at removal do not count.
    pub nodes_explored: usize,
    /// Child nodes created by expansion.
    pub nodes_generated: usize,
    /// Frontier entries discarded because their state was already expanded.
    pub duplicates_pruned: usize,
    /// Largest frontier size observed.
    pub max_frontier_size: usize,
    /// Depth limit in force when an iterative-deepening run ended.
    pub depth_limit: Option<usize>,
}

impl SearchStats {
    pub(crate) fn observe_frontier(&mut self, size: usize) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }
}

/// A path from the initial state to a goal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<S, A> {
    /// States from the initial state to the goal, both included.
    pub states: Vec<S>,
    /// Moves between consecutive states; one shorter than `states`.
    pub actions: Vec<A>,
    /// Accumulated cost of the goal node.
    pub path_cost: f64,
    pub stats: SearchStats,
}

impl<S, A> Solution<S, A> {
    /// Number of moves in the path.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the initial state was already a goal.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The goal state at the end of the path.
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }
}

/// Result of a search run that did not fail on malformed input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome<S, A> {
    /// A goal was reached.
    Found(Solution<S, A>),
    /// The frontier emptied, or a budget ran out, before a goal was reached.
    NotFound(SearchStats),
}

impl<S, A> SearchOutcome<S, A> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn solution(&self) -> Option<&Solution<S, A>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::NotFound(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution<S, A>> {
        match self {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::NotFound(_) => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found(solution) => &solution.stats,
            SearchOutcome::NotFound(stats) => stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let stats = SearchStats {
            nodes_explored: 4,
            ..SearchStats::default()
        };
        let found: SearchOutcome<u8, char> = SearchOutcome::Found(Solution {
            states: vec![1, 2],
            actions: vec!['a'],
            path_cost: 1.0,
            stats,
        });
        assert!(found.is_found());
        assert_eq!(found.stats().nodes_explored, 4);
        assert_eq!(found.solution().map(Solution::len), Some(1));
        assert_eq!(found.solution().and_then(Solution::goal), Some(&2));

        let missing: SearchOutcome<u8, char> = SearchOutcome::NotFound(stats);
        assert!(!missing.is_found());
        assert!(missing.into_solution().is_none());
    }

    #[test]
    fn test_observe_frontier_keeps_maximum() {
        let mut stats = SearchStats::default();
        stats.observe_frontier(3);
        stats.observe_frontier(1);
        assert_eq!(stats.max_frontier_size, 3);
    }
}
