use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// One transition produced by a successor function.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    /// The state reached by taking `action`.
    pub state: S,
    /// The move that leads from the expanded state to `state`.
    pub action: A,
    /// Non-negative, finite step cost.
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }

    /// A transition with unit cost.
    pub fn unit(state: S, action: A) -> Self {
        Self::new(state, action, 1.0)
    }
}

/// A state space the search engine can explore.
///
/// Implementors describe where the search starts, which states are goals, and
/// how to move between states. The engine never mutates a state; it only
/// clones, hashes, and compares them.
pub trait SearchProblem {
    /// One configuration of the problem. Equal states are treated as the same
    /// vertex of the search graph.
    type State: Clone + Eq + Hash + Debug;
    /// The label of a transition between two states.
    type Action: Clone + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal condition.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// All transitions leaving `state`, in a deterministic order.
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Estimated remaining cost from `state` to the nearest goal.
    ///
    /// Only informed policies consult it. Optimality of uniform-cost and A*
    /// results requires it to never overestimate; the engine does not check
    /// that.
    fn heuristic(&self, _state: &Self::State) -> f64 {
        0.0
    }
}

/// A [`SearchProblem`] assembled from closures.
///
/// ```rust
/// use searchlab::search::{search, FnProblem, FrontierPolicy, Successor};
///
/// // Count up from 0 to 5 in steps of 1 or 2.
/// let problem = FnProblem::new(
///     0u32,
///     |n: &u32| *n == 5,
///     |n: &u32| {
///         (1..=2)
///             .filter(|step| n + step <= 5)
///             .map(|step| Successor::unit(n + step, step))
///             .collect()
///     },
/// );
///
/// let outcome = search(&problem, FrontierPolicy::BreadthFirst).unwrap();
/// assert_eq!(outcome.solution().unwrap().len(), 3);
/// ```
pub struct FnProblem<S, A, G, E, H = fn(&S) -> f64> {
    start: S,
    is_goal: G,
    expand: E,
    heuristic: Option<H>,
    _marker: PhantomData<fn() -> A>,
}

impl<S, A, G, E> FnProblem<S, A, G, E>
where
    G: Fn(&S) -> bool,
    E: Fn(&S) -> Vec<Successor<S, A>>,
{
    pub fn new(start: S, is_goal: G, expand: E) -> Self {
        Self {
            start,
            is_goal,
            expand,
            heuristic: None,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, E, H> FnProblem<S, A, G, E, H> {
    /// Attaches a heuristic for informed policies.
    pub fn with_heuristic<H2>(self, heuristic: H2) -> FnProblem<S, A, G, E, H2>
    where
        H2: Fn(&S) -> f64,
    {
        FnProblem {
            start: self.start,
            is_goal: self.is_goal,
            expand: self.expand,
            heuristic: Some(heuristic),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, E, H> SearchProblem for FnProblem<S, A, G, E, H>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
    G: Fn(&S) -> bool,
    E: Fn(&S) -> Vec<Successor<S, A>>,
    H: Fn(&S) -> f64,
{
    type State = S;
    type Action = A;

    fn initial_state(&self) -> S {
        self.start.clone()
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.is_goal)(state)
    }

    fn successors(&self, state: &S) -> Vec<Successor<S, A>> {
        (self.expand)(state)
    }

    fn heuristic(&self, state: &S) -> f64 {
        self.heuristic.as_ref().map_or(0.0, |h| h(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(limit: i32) -> impl Fn(&i32) -> Vec<Successor<i32, i32>> {
        move |n: &i32| {
            [-1, 1]
                .into_iter()
                .filter(|d| (0..=limit).contains(&(n + d)))
                .map(|d| Successor::unit(n + d, d))
                .collect()
        }
    }

    #[test]
    fn test_fn_problem_delegates_to_closures() {
        let problem = FnProblem::new(2, |n: &i32| *n == 4, line(4));

        assert_eq!(problem.initial_state(), 2);
        assert!(problem.is_goal(&4));
        assert!(!problem.is_goal(&3));
        assert_eq!(problem.successors(&0).len(), 1);
        assert_eq!(problem.successors(&2).len(), 2);
        assert_eq!(problem.heuristic(&0), 0.0);
    }

    #[test]
    fn test_with_heuristic() {
        let problem =
            FnProblem::new(0, |n: &i32| *n == 4, line(4)).with_heuristic(|n: &i32| (4 - n) as f64);

        assert_eq!(problem.heuristic(&1), 3.0);
        assert_eq!(problem.heuristic(&4), 0.0);
    }

    #[test]
    fn test_successor_unit_cost() {
        let s = Successor::unit("b", 'x');
        assert_eq!(s.cost, 1.0);
        assert_eq!(s.state, "b");
        assert_eq!(s.action, 'x');
    }
}
