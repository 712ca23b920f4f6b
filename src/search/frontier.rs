//! Frontier implementations, one per ordering policy.
//!
//! Frontiers hold [`NodeId`]s; the nodes themselves live in the run's arena.
//! Every frontier is stable: entries that compare equal under its ordering
//! leave in insertion order (FIFO and priority) or reverse insertion order
//! (LIFO, by definition).

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use super::node::NodeId;

/// Order in which discovered nodes are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrontierPolicy {
    /// First in, first out: breadth-first search.
    BreadthFirst,
    /// Last in, first out: depth-first search.
    DepthFirst,
    /// Lowest path cost first.
    UniformCost,
    /// Lowest path cost plus heuristic first.
    AStar,
    /// Lowest heuristic first, ignoring path cost.
    GreedyBestFirst,
}

impl FrontierPolicy {
    /// Whether nodes need a heuristic value.
    pub fn is_informed(self) -> bool {
        matches!(self, FrontierPolicy::AStar | FrontierPolicy::GreedyBestFirst)
    }

    /// The priority key of a node under this policy. Lower is expanded first.
    /// FIFO and LIFO frontiers ignore it.
    pub fn priority(self, path_cost: f64, heuristic: f64) -> f64 {
        match self {
            FrontierPolicy::BreadthFirst | FrontierPolicy::DepthFirst => 0.0,
            FrontierPolicy::UniformCost => path_cost,
            FrontierPolicy::AStar => path_cost + heuristic,
            FrontierPolicy::GreedyBestFirst => heuristic,
        }
    }
}

/// An ordered multiset of node ids.
pub trait Frontier {
    /// Adds a node. `priority` is ignored by unordered frontiers.
    fn push(&mut self, node: NodeId, priority: f64);

    /// Removes the next node to expand.
    fn pop(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Queue frontier for breadth-first search.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: NodeId, _priority: f64) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Stack frontier for depth-first search.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<NodeId>,
}

impl LifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LifoFrontier {
    fn push(&mut self, node: NodeId, _priority: f64) {
        self.stack.push(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Heap entry ordered by `(priority, sequence)`.
///
/// `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
/// lowest priority first; the insertion sequence breaks ties.
#[derive(Debug)]
struct PriorityEntry {
    priority: f64,
    sequence: u64,
    node: NodeId,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Min-priority frontier used by uniform-cost, A*, and greedy best-first search.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<PriorityEntry>>,
    next_sequence: u64,
}

impl PriorityFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: NodeId, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(PriorityEntry {
            priority,
            sequence,
            node,
        }));
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(entry)| entry.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
