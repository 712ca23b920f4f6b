//! Search nodes and the arena that owns them.
//!
//! Nodes refer to their parent by index into the arena instead of by pointer.
//! A node is only created after its parent, so the parent links form a forest
//! and the whole graph is released when the arena is dropped at the end of a
//! run. Iterative deepening instead uses the arena as a path stack and
//! truncates it on backtracking.

/// Index of a node inside its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A state together with the bookkeeping needed to rebuild the path to it.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    pub state: S,
    /// The node this one was generated from; `None` for the root.
    pub parent: Option<NodeId>,
    /// The move taken from the parent; `None` for the root.
    pub action: Option<A>,
    /// Accumulated cost from the root (g).
    pub path_cost: f64,
    /// Estimated remaining cost (h), computed once at creation.
    pub heuristic: f64,
    /// Number of ancestors.
    pub depth: usize,
}

impl<S, A> SearchNode<S, A> {
    pub fn root(state: S, heuristic: f64) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            path_cost: 0.0,
            heuristic,
            depth: 0,
        }
    }

    /// g + h.
    pub fn estimated_total(&self) -> f64 {
        self.path_cost + self.heuristic
    }
}

/// Storage for the nodes of one search run.
#[derive(Debug)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Stores `node` and returns its id.
    pub fn insert(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Creates a child of `parent` reached through `action`.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        state: S,
        action: A,
        step_cost: f64,
        heuristic: f64,
    ) -> NodeId {
        let (path_cost, depth) = {
            let p = &self.nodes[parent.0];
            (p.path_cost + step_cost, p.depth + 1)
        };
        self.insert(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            path_cost,
            heuristic,
            depth,
        })
    }

    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node. Ids handed out before become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Drops every node created at or after position `len`. Ids at or past
    /// `len` become invalid and are handed out again by later inserts.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

impl<S: Clone, A: Clone> NodeArena<S, A> {
    /// Walks parent links from `id` back to the root and returns the states
    /// and moves in root-to-`id` order.
    pub fn path_to(&self, id: NodeId) -> (Vec<S>, Vec<A>) {
        let mut states = Vec::with_capacity(self.get(id).depth + 1);
        let mut actions = Vec::with_capacity(self.get(id).depth);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current);
            states.push(node.state.clone());
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            cursor = node.parent;
        }
        states.reverse();
        actions.reverse();
        (states, actions)
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
