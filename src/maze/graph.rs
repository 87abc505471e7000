//! Explicit directed graph maze.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

use crate::maze::{Maze, NodeId};

/// A directed graph given by its edges, a start node and a set of goals.
///
/// Nodes without outgoing edges simply have no neighbors; every query is
/// answered, so the error type is [`Infallible`].
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMaze {
    start: NodeId,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    goals: HashSet<NodeId>,
}

impl AdjacencyMaze {
    /// Create an empty graph containing only `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            adjacency: HashMap::new(),
            goals: HashSet::new(),
        }
    }

    /// Build a graph from directed edges and goal nodes.
    pub fn from_edges(start: NodeId, edges: &[(NodeId, NodeId)], goals: &[NodeId]) -> Self {
        let mut maze = Self::new(start);
        for &(from, to) in edges {
            maze.add_edge(from, to);
        }
        for &goal in goals {
            maze.add_goal(goal);
        }
        maze
    }

    /// Add a directed edge. Neighbor order follows insertion order.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.adjacency.entry(from).or_default().push(to);
    }

    /// Add an edge in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId) {
        self.add_edge(a, b);
        self.add_edge(b, a);
    }

    /// Mark `node` as a goal.
    pub fn add_goal(&mut self, node: NodeId) {
        self.goals.insert(node);
    }

    pub fn with_edge(mut self, from: NodeId, to: NodeId) -> Self {
        self.add_edge(from, to);
        self
    }

    pub fn with_goal(mut self, node: NodeId) -> Self {
        self.add_goal(node);
        self
    }

    /// Whether the directed edge `from -> to` exists.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|targets| targets.contains(&to))
    }

    /// Goal nodes, in no particular order.
    pub fn goals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.goals.iter().copied()
    }

    /// Number of distinct nodes mentioned by the start, the edges or the goals.
    pub fn node_count(&self) -> usize {
        let mut nodes: HashSet<NodeId> = HashSet::new();
        nodes.insert(self.start);
        nodes.extend(self.goals());
        for (from, targets) in &self.adjacency {
            nodes.insert(*from);
            nodes.extend(targets.iter().copied());
        }
        nodes.len()
    }
}

impl Maze for AdjacencyMaze {
    type Error = Infallible;

    fn start(&self) -> NodeId {
        self.start
    }

    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, Self::Error> {
        Ok(self.adjacency.get(&node).cloned().unwrap_or_default())
    }

    fn is_goal(&self, node: NodeId) -> bool {
        self.goals.contains(&node)
    }
}
