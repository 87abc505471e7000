//! Sequential path reconstruction over a predecessor forest.

use std::collections::HashMap;

use crate::maze::NodeId;

/// Walk parent pointers from `goal` back to `start` and return the path in
/// start-to-goal order.
///
/// `max_steps` bounds the number of edges followed; a well-formed forest
/// never needs more than it has entries. Returns `None` when a link is
/// missing or the bound is exceeded.
pub fn path_from_to<F>(
    start: NodeId,
    goal: NodeId,
    max_steps: usize,
    mut parent_of: F,
) -> Option<Vec<NodeId>>
where
    F: FnMut(NodeId) -> Option<NodeId>,
{
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        if path.len() > max_steps {
            return None;
        }
        current = parent_of(current)?;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// [`path_from_to`] over a plain map.
pub fn path_from_map(
    predecessors: &HashMap<NodeId, NodeId>,
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    path_from_to(start, goal, predecessors.len(), |node| {
        predecessors.get(&node).copied()
    })
}

/// Whether `path` has no repeated node.
pub fn is_simple(path: &[NodeId]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(path.len());
    path.iter().all(|node| seen.insert(*node))
}
