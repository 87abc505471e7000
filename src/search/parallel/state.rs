//! Shared state coordinating every task of one search.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::{error, trace};

use crate::maze::NodeId;
use crate::search::observer::TaskId;
use crate::search::path::path_from_to;

/// State shared by all tasks of a single search invocation.
///
/// Created once per top-level search and borrowed by every task it spawns;
/// independent searches never share one.
#[derive(Debug)]
pub struct SearchState {
    start: NodeId,
    /// Claimed nodes. Membership is decided by a single atomic insert.
    visited: DashSet<NodeId>,
    /// Forest edges, written only by the claimer of the child node.
    predecessors: DashMap<NodeId, NodeId>,
    /// Set after `winning_path` holds the reported path.
    goal_found: AtomicBool,
    winning_path: OnceLock<Vec<NodeId>>,
    /// Raised when a task fails; stops exploration like `goal_found`.
    aborted: AtomicBool,
    next_task_id: AtomicUsize,
    claims_lost: AtomicU64,
}

impl SearchState {
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            visited: DashSet::new(),
            predecessors: DashMap::new(),
            goal_found: AtomicBool::new(false),
            winning_path: OnceLock::new(),
            aborted: AtomicBool::new(false),
            next_task_id: AtomicUsize::new(0),
            claims_lost: AtomicU64::new(0),
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Try to claim `node`. Returns true iff this call inserted it into the
    /// visited set; exactly one caller wins each node.
    pub fn claim(&self, node: NodeId) -> bool {
        let won = self.visited.insert(node);
        if !won {
            self.claims_lost.fetch_add(1, Ordering::Relaxed);
            trace!(node, "claim lost");
        }
        won
    }

    /// Snapshot membership test, used to avoid pushing nodes already claimed.
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Record `parent` as the node that discovered `node`.
    ///
    /// Must only be called by the winner of `claim(node)`, once.
    pub fn record_predecessor(&self, node: NodeId, parent: NodeId) {
        let previous = self.predecessors.insert(node, parent);
        debug_assert!(
            previous.is_none(),
            "predecessor of node {} written twice",
            node
        );
    }

    /// Publish `path` as the answer if no goal has been reported yet.
    /// Returns true iff this call won; later paths are discarded.
    pub fn try_report_goal(&self, path: Vec<NodeId>) -> bool {
        if self.winning_path.set(path).is_ok() {
            self.goal_found.store(true, Ordering::Release);
            true
        } else {
            false
        }
    }

    pub fn is_goal_found(&self) -> bool {
        self.goal_found.load(Ordering::Acquire)
    }

    /// The reported path, once a goal has been found.
    pub fn winning_path(&self) -> Option<&[NodeId]> {
        self.winning_path.get().map(Vec::as_slice)
    }

    /// Stop every task at its next loop boundary without reporting a goal.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    /// Whether tasks should stop exploring.
    pub fn should_stop(&self) -> bool {
        self.is_goal_found() || self.is_aborted()
    }

    /// Path from the start to `goal` through the predecessor forest.
    ///
    /// `goal` must have been claimed. A broken chain means the forest
    /// invariant was violated; it is logged and yields `None`.
    pub fn path_to(&self, goal: NodeId) -> Option<Vec<NodeId>> {
        let path = path_from_to(self.start, goal, self.predecessors.len(), |node| {
            self.predecessors.get(&node).map(|parent| *parent)
        });
        if path.is_none() {
            error!(goal, start = self.start, "predecessor chain does not reach the start");
        }
        path
    }

    /// Allocate the next task id.
    pub(crate) fn next_task_id(&self) -> TaskId {
        self.next_task_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of tasks created so far, root included.
    pub fn tasks_created(&self) -> usize {
        self.next_task_id.load(Ordering::Relaxed)
    }

    pub fn nodes_claimed(&self) -> usize {
        self.visited.len()
    }

    pub fn claims_lost(&self) -> u64 {
        self.claims_lost.load(Ordering::Relaxed)
    }

    /// Copy of the predecessor forest.
    pub fn predecessors(&self) -> HashMap<NodeId, NodeId> {
        self.predecessors
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }
}
