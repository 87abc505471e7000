//! Observer hook for visualization and tracing of a running search.

use crate::maze::NodeId;

/// Identifier of a search task. The root task is always 0.
pub type TaskId = usize;

/// Side-effecting callbacks invoked by search tasks.
///
/// Observers have no influence on the search; every method defaults to a no-op.
pub trait SearchObserver: Sync {
    /// `task` claimed `node` and is about to process it.
    fn on_visit(&self, _task: TaskId, _node: NodeId) {}

    /// `parent` forked `child`, seeded with `node`.
    fn on_fork(&self, _parent: TaskId, _child: TaskId, _node: NodeId) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

impl<T: SearchObserver + ?Sized> SearchObserver for &T {
    fn on_visit(&self, task: TaskId, node: NodeId) {
        (**self).on_visit(task, node);
    }

    fn on_fork(&self, parent: TaskId, child: TaskId, node: NodeId) {
        (**self).on_fork(parent, child, node);
    }
}
