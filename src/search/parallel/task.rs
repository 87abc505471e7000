//! The search task: a depth-first explorer that forks siblings for extra branches.
//!
//! A task owns a local frontier and moves through
//! `Exploring -> Forking -> Joining -> Done`:
//!
//! - **Exploring** pops a node, claims it in the shared state, records its
//!   predecessor edge and either reports it as a goal or pushes its unclaimed
//!   neighbors.
//! - **Forking** leaves exactly one node on the local frontier and seeds one
//!   child task per remaining node.
//! - **Joining** gathers the children in spawn order once the frontier is
//!   empty or the search has been stopped.
//!
//! Every task of a search runs in the single scope opened by the root, so a
//! finished task hands its own result and its children's handles to its
//! parent instead of blocking on them. Joining then walks that tree without
//! recursion once the scope has closed.
//!
//! Paths are never stitched together from child results: the winning task
//! rebuilds the whole path from the shared predecessor forest.

use crossbeam_channel::{Receiver, bounded};
use tracing::{debug, error, info, trace};

use crate::maze::{Maze, NodeId};
use crate::search::observer::{SearchObserver, TaskId};
use crate::search::parallel::scheduler::{Scheduler, TaskScope, job};
use crate::search::parallel::state::SearchState;

/// Outcome of a task and its descendants.
pub type TaskResult<E> = Result<Option<Vec<NodeId>>, E>;

/// Everything a task borrows for the duration of the search.
pub struct SearchContext<'a, M, O, S> {
    pub maze: &'a M,
    pub observer: &'a O,
    pub scheduler: &'a S,
    pub state: &'a SearchState,
    pub fork_after: usize,
}

impl<M, O, S> Clone for SearchContext<'_, M, O, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, O, S> Copy for SearchContext<'_, M, O, S> {}

/// A node waiting on a frontier, with the node that discovered it.
#[derive(Debug, Clone, Copy)]
struct Pending {
    node: NodeId,
    parent: Option<NodeId>,
}

/// What a task leaves behind when it is done exploring.
struct TaskReport<E> {
    task: TaskId,
    /// The task's own path (only if it won the goal report) or its maze error.
    outcome: TaskResult<E>,
    /// Forked children, in spawn order.
    children: Vec<ChildHandle<E>>,
}

/// Join handle of a forked child.
struct ChildHandle<E> {
    id: TaskId,
    report: Receiver<TaskReport<E>>,
}

impl<E> ChildHandle<E> {
    /// Report of the child. Only called after the search scope closed,
    /// so every child has already sent one.
    fn join(self) -> Option<TaskReport<E>> {
        match self.report.try_recv() {
            Ok(report) => Some(report),
            Err(_) => {
                error!(task = self.id, "task finished without a report");
                None
            }
        }
    }
}

/// Aggregate a finished report tree.
///
/// Reports are visited parent first and children in spawn order. The first
/// error in that order wins over any path; otherwise the first path does.
/// Every report is taken out of its channel before its parent is dropped,
/// so arbitrarily deep trees are released without recursion.
fn collect<E>(root: TaskReport<E>) -> TaskResult<E> {
    let mut found = None;
    let mut failure = None;
    let mut pending = vec![root];

    while let Some(report) = pending.pop() {
        match report.outcome {
            Ok(Some(path)) if found.is_none() => found = Some(path),
            Ok(_) => {}
            Err(e) => {
                if failure.is_none() {
                    debug!(task = report.task, "task failed");
                    failure = Some(e);
                }
            }
        }
        for child in report.children.into_iter().rev() {
            pending.extend(child.join());
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(found),
    }
}

pub struct SearchTask<'a, M, O, S> {
    id: TaskId,
    ctx: SearchContext<'a, M, O, S>,
    frontier: Vec<Pending>,
    claimed_since_fork: usize,
    local_result: Option<Vec<NodeId>>,
}

impl<'a, M, O, S> SearchTask<'a, M, O, S>
where
    M: Maze,
    O: SearchObserver,
    S: Scheduler,
{
    /// The initial task, seeded with the start node.
    pub fn root(ctx: SearchContext<'a, M, O, S>) -> Self {
        let start = ctx.state.start();
        Self::seeded(
            ctx,
            Pending {
                node: start,
                parent: None,
            },
        )
    }

    fn seeded(ctx: SearchContext<'a, M, O, S>, seed: Pending) -> Self {
        Self {
            id: ctx.state.next_task_id(),
            ctx,
            frontier: vec![seed],
            claimed_since_fork: 0,
            local_result: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Run the task and every task it forks to completion, returning the
    /// aggregate result.
    pub fn run(self) -> TaskResult<M::Error> {
        let scheduler = self.ctx.scheduler;
        let report = scheduler.scope(move |scope| self.execute(scope));

        // Joining: the scope has closed, every task is done
        collect(report)
    }

    fn execute<'scope>(mut self, scope: &dyn TaskScope<'scope>) -> TaskReport<M::Error>
    where
        'a: 'scope,
        M: 'scope,
        O: 'scope,
        S: 'scope,
    {
        let mut children = Vec::new();
        let outcome = self
            .explore(scope, &mut children)
            .map(|()| self.local_result.take());

        trace!(task = self.id, children = children.len(), "task done");
        TaskReport {
            task: self.id,
            outcome,
            children,
        }
    }

    fn explore<'scope>(
        &mut self,
        scope: &dyn TaskScope<'scope>,
        children: &mut Vec<ChildHandle<M::Error>>,
    ) -> Result<(), M::Error>
    where
        'a: 'scope,
        M: 'scope,
        O: 'scope,
        S: 'scope,
    {
        let state = self.ctx.state;

        while let Some(Pending { node, parent }) = self.frontier.pop() {
            if state.should_stop() {
                trace!(task = self.id, node, "search stopped, abandoning frontier");
                break;
            }
            if !state.claim(node) {
                continue;
            }
            if let Some(parent) = parent {
                state.record_predecessor(node, parent);
            }
            self.ctx.observer.on_visit(self.id, node);

            if self.ctx.maze.is_goal(node) {
                self.report_goal(node);
                break;
            }

            let neighbors = match self.ctx.maze.neighbors(node) {
                Ok(neighbors) => neighbors,
                Err(e) => {
                    state.abort();
                    return Err(e);
                }
            };

            // Reverse so the most preferred neighbor ends up on top
            for neighbor in neighbors.into_iter().rev() {
                if !state.is_visited(neighbor) {
                    self.frontier.push(Pending {
                        node: neighbor,
                        parent: Some(node),
                    });
                }
            }

            self.claimed_since_fork += 1;
            if self.should_fork() {
                self.fork(scope, children);
            }
        }

        Ok(())
    }

    fn should_fork(&self) -> bool {
        self.ctx.fork_after > 0
            && self.claimed_since_fork >= self.ctx.fork_after
            && self.frontier.len() > 1
    }

    /// Keep the top of the frontier and hand every other node to a new child.
    fn fork<'scope>(
        &mut self,
        scope: &dyn TaskScope<'scope>,
        children: &mut Vec<ChildHandle<M::Error>>,
    ) where
        'a: 'scope,
        M: 'scope,
        O: 'scope,
        S: 'scope,
    {
        let Some(keep) = self.frontier.pop() else {
            return;
        };

        // Next-preferred nodes sit nearest the top; spawn them first
        for seed in self.frontier.drain(..).rev() {
            let child = SearchTask::seeded(self.ctx, seed);
            let id = child.id;
            let (sender, receiver) = bounded(1);

            self.ctx.observer.on_fork(self.id, id, seed.node);
            debug!(parent = self.id, child = id, node = seed.node, "forked task");

            scope.spawn(job(move |scope| {
                let _ = sender.send(child.execute(scope));
            }));
            children.push(ChildHandle {
                id,
                report: receiver,
            });
        }

        self.frontier.push(keep);
        self.claimed_since_fork = 0;
    }

    fn report_goal(&mut self, goal: NodeId) {
        let state = self.ctx.state;
        let Some(path) = state.path_to(goal) else {
            return;
        };

        if state.try_report_goal(path.clone()) {
            info!(task = self.id, goal, length = path.len(), "goal reported");
            self.local_result = Some(path);
        } else {
            debug!(task = self.id, goal, "goal reached after another task reported");
        }
    }
}
