//! Channel-backed observer streaming search events to another thread.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::maze::NodeId;
use crate::search::observer::{SearchObserver, TaskId};

/// Event emitted by a search task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A task claimed a node.
    Visit { task: TaskId, node: NodeId },
    /// A task forked a child seeded with `node`.
    Fork {
        parent: TaskId,
        child: TaskId,
        node: NodeId,
    },
}

/// Observer forwarding every event into an unbounded channel.
///
/// Tasks never block on it; a dropped receiver silently discards events.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<SearchEvent>,
}

/// Create an observer and the receiving end of its events.
pub fn event_channel() -> (ChannelObserver, Receiver<SearchEvent>) {
    let (sender, receiver) = unbounded();
    (ChannelObserver { sender }, receiver)
}

impl SearchObserver for ChannelObserver {
    fn on_visit(&self, task: TaskId, node: NodeId) {
        let _ = self.sender.send(SearchEvent::Visit { task, node });
    }

    fn on_fork(&self, parent: TaskId, child: TaskId, node: NodeId) {
        let _ = self.sender.send(SearchEvent::Fork {
            parent,
            child,
            node,
        });
    }
}

/// Counts of the events drained from a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub visits: usize,
    pub forks: usize,
}

impl EventSummary {
    /// Drain every event currently queued on `receiver`.
    pub fn drain(receiver: &Receiver<SearchEvent>) -> Self {
        receiver
            .try_iter()
            .fold(Self::default(), |mut summary, event| {
                match event {
                    SearchEvent::Visit { .. } => summary.visits += 1,
                    SearchEvent::Fork { .. } => summary.forks += 1,
                }
                summary
            })
    }
}
