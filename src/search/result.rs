//! Search result types and statistics

use std::time::Duration;

use crate::maze::NodeId;
use crate::search::config::SchedulerKind;

/// Result of a search together with its statistics
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Path from the start to a goal, if one was found
    pub path: Option<Vec<NodeId>>,
    /// Statistics from the search
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves along the path (nodes minus one)
    pub fn steps(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => {
                writeln!(f, "Path found ({} steps):", path.len().saturating_sub(1))?;
                let nodes: Vec<String> = path.iter().map(|n| n.to_string()).collect();
                writeln!(f, "  {}", nodes.join(" -> "))?;
            }
            None => writeln!(f, "No path found.")?,
        }
        Ok(())
    }
}

/// Statistics from a search operation
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Scheduler that ran the tasks
    pub scheduler: SchedulerKind,
    /// Worker threads available to the scheduler
    pub workers: usize,
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Nodes claimed (and therefore processed) by some task
    pub nodes_claimed: u64,
    /// Claim attempts that lost to another task
    pub claims_lost: u64,
    /// Tasks created, root included
    pub tasks_created: u64,
}

impl SearchStatistics {
    pub fn new(scheduler: SchedulerKind, workers: usize) -> Self {
        Self {
            scheduler,
            workers,
            ..Default::default()
        }
    }

    /// Nodes claimed per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes_claimed as f64 / secs
        }
    }

    /// Fraction of claim attempts lost to contention (0.0 to 1.0)
    pub fn contention_rate(&self) -> f64 {
        let attempts = self.nodes_claimed + self.claims_lost;
        if attempts == 0 {
            0.0
        } else {
            self.claims_lost as f64 / attempts as f64
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "Scheduler: {} ({} workers)\n",
            self.scheduler, self.workers
        ));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Nodes claimed: {}\n", self.nodes_claimed));
        s.push_str(&format!("Throughput: {:.0} nodes/sec\n", self.throughput()));
        s.push_str(&format!("Tasks created: {}\n", self.tasks_created));

        if self.claims_lost > 0 {
            s.push_str(&format!(
                "Claims lost: {} ({:.2}%)\n",
                self.claims_lost,
                self.contention_rate() * 100.0
            ));
        }

        s
    }
}
