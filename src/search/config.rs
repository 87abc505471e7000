//! Configuration types for the parallel maze search

/// Task scheduling substrate selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerKind {
    /// Work-stealing thread pool
    #[default]
    Pool,
    /// Single-threaded: forked tasks run first-in first-out after the root
    Inline,
}

impl std::fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerKind::Pool => write!(f, "pool"),
            SchedulerKind::Inline => write!(f, "inline"),
        }
    }
}

impl std::str::FromStr for SchedulerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pool" | "parallel" | "rayon" => Ok(SchedulerKind::Pool),
            "inline" | "sequential" | "seq" => Ok(SchedulerKind::Inline),
            _ => Err(format!(
                "Unknown scheduler: '{}'. Valid options: pool, inline",
                s
            )),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of worker threads in the pool (ignored by the inline scheduler).
    pub workers: usize,
    /// Scheduler running the forked tasks.
    pub scheduler: SchedulerKind,
    /// Nodes a task must claim since its previous fork before it forks again.
    ///
    /// `1` forks at every branching point; `0` never forks, leaving a single
    /// task to run a plain depth-first search.
    pub fork_after: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            scheduler: SchedulerKind::default(),
            fork_after: 1,
        }
    }
}

impl SearchConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the worker count from an Option, keeping the default on None.
    pub fn with_workers_option(self, workers: Option<usize>) -> Self {
        match workers {
            Some(workers) => self.with_workers(workers),
            None => self,
        }
    }

    pub fn with_scheduler(mut self, scheduler: SchedulerKind) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_fork_after(mut self, fork_after: usize) -> Self {
        self.fork_after = fork_after;
        self
    }
}
