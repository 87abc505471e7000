//! Top-level search entry point that owns the scheduler and shared state.

use std::time::Instant;
use tracing::{debug, info};

use crate::maze::{Maze, NodeId};
use crate::search::SearchError;
use crate::search::config::{SchedulerKind, SearchConfig};
use crate::search::observer::{NoopObserver, SearchObserver};
use crate::search::parallel::scheduler::{InlineScheduler, PoolScheduler, Scheduler};
use crate::search::parallel::state::SearchState;
use crate::search::parallel::task::{SearchContext, SearchTask};
use crate::search::result::{SearchOutcome, SearchStatistics};

#[derive(Debug)]
enum SchedulerHandle {
    Pool(PoolScheduler),
    Inline(InlineScheduler),
}

/// Fork/join maze solver.
///
/// Each call to [`Solver::search`] or [`Solver::run`] creates fresh shared
/// state, so one solver can run any number of independent searches.
pub struct Solver<'m, M, O = NoopObserver> {
    maze: &'m M,
    observer: O,
    config: SearchConfig,
    scheduler: SchedulerHandle,
}

impl<'m, M: Maze> Solver<'m, M, NoopObserver> {
    /// Create a solver, building a dedicated worker pool when the
    /// configuration asks for one.
    pub fn new(maze: &'m M, config: SearchConfig) -> Result<Self, SearchError> {
        let scheduler = match config.scheduler {
            SchedulerKind::Pool => SchedulerHandle::Pool(PoolScheduler::new(config.workers)?),
            SchedulerKind::Inline => SchedulerHandle::Inline(InlineScheduler),
        };
        Ok(Self {
            maze,
            observer: NoopObserver,
            config,
            scheduler,
        })
    }

    /// Solver running on rayon's global pool.
    pub fn with_global_pool(maze: &'m M) -> Self {
        Self {
            maze,
            observer: NoopObserver,
            config: SearchConfig::default().with_workers(rayon::current_num_threads()),
            scheduler: SchedulerHandle::Pool(PoolScheduler::global()),
        }
    }
}

impl<'m, M: Maze, O: SearchObserver> Solver<'m, M, O> {
    /// Replace the observer notified of visits and forks.
    pub fn with_observer<P: SearchObserver>(self, observer: P) -> Solver<'m, M, P> {
        Solver {
            maze: self.maze,
            observer,
            config: self.config,
            scheduler: self.scheduler,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Search for a path from `start` to any goal.
    ///
    /// Returns `Ok(None)` when every reachable node was explored without
    /// meeting a goal. Errors raised by the maze are returned unchanged.
    pub fn search(&self, start: NodeId) -> Result<Option<Vec<NodeId>>, M::Error> {
        self.run(start).map(|outcome| outcome.path)
    }

    /// Search from the maze's own start node.
    pub fn solve(&self) -> Result<SearchOutcome, M::Error> {
        self.run(self.maze.start())
    }

    /// Search from `start`, returning the path with statistics.
    pub fn run(&self, start: NodeId) -> Result<SearchOutcome, M::Error> {
        match &self.scheduler {
            SchedulerHandle::Pool(pool) => self.run_with(pool, start),
            SchedulerHandle::Inline(inline) => self.run_with(inline, start),
        }
    }

    fn workers(&self) -> usize {
        match &self.scheduler {
            SchedulerHandle::Pool(pool) => pool.workers(),
            SchedulerHandle::Inline(_) => 1,
        }
    }

    fn run_with<S: Scheduler>(
        &self,
        scheduler: &S,
        start: NodeId,
    ) -> Result<SearchOutcome, M::Error> {
        let start_time = Instant::now();
        let state = SearchState::new(start);

        debug!(
            start,
            scheduler = %self.config.scheduler,
            fork_after = self.config.fork_after,
            "starting search"
        );

        let ctx = SearchContext {
            maze: self.maze,
            observer: &self.observer,
            scheduler,
            state: &state,
            fork_after: self.config.fork_after,
        };
        let path = SearchTask::root(ctx).run()?;

        let mut statistics = SearchStatistics::new(self.config.scheduler, self.workers());
        statistics.elapsed_time = start_time.elapsed();
        statistics.nodes_claimed = state.nodes_claimed() as u64;
        statistics.claims_lost = state.claims_lost();
        statistics.tasks_created = state.tasks_created() as u64;

        info!(
            found = path.is_some(),
            nodes = statistics.nodes_claimed,
            tasks = statistics.tasks_created,
            elapsed = ?statistics.elapsed_time,
            "search finished"
        );

        Ok(SearchOutcome { path, statistics })
    }
}

/// Search `maze` from `start` on rayon's global pool with default settings.
pub fn search<M: Maze>(maze: &M, start: NodeId) -> Result<Option<Vec<NodeId>>, M::Error> {
    Solver::with_global_pool(maze).search(start)
}
