//! Fork/join scheduling substrate.
//!
//! Search tasks are written against two narrow capabilities: open a scope,
//! spawn jobs into it, and block at the end of the scope until every job
//! spawned there (transitively) has completed. A job receives the scope it
//! runs in, so forked tasks spawn their own children into the same scope
//! and stack depth never grows with the depth of the fork tree. Results
//! travel back through per-child handles (see `task.rs`).

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// A job that may borrow data living at least as long as `'scope`.
pub type Job<'scope> = Box<dyn FnOnce(&dyn TaskScope<'scope>) + Send + 'scope>;

/// Box a closure as a [`Job`].
pub fn job<'scope, F>(f: F) -> Job<'scope>
where
    F: FnOnce(&dyn TaskScope<'scope>) + Send + 'scope,
{
    Box::new(f)
}

/// Spawning side of an open scope.
pub trait TaskScope<'scope>: Sync {
    /// Submit a job. It is guaranteed to have run when the scope closes.
    fn spawn(&self, job: Job<'scope>);
}

/// Something that can run a fork/join scope.
pub trait Scheduler: Sync {
    /// Run `body`, then wait for every job spawned into the scope.
    fn scope<'scope, R, F>(&self, body: F) -> R
    where
        F: FnOnce(&dyn TaskScope<'scope>) -> R + Send,
        R: Send;
}

impl<'scope> TaskScope<'scope> for rayon::Scope<'scope> {
    fn spawn(&self, job: Job<'scope>) {
        rayon::Scope::spawn(self, move |scope: &rayon::Scope<'scope>| {
            job(scope as &dyn TaskScope<'scope>)
        });
    }
}

/// Work-stealing pool scheduler.
///
/// The thread closing a scope keeps running queued jobs until the scope
/// drains, so a single worker is enough to finish any search.
#[derive(Debug)]
pub struct PoolScheduler {
    /// Dedicated pool, or `None` for rayon's global pool.
    pool: Option<ThreadPool>,
}

impl PoolScheduler {
    /// Build a dedicated pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("amazed-worker-{}", i))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    /// Use rayon's global pool.
    pub fn global() -> Self {
        Self { pool: None }
    }

    pub fn workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Scheduler for PoolScheduler {
    fn scope<'scope, R, F>(&self, body: F) -> R
    where
        F: FnOnce(&dyn TaskScope<'scope>) -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.scope(|s: &rayon::Scope<'scope>| body(s)),
            None => rayon::scope(|s: &rayon::Scope<'scope>| body(s)),
        }
    }
}

/// Single-threaded scheduler.
///
/// Jobs are queued while the body runs and then executed first-in first-out
/// on the calling thread, including any jobs they spawn. Runs are fully
/// deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

struct InlineScope<'scope> {
    jobs: Mutex<VecDeque<Job<'scope>>>,
}

impl<'scope> InlineScope<'scope> {
    fn next_job(&self) -> Option<Job<'scope>> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl<'scope> TaskScope<'scope> for InlineScope<'scope> {
    fn spawn(&self, job: Job<'scope>) {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(job);
    }
}

impl Scheduler for InlineScheduler {
    fn scope<'scope, R, F>(&self, body: F) -> R
    where
        F: FnOnce(&dyn TaskScope<'scope>) -> R + Send,
        R: Send,
    {
        let scope = InlineScope {
            jobs: Mutex::new(VecDeque::new()),
        };
        let result = body(&scope);

        while let Some(job) = scope.next_job() {
            job(&scope as &dyn TaskScope<'scope>);
        }
        result
    }
}
