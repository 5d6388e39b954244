//! Worker-pool capability contracts.

use std::time::Duration;

/// Where workers pull tasks from.
pub trait TaskSource<T>: Send + Sync {
    /// Next task, or `None` if none arrived within `timeout`.
    fn next_task(&self, timeout: Duration) -> Option<T>;
}

/// Hooks run once per worker thread, around its task loop.
pub trait Lifecycle {
    /// Runs when a worker starts, before its first task.
    fn prologue(&self, _worker: usize) {}

    /// Runs when a worker leaves its loop.
    fn epilogue(&self, _worker: usize) {}
}

/// Executes tasks handed out by a [`TaskSource`].
///
/// A panic escaping `process` kills the worker thread; the supervisor
/// replaces it on its next cycle. Processors that must not lose a worker
/// per failure catch their own panics.
pub trait TaskProcessor<T>: Lifecycle + Send + Sync {
    fn process(&self, worker: usize, task: T);
}
