//! Bounded task queue and self-healing worker pool.
//!
//! - [`TaskQueue`]: blocking FIFO with a timed `get`, bounded or unbounded
//! - [`WorkerSupervisor`]: keeps a fixed number of worker threads alive,
//!   replacing any that exit, until its stop flag is set
//! - [`CancellationToken`]: the shared stop flag, polled at every
//!   suspension point (queue `get`, supervisor cycle, orchestrator poll)
//!
//! Shutdown is cooperative: a running task is never preempted. After the
//! stop flag is set, each worker exits at its next queue timeout at the
//! latest, and the supervisor joins them all before returning.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use u_hillclimb::pool::{
//!     CancellationToken, Lifecycle, PoolConfig, TaskProcessor, TaskQueue, WorkerSupervisor,
//! };
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//! impl Lifecycle for Counter {}
//! impl TaskProcessor<usize> for Counter {
//!     fn process(&self, _worker: usize, task: usize) {
//!         self.0.fetch_add(task, Ordering::SeqCst);
//!     }
//! }
//!
//! let queue: Arc<TaskQueue<usize>> = Arc::new(TaskQueue::unbounded());
//! let counter = Arc::new(Counter::default());
//! let handle = WorkerSupervisor::new(
//!     PoolConfig::default().with_workers(2),
//!     queue.clone(),
//!     counter.clone(),
//!     CancellationToken::new(),
//! )
//! .unwrap()
//! .start()
//! .unwrap();
//!
//! for i in 1..=4 {
//!     queue.put(i);
//! }
//! while counter.0.load(Ordering::SeqCst) < 10 {
//!     std::thread::sleep(std::time::Duration::from_millis(5));
//! }
//! handle.stop_and_join();
//! ```

mod cancel;
mod config;
mod queue;
mod supervisor;
mod types;

pub use cancel::CancellationToken;
pub use config::PoolConfig;
pub use queue::TaskQueue;
pub use supervisor::{SupervisorHandle, WorkerSupervisor};
pub use types::{Lifecycle, TaskProcessor, TaskSource};
