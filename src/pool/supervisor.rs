//! Self-healing worker pool.
//!
//! # Supervisor cycle
//!
//! 1. For each slot `0..W`, reap the worker if it has exited and spawn a
//!    replacement
//! 2. Sleep `supervisor_interval` (woken early by the stop flag)
//! 3. Repeat until the stop flag is set, then join every live worker
//!
//! The slot table is owned and written by the supervisor thread only.
//!
//! # Worker loop
//!
//! `next_task(queue_timeout)`; on timeout re-check the stop flag, on a
//! task call [`TaskProcessor::process`]. A task dequeued after the stop
//! flag was set is dropped unprocessed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};

use super::cancel::CancellationToken;
use super::config::PoolConfig;
use super::types::{TaskProcessor, TaskSource};
use crate::error::ConstructionError;

/// Counters shared between the supervisor, its workers and the handle.
#[derive(Debug, Default)]
struct PoolStats {
    live: AtomicUsize,
    busy: AtomicUsize,
    restarts: AtomicUsize,
    processed: AtomicUsize,
}

/// Keeps `workers` threads pulling from a [`TaskSource`].
pub struct WorkerSupervisor<T> {
    config: PoolConfig,
    source: Arc<dyn TaskSource<T>>,
    processor: Arc<dyn TaskProcessor<T>>,
    stop: CancellationToken,
    stats: Arc<PoolStats>,
}

impl<T: Send + 'static> WorkerSupervisor<T> {
    /// # Errors
    ///
    /// [`ConstructionError::InvalidConfig`] if `config` does not validate.
    pub fn new(
        config: PoolConfig,
        source: Arc<dyn TaskSource<T>>,
        processor: Arc<dyn TaskProcessor<T>>,
        stop: CancellationToken,
    ) -> Result<Self, ConstructionError> {
        config.validate().map_err(ConstructionError::InvalidConfig)?;
        Ok(Self {
            config,
            source,
            processor,
            stop,
            stats: Arc::new(PoolStats::default()),
        })
    }

    /// Starts the supervisor thread. Workers are spawned by its first
    /// cycle.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::Spawn`] if the thread could not be created.
    pub fn start(self) -> Result<SupervisorHandle, ConstructionError> {
        let stop = self.stop.clone();
        let stats = Arc::clone(&self.stats);
        let thread = thread::Builder::new()
            .name("hc-supervisor".into())
            .spawn(move || self.supervise())
            .map_err(|e| ConstructionError::Spawn(e.to_string()))?;

        Ok(SupervisorHandle {
            stop,
            stats,
            thread: Some(thread),
        })
    }

    fn supervise(self) {
        let mut slots: Vec<Option<JoinHandle<()>>> =
            (0..self.config.workers).map(|_| None).collect();
        info!("supervisor started with {} worker slots", slots.len());

        while !self.stop.is_cancelled() {
            for (slot, entry) in slots.iter_mut().enumerate() {
                if entry.as_ref().is_some_and(|handle| !handle.is_finished()) {
                    continue;
                }
                if let Some(handle) = entry.take() {
                    reap(slot, handle);
                    self.stats.restarts.fetch_add(1, Ordering::Relaxed);
                }
                if self.stop.is_cancelled() {
                    break;
                }
                match self.spawn_worker(slot) {
                    Ok(handle) => *entry = Some(handle),
                    Err(e) => error!("failed to spawn worker {slot}: {e}"),
                }
            }

            let live = slots.iter().filter(|entry| entry.is_some()).count();
            self.stats.live.store(live, Ordering::Relaxed);

            if self.stop.wait_timeout(self.config.supervisor_interval) {
                break;
            }
        }

        debug!("supervisor stopping, joining workers");
        for (slot, entry) in slots.iter_mut().enumerate() {
            if let Some(handle) = entry.take() {
                reap(slot, handle);
            }
        }
        self.stats.live.store(0, Ordering::Relaxed);
        info!("supervisor stopped");
    }

    fn spawn_worker(&self, slot: usize) -> std::io::Result<JoinHandle<()>> {
        let source = Arc::clone(&self.source);
        let processor = Arc::clone(&self.processor);
        let stop = self.stop.clone();
        let stats = Arc::clone(&self.stats);
        let timeout = self.config.queue_timeout;

        thread::Builder::new()
            .name(format!("hc-worker-{slot}"))
            .spawn(move || {
                debug!("worker {slot} started");
                processor.prologue(slot);
                while !stop.is_cancelled() {
                    let Some(task) = source.next_task(timeout) else {
                        continue;
                    };
                    if stop.is_cancelled() {
                        debug!("worker {slot} dropping a task dequeued after stop");
                        break;
                    }
                    let _busy = BusyGuard::enter(&stats.busy);
                    processor.process(slot, task);
                    stats.processed.fetch_add(1, Ordering::Relaxed);
                }
                processor.epilogue(slot);
                debug!("worker {slot} exited");
            })
    }
}

fn reap(slot: usize, handle: JoinHandle<()>) {
    if handle.join().is_err() {
        warn!("worker {slot} died from a panic");
    }
}

/// Marks a worker busy until dropped, unwinding included.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Owner of a running supervisor.
///
/// Dropping the handle sets the stop flag and joins the supervisor, which
/// in turn joins its workers.
pub struct SupervisorHandle {
    stop: CancellationToken,
    stats: Arc<PoolStats>,
    thread: Option<JoinHandle<()>>,
}

impl SupervisorHandle {
    /// Workers alive as of the last supervisor cycle.
    pub fn live_workers(&self) -> usize {
        self.stats.live.load(Ordering::Relaxed)
    }

    /// Workers currently inside [`TaskProcessor::process`].
    pub fn busy_workers(&self) -> usize {
        self.stats.busy.load(Ordering::Relaxed)
    }

    /// Number of dead workers replaced so far.
    pub fn restarts(&self) -> usize {
        self.stats.restarts.load(Ordering::Relaxed)
    }

    /// Tasks whose processing returned normally.
    pub fn processed(&self) -> usize {
        self.stats.processed.load(Ordering::Relaxed)
    }

    pub fn stop_token(&self) -> &CancellationToken {
        &self.stop
    }

    /// Sets the stop flag without waiting.
    pub fn stop(&self) {
        self.stop.cancel();
    }

    /// Sets the stop flag and waits for the supervisor and every worker to
    /// exit.
    pub fn stop_and_join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("supervisor thread panicked");
            }
        }
    }
}

impl Drop for SupervisorHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
