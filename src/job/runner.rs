//! Job state machine and the pool processor that runs jobs.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use parking_lot::Mutex;

use super::spec::JobSpec;
use super::types::{JobId, JobOutcome, JobStatus};
use crate::error::JobError;
use crate::hc::{HcProgress, HcResult, HcRunner};
use crate::pool::{CancellationToken, Lifecycle, TaskProcessor};

#[derive(Debug)]
enum JobState {
    Pending,
    Running {
        started: Instant,
        progress: Option<HcProgress>,
    },
    Done {
        result: HcResult,
        elapsed: Duration,
    },
    Error {
        error: JobError,
        elapsed: Duration,
    },
}

impl JobState {
    fn status(&self) -> JobStatus {
        match self {
            JobState::Pending => JobStatus::Pending,
            JobState::Running { .. } => JobStatus::Running,
            JobState::Done { .. } => JobStatus::Done,
            JobState::Error { .. } => JobStatus::Error,
        }
    }
}

/// One tracked hill-climbing run.
///
/// Shared as `Arc<Job>` between the orchestrator (reader) and the worker
/// that runs it (sole writer while `Running`). While running, the job
/// exposes its evaluation counter and current best score through
/// [`progress`](Self::progress); the best chromosome is only available
/// once `Done`.
#[derive(Debug)]
pub struct Job {
    id: JobId,
    spec: JobSpec,
    state: Mutex<JobState>,
}

impl Job {
    pub fn new(id: JobId, spec: JobSpec) -> Self {
        Self {
            id,
            spec,
            state: Mutex::new(JobState::Pending),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn spec(&self) -> &JobSpec {
        &self.spec
    }

    pub fn status(&self) -> JobStatus {
        self.state.lock().status()
    }

    /// Whether the job reached `Done` or `Error`.
    pub fn is_done(&self) -> bool {
        self.status().is_terminal()
    }

    /// Status plus result (`Done`) or failure (`Error`).
    pub fn result(&self) -> JobOutcome {
        let state = self.state.lock();
        let payload = match &*state {
            JobState::Done { result, .. } => Some(Ok(result.clone())),
            JobState::Error { error, .. } => Some(Err(error.clone())),
            _ => None,
        };
        JobOutcome {
            status: state.status(),
            payload,
        }
    }

    /// Evaluations used and best score so far.
    ///
    /// `None` while `Pending`, before the initial scoring, and for jobs
    /// that ended in `Error`.
    pub fn progress(&self) -> Option<HcProgress> {
        match &*self.state.lock() {
            JobState::Running { progress, .. } => *progress,
            JobState::Done { result, .. } => Some(HcProgress {
                evaluations_used: result.evaluations_used,
                best_score: result.best_score,
            }),
            _ => None,
        }
    }

    /// Wall time spent running, once terminal.
    pub fn elapsed(&self) -> Option<Duration> {
        match &*self.state.lock() {
            JobState::Done { elapsed, .. } | JobState::Error { elapsed, .. } => Some(*elapsed),
            _ => None,
        }
    }

    /// Takes the job from `Pending` to `Running`.
    ///
    /// Returns `false`, changing nothing, if the job was not `Pending`.
    pub fn begin(&self) -> bool {
        let mut state = self.state.lock();
        if !matches!(*state, JobState::Pending) {
            return false;
        }
        *state = JobState::Running {
            started: Instant::now(),
            progress: None,
        };
        debug!("{} running", self.id);
        true
    }

    /// Runs the engine for a job already in `Running` and records the
    /// terminal state. Engine errors and panics both end in `Error`.
    ///
    /// Returns the resulting status; a job that was not `Running` is left
    /// untouched.
    pub fn execute(&self) -> JobStatus {
        let status = self.status();
        if status != JobStatus::Running {
            warn!("{} cannot execute from state {status}", self.id);
            return status;
        }

        let spec = &self.spec;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            HcRunner::run_with_progress(
                spec.objective(),
                spec.space(),
                spec.config(),
                &mut |progress: HcProgress| self.record_progress(progress),
            )
        }));
        let outcome = match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(JobError::from(e)),
            Err(payload) => Err(JobError::WorkerFailure(panic_message(payload.as_ref()))),
        };
        self.finish(outcome)
    }

    /// Convenience for [`begin`](Self::begin) followed by
    /// [`execute`](Self::execute).
    pub fn run(&self) -> JobStatus {
        if !self.begin() {
            return self.status();
        }
        self.execute()
    }

    fn record_progress(&self, update: HcProgress) {
        if let JobState::Running { progress, .. } = &mut *self.state.lock() {
            *progress = Some(update);
        }
    }

    fn finish(&self, outcome: Result<HcResult, JobError>) -> JobStatus {
        let mut state = self.state.lock();
        let JobState::Running { started, .. } = &*state else {
            warn!("{} already {}, result discarded", self.id, state.status());
            return state.status();
        };
        let elapsed = started.elapsed();
        *state = match outcome {
            Ok(result) => {
                info!(
                    "{} done: score {} after {} evaluations",
                    self.id, result.best_score, result.evaluations_used
                );
                JobState::Done { result, elapsed }
            }
            Err(error) => {
                warn!("{} failed: {error}", self.id);
                JobState::Error { error, elapsed }
            }
        };
        state.status()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs jobs pulled from the pool queue.
///
/// Failures stay inside the job: an engine error or panic marks that job
/// `Error` and the worker moves on.
///
/// With a stop token attached, a job handed over after the token was
/// cancelled is left `Pending`.
#[derive(Debug, Default)]
pub struct JobProcessor {
    stop: Option<CancellationToken>,
}

impl JobProcessor {
    pub fn new() -> Self {
        Self { stop: None }
    }

    /// Refuses to start jobs once `stop` is cancelled.
    pub fn with_stop(stop: CancellationToken) -> Self {
        Self { stop: Some(stop) }
    }

    fn stopped(&self) -> bool {
        self.stop.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl Lifecycle for JobProcessor {
    fn prologue(&self, worker: usize) {
        debug!("worker {worker} ready for jobs");
    }

    fn epilogue(&self, worker: usize) {
        debug!("worker {worker} done with jobs");
    }
}

impl TaskProcessor<Arc<Job>> for JobProcessor {
    fn process(&self, worker: usize, job: Arc<Job>) {
        if self.stopped() {
            debug!("worker {worker} left {} pending: pool is stopping", job.id());
            return;
        }
        if !job.begin() {
            warn!("worker {worker} skipped {}: already {}", job.id(), job.status());
            return;
        }
        let status = job.execute();
        debug!("worker {worker} finished {} ({status})", job.id());
    }
}
