//! Batch submission and completion polling.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info, warn};

use super::config::OrchestratorConfig;
use super::report::{JobRecord, Report, ReportHeader, TableReport};
use crate::error::ConstructionError;
use crate::job::{Job, JobId, JobProcessor, JobSpec};
use crate::pool::{CancellationToken, SupervisorHandle, TaskQueue, WorkerSupervisor};

/// Records and rendered report of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One record per job, in submission order.
    pub records: Vec<JobRecord>,
    /// Output of the configured [`Report`].
    pub rendered: String,
}

/// How a call to [`Orchestrator::compute`] ended.
#[derive(Debug, Clone)]
pub enum ComputeOutcome {
    /// Every submitted job reached `Done` or `Error`.
    Completed(BatchReport),
    /// The interrupt fired before the batch finished. Jobs already running
    /// were allowed to finish; queued ones stay `Pending`.
    Interrupted { finished: usize, submitted: usize },
}

impl ComputeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ComputeOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&BatchReport> {
        match self {
            ComputeOutcome::Completed(report) => Some(report),
            ComputeOutcome::Interrupted { .. } => None,
        }
    }
}

/// Submits batches of hill-climbing jobs to a supervised worker pool.
///
/// The calling thread only enqueues and polls; every run happens on a pool
/// worker. Each [`compute`](Self::compute) call owns its own pool, which
/// is stopped and joined before the call returns on every path.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_hillclimb::hc::HcConfig;
/// use u_hillclimb::job::JobSpec;
/// use u_hillclimb::orchestrator::{Orchestrator, OrchestratorConfig};
/// use u_hillclimb::pool::PoolConfig;
///
/// let spec = JobSpec::from_names("HCBestImprovement", "Rastrigin", 2, HcConfig::default()).unwrap();
/// let config = OrchestratorConfig::default()
///     .with_pool(PoolConfig::default().with_workers(2))
///     .with_retry_interval(Duration::from_millis(10));
/// let mut orchestrator = Orchestrator::new(config, spec).unwrap();
///
/// let outcome = orchestrator.compute(3).unwrap();
/// assert_eq!(outcome.report().unwrap().records.len(), 3);
/// ```
pub struct Orchestrator {
    config: OrchestratorConfig,
    spec: JobSpec,
    report: Box<dyn Report>,
    interrupt: CancellationToken,
    jobs: BTreeMap<JobId, Arc<Job>>,
    next_id: usize,
}

impl Orchestrator {
    /// # Errors
    ///
    /// [`ConstructionError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: OrchestratorConfig, spec: JobSpec) -> Result<Self, ConstructionError> {
        config.validate().map_err(ConstructionError::InvalidConfig)?;
        Ok(Self {
            config,
            spec,
            report: Box::new(TableReport),
            interrupt: CancellationToken::new(),
            jobs: BTreeMap::new(),
            next_id: 0,
        })
    }

    /// Replaces the default [`TableReport`].
    pub fn with_report(mut self, report: impl Report + 'static) -> Self {
        self.report = Box::new(report);
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn spec(&self) -> &JobSpec {
        &self.spec
    }

    /// Token that aborts a running [`compute`](Self::compute) within one
    /// retry interval. Once cancelled it stays cancelled, so later batches
    /// are interrupted immediately.
    pub fn interrupt_handle(&self) -> CancellationToken {
        self.interrupt.clone()
    }

    /// Every job submitted so far, across batches, keyed by id.
    pub fn jobs(&self) -> &BTreeMap<JobId, Arc<Job>> {
        &self.jobs
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            algorithm: self.spec.config().policy.name().to_string(),
            objective: self.spec.objective().name().to_string(),
            variables: self.spec.config().gene_count,
            space: self.spec.space().to_string(),
        }
    }

    /// Runs `n` jobs built from the template [`JobSpec`] and waits for all of
    /// them.
    ///
    /// With a seeded template, job `k` runs with `seed + k` so a batch is
    /// reproducible while its jobs explore different starts.
    ///
    /// # Errors
    ///
    /// [`ConstructionError`] if the pool could not be started. Job
    /// failures are not errors here; they show up as `Error` records.
    pub fn compute(&mut self, n: usize) -> Result<ComputeOutcome, ConstructionError> {
        let queue: Arc<TaskQueue<Arc<Job>>> =
            Arc::new(TaskQueue::new(self.config.pool.queue_capacity));
        let stop = CancellationToken::new();
        let pool = WorkerSupervisor::new(
            self.config.pool.clone(),
            queue.clone(),
            Arc::new(JobProcessor::with_stop(stop.clone())),
            stop,
        )?
        .start()?;

        info!("submitting {n} jobs ({})", self.spec.config().policy);
        let mut batch = Vec::with_capacity(n);
        let mut submitted = true;
        for _ in 0..n {
            let job = Arc::new(self.create_job());
            self.jobs.insert(job.id(), Arc::clone(&job));
            batch.push(Arc::clone(&job));
            if !self.submit(&queue, job) {
                submitted = false;
                break;
            }
        }

        let completed = submitted && self.poll(&batch);
        shutdown(pool);

        if !completed {
            let finished = batch.iter().filter(|job| job.is_done()).count();
            warn!(
                "batch interrupted: {finished} of {} submitted jobs finished",
                batch.len()
            );
            return Ok(ComputeOutcome::Interrupted {
                finished,
                submitted: batch.len(),
            });
        }

        let records: Vec<JobRecord> = batch
            .iter()
            .enumerate()
            .map(|(index, job)| JobRecord::from_job(index, job))
            .collect();
        let rendered = self.report.render(&self.header(), &records);
        info!("batch of {} jobs complete", records.len());
        Ok(ComputeOutcome::Completed(BatchReport { records, rendered }))
    }

    fn create_job(&mut self) -> Job {
        let id = JobId(self.next_id);
        self.next_id += 1;
        let spec = match self.spec.config().seed {
            Some(seed) => self.spec.with_seed(seed.wrapping_add(id.0 as u64)),
            None => self.spec.clone(),
        };
        Job::new(id, spec)
    }

    /// Enqueues `job`, retrying while the queue is full. Returns `false` if
    /// interrupted first.
    fn submit(&self, queue: &TaskQueue<Arc<Job>>, mut job: Arc<Job>) -> bool {
        loop {
            if self.interrupt.is_cancelled() {
                return false;
            }
            match queue.put_timeout(job, self.config.retry_interval) {
                Ok(()) => return true,
                Err(rejected) => {
                    debug!("queue full, retrying {}", rejected.id());
                    job = rejected;
                }
            }
        }
    }

    /// Waits until every job in `batch` is terminal. Returns `false` if
    /// interrupted first.
    fn poll(&self, batch: &[Arc<Job>]) -> bool {
        loop {
            let finished = batch.iter().filter(|job| job.is_done()).count();
            if finished == batch.len() {
                return true;
            }
            debug!("{finished}/{} jobs finished", batch.len());
            if self.interrupt.wait_timeout(self.config.retry_interval) {
                return false;
            }
        }
    }
}

fn shutdown(pool: SupervisorHandle) {
    debug!(
        "stopping pool: {} processed, {} restarts",
        pool.processed(),
        pool.restarts()
    );
    pool.stop_and_join();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::SearchSpace;
    use crate::error::EvaluationError;
    use crate::hc::HcConfig;
    use crate::job::JobStatus;
    use crate::objective::ObjectiveFunction;
    use crate::pool::PoolConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    fn fast_config(workers: usize) -> OrchestratorConfig {
        OrchestratorConfig::default()
            .with_pool(
                PoolConfig::default()
                    .with_workers(workers)
                    .with_queue_timeout(Duration::from_millis(20))
                    .with_supervisor_interval(Duration::from_millis(10)),
            )
            .with_retry_interval(Duration::from_millis(10))
    }

    /// Constant score; each evaluation sleeps and tracks concurrency.
    #[derive(Default)]
    struct Sluggish {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl ObjectiveFunction for Sluggish {
        fn name(&self) -> &str {
            "Sluggish"
        }
        fn domain(&self) -> (f64, f64) {
            (0.0, 3.0)
        }
        fn evaluate(&self, _values: &[f64]) -> Result<f64, EvaluationError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(1));
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(1.0)
        }
    }

    fn sluggish_spec(objective: Arc<Sluggish>, max_evaluations: usize) -> JobSpec {
        let space = SearchSpace::new(0.0, 3.0, 0).unwrap();
        JobSpec::new(
            objective,
            space,
            HcConfig::default()
                .with_gene_count(1)
                .with_max_evaluations(max_evaluations),
        )
        .unwrap()
    }

    #[test]
    fn test_batch_completes() {
        let _ = env_logger::builder().is_test(true).try_init();
        let spec = JobSpec::from_names(
            "HCFirstImprovement",
            "Rastrigin",
            2,
            HcConfig::default().with_seed(1),
        )
        .unwrap();
        let mut orchestrator = Orchestrator::new(fast_config(3), spec).unwrap();

        let outcome = orchestrator.compute(5).unwrap();

        let report = outcome.report().expect("batch should complete");
        assert_eq!(report.records.len(), 5);
        for record in &report.records {
            assert_eq!(record.status, JobStatus::Done);
            assert!(record.evaluations_used.unwrap() <= 50);
        }
        assert!(report.rendered.contains("HCFirstImprovement"));
        assert!(report.rendered.contains("Rastrigin"));
        assert_eq!(orchestrator.jobs().len(), 5);
        assert!(orchestrator.jobs().values().all(|job| job.is_done()));
    }

    #[test]
    fn test_failed_jobs_do_not_stop_the_batch() {
        let spec = JobSpec::from_names(
            "HCBestImprovement",
            "SixHumpCamelBack",
            2,
            HcConfig::default().with_gene_count(3),
        )
        .unwrap();
        let mut orchestrator = Orchestrator::new(fast_config(2), spec).unwrap();

        let outcome = orchestrator.compute(4).unwrap();

        let report = outcome.report().unwrap();
        assert!(report.records.iter().all(|r| r.status == JobStatus::Error));
        assert!(report.records.iter().all(|r| r.error.is_some()));
        assert!(report.rendered.contains("| Error"));
    }

    #[test]
    fn test_seeded_batches_are_reproducible() {
        let spec = JobSpec::from_names(
            "HCBestImprovement",
            "Griewangk",
            1,
            HcConfig::default().with_seed(7),
        )
        .unwrap();
        let scores = |spec: JobSpec| -> Vec<Option<f64>> {
            let mut orchestrator = Orchestrator::new(fast_config(3), spec).unwrap();
            let outcome = orchestrator.compute(4).unwrap();
            outcome.report().unwrap().records.iter().map(|r| r.score).collect()
        };

        assert_eq!(scores(spec.clone()), scores(spec));
    }

    #[test]
    fn test_ids_continue_across_batches() {
        let spec = JobSpec::from_names("first", "Rosenbrock", 1, HcConfig::default()).unwrap();
        let mut orchestrator = Orchestrator::new(fast_config(2), spec).unwrap();

        orchestrator.compute(2).unwrap();
        let outcome = orchestrator.compute(3).unwrap();

        let ids: Vec<JobId> = outcome.report().unwrap().records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![JobId(2), JobId(3), JobId(4)]);
        assert_eq!(orchestrator.jobs().len(), 5);
    }

    #[test]
    fn test_workers_bound_concurrency() {
        let objective = Arc::new(Sluggish::default());
        let spec = sluggish_spec(objective.clone(), 5);
        let mut orchestrator = Orchestrator::new(fast_config(2), spec).unwrap();

        let outcome = orchestrator.compute(8).unwrap();

        assert!(outcome.is_completed());
        let peak = objective.peak.load(Ordering::SeqCst);
        assert!((1..=2).contains(&peak), "peak concurrency {peak}");
    }

    #[test]
    fn test_interrupt_aborts_promptly() {
        let _ = env_logger::builder().is_test(true).try_init();
        let objective = Arc::new(Sluggish::default());
        let spec = sluggish_spec(objective, 50);
        let mut orchestrator = Orchestrator::new(fast_config(1), spec).unwrap();

        let interrupt = orchestrator.interrupt_handle();
        let trigger = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            interrupt.cancel();
        });

        let start = Instant::now();
        let outcome = orchestrator.compute(10).unwrap();
        let elapsed = start.elapsed();
        trigger.join().unwrap();

        let (finished, submitted) = match outcome {
            ComputeOutcome::Interrupted { finished, submitted } => (finished, submitted),
            other => panic!("expected an interrupted batch, got {other:?}"),
        };
        assert_eq!(submitted, 10);
        assert!(finished < 10);
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

        assert_eq!(orchestrator.jobs().len(), 10);
        let statuses: Vec<JobStatus> =
            orchestrator.jobs().values().map(|job| job.status()).collect();
        assert!(!statuses.contains(&JobStatus::Running));
        assert!(statuses.contains(&JobStatus::Pending));
    }

    #[test]
    fn test_interrupted_orchestrator_stays_interrupted() {
        let spec = JobSpec::from_names("best", "Rastrigin", 1, HcConfig::default()).unwrap();
        let mut orchestrator = Orchestrator::new(fast_config(1), spec).unwrap();
        orchestrator.interrupt_handle().cancel();

        let outcome = orchestrator.compute(3).unwrap();

        assert!(matches!(
            outcome,
            ComputeOutcome::Interrupted { finished: 0, submitted: 1 }
        ));
        assert_eq!(orchestrator.jobs().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let spec = JobSpec::from_names("best", "Rastrigin", 1, HcConfig::default()).unwrap();
        let result = Orchestrator::new(fast_config(0), spec);
        assert!(matches!(result, Err(ConstructionError::InvalidConfig(_))));
    }
}
