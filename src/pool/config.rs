//! Worker-pool configuration.

use std::time::Duration;

/// Configuration for a [`WorkerSupervisor`](super::WorkerSupervisor).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_hillclimb::pool::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_workers(3)
///     .with_queue_capacity(16)
///     .with_queue_timeout(Duration::from_millis(50));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Number of workers the supervisor keeps alive.
    pub workers: usize,

    /// Task queue capacity. 0 = unbounded.
    pub queue_capacity: usize,

    /// How long a worker blocks on an empty queue before re-checking the
    /// stop flag. Bounds shutdown latency.
    #[cfg_attr(feature = "serde", serde(with = "crate::orchestrator::duration_ms"))]
    pub queue_timeout: Duration,

    /// Pause between supervisor cycles.
    #[cfg_attr(feature = "serde", serde(with = "crate::orchestrator::duration_ms"))]
    pub supervisor_interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            queue_capacity: 0,
            queue_timeout: Duration::from_millis(100),
            supervisor_interval: Duration::from_millis(100),
        }
    }
}

impl PoolConfig {
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_queue_capacity(mut self, n: usize) -> Self {
        self.queue_capacity = n;
        self
    }

    pub fn with_queue_timeout(mut self, timeout: Duration) -> Self {
        self.queue_timeout = timeout;
        self
    }

    pub fn with_supervisor_interval(mut self, interval: Duration) -> Self {
        self.supervisor_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be at least 1".into());
        }
        if self.queue_timeout.is_zero() {
            return Err("queue_timeout must be positive".into());
        }
        if self.supervisor_interval.is_zero() {
            return Err("supervisor_interval must be positive".into());
        }
        Ok(())
    }
}
