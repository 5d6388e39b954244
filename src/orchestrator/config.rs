//! Orchestrator configuration.

use std::time::Duration;

use crate::pool::PoolConfig;

/// Configuration owned by one [`Orchestrator`](super::Orchestrator).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_hillclimb::orchestrator::OrchestratorConfig;
/// use u_hillclimb::pool::PoolConfig;
///
/// let config = OrchestratorConfig::default()
///     .with_pool(PoolConfig::default().with_workers(3))
///     .with_retry_interval(Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrchestratorConfig {
    /// Worker pool settings.
    pub pool: PoolConfig,

    /// Pause between completion checks; also the interrupt latency.
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub retry_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            retry_interval: Duration::from_secs(1),
        }
    }
}

impl OrchestratorConfig {
    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Validates the configuration, pool included.
    pub fn validate(&self) -> Result<(), String> {
        if self.retry_interval.is_zero() {
            return Err("retry_interval must be positive".into());
        }
        self.pool.validate()
    }

    /// Parses a TOML document. Durations are given in milliseconds and
    /// missing keys take their defaults.
    ///
    /// ```toml
    /// retry_interval = 250
    ///
    /// [pool]
    /// workers = 3
    /// queue_capacity = 16
    /// queue_timeout = 50
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, crate::error::ConstructionError> {
        use crate::error::ConstructionError;

        let config: Self =
            toml::from_str(text).map_err(|e| ConstructionError::InvalidConfig(e.to_string()))?;
        config.validate().map_err(ConstructionError::InvalidConfig)?;
        Ok(config)
    }
}

/// `Duration` as whole milliseconds.
#[cfg(feature = "serde")]
pub(crate) mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
