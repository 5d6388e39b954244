//! Job identity, status and outcome.

use std::fmt;

use crate::error::JobError;
use crate::hc::HcResult;

/// Identifier of a job within one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JobId(pub usize);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    Error,
}

impl JobStatus {
    /// `Done` or `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        })
    }
}

/// Snapshot of a job: its status plus, once terminal, the engine result
/// (`Done`) or the captured failure (`Error`).
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub status: JobStatus,
    pub payload: Option<Result<HcResult, JobError>>,
}

impl JobOutcome {
    pub fn result(&self) -> Option<&HcResult> {
        match &self.payload {
            Some(Ok(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&JobError> {
        match &self.payload {
            Some(Err(error)) => Some(error),
            _ => None,
        }
    }
}
