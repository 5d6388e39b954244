//! Batch orchestration on top of the worker pool.
//!
//! [`Orchestrator::compute`] builds `n` jobs from one [`JobSpec`](crate::job::JobSpec),
//! feeds them to a freshly started [`WorkerSupervisor`](crate::pool::WorkerSupervisor)
//! and polls until every job is terminal or the interrupt fires. The pool
//! is always stopped and joined before `compute` returns.
//!
//! A completed batch is rendered by a [`Report`]; [`TableReport`] is the
//! default.

mod config;
mod report;
mod runner;

pub use config::OrchestratorConfig;
pub use report::{JobRecord, Report, ReportHeader, TableReport};
pub use runner::{BatchReport, ComputeOutcome, Orchestrator};

#[cfg(feature = "serde")]
pub(crate) use config::duration_ms;
